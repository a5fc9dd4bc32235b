use taffy::AlignItems;

use crate::{Color, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PaddingValues {
    pub const ZERO: PaddingValues = PaddingValues {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    pub fn all(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub fn bottom(v: f32) -> Self {
        Self {
            bottom: v,
            ..Self::ZERO
        }
    }
}

/// Layout and decoration parameters for a view. All lengths are dp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub padding: Option<PaddingValues>,
    pub margin: Option<PaddingValues>,
    pub background: Option<Color>,
    pub clip_rounded: Option<f32>,
    /// Shadow depth (dp) drawn under the view's rounded bounds.
    pub elevation: Option<f32>,
    /// Main-axis gap between children (Arrangement.spacedBy).
    pub spacing: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub align_items_container: Option<AlignItems>,
    pub test_tag: Option<&'static str>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(PaddingValues::all(v));
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding = Some(padding);
        self
    }
    /// Outer spacing, outside background and elevation.
    pub fn margin(mut self, v: f32) -> Self {
        self.margin = Some(PaddingValues::all(v));
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.clip_rounded = Some(radius);
        self
    }
    pub fn elevation(mut self, dp: f32) -> Self {
        self.elevation = Some(dp);
        self
    }
    pub fn spaced_by(mut self, gap: f32) -> Self {
        self.spacing = Some(gap);
        self
    }
    pub fn flex_shrink(mut self, v: f32) -> Self {
        self.flex_shrink = Some(v);
        self
    }
    pub fn align_items(mut self, a: AlignItems) -> Self {
        self.align_items_container = Some(a);
        self
    }
    pub fn center_horizontally(self) -> Self {
        self.align_items(AlignItems::Center)
    }
    /// Tag surfaced in the semantics output so tests can find this node.
    pub fn test_tag(mut self, tag: &'static str) -> Self {
        self.test_tag = Some(tag);
        self
    }
}

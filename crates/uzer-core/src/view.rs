use std::fmt::Write as _;
use std::rc::Rc;

use crate::{Axis, Color, ContentScale, FontWeight, ImageRes, Modifier, Rect, TextStyle, Vec2};

pub type ViewId = u64;

/// Consumes a scroll delta (px) and returns what is left over.
pub type ScrollCallback = Rc<dyn Fn(Vec2) -> Vec2>;
pub type ExtentCallback = Rc<dyn Fn(f32)>;
pub type OffsetGetter = Rc<dyn Fn() -> f32>;

#[derive(Clone)]
pub enum ViewKind {
    Surface,
    Box,
    Row,
    Column,
    /// Single-axis scroll viewport around exactly one content child.
    Scroll {
        axis: Axis,
        on_scroll: Option<ScrollCallback>,
        set_viewport_extent: Option<ExtentCallback>,
        set_content_extent: Option<ExtentCallback>,
        get_scroll_offset: Option<OffsetGetter>,
    },
    Text {
        text: String,
        style: TextStyle,
        color: Color,
    },
    Image {
        image: ImageRes,
        content_scale: ContentScale,
        content_description: Option<String>,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Scroll { axis, .. } => f.debug_struct("Scroll").field("axis", axis).finish(),
            ViewKind::Text { text, style, color } => f
                .debug_struct("Text")
                .field("text", text)
                .field("style", style)
                .field("color", color)
                .finish(),
            ViewKind::Image {
                image,
                content_scale,
                content_description,
            } => f
                .debug_struct("Image")
                .field("image", &image.id)
                .field("content_scale", content_scale)
                .field("content_description", content_description)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    /// Depth-first, pre-order walk.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.visit(f);
        }
    }

    /// Every node carrying `tag`, in tree order.
    pub fn find_tagged(&self, tag: &str) -> Vec<&View> {
        let mut out = Vec::new();
        self.visit(&mut |v| {
            if v.modifier.test_tag == Some(tag) {
                out.push(v);
            }
        });
        out
    }

    /// Text of every `Text` node, in tree order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.visit(&mut |v| {
            if let ViewKind::Text { text, .. } = &v.kind {
                out.push(text.as_str());
            }
        });
        out
    }

    /// Indented one-line-per-node rendering of the tree, stable across
    /// recompositions with the same inputs.
    pub fn outline(&self) -> String {
        fn go(v: &View, depth: usize, out: &mut String) {
            let pad = "  ".repeat(depth);
            let _ = match &v.kind {
                ViewKind::Text { text, .. } => write!(out, "{pad}Text {text:?}"),
                ViewKind::Image {
                    image,
                    content_scale,
                    content_description,
                } => write!(
                    out,
                    "{pad}Image {} {:?} {:?}",
                    image.id,
                    content_scale,
                    content_description.as_deref().unwrap_or("")
                ),
                ViewKind::Scroll { axis, .. } => write!(out, "{pad}Scroll {axis:?}"),
                other => write!(out, "{pad}{other:?}"),
            };
            if let Some(tag) = v.modifier.test_tag {
                let _ = write!(out, " #{tag}");
            }
            out.push('\n');
            for c in &v.children {
                go(c, depth + 1, out);
            }
        }
        let mut out = String::new();
        go(self, 0, &mut out);
        out
    }
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    /// Soft drop shadow for a raised surface; `elevation` is in px.
    Shadow {
        rect: Rect,
        radius: f32,
        elevation: f32,
        color: Color,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
        weight: FontWeight,
        letter_spacing: f32,
    },
    Image {
        rect: Rect,
        image: ImageRes,
        content_scale: ContentScale,
        radius: f32,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
}

#![allow(non_snake_case)]
//! Widgets, lazy lists and layout.

pub mod layout;
pub mod lazy;

pub use layout::layout_and_paint;
pub use lazy::{LazyColumn, LazyListState, LazyRow};

use uzer_core::*;

/// Container in the current surface color unless the modifier sets one.
pub fn Surface(modifier: Modifier, child: View) -> View {
    let mut modifier = modifier;
    if modifier.background.is_none() {
        modifier.background = Some(theme().surface);
    }
    View::new(0, ViewKind::Surface)
        .modifier(modifier)
        .with_children(vec![child])
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

/// Empty box; size it with the modifier.
pub fn Spacer(modifier: Modifier) -> View {
    Box(modifier)
}

/// Single-line text in `body1`, colored for the current surface.
pub fn Text(text: impl Into<String>) -> View {
    let th = theme();
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            style: th.typography.body1,
            color: th.on_surface,
        },
    )
}

pub fn Image(modifier: Modifier, image: ImageRes) -> View {
    View::new(
        0,
        ViewKind::Image {
            image,
            content_scale: ContentScale::default(),
            content_description: None,
        },
    )
    .modifier(modifier)
}

/// Raised surface with medium rounded corners and a drop shadow.
///
/// In a dark theme the surface lightens with `elevation`.
pub fn Card(elevation: f32, modifier: Modifier, child: View) -> View {
    let th = theme();
    let modifier = modifier
        .background(th.surface_at(elevation))
        .clip_rounded(th.shapes.medium)
        .elevation(elevation);
    View::new(0, ViewKind::Surface)
        .modifier(modifier)
        .with_children(vec![child])
}

/// Full-size background container. `content` receives the padding the host
/// window reserves for system UI.
pub fn Scaffold(modifier: Modifier, content: impl FnOnce(PaddingValues) -> View) -> View {
    let inner = content(window_insets());
    Surface(
        modifier.fill_max_size().background(theme().background),
        inner,
    )
}

pub trait TextExt {
    fn text_style(self, style: TextStyle) -> View;
    fn color(self, c: Color) -> View;
}

impl TextExt for View {
    fn text_style(mut self, s: TextStyle) -> View {
        if let ViewKind::Text { style, .. } = &mut self.kind {
            *style = s;
        }
        self
    }
    fn color(mut self, c: Color) -> View {
        if let ViewKind::Text { color, .. } = &mut self.kind {
            *color = c;
        }
        self
    }
}

pub trait ImageExt {
    fn content_scale(self, scale: ContentScale) -> View;
    fn content_description(self, desc: impl Into<String>) -> View;
}

impl ImageExt for View {
    fn content_scale(mut self, scale: ContentScale) -> View {
        if let ViewKind::Image { content_scale, .. } = &mut self.kind {
            *content_scale = scale;
        }
        self
    }
    fn content_description(mut self, desc: impl Into<String>) -> View {
        if let ViewKind::Image {
            content_description,
            ..
        } = &mut self.kind
        {
            *content_description = Some(desc.into());
        }
        self
    }
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_picks_up_theme() {
        let dark = Theme {
            on_surface: Color::WHITE,
            is_light: false,
            ..Theme::default()
        };
        let v = with_theme(dark, || Text("x"));
        match v.kind {
            ViewKind::Text { color, style, .. } => {
                assert_eq!(color, Color::WHITE);
                assert_eq!(style, dark.typography.body1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn card_decorates_surface() {
        let v = Card(4.0, Modifier::new().test_tag("c"), Box(Modifier::new()));
        assert_eq!(v.modifier.elevation, Some(4.0));
        assert_eq!(v.modifier.clip_rounded, Some(theme().shapes.medium));
        assert_eq!(v.modifier.background, Some(theme().surface));
        assert_eq!(v.modifier.test_tag, Some("c"));
        assert_eq!(v.children.len(), 1);
    }

    #[test]
    fn scaffold_passes_window_insets() {
        let insets = PaddingValues::all(24.0);
        let v = with_window_insets(insets, || {
            Scaffold(Modifier::new(), |p| Column(Modifier::new().padding_values(p)))
        });
        assert!(v.modifier.fill_max);
        assert_eq!(v.children[0].modifier.padding, Some(insets));
    }

    #[test]
    fn image_ext_sets_fields() {
        static PNG: ImageRes = ImageRes::new("x", &[]);
        let v = Image(Modifier::new(), PNG)
            .content_scale(ContentScale::Crop)
            .content_description("Image");
        assert_eq!(v.outline(), "Image x Crop \"Image\"\n");
    }
}

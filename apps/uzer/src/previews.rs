//! Development previews, rendered off-screen by `uzer-preview`.

use uzer_core::*;
use uzer_render::{RenderError, SoftwareRenderer};
use uzer_ui::layout_and_paint;

use crate::{UzerCard, UzerScreen, UzerSection, UzerTestTheme, uzer_theme};

pub struct Preview {
    pub name: &'static str,
    pub dark: bool,
    /// Canvas size in dp.
    pub size: (u32, u32),
    pub content: fn() -> View,
}

pub const PREVIEWS: &[Preview] = &[
    Preview {
        name: "uzer_card",
        dark: false,
        size: (170, 250),
        content: UzerCard,
    },
    Preview {
        name: "uzer_section",
        dark: false,
        size: (412, 310),
        content: UzerSection,
    },
    Preview {
        name: "uzer_screen",
        dark: false,
        size: (412, 915),
        content: UzerScreen,
    },
    Preview {
        name: "uzer_screen_dark",
        dark: true,
        size: (412, 915),
        content: UzerScreen,
    },
];

/// Compose, lay out and rasterize one preview at `density`.
pub fn render_preview(p: &Preview, density: Density) -> Result<image::RgbaImage, RenderError> {
    let w = (p.size.0 as f32 * density.scale).round() as u32;
    let h = (p.size.1 as f32 * density.scale).round() as u32;
    let mut sched = Scheduler::with_size((w, h));
    let frame = with_density(density, || {
        with_theme(uzer_theme(p.dark), || {
            sched.compose(|_| UzerTestTheme(p.dark, p.content), layout_and_paint)
        })
    });

    let mut renderer = SoftwareRenderer::new();
    renderer.configure_surface(w, h);
    renderer.frame(&frame.scene)?;
    log::debug!(
        "preview {}: {}x{} px, {} scene nodes",
        p.name,
        w,
        h,
        frame.scene.nodes.len()
    );
    renderer.to_rgba_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previews_have_unique_names() {
        let mut names: Vec<_> = PREVIEWS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PREVIEWS.len());
        assert_eq!(PREVIEWS.iter().filter(|p| p.dark).count(), 1);
    }

    #[test]
    fn card_preview_renders_at_density() {
        let card = &PREVIEWS[0];
        let img = render_preview(card, Density { scale: 2.0 }).expect("render");
        assert_eq!(img.dimensions(), (340, 500));
    }
}

//! Material baseline palette, light and dark.

use uzer_core::*;

pub const PURPLE_200: Color = Color::from_argb(0xFFBB86FC);
pub const PURPLE_500: Color = Color::from_argb(0xFF6200EE);
pub const PURPLE_700: Color = Color::from_argb(0xFF3700B3);
pub const TEAL_200: Color = Color::from_argb(0xFF03DAC5);

const DARK_BACKGROUND: Color = Color::from_argb(0xFF121212);

pub fn uzer_theme(dark: bool) -> Theme {
    if dark {
        Theme {
            background: DARK_BACKGROUND,
            surface: DARK_BACKGROUND,
            on_surface: Color::WHITE,
            on_background: Color::WHITE,
            primary: PURPLE_200,
            primary_variant: PURPLE_700,
            secondary: TEAL_200,
            on_primary: Color::BLACK,
            shadow: Color::BLACK,
            is_light: false,
            typography: Typography::default(),
            shapes: Shapes::default(),
        }
    } else {
        Theme {
            primary: PURPLE_500,
            primary_variant: PURPLE_700,
            secondary: TEAL_200,
            ..Theme::default()
        }
    }
}

/// Run `content` under the app theme.
pub fn UzerTestTheme(dark: bool, content: impl FnOnce() -> View) -> View {
    with_theme(uzer_theme(dark), content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_swaps_surface_and_content_colors() {
        let t = uzer_theme(true);
        assert!(!t.is_light);
        assert_eq!(t.surface, Color(0x12, 0x12, 0x12, 0xFF));
        assert_eq!(t.on_surface, Color::WHITE);
        assert_eq!(t.primary, PURPLE_200);
    }

    #[test]
    fn content_reads_the_theme() {
        let v = UzerTestTheme(true, || uzer_ui::Text("x"));
        match v.kind {
            ViewKind::Text { color, .. } => assert_eq!(color, Color::WHITE),
            other => panic!("unexpected {other:?}"),
        }
        // Scope ends with the call.
        assert!(theme().is_light);
    }
}

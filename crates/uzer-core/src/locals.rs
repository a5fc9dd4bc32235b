//! # Theming and locals
//!
//! Uzer uses thread-local composition locals for global UI parameters:
//!
//! - `Theme`: colors, typography and corner shapes.
//! - `Density`: dp to px scale factor.
//! - `TextScale`: user text scaling.
//! - window insets: padding reserved by the hosting window.
//! - system dark flag: whether the host prefers a dark scheme.
//!
//! Override any of these for a subtree with the matching `with_*` helper:
//!
//! ```rust
//! use uzer_core::*;
//!
//! let light = Theme {
//!     background: Color::WHITE,
//!     surface: Color::WHITE,
//!     on_surface: Color::BLACK,
//!     ..Theme::default()
//! };
//!
//! let bg = with_theme(light, || theme().background);
//! assert_eq!(bg, Color::WHITE);
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::{Color, PaddingValues};

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// density-independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts this dp value into physical pixels using the current Density.
    pub fn to_px(self) -> f32 {
        self.0 * density().scale
    }
}

/// Convenience: convert a raw dp scalar into px using current Density.
pub fn dp_to_px(dp: f32) -> f32 {
    Dp(dp).to_px()
}

/// Convert a font size in sp into px (density and text scale applied).
pub fn sp_to_px(sp: f32) -> f32 {
    dp_to_px(sp) * text_scale().0
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

fn with_local<T: Copy + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

fn local_or_default<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

/// Font weight on the usual 100..=900 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

/// Typographic style; sizes are sp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub line_height: f32,
    pub weight: FontWeight,
    pub letter_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Typography::default().body1
    }
}

/// The two text styles the toolkit exposes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typography {
    /// Section headings.
    pub h6: TextStyle,
    /// Default body text.
    pub body1: TextStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h6: TextStyle {
                font_size: 20.0,
                line_height: 26.0,
                weight: FontWeight::MEDIUM,
                letter_spacing: 0.15,
            },
            body1: TextStyle {
                font_size: 16.0,
                line_height: 24.0,
                weight: FontWeight::NORMAL,
                letter_spacing: 0.5,
            },
        }
    }
}

/// Corner radii (dp) for small, medium and large components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shapes {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl Default for Shapes {
    fn default() -> Self {
        Self {
            small: 4.0,
            medium: 4.0,
            large: 0.0,
        }
    }
}

/// Color, type and shape scheme read by widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Window background / app root.
    pub background: Color,
    /// Default container surface (cards, sheets).
    pub surface: Color,
    /// Foreground on top of `surface`.
    pub on_surface: Color,
    /// Foreground on top of `background`.
    pub on_background: Color,
    pub primary: Color,
    pub primary_variant: Color,
    pub secondary: Color,
    pub on_primary: Color,
    /// Drop shadow tint.
    pub shadow: Color,
    pub is_light: bool,
    pub typography: Typography,
    pub shapes: Shapes,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            surface: Color::WHITE,
            on_surface: Color::BLACK,
            on_background: Color::BLACK,
            primary: Color::from_hex("#6200EE"),
            primary_variant: Color::from_hex("#3700B3"),
            secondary: Color::from_hex("#03DAC6"),
            on_primary: Color::WHITE,
            shadow: Color::BLACK,
            is_light: true,
            typography: Typography::default(),
            shapes: Shapes::default(),
        }
    }
}

impl Theme {
    /// Surface color for a container raised by `elevation` dp. Dark schemes
    /// lighten raised surfaces with an `on_surface` overlay.
    pub fn surface_at(&self, elevation: f32) -> Color {
        if self.is_light || elevation <= 0.0 {
            return self.surface;
        }
        let alpha = ((4.5 * (elevation + 1.0).ln()) + 2.0) / 100.0;
        self.surface
            .composite(self.on_surface.fade(alpha.clamp(0.0, 1.0)))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}
impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TextScale(pub f32);
impl Default for TextScale {
    fn default() -> Self {
        Self(1.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct WindowInsets(PaddingValues);

#[derive(Clone, Copy, Debug, Default)]
struct SystemDark(bool);

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_local(theme, f)
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_local(density, f)
}

pub fn with_text_scale<R>(ts: TextScale, f: impl FnOnce() -> R) -> R {
    with_local(ts, f)
}

/// Padding (dp) the host window reserves for system UI.
pub fn with_window_insets<R>(insets: PaddingValues, f: impl FnOnce() -> R) -> R {
    with_local(WindowInsets(insets), f)
}

pub fn with_system_dark<R>(dark: bool, f: impl FnOnce() -> R) -> R {
    with_local(SystemDark(dark), f)
}

pub fn theme() -> Theme {
    local_or_default::<Theme>()
}

pub fn density() -> Density {
    local_or_default::<Density>()
}

pub fn text_scale() -> TextScale {
    local_or_default::<TextScale>()
}

pub fn window_insets() -> PaddingValues {
    local_or_default::<WindowInsets>().0
}

pub fn is_system_in_dark_theme() -> bool {
    local_or_default::<SystemDark>().0
}

#![allow(non_snake_case)]
//! The UzerTest screen: a vertical list of two titled sections, each a
//! horizontal row of five image cards.

pub mod previews;
pub mod res;
pub mod screen;
pub mod theme;

pub use res::R;
pub use screen::{CardArgs, SectionArgs, UzerCard, UzerScreen, UzerSection, uzer_card, uzer_section};
pub use theme::{UzerTestTheme, uzer_theme};

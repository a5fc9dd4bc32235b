pub use crate::color::Color;
pub use crate::error::AssetError;
pub use crate::geometry::{Axis, Rect, Size, Vec2};
pub use crate::locals::{
    Density, Dp, FontWeight, Shapes, TextScale, TextStyle, Theme, Typography, density, dp_to_px,
    is_system_in_dark_theme, sp_to_px, text_scale, theme, window_insets, with_density,
    with_system_dark, with_text_scale, with_theme, with_window_insets,
};
pub use crate::modifier::{Modifier, PaddingValues};
pub use crate::render_api::RenderBackend;
pub use crate::resource::{ContentScale, ImageRes};
pub use crate::runtime::{
    ComposeGuard, Frame, HitRegion, Scheduler, SemNode, key, remember_with_key,
};
pub use crate::semantics::Role;
pub use crate::view::{Scene, SceneNode, View, ViewId, ViewKind};
pub use taffy::AlignItems;

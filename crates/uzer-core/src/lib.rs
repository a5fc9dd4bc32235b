//! # View model, locals and composition
//!
//! Uzer builds its UI as a plain tree of [`View`] values that is rebuilt from
//! scratch on every frame. There is no retained widget object: a composable is
//! an ordinary function returning a `View`.
//!
//! ```rust
//! use uzer_core::*;
//!
//! fn Caption(text: &str) -> View {
//!     View::new(
//!         0,
//!         ViewKind::Text {
//!             text: text.to_string(),
//!             style: theme().typography.body1,
//!             color: theme().on_surface,
//!         },
//!     )
//! }
//!
//! assert_eq!(Caption("hi").texts(), vec!["hi"]);
//! ```
//!
//! ## Remembered state
//!
//! The few values that must survive recomposition (scroll offsets of lazy
//! lists) live in `remember_with_key` slots. Keys resolve relative to the
//! enclosing `key(..)` scopes, which lazy lists open per item.
//!
//! ```rust
//! use uzer_core::*;
//!
//! let a = key("row-0", || remember_with_key("offset", || 1.0f32));
//! let b = key("row-1", || remember_with_key("offset", || 2.0f32));
//! assert_ne!(*a, *b);
//! ```
//!
//! ## Frames
//!
//! [`Scheduler::compose`] runs the root builder, then hands the tree to a
//! layout function (see `uzer_ui::layout_and_paint`) that yields the
//! [`Scene`] display list, scroll hit regions and semantics nodes.

pub mod color;
pub mod error;
pub mod geometry;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod render_api;
pub mod resource;
pub mod runtime;
pub mod semantics;
pub mod tests;
pub mod view;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use locals::*;
pub use modifier::*;
pub use prelude::*;
pub use render_api::*;
pub use resource::*;
pub use runtime::*;
pub use semantics::*;
pub use view::*;

//! Bundled image resources and how they are scaled into a layout box.

use crate::{Rect, Size};

/// A raster asset compiled into the binary, addressed by a fixed id.
///
/// Decoding is deferred to the render backend; an id that fails to decode
/// surfaces there as [`crate::AssetError`].
#[derive(Clone, Copy)]
pub struct ImageRes {
    pub id: &'static str,
    pub bytes: &'static [u8],
}

impl ImageRes {
    pub const fn new(id: &'static str, bytes: &'static [u8]) -> Self {
        Self { id, bytes }
    }
}

impl PartialEq for ImageRes {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for ImageRes {}

impl std::fmt::Debug for ImageRes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRes")
            .field("id", &self.id)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// How image content maps onto its layout box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentScale {
    /// Scale uniformly until both axes cover the box; overflow is cropped.
    Crop,
    /// Scale uniformly until the image fits inside the box.
    #[default]
    Fit,
    /// Stretch each axis independently.
    FillBounds,
}

impl ContentScale {
    /// Where the whole source image lands for `dst`. With `Crop` the result
    /// overflows `dst` and is centered on it.
    pub fn place(self, src: Size, dst: Rect) -> Rect {
        if src.width <= 0.0 || src.height <= 0.0 {
            return dst;
        }
        let sx = dst.w / src.width;
        let sy = dst.h / src.height;
        let (sx, sy) = match self {
            ContentScale::Crop => {
                let s = sx.max(sy);
                (s, s)
            }
            ContentScale::Fit => {
                let s = sx.min(sy);
                (s, s)
            }
            ContentScale::FillBounds => (sx, sy),
        };
        let w = src.width * sx;
        let h = src.height * sy;
        Rect {
            x: dst.x + (dst.w - w) * 0.5,
            y: dst.y + (dst.h - h) * 0.5,
            w,
            h,
        }
    }
}

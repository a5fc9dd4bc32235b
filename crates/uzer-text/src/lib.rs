//! Single-line text shaping, measurement and glyph rasterization.
//!
//! A process-wide `cosmic-text` font system is created lazily on first use
//! and guarded by a mutex; callers only ever see plain metrics and owned
//! bitmaps.

use ahash::AHasher;
use cosmic_text::{
    Attrs, Buffer, CacheKey, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Weight,
};
use once_cell::sync::OnceCell;
use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::{Mutex, MutexGuard},
};

/// Average advance as a fraction of the font size, used when no font could
/// shape the text (headless hosts without system fonts).
pub const FALLBACK_ADVANCE: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey(pub u64);

#[derive(Clone, Debug)]
pub struct ShapedGlyph {
    pub key: GlyphKey,
    /// Pen position (px) from the start of the line.
    pub x: f32,
    /// Baseline (px) from the top of the line box.
    pub baseline: f32,
    pub w: f32,
    pub h: f32,
    pub bearing_x: f32,
    pub bearing_y: f32,
    pub advance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphContent {
    /// One coverage byte per pixel.
    Mask,
    /// Straight RGBA8 (color emoji).
    Color,
}

pub struct GlyphBitmap {
    pub key: GlyphKey,
    pub w: u32,
    pub h: u32,
    pub content: GlyphContent,
    pub data: Vec<u8>,
}

/// Shaping request for one line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub size_px: f32,
    pub line_height_px: f32,
    pub weight: u16,
    pub letter_spacing_px: f32,
}

struct Engine {
    fs: FontSystem,
    cache: SwashCache,
    // Map our compact key -> full cosmic_text CacheKey
    key_map: HashMap<GlyphKey, CacheKey>,
}

impl Engine {
    fn get_image(&mut self, key: CacheKey) -> Option<cosmic_text::SwashImage> {
        self.cache.get_image(&mut self.fs, key).clone()
    }
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> MutexGuard<'static, Engine> {
    let m = ENGINE.get_or_init(|| {
        let fs = FontSystem::new();
        log::debug!("text engine: {} font faces loaded", fs.db().len());
        Mutex::new(Engine {
            fs,
            cache: SwashCache::new(),
            key_map: HashMap::new(),
        })
    });
    // A panic while shaping leaves the caches usable.
    m.lock().unwrap_or_else(|e| e.into_inner())
}

// Utility: stable u64 key from a CacheKey using its Hash impl
fn key_from_cachekey(k: &CacheKey) -> GlyphKey {
    let mut h = AHasher::default();
    k.hash(&mut h);
    GlyphKey(h.finish())
}

/// Shape a single-line string (no wrapping).
pub fn shape_line(text: &str, style: LineStyle) -> Vec<ShapedGlyph> {
    if text.is_empty() || style.size_px <= 0.0 {
        return Vec::new();
    }
    let mut guard = engine();
    let eng = &mut *guard;

    let line_h = style.line_height_px.max(style.size_px);
    let mut buf = Buffer::new(&mut eng.fs, Metrics::new(style.size_px, line_h));
    {
        let attrs = Attrs::new().weight(Weight(style.weight));
        let mut b = buf.borrow_with(&mut eng.fs);
        b.set_size(None, None);
        b.set_text(text, &attrs, Shaping::Advanced, None);
        b.shape_until_scroll(true);
    }

    let mut out = Vec::new();
    let mut index = 0usize;
    for run in buf.layout_runs() {
        for g in run.glyphs {
            let phys = g.physical((0.0, run.line_y), 1.0);
            let key = key_from_cachekey(&phys.cache_key);
            eng.key_map.insert(key, phys.cache_key);

            let (w, h, left, top) = match eng.get_image(phys.cache_key) {
                Some(img) => (
                    img.placement.width as f32,
                    img.placement.height as f32,
                    img.placement.left as f32,
                    img.placement.top as f32,
                ),
                None => (0.0, 0.0, 0.0, 0.0),
            };

            out.push(ShapedGlyph {
                key,
                x: g.x + g.x_offset + index as f32 * style.letter_spacing_px,
                baseline: run.line_y,
                w,
                h,
                bearing_x: left,
                bearing_y: top,
                advance: g.w,
            });
            index += 1;
        }
    }
    out
}

/// Advance width (px) of a single line. Empty text measures zero.
pub fn measure_line(text: &str, style: LineStyle) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let glyphs = shape_line(text, style);
    match glyphs.last() {
        Some(last) => last.x + last.advance,
        None => {
            let n = text.chars().count() as f32;
            n * (style.size_px * FALLBACK_ADVANCE + style.letter_spacing_px)
        }
    }
}

/// Rasterize a previously shaped glyph. Returns owned pixels.
pub fn rasterize(key: GlyphKey) -> Option<GlyphBitmap> {
    let mut eng = engine();
    let &ck = eng.key_map.get(&key)?;

    let img = eng.get_image(ck)?;
    let content = match img.content {
        SwashContent::Mask => GlyphContent::Mask,
        SwashContent::Color => GlyphContent::Color,
        SwashContent::SubpixelMask => {
            log::warn!("subpixel glyph mask not supported; skipping glyph {:?}", key);
            return None;
        }
    };
    Some(GlyphBitmap {
        key,
        w: img.placement.width,
        h: img.placement.height,
        content,
        data: img.data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(px: f32) -> LineStyle {
        LineStyle {
            size_px: px,
            line_height_px: px * 1.5,
            weight: 400,
            letter_spacing_px: 0.0,
        }
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(measure_line("", body(16.0)), 0.0);
        assert!(shape_line("", body(16.0)).is_empty());
    }

    #[test]
    fn longer_text_is_wider() {
        let short = measure_line("Card", body(16.0));
        let long = measure_line("Card n°4 and more", body(16.0));
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn width_scales_with_size() {
        let small = measure_line("Titre", body(10.0));
        let big = measure_line("Titre", body(20.0));
        assert!(big > small * 1.5);
    }

    #[test]
    fn letter_spacing_widens_line() {
        let plain = measure_line("Un texte", body(16.0));
        let spaced = measure_line(
            "Un texte",
            LineStyle {
                letter_spacing_px: 2.0,
                ..body(16.0)
            },
        );
        assert!(spaced > plain);
    }
}

//! CPU rasterizer for [`Scene`]s.
//!
//! Paints into a premultiplied `tiny-skia` pixmap. Clips are kept as a stack
//! of anti-aliased masks, each intersected with its parent. Images are
//! decoded once per resource id and drawn through a pattern shader.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, Path, PathBuilder, Pattern, Pixmap, PixmapPaint,
    SpreadMode, Transform,
};
use uzer_core::{
    AssetError, Color, ContentScale, ImageRes, Rect, RenderBackend, Scene, SceneNode,
    Size,
};
use uzer_text::{GlyphBitmap, GlyphContent, GlyphKey, LineStyle};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("render surface has zero size")]
    EmptySurface,
}

#[derive(Default)]
pub struct SoftwareRenderer {
    target: Option<Pixmap>,
    images: HashMap<&'static str, Pixmap>,
    glyphs: HashMap<GlyphKey, Option<GlyphBitmap>>,
}

impl RenderBackend for SoftwareRenderer {
    type Error = RenderError;

    fn configure_surface(&mut self, width: u32, height: u32) {
        // Pixmap::new rejects zero sizes; a minimized window has none.
        self.target = Pixmap::new(width, height);
        log::debug!("software surface {width}x{height}");
    }

    fn frame(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let mut target = self.target.take().ok_or(RenderError::EmptySurface)?;
        let res = self.paint(&mut target, scene);
        self.target = Some(target);
        res
    }
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (u32, u32) {
        self.target
            .as_ref()
            .map(|p| (p.width(), p.height()))
            .unwrap_or((0, 0))
    }

    /// Straight (non-premultiplied) color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.target.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Frame as `0x00RRGGBB` words, row-major, for window presentation.
    pub fn pixels_0rgb(&self) -> Vec<u32> {
        let Some(pm) = &self.target else {
            return Vec::new();
        };
        pm.pixels()
            .iter()
            .map(|p| {
                let c = p.demultiply();
                ((c.red() as u32) << 16) | ((c.green() as u32) << 8) | c.blue() as u32
            })
            .collect()
    }

    pub fn to_rgba_image(&self) -> Result<image::RgbaImage, RenderError> {
        let pm = self.target.as_ref().ok_or(RenderError::EmptySurface)?;
        let mut out = Vec::with_capacity(pm.pixels().len() * 4);
        for p in pm.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image::RgbaImage::from_raw(pm.width(), pm.height(), out).ok_or(RenderError::EmptySurface)
    }

    fn paint(&mut self, target: &mut Pixmap, scene: &Scene) -> Result<(), RenderError> {
        target.fill(skia_color(scene.clear_color));
        let (w, h) = (target.width(), target.height());
        let mut clips: Vec<Option<Mask>> = Vec::new();

        for node in &scene.nodes {
            let mask = clips.last().and_then(|m| m.as_ref());
            match node {
                SceneNode::Rect {
                    rect,
                    color,
                    radius,
                } => {
                    if let Some(path) = rounded_rect(*rect, *radius) {
                        target.fill_path(
                            &path,
                            &solid(*color),
                            FillRule::Winding,
                            Transform::identity(),
                            mask,
                        );
                    }
                }
                SceneNode::Shadow {
                    rect,
                    radius,
                    elevation,
                    color,
                } => draw_shadow(target, *rect, *radius, *elevation, *color, mask),
                SceneNode::Text {
                    rect,
                    text,
                    color,
                    size,
                    weight,
                    letter_spacing,
                } => self.draw_text(
                    target,
                    *rect,
                    text,
                    *color,
                    LineStyle {
                        size_px: *size,
                        line_height_px: rect.h,
                        weight: weight.0,
                        letter_spacing_px: *letter_spacing,
                    },
                    mask,
                ),
                SceneNode::Image {
                    rect,
                    image,
                    content_scale,
                    radius,
                } => self.draw_image(target, *rect, image, *content_scale, *radius, mask)?,
                SceneNode::PushClip { rect, radius } => {
                    let next = clip_mask(w, h, mask, *rect, *radius);
                    clips.push(next);
                }
                SceneNode::PopClip => {
                    clips.pop();
                }
            }
        }
        if !clips.is_empty() {
            log::warn!("scene left {} clip(s) pushed", clips.len());
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        target: &mut Pixmap,
        rect: Rect,
        text: &str,
        color: Color,
        style: LineStyle,
        mask: Option<&Mask>,
    ) {
        for g in uzer_text::shape_line(text, style) {
            let bitmap = self
                .glyphs
                .entry(g.key)
                .or_insert_with(|| uzer_text::rasterize(g.key));
            let Some(pm) = bitmap.as_ref().and_then(|gb| glyph_pixmap(gb, color)) else {
                continue;
            };
            let x = (rect.x + g.x + g.bearing_x).round() as i32;
            let y = (rect.y + g.baseline - g.bearing_y).round() as i32;
            target.draw_pixmap(
                x,
                y,
                pm.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                mask,
            );
        }
    }

    fn draw_image(
        &mut self,
        target: &mut Pixmap,
        rect: Rect,
        image: &ImageRes,
        scale: ContentScale,
        radius: f32,
        mask: Option<&Mask>,
    ) -> Result<(), RenderError> {
        let img = match self.images.entry(image.id) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(decode(image)?),
        };
        let src = Size {
            width: img.width() as f32,
            height: img.height() as f32,
        };
        let placed = scale.place(src, rect);
        let ts = Transform::from_row(
            placed.w / src.width,
            0.0,
            0.0,
            placed.h / src.height,
            placed.x,
            placed.y,
        );
        let paint = Paint {
            shader: Pattern::new(
                img.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                ts,
            ),
            anti_alias: true,
            ..Paint::default()
        };
        // Whatever spills outside the layout box is cropped away.
        let Some(area) = placed.intersect(&rect) else {
            return Ok(());
        };
        if let Some(path) = rounded_rect(area, radius) {
            target.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), mask);
        }
        Ok(())
    }
}

fn skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.0, c.1, c.2, c.3)
}

fn solid(c: Color) -> Paint<'static> {
    let mut p = Paint::default();
    p.set_color(skia_color(c));
    p.anti_alias = true;
    p
}

fn rounded_rect(r: Rect, radius: f32) -> Option<Path> {
    let rad = radius.min(r.w * 0.5).min(r.h * 0.5).max(0.0);
    if rad <= 0.0 {
        return Some(PathBuilder::from_rect(tiny_skia::Rect::from_xywh(
            r.x, r.y, r.w, r.h,
        )?));
    }
    // Cubic approximation of a quarter circle.
    const K: f32 = 0.552_284_8;
    let (x0, y0, x1, y1) = (r.x, r.y, r.x + r.w, r.y + r.h);
    let c = rad * K;
    let mut pb = PathBuilder::new();
    pb.move_to(x0 + rad, y0);
    pb.line_to(x1 - rad, y0);
    pb.cubic_to(x1 - rad + c, y0, x1, y0 + rad - c, x1, y0 + rad);
    pb.line_to(x1, y1 - rad);
    pb.cubic_to(x1, y1 - rad + c, x1 - rad + c, y1, x1 - rad, y1);
    pb.line_to(x0 + rad, y1);
    pb.cubic_to(x0 + rad - c, y1, x0, y1 - rad + c, x0, y1 - rad);
    pb.line_to(x0, y0 + rad);
    pb.cubic_to(x0, y0 + rad - c, x0 + rad - c, y0, x0 + rad, y0);
    pb.close();
    pb.finish()
}

/// Soft shadow as stacked translucent outsets, shifted down by half the
/// elevation.
fn draw_shadow(
    target: &mut Pixmap,
    rect: Rect,
    radius: f32,
    elevation: f32,
    color: Color,
    mask: Option<&Mask>,
) {
    if elevation <= 0.0 {
        return;
    }
    let layers = elevation.ceil().clamp(1.0, 16.0) as usize;
    let step = elevation / layers as f32;
    let alpha = 0.24 / layers as f32;
    let base = rect.translate(0.0, elevation * 0.5);
    for i in 0..layers {
        let spread = step * (i as f32 + 0.5);
        if let Some(path) = rounded_rect(base.outset(spread * 0.5), radius + spread * 0.5) {
            target.fill_path(
                &path,
                &solid(color.fade(alpha)),
                FillRule::Winding,
                Transform::identity(),
                mask,
            );
        }
    }
}

fn clip_mask(w: u32, h: u32, parent: Option<&Mask>, rect: Rect, radius: f32) -> Option<Mask> {
    let path = rounded_rect(rect, radius);
    match (parent, path) {
        (Some(p), Some(path)) => {
            let mut m = p.clone();
            m.intersect_path(&path, FillRule::Winding, true, Transform::identity());
            Some(m)
        }
        (None, Some(path)) => {
            let mut m = Mask::new(w, h)?;
            m.fill_path(&path, FillRule::Winding, true, Transform::identity());
            Some(m)
        }
        // Degenerate clip: nothing shows through.
        (_, None) => Mask::new(w, h),
    }
}

fn premultiply(c: u8, a: u8) -> u8 {
    ((c as u32 * a as u32 + 127) / 255) as u8
}

fn glyph_pixmap(gb: &GlyphBitmap, color: Color) -> Option<Pixmap> {
    let mut pm = Pixmap::new(gb.w, gb.h)?;
    let data = pm.data_mut();
    match gb.content {
        GlyphContent::Mask => {
            for (px, &cov) in data.chunks_exact_mut(4).zip(&gb.data) {
                let a = premultiply(cov, color.3);
                px.copy_from_slice(&[
                    premultiply(color.0, a),
                    premultiply(color.1, a),
                    premultiply(color.2, a),
                    a,
                ]);
            }
        }
        GlyphContent::Color => {
            for (px, src) in data.chunks_exact_mut(4).zip(gb.data.chunks_exact(4)) {
                let a = src[3];
                px.copy_from_slice(&[
                    premultiply(src[0], a),
                    premultiply(src[1], a),
                    premultiply(src[2], a),
                    a,
                ]);
            }
        }
    }
    Some(pm)
}

fn decode(image: &ImageRes) -> Result<Pixmap, AssetError> {
    let rgba = image::load_from_memory(image.bytes)
        .map_err(|e| AssetError::Decode {
            id: image.id,
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut pm = Pixmap::new(width, height).ok_or(AssetError::Dimensions {
        id: image.id,
        width,
        height,
    })?;
    for (dst, src) in pm.data_mut().chunks_exact_mut(4).zip(rgba.as_raw().chunks_exact(4)) {
        let a = src[3];
        dst.copy_from_slice(&[
            premultiply(src[0], a),
            premultiply(src[1], a),
            premultiply(src[2], a),
            a,
        ]);
    }
    log::debug!("decoded image '{}' ({width}x{height})", image.id);
    Ok(pm)
}

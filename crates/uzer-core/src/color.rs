#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }

    /// Packed `0xAARRGGBB`, the way Android color resources are written.
    pub const fn from_argb(argb: u32) -> Self {
        Color(
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        )
    }

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let (r, g, b, a) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                255,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                u8::from_str_radix(&s[6..8], 16).unwrap_or(255),
            ),
            _ => (0, 0, 0, 255),
        };
        Color(r, g, b, a)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Multiply alpha by `f` (0..=1).
    pub fn fade(self, f: f32) -> Self {
        let a = (self.3 as f32 * f.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// Source-over composite of `top` onto this (opaque or not) color.
    pub fn composite(self, top: Color) -> Color {
        let ta = top.3 as f32 / 255.0;
        let ba = self.3 as f32 / 255.0;
        let out_a = ta + ba * (1.0 - ta);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let ch = |t: u8, b: u8| -> u8 {
            let v = (t as f32 * ta + b as f32 * ba * (1.0 - ta)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color(
            ch(top.0, self.0),
            ch(top.1, self.1),
            ch(top.2, self.2),
            (out_a * 255.0).round() as u8,
        )
    }
}

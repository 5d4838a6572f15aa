use crate::foundation::error::{CarouselError, CarouselResult};

pub use kurbo::{Affine, Point, Rect, Size};

/// Output canvas width in pixels. Every slide renders at this width.
pub const CANVAS_WIDTH: u32 = 1080;
/// Output canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 1350;
/// Inner horizontal padding used for text placement and wrapping.
pub const TEXT_PADDING: f64 = 80.0;
/// Inset of the logo from the canvas edges, on both axes.
pub const LOGO_MARGIN: f64 = 40.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.3;
/// Blur of the text drop shadow, in canvas `shadowBlur` units (Gaussian sigma is half of it).
pub const SHADOW_BLUR_PX: f64 = 10.0;
/// Offset of the text drop shadow.
pub const SHADOW_OFFSET: (f64, f64) = (2.0, 2.0);
/// Drop shadow color, black at 50% alpha.
pub const SHADOW_COLOR: Rgba8 = Rgba8::new(0, 0, 0, 128);
/// Legibility scrim drawn over image backgrounds, black at 30% alpha.
pub const SCRIM_COLOR: Rgba8 = Rgba8::new(0, 0, 0, 77);
/// Background used when a slide has no color of its own.
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::new(0, 0, 0, 255);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed slide canvas.
    pub const SLIDE: Self = Self {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Width over height.
    pub fn aspect_ratio(self) -> f64 {
        self.width_f64() / self.height_f64()
    }

    /// The full canvas as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }

    /// Width available to a line of text once the side padding is removed.
    pub fn text_width(self) -> f64 {
        (self.width_f64() - 2.0 * TEXT_PADDING).max(0.0)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::SLIDE
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as a hex string; `#rgb`, `#rrggbb` and `#rrggbbaa` are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> CarouselResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.is_ascii() {
            return Err(CarouselError::validation(format!(
                "invalid hex color \"{s}\""
            )));
        }

        let byte = |pair: &str| -> CarouselResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| CarouselError::validation(format!("invalid hex color \"{s}\"")))
        };

        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = byte(&c.to_string())?;
                    out[i] = v * 17;
                }
                Ok(Self::opaque(out[0], out[1], out[2]))
            }
            6 => Ok(Self::opaque(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
            )),
            8 => Ok(Self::new(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(CarouselError::validation(format!(
                "hex color must be #rgb, #rrggbb or #rrggbbaa, got \"{s}\""
            ))),
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Premultiplied RGBA8 bytes, the pixel layout used by every render surface.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Convert to the rasterizer's color type.
    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Convert a `kurbo` 0.13 affine into the rasterizer's `kurbo` version.
pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Convert a `kurbo` 0.13 rectangle into the rasterizer's `kurbo` version.
pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

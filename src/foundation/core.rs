use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};

pub use kurbo::{Circle, Point, Vec2};

/// Visible drawing area in pixels. Both dimensions are always finite and positive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    width: f64,
    height: f64,
}

#[derive(serde::Deserialize)]
struct RawViewport {
    width: f64,
    height: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = GlyphfieldError;

    fn try_from(raw: RawViewport) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl Viewport {
    /// Create a validated viewport with positive finite dimensions.
    pub fn new(width: f64, height: f64) -> GlyphfieldResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GlyphfieldError::validation(
                "viewport dimensions must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Center of the viewport.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Return `true` when `p` lies inside the viewport grown by `margin` on every side.
    pub fn contains_with_margin(self, p: Point, margin: f64) -> bool {
        p.x >= -margin
            && p.x <= self.width + margin
            && p.y >= -margin
            && p.y <= self.height + margin
    }

    /// Integer pixel size for raster surfaces (at least 1x1).
    pub fn pixel_size(self) -> (u32, u32) {
        (
            self.width.ceil().max(1.0) as u32,
            self.height.ceil().max(1.0) as u32,
        )
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Same color with alpha replaced by `opacity` in `[0, 1]`.
    pub fn with_alpha(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Alpha as a float in `[0, 1]`.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

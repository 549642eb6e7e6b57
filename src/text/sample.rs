use crate::config::TextConfig;
use crate::foundation::core::{Vec2, Viewport};
use crate::text::raster::{AlphaMask, GlyphRasterizer};

/// Points sampled from rendered text, as offsets from the bitmap center.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    /// Offsets relative to the text center, in grid order (row-major).
    pub points: Vec<Vec2>,
    /// Width of the sampled bitmap.
    pub width: u32,
    /// Height of the sampled bitmap.
    pub height: u32,
}

impl PointCloud {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when the text produced no visible point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Font size for `viewport_width`: a fixed fraction of the width, clamped.
pub fn responsive_font_size(cfg: &TextConfig, viewport_width: f64) -> f64 {
    (viewport_width * cfg.font_scale).clamp(cfg.min_font_px, cfg.max_font_px)
}

/// Sample `mask` every `stride` pixels; samples with alpha above `threshold` become points.
pub fn sample_mask(mask: &AlphaMask, stride: u32, threshold: u8) -> PointCloud {
    let stride = stride.max(1) as usize;
    let cx = f64::from(mask.width) / 2.0;
    let cy = f64::from(mask.height) / 2.0;

    let mut points = Vec::new();
    for y in (0..mask.height).step_by(stride) {
        for x in (0..mask.width).step_by(stride) {
            if mask.alpha_at(x, y) > threshold {
                points.push(Vec2::new(f64::from(x) - cx, f64::from(y) - cy));
            }
        }
    }

    PointCloud {
        points,
        width: mask.width,
        height: mask.height,
    }
}

/// Turns strings into point clouds through an offscreen [`GlyphRasterizer`].
pub struct TextSampler {
    raster: Box<dyn GlyphRasterizer>,
    cfg: TextConfig,
}

impl std::fmt::Debug for TextSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSampler")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl TextSampler {
    /// Build a sampler over `raster`.
    pub fn new(raster: Box<dyn GlyphRasterizer>, cfg: TextConfig) -> Self {
        Self { raster, cfg }
    }

    /// Sampling configuration.
    pub fn config(&self) -> &TextConfig {
        &self.cfg
    }

    /// Rasterize `text` at the responsive size for `viewport` and sample it.
    ///
    /// Unrenderable or blank text yields an empty cloud. Results are recomputed on every call
    /// and depend only on the text, the viewport width, and the configuration.
    #[tracing::instrument(level = "debug", skip(self), fields(points))]
    pub fn sample(&mut self, text: &str, viewport: Viewport) -> PointCloud {
        let font_px = responsive_font_size(&self.cfg, viewport.width());
        let Some(mask) = self.raster.rasterize(text, font_px, self.cfg.padding) else {
            tracing::debug!("no visible text");
            return PointCloud::default();
        };
        let cloud = sample_mask(&mask, self.cfg.stride, self.cfg.alpha_threshold);
        tracing::Span::current().record("points", cloud.len());
        cloud
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/sample.rs"]
mod tests;

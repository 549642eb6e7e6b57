use std::borrow::Cow;
use std::path::Path;

use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};

/// Single-channel coverage bitmap, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` alpha values.
    pub alpha: Vec<u8>,
}

impl AlphaMask {
    /// Fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Alpha at `(x, y)`; out-of-bounds reads are transparent.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Fill an axis-aligned rectangle with `value`, clipped to the mask.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, w: u32, h: u32, value: u8) {
        let x1 = x0.saturating_add(w).min(self.width);
        let y1 = y0.saturating_add(h).min(self.height);
        for y in y0.min(y1)..y1 {
            let row = (y as usize) * (self.width as usize);
            self.alpha[row + x0.min(x1) as usize..row + x1 as usize].fill(value);
        }
    }
}

/// Offscreen text surface: draws a string and hands back its coverage.
///
/// The mask is sized to the measured text box plus `padding` on every side, with the text's top
/// edge at `padding`. Returns `None` for text that produces nothing visible.
pub trait GlyphRasterizer {
    /// Rasterize `text` in bold at `font_px`.
    fn rasterize(&mut self, text: &str, font_px: f64, padding: u32) -> Option<AlphaMask>;
}

const SYSTEM_STACK: &str = "system-ui, -apple-system, BlinkMacSystemFont, sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct MaskBrush;

/// Rasterizer backed by Parley shaping and the `vello_cpu` glyph renderer.
pub struct ParleyRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MaskBrush>,
    family: Option<String>,
}

impl Default for ParleyRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyRasterizer {
    /// Use the system sans-serif stack.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
        }
    }

    /// Register a font file and use its first family.
    pub fn with_font_file(path: impl AsRef<Path>) -> GlyphfieldResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            GlyphfieldError::text(format!("read font '{}': {e}", path.display()))
        })?;
        Self::with_font_bytes(bytes)
    }

    /// Register in-memory font bytes and use their first family.
    pub fn with_font_bytes(bytes: Vec<u8>) -> GlyphfieldResult<Self> {
        let mut this = Self::new();
        let families = this
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| GlyphfieldError::text("no font families registered from font bytes"))?;
        let name = this
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GlyphfieldError::text("registered font family has no name"))?
            .to_string();
        this.family = Some(name);
        Ok(this)
    }

    fn layout(&mut self, text: &str, font_px: f32) -> parley::Layout<MaskBrush> {
        let stack = match &self.family {
            Some(name) => Cow::Owned(name.clone()),
            None => Cow::Borrowed(SYSTEM_STACK),
        };
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(stack),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(MaskBrush));

        let mut layout: parley::Layout<MaskBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl GlyphRasterizer for ParleyRasterizer {
    fn rasterize(&mut self, text: &str, font_px: f64, padding: u32) -> Option<AlphaMask> {
        if text.trim().is_empty() || !(font_px > 0.0) {
            return None;
        }
        let layout = self.layout(text, font_px as f32);
        let text_w = f64::from(layout.width());
        if !(text_w > 0.0) {
            tracing::debug!(text, "text measured zero width");
            return None;
        }
        let text_h = f64::from(layout.height()).max(font_px);

        let pad = f64::from(padding);
        let w = (text_w.ceil() + 2.0 * pad) as u32;
        let h = (text_h.ceil() + 2.0 * pad) as u32;
        let (Ok(w16), Ok(h16)) = (u16::try_from(w), u16::try_from(h)) else {
            tracing::warn!(text, w, h, "text bitmap exceeds surface limits");
            return None;
        };

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((pad, pad)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                // Parley and vello_cpu share the reference-counted font handle.
                let font: vello_cpu::peniko::FontData = run.run().font().clone();
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        let alpha = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        Some(AlphaMask {
            width: w,
            height: h,
            alpha,
        })
    }
}

/// Deterministic font-free rasterizer: every visible character is a solid block.
///
/// Blocks are `0.6 * font_px` wide and `font_px` tall with a `0.1 * font_px` gap; whitespace
/// advances without drawing. Useful where installed fonts must not influence results.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn rasterize(&mut self, text: &str, font_px: f64, padding: u32) -> Option<AlphaMask> {
        if text.trim().is_empty() || !(font_px >= 1.0) {
            return None;
        }
        let glyph_w = (font_px * 0.6).round().max(1.0) as u32;
        let gap = (font_px * 0.1).round() as u32;
        let glyph_h = font_px.round() as u32;
        let chars = text.chars().count() as u32;
        let text_w = chars * glyph_w + chars.saturating_sub(1) * gap;

        let mut mask = AlphaMask::new(text_w + 2 * padding, glyph_h + 2 * padding);
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let x = padding + (i as u32) * (glyph_w + gap);
            mask.fill_rect(x, padding, glyph_w, glyph_h, 255);
        }
        Some(mask)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;

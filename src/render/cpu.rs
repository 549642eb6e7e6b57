use kurbo::{PathEl, Shape};

use crate::foundation::core::{Circle, Point, Rgba8};
use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};
use crate::render::surface::Surface;

const CIRCLE_TOLERANCE: f64 = 0.1;

/// [`Surface`] backed by a `vello_cpu` render context.
///
/// Draw calls are recorded and rasterized when the frame is read back.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Allocate a transparent surface. Both dimensions must fit in `1..=u16::MAX`.
    pub fn new(width: u32, height: u32) -> GlyphfieldResult<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(GlyphfieldError::render(format!(
                "surface {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        };
        if w == 0 || h == 0 {
            return Err(GlyphfieldError::render("surface dimensions must be > 0"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }

    /// Rasterize everything drawn since the last clear into straight-alpha RGBA8 bytes.
    pub fn to_rgba8(&mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        let mut rgba = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut rgba);
        rgba
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn clear(&mut self, color: Rgba8) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if color.a == 0 {
            return;
        }
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    fn fill_circle(&mut self, circle: Circle, color: Rgba8) {
        if color.a == 0 || !(circle.radius > 0.0) {
            return;
        }
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&circle_to_cpu(circle));
    }
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn circle_to_cpu(circle: Circle) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(CIRCLE_TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Convert premultiplied RGBA8 to straight alpha, as PNG expects.
pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

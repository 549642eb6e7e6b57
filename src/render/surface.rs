use crate::foundation::color::parse_css_color;
use crate::foundation::core::{Circle, Rgba8};
use crate::particles::particle::Particle;

/// Particle color used when the theme variable is missing or unparseable.
pub const FALLBACK_PARTICLE_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 153);

/// 2D drawing target for one frame.
pub trait Surface {
    /// Pixel size `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Discard everything drawn and fill with `color`.
    fn clear(&mut self, color: Rgba8);

    /// Fill `circle` with `color` (straight alpha).
    fn fill_circle(&mut self, circle: Circle, color: Rgba8);
}

/// Colors one frame is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Base particle color; alpha is replaced per particle.
    pub particle: Rgba8,
    /// Clear color.
    pub background: Rgba8,
}

impl Palette {
    /// Resolve CSS variable values, falling back (with a warning) when they do not parse.
    pub fn from_css(particle: &str, background: &str) -> Self {
        let particle = parse_css_color(particle).unwrap_or_else(|e| {
            tracing::warn!(value = particle, error = %e, "particle color unusable, using fallback");
            FALLBACK_PARTICLE_COLOR
        });
        let background = parse_css_color(background).unwrap_or_else(|e| {
            tracing::warn!(value = background, error = %e, "background color unusable, clearing to transparent");
            Rgba8::transparent()
        });
        Self {
            particle,
            background,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            particle: FALLBACK_PARTICLE_COLOR,
            background: Rgba8::transparent(),
        }
    }
}

/// Clear `surface` and draw every particle as a filled circle.
///
/// Radius is the particle size; alpha is the particle opacity. Particles are painted in index
/// order whatever their ownership, so formations mid-morph appear where the tweens put them.
pub fn paint_particles(surface: &mut dyn Surface, particles: &[Particle], palette: Palette) {
    surface.clear(palette.background);
    for p in particles {
        if p.opacity <= 0.0 || p.size <= 0.0 {
            continue;
        }
        surface.fill_circle(
            Circle::new(p.pos, p.size),
            palette.particle.with_alpha(p.opacity),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

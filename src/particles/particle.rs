use crate::config::ParticleConfig;
use crate::foundation::core::{Point, Vec2, Viewport};
use crate::particles::noise::noise;

/// Who currently writes a particle's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ownership {
    /// Physics integration drifts the particle.
    #[default]
    Free,
    /// The tween engine drives it; physics leaves it alone.
    Animating,
}

/// One particle record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Screen-space position.
    pub pos: Point,
    /// Velocity in pixels per frame, each axis bounded by the configured cap.
    pub vel: Vec2,
    /// Formation target, present only while part of a text formation.
    pub target: Option<Point>,
    /// Current position owner.
    pub owner: Ownership,
    /// Radius.
    pub size: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Accumulating noise phase per axis.
    pub noise_phase: Vec2,
}

impl Particle {
    /// Return `true` when physics integration applies.
    pub fn is_free(&self) -> bool {
        self.owner == Ownership::Free
    }

    /// One damped-noise integration step.
    ///
    /// No-op for particles owned by the tween engine.
    pub fn integrate(&mut self, dt_ms: f64, cfg: &ParticleConfig, viewport: Viewport) {
        if !self.is_free() {
            return;
        }

        self.noise_phase.x += dt_ms * cfg.noise_rate;
        self.noise_phase.y += dt_ms * cfg.noise_rate;

        self.vel.x += noise(self.noise_phase.x) * cfg.noise_gain;
        self.vel.y += noise(self.noise_phase.y) * cfg.noise_gain;

        self.vel.x *= cfg.damping;
        self.vel.y *= cfg.damping;

        let cap = cfg.max_velocity;
        self.vel.x = self.vel.x.clamp(-cap, cap);
        self.vel.y = self.vel.y.clamp(-cap, cap);

        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;

        self.wrap(viewport, cfg.wrap_margin);
    }

    /// Toroidal wrap: leaving the viewport by more than `margin` re-enters at the opposite margin.
    ///
    /// Velocity is untouched.
    pub fn wrap(&mut self, viewport: Viewport, margin: f64) {
        if self.pos.x < -margin {
            self.pos.x = viewport.width() + margin;
        } else if self.pos.x > viewport.width() + margin {
            self.pos.x = -margin;
        }
        if self.pos.y < -margin {
            self.pos.y = viewport.height() + margin;
        } else if self.pos.y > viewport.height() + margin {
            self.pos.y = -margin;
        }
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::tween::{Animatable, Prop};
use crate::config::ParticleConfig;
use crate::foundation::core::{Point, Vec2, Viewport};
use crate::particles::particle::{Ownership, Particle};

/// Owns every particle and their free-drift physics.
///
/// The store only grows: formations that need more points than there are particles append new
/// ones, and nothing ever removes them.
#[derive(Debug)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    viewport: Viewport,
    cfg: ParticleConfig,
    rng: StdRng,
}

impl ParticleStore {
    /// Create `cfg.count` randomized particles inside `viewport`.
    pub fn new(viewport: Viewport, cfg: ParticleConfig, seed: u64) -> Self {
        let mut store = Self {
            particles: Vec::with_capacity(cfg.count),
            viewport,
            rng: StdRng::seed_from_u64(seed),
            cfg,
        };
        store.grow(store.cfg.count);
        store
    }

    fn spawn(&mut self) -> Particle {
        let cfg = &self.cfg;
        let rng = &mut self.rng;
        let half = cfg.velocity_spread / 2.0;
        Particle {
            pos: Point::new(
                rng.random_range(0.0..=self.viewport.width()),
                rng.random_range(0.0..=self.viewport.height()),
            ),
            vel: Vec2::new(
                rng.random_range(-half..=half),
                rng.random_range(-half..=half),
            ),
            target: None,
            owner: Ownership::Free,
            size: cfg.size.sample(rng),
            opacity: cfg.opacity.sample(rng),
            noise_phase: Vec2::new(
                rng.random_range(0.0..=cfg.noise_phase_span),
                rng.random_range(0.0..=cfg.noise_phase_span),
            ),
        }
    }

    /// Advance every free particle by one step; `dt_ms` drives the noise phase.
    pub fn step(&mut self, dt_ms: f64) {
        let viewport = self.viewport;
        for p in &mut self.particles {
            p.integrate(dt_ms, &self.cfg, viewport);
        }
    }

    /// Append fresh particles until the store holds at least `count`. Never shrinks.
    pub fn grow(&mut self, count: usize) {
        if count <= self.particles.len() {
            return;
        }
        self.particles.reserve(count - self.particles.len());
        while self.particles.len() < count {
            let p = self.spawn();
            self.particles.push(p);
        }
        tracing::trace!(len = self.particles.len(), "particle store grew");
    }

    /// Hand particle `index` to the tween engine, optionally with a formation target.
    pub fn claim(&mut self, index: usize, target: Option<Point>) {
        if let Some(p) = self.particles.get_mut(index) {
            p.owner = Ownership::Animating;
            p.target = target;
        }
    }

    /// Return one particle to free drift, dropping its target. Velocity is kept.
    pub fn release(&mut self, index: usize) {
        if let Some(p) = self.particles.get_mut(index) {
            p.owner = Ownership::Free;
            p.target = None;
        }
    }

    /// Clear every target, return all particles to free drift and reseed their velocity.
    pub fn release_all_targets(&mut self) {
        let half = self.cfg.velocity_spread / 2.0;
        for p in &mut self.particles {
            p.target = None;
            p.owner = Ownership::Free;
            p.vel = Vec2::new(
                self.rng.random_range(-half..=half),
                self.rng.random_range(-half..=half),
            );
        }
    }

    /// Update bounds. Positions are left alone; drifting particles wrap on their next step.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current bounds.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Physics parameters.
    pub fn config(&self) -> &ParticleConfig {
        &self.cfg
    }

    /// All particles in index order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particle at `index`.
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Mutable particle at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Return `true` when the store holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles currently under physics.
    pub fn free_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_free()).count()
    }
}

impl Animatable for ParticleStore {
    fn prop(&self, index: usize, prop: Prop) -> Option<f64> {
        let p = self.particles.get(index)?;
        Some(match prop {
            Prop::X => p.pos.x,
            Prop::Y => p.pos.y,
            Prop::Opacity => p.opacity,
            Prop::Size => p.size,
        })
    }

    fn set_prop(&mut self, index: usize, prop: Prop, value: f64) {
        let Some(p) = self.particles.get_mut(index) else {
            return;
        };
        match prop {
            Prop::X => p.pos.x = value,
            Prop::Y => p.pos.y = value,
            Prop::Opacity => p.opacity = value.clamp(0.0, 1.0),
            Prop::Size => p.size = value.max(0.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/store.rs"]
mod tests;

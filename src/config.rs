//! Site configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a complete configuration. Values
//! are validated once at load time; runtime code assumes a validated config.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};
use crate::site::router::Route;

/// Closed numeric interval `[min, max]` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower bound.
    pub min: f64,
    /// Upper bound (>= `min`).
    pub max: f64,
}

impl Span {
    /// Build a span.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw a uniform sample.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    /// Return `true` when `v` lies inside the span.
    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn validate(self, name: &str) -> GlyphfieldResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(GlyphfieldError::validation(format!(
                "{name} must be a finite range with min <= max"
            )));
        }
        Ok(())
    }
}

/// Free-drift physics and particle appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Initial particle count.
    pub count: usize,
    /// Per-axis velocity cap, in pixels per frame.
    pub max_velocity: f64,
    /// Velocity multiplier applied every step.
    pub damping: f64,
    /// Distance outside the viewport before a particle wraps to the other side.
    pub wrap_margin: f64,
    /// Scale applied to the noise sample before adding it to velocity.
    pub noise_gain: f64,
    /// Noise phase advance per elapsed millisecond.
    pub noise_rate: f64,
    /// Initial/reseeded velocity is uniform in `[-spread/2, spread/2]`.
    pub velocity_spread: f64,
    /// Upper bound of the random initial noise phase.
    pub noise_phase_span: f64,
    /// Radius range.
    pub size: Span,
    /// Opacity range.
    pub opacity: Span,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 600,
            max_velocity: 0.5,
            damping: 0.99,
            wrap_margin: 10.0,
            noise_gain: 0.01,
            noise_rate: 0.001,
            velocity_spread: 0.3,
            noise_phase_span: 1000.0,
            size: Span::new(1.0, 3.0),
            opacity: Span::new(0.3, 0.8),
        }
    }
}

/// Offscreen text rasterization and sampling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Sampling grid stride in pixels.
    pub stride: u32,
    /// A sample becomes a point when its alpha is strictly greater than this.
    pub alpha_threshold: u8,
    /// Padding added around the measured text box on every side.
    pub padding: u32,
    /// Font size as a fraction of viewport width.
    pub font_scale: f64,
    /// Smallest responsive font size.
    pub min_font_px: f64,
    /// Largest responsive font size.
    pub max_font_px: f64,
    /// Font file to use instead of the system sans-serif stack.
    pub font_path: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            stride: 4,
            alpha_threshold: 128,
            padding: 20,
            font_scale: 0.12,
            min_font_px: 32.0,
            max_font_px: 120.0,
            font_path: None,
        }
    }
}

/// Content fade durations for one transition kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeTimings {
    /// Fade-out duration in seconds.
    pub fade_out: f64,
    /// Fade-in duration in seconds.
    pub fade_in: f64,
}

/// Timing of a batch of staggered particle tweens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchTiming {
    /// Per-particle tween duration in seconds.
    pub duration: f64,
    /// Maximum random start delay in seconds.
    pub stagger: f64,
    /// Easing applied to every tween in the batch.
    pub ease: Ease,
}

/// What the formation does once the text has formed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HoldMode {
    /// Keep breathing as the page header until the next navigation.
    Header,
    /// Breathe for `hold_secs`, then disperse before the page switch.
    Brief {
        /// Hold duration in seconds.
        hold_secs: f64,
    },
}

/// Idle motion around held targets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Maximum offset from the assigned target, per axis.
    pub amplitude: f64,
    /// Duration range of one breathing tween, in seconds.
    pub period: Span,
}

/// Page transition choreography.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Fades used by the full (text-morph) transition.
    pub full: FadeTimings,
    /// Fades used by the quick transition back home.
    pub quick: FadeTimings,
    /// Vertical slide of page content while fading.
    pub slide_px: f64,
    /// Easing for content fade-out.
    pub fade_out_ease: Ease,
    /// Easing for content fade-in.
    pub fade_in_ease: Ease,
    /// Particles flying to the text formation.
    pub morph: BatchTiming,
    /// Particles scattering back to free drift.
    pub disperse: BatchTiming,
    /// Hold behaviour after the morph.
    pub hold: HoldMode,
    /// Breathing motion while holding.
    pub breathing: BreathingConfig,
    /// Opacity that unassigned particles fade toward during a morph.
    pub extra_opacity: f64,
    /// Opacity range of particles in a formation.
    pub morph_opacity: Span,
    /// Radius range of particles in a formation.
    pub morph_size: Span,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            full: FadeTimings {
                fade_out: 0.3,
                fade_in: 0.4,
            },
            quick: FadeTimings {
                fade_out: 0.25,
                fade_in: 0.3,
            },
            slide_px: 20.0,
            fade_out_ease: Ease::InCubic,
            fade_in_ease: Ease::OutCubic,
            morph: BatchTiming {
                duration: 0.8,
                stagger: 0.3,
                ease: Ease::OutCubic,
            },
            disperse: BatchTiming {
                duration: 0.6,
                stagger: 0.2,
                ease: Ease::InOutCubic,
            },
            hold: HoldMode::Header,
            breathing: BreathingConfig {
                amplitude: 2.0,
                period: Span::new(1.5, 2.5),
            },
            extra_opacity: 0.1,
            morph_opacity: Span::new(0.7, 1.0),
            morph_size: Span::new(1.5, 2.5),
        }
    }
}

/// CSS variables for one theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeVars {
    /// Value of `--particle-color`.
    pub particle_color: String,
    /// Value of `--bg-color`.
    pub background: String,
}

/// Theme persistence and palettes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key under which the preference is stored.
    pub storage_key: String,
    /// Dark palette.
    pub dark: ThemeVars,
    /// Light palette.
    pub light: ThemeVars,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "portfolio-theme".to_owned(),
            dark: ThemeVars {
                particle_color: "rgba(255, 255, 255, 0.6)".to_owned(),
                background: "#0a0a0f".to_owned(),
            },
            light: ThemeVars {
                particle_color: "rgba(20, 20, 30, 0.6)".to_owned(),
                background: "#f5f5f0".to_owned(),
            },
        }
    }
}

/// One page container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Route the page belongs to.
    pub route: Route,
    /// Display title the particles spell out on arrival.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether the page has a content element to fade.
    #[serde(default = "yes")]
    pub has_content: bool,
}

fn yes() -> bool {
    true
}

fn default_pages() -> Vec<PageConfig> {
    Route::ALL
        .iter()
        .map(|&route| PageConfig {
            route,
            title: route.default_title().map(str::to_owned),
            has_content: true,
        })
        .collect()
}

/// Complete site configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Seed for every random choice (placement, shuffles, staggers).
    pub seed: u64,
    /// Particle physics and appearance.
    pub particles: ParticleConfig,
    /// Text rasterization.
    pub text: TextConfig,
    /// Transition choreography.
    pub transitions: TransitionConfig,
    /// Theme storage and palettes.
    pub theme: ThemeConfig,
    /// Page containers.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            particles: ParticleConfig::default(),
            text: TextConfig::default(),
            transitions: TransitionConfig::default(),
            theme: ThemeConfig::default(),
            pages: default_pages(),
        }
    }
}

impl SiteConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphfieldResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            GlyphfieldError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_slice(bytes: &[u8]) -> GlyphfieldResult<Self> {
        let cfg: Self =
            serde_json::from_slice(bytes).map_err(|e| GlyphfieldError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check static invariants.
    pub fn validate(&self) -> GlyphfieldResult<()> {
        let p = &self.particles;
        if !(p.max_velocity > 0.0) {
            return Err(GlyphfieldError::validation("particles.max_velocity must be > 0"));
        }
        if !(p.damping > 0.0 && p.damping <= 1.0) {
            return Err(GlyphfieldError::validation(
                "particles.damping must be in (0, 1]",
            ));
        }
        if !(p.wrap_margin >= 0.0) {
            return Err(GlyphfieldError::validation("particles.wrap_margin must be >= 0"));
        }
        if !(p.velocity_spread >= 0.0) || !(p.noise_phase_span >= 0.0) {
            return Err(GlyphfieldError::validation(
                "particles.velocity_spread and noise_phase_span must be >= 0",
            ));
        }
        p.size.validate("particles.size")?;
        p.opacity.validate("particles.opacity")?;

        let t = &self.text;
        if t.stride == 0 {
            return Err(GlyphfieldError::validation("text.stride must be >= 1"));
        }
        if !(t.font_scale > 0.0) || !(t.min_font_px > 0.0) || t.min_font_px > t.max_font_px {
            return Err(GlyphfieldError::validation(
                "text font sizing must be positive with min_font_px <= max_font_px",
            ));
        }

        let tr = &self.transitions;
        for (name, secs) in [
            ("transitions.full.fade_out", tr.full.fade_out),
            ("transitions.full.fade_in", tr.full.fade_in),
            ("transitions.quick.fade_out", tr.quick.fade_out),
            ("transitions.quick.fade_in", tr.quick.fade_in),
            ("transitions.morph.duration", tr.morph.duration),
            ("transitions.disperse.duration", tr.disperse.duration),
        ] {
            if !(secs > 0.0) {
                return Err(GlyphfieldError::validation(format!("{name} must be > 0")));
            }
        }
        if !(tr.morph.stagger >= 0.0) || !(tr.disperse.stagger >= 0.0) {
            return Err(GlyphfieldError::validation("stagger must be >= 0"));
        }
        if let HoldMode::Brief { hold_secs } = tr.hold
            && !(hold_secs >= 0.0)
        {
            return Err(GlyphfieldError::validation(
                "transitions.hold.hold_secs must be >= 0",
            ));
        }
        tr.breathing.period.validate("transitions.breathing.period")?;
        if !(tr.breathing.period.min > 0.0) {
            return Err(GlyphfieldError::validation(
                "transitions.breathing.period must be > 0",
            ));
        }
        if !tr.breathing.amplitude.is_finite() {
            return Err(GlyphfieldError::validation(
                "transitions.breathing.amplitude must be finite",
            ));
        }
        tr.morph_opacity.validate("transitions.morph_opacity")?;
        tr.morph_size.validate("transitions.morph_size")?;

        for (i, page) in self.pages.iter().enumerate() {
            if self.pages[..i].iter().any(|p| p.route == page.route) {
                return Err(GlyphfieldError::validation(format!(
                    "duplicate page for route '{}'",
                    page.route.name()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

//! Glyphfield is a headless engine for a decorative portfolio site.
//!
//! A field of drifting particles is painted every frame. Navigating to a page morphs the
//! particles into that page's title, sampled from text rendered offscreen, and going home
//! scatters them again. Routing follows URL fragments and the dark/light theme persists through
//! a preference store.
//!
//! - Build a [`Site`] from a [`SiteConfig`]
//! - Resolve the first fragment with [`Site::load`], then [`Site::navigate`]
//! - Drive frames with a [`RenderLoop`] (or [`Site::frame`]) and paint onto a [`CpuSurface`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod app;
/// Site configuration (JSON, every field defaulted).
pub mod config;
pub(crate) mod director;
pub(crate) mod particles;
pub(crate) mod render;
pub(crate) mod site;
pub(crate) mod text;

pub use crate::foundation::color::parse_css_color;
pub use crate::foundation::core::{Circle, Point, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{
    Animatable, Finished, GroupId, Prop, PropTargets, TweenEngine, TweenSpec,
};
pub use crate::app::{Navigation, Site};
pub use crate::config::{
    BatchTiming, BreathingConfig, FadeTimings, HoldMode, PageConfig, ParticleConfig, SiteConfig,
    Span, TextConfig, ThemeConfig, ThemeVars, TransitionConfig,
};
pub use crate::director::assign::shuffled_order;
pub use crate::director::machine::{Director, DirectorState, Request, Stage, TransitionKind};
pub use crate::director::pages::{PageHost, PageInfo, PageSet, PageState};
pub use crate::particles::noise::noise;
pub use crate::particles::particle::{Ownership, Particle};
pub use crate::particles::store::ParticleStore;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame_loop::{
    CancelToken, FixedClock, FrameClock, MAX_FRAME_MS, RenderLoop, Scene,
};
pub use crate::render::surface::{FALLBACK_PARTICLE_COLOR, Palette, Surface, paint_particles};
pub use crate::site::router::{Route, RouteChange, Router, path_from_hash};
pub use crate::site::storage::{JsonFileStore, MemoryStore, PreferenceStore};
pub use crate::site::theme::{Theme, ThemeManager};
pub use crate::text::raster::{AlphaMask, BlockRasterizer, GlyphRasterizer, ParleyRasterizer};
pub use crate::text::sample::{PointCloud, TextSampler, responsive_font_size, sample_mask};

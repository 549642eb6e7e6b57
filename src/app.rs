//! Site wiring: one object owning every component, driven by navigation and frames.

use crate::animation::tween::TweenEngine;
use crate::config::SiteConfig;
use crate::director::machine::{Director, DirectorState, Request, Stage, TransitionKind};
use crate::director::pages::{PageHost, PageSet};
use crate::foundation::core::Viewport;
use crate::foundation::error::GlyphfieldResult;
use crate::particles::store::ParticleStore;
use crate::render::frame_loop::Scene;
use crate::render::surface::{Palette, Surface, paint_particles};
use crate::site::router::{Route, RouteChange, Router};
use crate::site::storage::PreferenceStore;
use crate::site::theme::{Theme, ThemeManager};
use crate::text::raster::{GlyphRasterizer, ParleyRasterizer};
use crate::text::sample::TextSampler;

/// What a navigation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// First resolution: the page was shown without a transition.
    Loaded(Route),
    /// Resolved to the route already current; nothing happened.
    Unchanged(Route),
    /// A transition of `kind` was requested, with the director's answer.
    Transition {
        /// Transition flavour chosen for the target route.
        kind: TransitionKind,
        /// Whether the director accepted it.
        request: Request,
    },
}

/// The whole decorative site: particles, transitions, routing and theme.
pub struct Site {
    cfg: SiteConfig,
    store: ParticleStore,
    tweens: TweenEngine,
    director: Director,
    text: TextSampler,
    pages: PageSet,
    router: Router,
    theme: ThemeManager<Box<dyn PreferenceStore>>,
    dark: Palette,
    light: Palette,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("viewport", &self.store.viewport())
            .field("particles", &self.store.len())
            .field("route", &self.router.current())
            .field("state", &self.director.state())
            .field("theme", &self.theme.current())
            .finish_non_exhaustive()
    }
}

impl Site {
    /// Build a site over an explicit rasterizer and preference store.
    pub fn new(
        cfg: SiteConfig,
        viewport: Viewport,
        raster: Box<dyn GlyphRasterizer>,
        prefs: Box<dyn PreferenceStore>,
        system_prefers_dark: bool,
    ) -> GlyphfieldResult<Self> {
        cfg.validate()?;
        let store = ParticleStore::new(viewport, cfg.particles.clone(), cfg.seed);
        let director = Director::new(cfg.transitions.clone(), cfg.seed.wrapping_add(1));
        let text = TextSampler::new(raster, cfg.text.clone());
        let pages = PageSet::from_config(&cfg.pages);
        let theme = ThemeManager::init(prefs, cfg.theme.storage_key.clone(), system_prefers_dark);
        let dark = Palette::from_css(&cfg.theme.dark.particle_color, &cfg.theme.dark.background);
        let light = Palette::from_css(
            &cfg.theme.light.particle_color,
            &cfg.theme.light.background,
        );

        tracing::debug!(
            width = viewport.width(),
            height = viewport.height(),
            particles = store.len(),
            theme = theme.current().as_str(),
            "site created"
        );
        Ok(Self {
            cfg,
            store,
            tweens: TweenEngine::new(),
            director,
            text,
            pages,
            router: Router::new(),
            theme,
            dark,
            light,
        })
    }

    /// Build a site that shapes titles with Parley, using `text.font_path` when configured.
    pub fn with_parley(
        cfg: SiteConfig,
        viewport: Viewport,
        prefs: Box<dyn PreferenceStore>,
        system_prefers_dark: bool,
    ) -> GlyphfieldResult<Self> {
        let raster = match &cfg.text.font_path {
            Some(path) => ParleyRasterizer::with_font_file(path)?,
            None => ParleyRasterizer::new(),
        };
        Self::new(cfg, viewport, Box::new(raster), prefs, system_prefers_dark)
    }

    /// Resolve the initial fragment and show its page without a transition.
    pub fn load(&mut self, hash: &str) -> Navigation {
        let change = self.router.handle_location(hash);
        self.dispatch(change)
    }

    /// Resolve a fragment change (back/forward, manual edit).
    pub fn handle_hash_change(&mut self, hash: &str) -> Navigation {
        let change = self.router.handle_location(hash);
        self.dispatch(change)
    }

    /// Navigate to `path` (for example `/projects`).
    ///
    /// Going home uses the quick transition; any other route gets the full text morph.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        match self.router.navigate(path) {
            Some(change) => self.dispatch(change),
            None => Navigation::Unchanged(
                self.router
                    .current()
                    .unwrap_or_else(|| Route::from_path(path)),
            ),
        }
    }

    fn dispatch(&mut self, change: RouteChange) -> Navigation {
        let to = change.to;
        let Some(from) = change.from else {
            self.pages.set_active(to, true);
            return Navigation::Loaded(to);
        };
        if from == to {
            return Navigation::Unchanged(to);
        }

        let kind = if to == Route::Home {
            TransitionKind::Quick
        } else {
            TransitionKind::Full
        };
        let mut stage = Stage {
            store: &mut self.store,
            tweens: &mut self.tweens,
            pages: &mut self.pages,
            text: &mut self.text,
        };
        let request = self.director.request(from, to, kind, &mut stage);
        Navigation::Transition { kind, request }
    }

    /// Advance one frame: free-drift physics, then tweens, then the transition director.
    pub fn frame(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.max(0.0);
        self.store.step(dt_ms);
        let finished = self.tweens.tick(dt_ms / 1000.0, &mut self.store);
        let mut stage = Stage {
            store: &mut self.store,
            tweens: &mut self.tweens,
            pages: &mut self.pages,
            text: &mut self.text,
        };
        self.director.update(dt_ms / 1000.0, &finished, &mut stage);
    }

    /// Change the viewport. Running animations continue toward their existing targets.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width(),
            height = viewport.height(),
            "viewport resized"
        );
        self.store.resize(viewport);
    }

    /// Paint the particles with the active theme's colors.
    pub fn paint(&self, surface: &mut dyn Surface) {
        paint_particles(surface, self.store.particles(), self.palette());
    }

    /// Colors for the active theme.
    pub fn palette(&self) -> Palette {
        match self.theme.current() {
            Theme::Dark => self.dark,
            Theme::Light => self.light,
        }
    }

    /// Flip the theme and persist it.
    pub fn toggle_theme(&mut self) -> GlyphfieldResult<Theme> {
        self.theme.toggle()
    }

    /// Configuration the site was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.cfg
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.store.viewport()
    }

    /// Particle records.
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Tween engine.
    pub fn tweens(&self) -> &TweenEngine {
        &self.tweens
    }

    /// Transition director.
    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Director state shortcut.
    pub fn state(&self) -> DirectorState {
        self.director.state()
    }

    /// Page containers.
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// Router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Mutable router, for registering listeners.
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Theme manager.
    pub fn theme(&self) -> &ThemeManager<Box<dyn PreferenceStore>> {
        &self.theme
    }

    /// Page shown for `route`, if configured.
    pub fn page_title(&self, route: Route) -> Option<String> {
        self.pages.page(route).and_then(|p| p.title)
    }
}

impl Scene for Site {
    fn advance(&mut self, dt_ms: f64) {
        self.frame(dt_ms);
    }

    fn paint(&self, surface: &mut dyn Surface) {
        Site::paint(self, surface);
    }
}

#[cfg(test)]
#[path = "../tests/unit/app.rs"]
mod tests;

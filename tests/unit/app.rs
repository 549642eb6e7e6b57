use super::*;
use crate::foundation::core::{Circle, Rgba8};
use crate::site::storage::MemoryStore;
use crate::text::raster::BlockRasterizer;

fn site(dark: bool) -> Site {
    let cfg = SiteConfig {
        particles: crate::config::ParticleConfig {
            count: 40,
            ..Default::default()
        },
        ..SiteConfig::default()
    };
    Site::new(
        cfg,
        Viewport::new(320.0, 200.0).unwrap(),
        Box::new(BlockRasterizer),
        Box::new(MemoryStore::new()),
        dark,
    )
    .unwrap()
}

fn settle(site: &mut Site) {
    for _ in 0..2000 {
        if site.state() != DirectorState::Transitioning {
            return;
        }
        site.frame(16.0);
    }
    panic!("transition never finished");
}

#[derive(Default)]
struct Count {
    clears: Vec<Rgba8>,
    circles: usize,
}

impl Surface for Count {
    fn size(&self) -> (u32, u32) {
        (320, 200)
    }
    fn clear(&mut self, color: Rgba8) {
        self.clears.push(color);
        self.circles = 0;
    }
    fn fill_circle(&mut self, _circle: Circle, _color: Rgba8) {
        self.circles += 1;
    }
}

#[test]
fn initial_load_shows_the_page_without_transition() {
    let mut s = site(true);
    assert_eq!(s.load("#/about"), Navigation::Loaded(Route::About));
    assert_eq!(s.pages().active(), Some(Route::About));
    assert_eq!(s.pages().activations(), 1);
    assert_eq!(s.state(), DirectorState::Idle);
    assert!(s.tweens().is_idle());
}

#[test]
fn empty_fragment_loads_home_and_same_route_is_ignored() {
    let mut s = site(true);
    assert_eq!(s.load(""), Navigation::Loaded(Route::Home));
    assert_eq!(s.navigate("/"), Navigation::Unchanged(Route::Home));
    assert_eq!(
        s.handle_hash_change("#/nowhere"),
        Navigation::Unchanged(Route::Home)
    );
    assert_eq!(s.director().started(), 0);
}

#[test]
fn sub_pages_get_the_full_transition_and_home_the_quick_one() {
    let mut s = site(true);
    s.load("#/");
    assert_eq!(
        s.navigate("/projects"),
        Navigation::Transition {
            kind: TransitionKind::Full,
            request: Request::Accepted
        }
    );
    settle(&mut s);
    assert_eq!(s.state(), DirectorState::MorphedHeld);
    assert_eq!(s.pages().active(), Some(Route::Projects));
    assert!(s.store().len() > 40);

    assert_eq!(
        s.navigate("/"),
        Navigation::Transition {
            kind: TransitionKind::Quick,
            request: Request::Accepted
        }
    );
    settle(&mut s);
    assert_eq!(s.state(), DirectorState::Idle);
    assert_eq!(s.pages().active(), Some(Route::Home));
    assert_eq!(s.store().free_count(), s.store().len());
}

#[test]
fn navigation_during_a_transition_is_dropped_but_the_route_moves() {
    let mut s = site(true);
    s.load("#/");
    s.navigate("/thoughts");
    s.frame(16.0);
    assert_eq!(
        s.navigate("/about"),
        Navigation::Transition {
            kind: TransitionKind::Full,
            request: Request::Dropped
        }
    );
    assert_eq!(s.router().current(), Some(Route::About));
    settle(&mut s);
    assert_eq!(s.pages().active(), Some(Route::Thoughts));
}

#[test]
fn resize_keeps_the_running_transition() {
    let mut s = site(true);
    s.load("#/");
    s.navigate("/about");
    s.frame(16.0);
    s.resize(Viewport::new(640.0, 480.0).unwrap());
    assert_eq!(s.state(), DirectorState::Transitioning);
    assert_eq!(s.viewport().width(), 640.0);
    settle(&mut s);
    assert_eq!(s.pages().active(), Some(Route::About));
}

#[test]
fn painting_uses_the_active_theme() {
    let mut s = site(false);
    assert_eq!(s.theme().current(), Theme::Light);
    let mut surface = Count::default();
    s.paint(&mut surface);
    assert_eq!(surface.circles, s.store().len());
    assert_eq!(surface.clears, vec![Rgba8::new(0xf5, 0xf5, 0xf0, 255)]);

    assert_eq!(s.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(s.theme().store().get("portfolio-theme").as_deref(), Some("dark"));
    s.paint(&mut surface);
    assert_eq!(surface.clears[1], Rgba8::new(0x0a, 0x0a, 0x0f, 255));
    assert_eq!(s.palette(), s.dark);
}

#[test]
fn non_ascii_theme_color_falls_back_instead_of_failing() {
    let mut cfg = SiteConfig::default();
    cfg.theme.dark.particle_color = "#aü123".to_owned();
    let s = Site::new(
        cfg,
        Viewport::new(64.0, 64.0).unwrap(),
        Box::new(BlockRasterizer),
        Box::new(MemoryStore::new()),
        true,
    )
    .unwrap();
    assert_eq!(s.palette().particle, crate::render::surface::FALLBACK_PARTICLE_COLOR);
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut cfg = SiteConfig::default();
    cfg.text.stride = 0;
    let out = Site::new(
        cfg,
        Viewport::new(10.0, 10.0).unwrap(),
        Box::new(BlockRasterizer),
        Box::new(MemoryStore::new()),
        true,
    );
    assert!(out.is_err());
}

#[test]
fn site_is_a_render_loop_scene() {
    use crate::render::frame_loop::{FixedClock, RenderLoop};
    use std::ops::ControlFlow;

    let mut s = site(true);
    s.load("#/");
    let mut lp = RenderLoop::new();
    let mut clock = FixedClock::new(60.0).unwrap();
    let mut surface = Count::default();
    lp.start();
    let frames: Result<u64, ()> = lp.run(&mut clock, &mut s, &mut surface, |i, _, _| {
        Ok(if i == 9 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    });
    assert_eq!(frames, Ok(10));
    assert_eq!(surface.clears.len(), 10);
}

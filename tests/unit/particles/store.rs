use super::*;

fn viewport() -> Viewport {
    Viewport::new(200.0, 100.0).unwrap()
}

fn store(count: usize) -> ParticleStore {
    let cfg = ParticleConfig {
        count,
        ..ParticleConfig::default()
    };
    ParticleStore::new(viewport(), cfg, 42)
}

#[test]
fn new_store_spawns_inside_viewport_with_configured_ranges() {
    let s = store(64);
    assert_eq!(s.len(), 64);
    for p in s.particles() {
        assert!(viewport().contains_with_margin(p.pos, 0.0));
        assert!(s.config().size.contains(p.size));
        assert!(s.config().opacity.contains(p.opacity));
        assert!(p.vel.x.abs() <= 0.15 && p.vel.y.abs() <= 0.15);
        assert!(p.is_free());
        assert!(p.target.is_none());
    }
}

#[test]
fn velocity_stays_capped_for_free_particles() {
    let mut s = store(50);
    // push everybody well beyond the cap first
    for p in 0..s.len() {
        s.get_mut(p).unwrap().vel = Vec2::new(40.0, -40.0);
    }
    for step in 0..2000 {
        s.step(16.0 + (step % 7) as f64);
        for p in s.particles() {
            assert!(p.vel.x.abs() <= 0.5, "vx {}", p.vel.x);
            assert!(p.vel.y.abs() <= 0.5, "vy {}", p.vel.y);
        }
    }
}

#[test]
fn positions_stay_within_wrap_band() {
    let mut s = store(50);
    for _ in 0..5000 {
        s.step(16.0);
    }
    for p in s.particles() {
        assert!(viewport().contains_with_margin(p.pos, 10.0 + 0.5));
    }
}

#[test]
fn wrap_is_toroidal_on_all_four_edges() {
    let vp = viewport();
    let base = store(1).particles()[0];

    let mut p = Particle {
        pos: Point::new(vp.width() + 10.5, 50.0),
        ..base
    };
    p.wrap(vp, 10.0);
    assert_eq!(p.pos, Point::new(-10.0, 50.0));

    let mut p = Particle {
        pos: Point::new(-10.5, 50.0),
        ..base
    };
    p.wrap(vp, 10.0);
    assert_eq!(p.pos, Point::new(vp.width() + 10.0, 50.0));

    let mut p = Particle {
        pos: Point::new(30.0, vp.height() + 11.0),
        ..base
    };
    p.wrap(vp, 10.0);
    assert_eq!(p.pos, Point::new(30.0, -10.0));

    let mut p = Particle {
        pos: Point::new(30.0, -11.0),
        ..base
    };
    p.wrap(vp, 10.0);
    assert_eq!(p.pos, Point::new(30.0, vp.height() + 10.0));

    // exactly on the margin is not outside it
    let mut p = Particle {
        pos: Point::new(vp.width() + 10.0, -10.0),
        ..base
    };
    p.wrap(vp, 10.0);
    assert_eq!(p.pos, Point::new(vp.width() + 10.0, -10.0));
}

#[test]
fn stepping_past_the_right_margin_relocates_without_touching_velocity() {
    let mut s = store(1);
    let vp = s.viewport();
    {
        let p = s.get_mut(0).unwrap();
        p.pos = Point::new(vp.width() + 50.0, 40.0);
    }
    let mut twin = s.particles()[0];
    s.step(16.0);

    // the same integration without the wrap
    let cfg = s.config().clone();
    let huge = Viewport::new(1e9, 1e9).unwrap();
    twin.integrate(16.0, &cfg, huge);

    let p = s.particles()[0];
    assert_eq!(p.pos.x, -10.0);
    assert_eq!(p.pos.y, twin.pos.y);
    assert_eq!(p.vel, twin.vel);
}

#[test]
fn animating_particles_are_exempt_from_physics() {
    let mut s = store(3);
    s.claim(1, Some(Point::new(5.0, 5.0)));
    let before = s.particles()[1];
    for _ in 0..100 {
        s.step(16.0);
    }
    assert_eq!(s.particles()[1], before);
    assert_eq!(s.free_count(), 2);
}

#[test]
fn grow_appends_without_altering_existing_particles() {
    let mut s = store(10);
    let before: Vec<Particle> = s.particles().to_vec();
    s.grow(25);
    assert_eq!(s.len(), 25);
    assert_eq!(&s.particles()[..10], before.as_slice());

    s.grow(5);
    assert_eq!(s.len(), 25, "grow never shrinks");
}

#[test]
fn release_returns_everyone_to_free_drift() {
    let mut s = store(8);
    for i in 0..8 {
        s.claim(i, Some(Point::new(i as f64, 0.0)));
    }
    assert_eq!(s.free_count(), 0);
    s.release_all_targets();
    assert_eq!(s.free_count(), 8);
    for p in s.particles() {
        assert!(p.target.is_none());
        assert!(p.vel.x.abs() <= 0.15 && p.vel.y.abs() <= 0.15);
    }
}

#[test]
fn animatable_clamps_visual_properties() {
    let mut s = store(1);
    s.set_prop(0, Prop::Opacity, 3.0);
    s.set_prop(0, Prop::Size, -1.0);
    assert_eq!(s.prop(0, Prop::Opacity), Some(1.0));
    assert_eq!(s.prop(0, Prop::Size), Some(0.0));
    assert_eq!(s.prop(9, Prop::X), None);
}

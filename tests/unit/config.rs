use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn empty_object_is_the_default_config() {
    let cfg = SiteConfig::from_json_slice(b"{}").unwrap();
    assert_eq!(cfg, SiteConfig::default());
    assert_eq!(cfg.particles.count, 600);
    assert_eq!(cfg.particles.max_velocity, 0.5);
    assert_eq!(cfg.theme.storage_key, "portfolio-theme");
    assert_eq!(cfg.pages.len(), 4);
}

#[test]
fn default_pages_title_everything_but_home() {
    let cfg = SiteConfig::default();
    let home = cfg.pages.iter().find(|p| p.route == Route::Home).unwrap();
    assert!(home.title.is_none());
    let projects = cfg
        .pages
        .iter()
        .find(|p| p.route == Route::Projects)
        .unwrap();
    assert_eq!(projects.title.as_deref(), Some("Projects"));
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = SiteConfig::from_json_slice(
        br#"{
            "particles": { "count": 150 },
            "transitions": { "hold": { "mode": "brief", "hold_secs": 0.5 } },
            "pages": [ { "route": "about", "title": "Me" } ]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.particles.count, 150);
    assert_eq!(cfg.particles.damping, 0.99);
    assert_eq!(cfg.transitions.hold, HoldMode::Brief { hold_secs: 0.5 });
    assert_eq!(cfg.pages.len(), 1);
    assert!(cfg.pages[0].has_content);
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = SiteConfig::default();
    cfg.text.stride = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = SiteConfig::default();
    cfg.particles.damping = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = SiteConfig::default();
    cfg.transitions.morph.duration = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SiteConfig::default();
    cfg.particles.size = Span::new(3.0, 1.0);
    assert!(cfg.validate().is_err());

    let mut cfg = SiteConfig::default();
    cfg.pages.push(cfg.pages[0].clone());
    assert!(cfg.validate().is_err());
}

#[test]
fn breathing_amplitude_must_be_finite() {
    let mut cfg = SiteConfig::default();
    cfg.transitions.breathing.amplitude = f64::INFINITY;
    assert!(cfg.validate().is_err());

    cfg.transitions.breathing.amplitude = f64::NAN;
    assert!(cfg.validate().is_err());

    cfg.transitions.breathing.amplitude = -2.0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn unknown_routes_and_easings_fail_to_parse() {
    assert!(SiteConfig::from_json_slice(br#"{"pages":[{"route":"blog"}]}"#).is_err());
    assert!(
        SiteConfig::from_json_slice(
            br#"{"transitions":{"morph":{"duration":1,"stagger":0,"ease":"bounce"}}}"#
        )
        .is_err()
    );
}

#[test]
fn span_samples_stay_inside() {
    let mut rng = StdRng::seed_from_u64(9);
    let span = Span::new(0.3, 0.8);
    for _ in 0..1000 {
        assert!(span.contains(span.sample(&mut rng)));
    }
    assert_eq!(Span::new(2.0, 2.0).sample(&mut rng), 2.0);
}

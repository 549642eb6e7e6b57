use super::*;
use crate::config::SiteConfig;

#[test]
fn missing_pages_are_silent_no_ops() {
    let mut set = PageSet::from_config(&[PageConfig {
        route: Route::Home,
        title: None,
        has_content: true,
    }]);
    assert!(set.page(Route::About).is_none());
    set.set_active(Route::About, true);
    set.set_content(Route::About, 0.0, 5.0);
    assert_eq!(set.activations(), 0);
    assert_eq!(set.active(), None);
}

#[test]
fn activation_counts_only_inactive_to_active_edges() {
    let mut set = PageSet::from_config(&SiteConfig::default().pages);
    set.set_active(Route::Home, true);
    set.set_active(Route::Home, true);
    assert_eq!(set.activations(), 1);
    assert_eq!(set.active(), Some(Route::Home));

    set.set_active(Route::Home, false);
    set.set_active(Route::Projects, true);
    assert_eq!(set.activations(), 2);
    assert_eq!(set.active(), Some(Route::Projects));
}

#[test]
fn blank_titles_count_as_no_title() {
    let set = PageSet::from_config(&[PageConfig {
        route: Route::About,
        title: Some("  ".to_owned()),
        has_content: false,
    }]);
    let info = set.page(Route::About).unwrap();
    assert_eq!(info.title, None);
    assert!(!info.has_content);
}

#[test]
fn content_styling_needs_a_content_element() {
    let mut set = PageSet::from_config(&[
        PageConfig {
            route: Route::Home,
            title: None,
            has_content: false,
        },
        PageConfig {
            route: Route::About,
            title: None,
            has_content: true,
        },
    ]);
    set.set_content(Route::Home, 0.2, 3.0);
    set.set_content(Route::About, 0.2, 3.0);
    assert_eq!(set.state(Route::Home).unwrap().content_opacity, 1.0);
    assert_eq!(set.state(Route::About).unwrap().content_opacity, 0.2);
    assert_eq!(set.state(Route::About).unwrap().content_offset_y, 3.0);
}

use super::*;
use crate::site::storage::MemoryStore;

const KEY: &str = "portfolio-theme";

#[test]
fn system_dark_initializes_and_persists_dark_then_toggles_to_light() {
    let mut tm = ThemeManager::init(MemoryStore::new(), KEY, true);
    assert_eq!(tm.attribute(), Some("dark"));
    assert_eq!(tm.store().get(KEY).as_deref(), Some("dark"));

    assert_eq!(tm.toggle().unwrap(), Theme::Light);
    assert_eq!(tm.attribute(), Some("light"));
    assert_eq!(tm.store().get(KEY).as_deref(), Some("light"));
}

#[test]
fn stored_preference_wins_over_system() {
    let mut store = MemoryStore::new();
    store.set(KEY, "light").unwrap();
    let tm = ThemeManager::init(store, KEY, true);
    assert_eq!(tm.current(), Theme::Light);
}

#[test]
fn garbage_in_storage_falls_back_to_system_and_is_overwritten() {
    let mut store = MemoryStore::new();
    store.set(KEY, "sepia").unwrap();
    let tm = ThemeManager::init(store, KEY, false);
    assert_eq!(tm.current(), Theme::Light);
    assert_eq!(tm.store().get(KEY).as_deref(), Some("light"));
}

#[test]
fn toggle_alternates_between_exactly_two_values() {
    let mut tm = ThemeManager::init(MemoryStore::new(), KEY, false);
    let mut seen = vec![tm.current()];
    for _ in 0..4 {
        seen.push(tm.toggle().unwrap());
    }
    assert_eq!(
        seen,
        vec![
            Theme::Light,
            Theme::Dark,
            Theme::Light,
            Theme::Dark,
            Theme::Light
        ]
    );
}

struct ReadOnly;

impl PreferenceStore for ReadOnly {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> GlyphfieldResult<()> {
        Err(GlyphfieldError::storage("read-only"))
    }
}

#[test]
fn failed_persistence_still_applies_the_attribute() {
    let mut tm = ThemeManager::init(ReadOnly, KEY, true);
    assert_eq!(tm.attribute(), Some("dark"));
    assert!(tm.toggle().is_err());
    assert_eq!(tm.current(), Theme::Light);
}

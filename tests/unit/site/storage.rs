use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("glyphfield-storage-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn memory_store_round_trips() {
    let mut s = MemoryStore::new();
    assert_eq!(s.get("k"), None);
    s.set("k", "dark").unwrap();
    assert_eq!(s.get("k").as_deref(), Some("dark"));
}

#[test]
fn file_store_persists_across_reopen() {
    let path = scratch("prefs.json");
    let mut s = JsonFileStore::open(&path);
    assert_eq!(s.get("portfolio-theme"), None);
    s.set("portfolio-theme", "light").unwrap();

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("portfolio-theme").as_deref(), Some("light"));
}

#[test]
fn corrupt_file_opens_empty() {
    let path = scratch("corrupt.json");
    std::fs::write(&path, b"{not json").unwrap();
    let mut s = JsonFileStore::open(&path);
    assert_eq!(s.get("anything"), None);
    s.set("a", "b").unwrap();
    assert_eq!(JsonFileStore::open(&path).get("a").as_deref(), Some("b"));
}

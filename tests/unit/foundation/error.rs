use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphfieldError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GlyphfieldError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(GlyphfieldError::text("x").to_string().contains("text error:"));
    assert!(
        GlyphfieldError::storage("x")
            .to_string()
            .contains("storage error:")
    );
    assert!(
        GlyphfieldError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphfieldError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

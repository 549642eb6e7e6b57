use super::*;

#[test]
fn fill_rect_clips_to_bounds() {
    let mut m = AlphaMask::new(4, 3);
    m.fill_rect(2, 1, 10, 10, 200);
    assert_eq!(m.alpha_at(1, 1), 0);
    assert_eq!(m.alpha_at(2, 1), 200);
    assert_eq!(m.alpha_at(3, 2), 200);
    assert_eq!(m.alpha_at(9, 9), 0);

    m.fill_rect(9, 9, 2, 2, 1);
    assert_eq!(m.alpha.iter().filter(|&&a| a == 1).count(), 0);
}

#[test]
fn block_rasterizer_sizes_mask_to_text_plus_padding() {
    let mut r = BlockRasterizer;
    let m = r.rasterize("ab", 10.0, 5).unwrap();
    // two 6px blocks, one 1px gap, 5px padding each side
    assert_eq!(m.width, 6 + 1 + 6 + 10);
    assert_eq!(m.height, 10 + 10);
    assert_eq!(m.alpha_at(4, 5), 0);
    assert_eq!(m.alpha_at(5, 5), 255);
    assert_eq!(m.alpha_at(11, 5), 0, "gap between glyphs");
    assert_eq!(m.alpha_at(12, 14), 255);
}

#[test]
fn block_rasterizer_skips_whitespace_and_empty_text() {
    let mut r = BlockRasterizer;
    assert!(r.rasterize("", 10.0, 5).is_none());
    assert!(r.rasterize("   ", 10.0, 5).is_none());

    let m = r.rasterize("a b", 10.0, 0).unwrap();
    assert_eq!(m.alpha_at(8, 0), 0, "space column stays empty");
}

#[test]
fn parley_rasterizer_returns_nothing_for_blank_text() {
    let mut r = ParleyRasterizer::new();
    assert!(r.rasterize("", 48.0, 20).is_none());
    assert!(r.rasterize(" \t", 48.0, 20).is_none());
}

#[test]
fn parley_rasterizer_rejects_non_font_bytes() {
    assert!(ParleyRasterizer::with_font_bytes(b"not a font".to_vec()).is_err());
}

#[test]
fn parley_rasterizer_is_repeatable_on_one_instance() {
    let mut r = ParleyRasterizer::new();
    let Some(first) = r.rasterize("Thoughts", 48.0, 20) else {
        return;
    };
    let second = r.rasterize("Thoughts", 48.0, 20).unwrap();
    assert_eq!(first, second);
    assert!(first.alpha.iter().any(|&a| a > 128));
}

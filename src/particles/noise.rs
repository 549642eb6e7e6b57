/// Smooth deterministic pseudo-random drift in roughly `[-1, 1]`.
///
/// Three stacked sine waves at different frequencies and phases. Callers feed an ever-growing
/// phase so consecutive samples change slowly.
pub fn noise(x: f64) -> f64 {
    let s1 = (x * 0.01).sin() * 0.5;
    let s2 = (x * 0.02 + 1.3).sin() * 0.3;
    let s3 = (x * 0.05 + 2.1).sin() * 0.2;
    s1 + s2 + s3
}

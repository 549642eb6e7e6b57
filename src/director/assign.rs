use rand::Rng;
use rand::seq::SliceRandom;

/// Random point order for a formation of `point_count` points.
///
/// Slot `i` of the particle store receives point `order[i]`. The order is a Fisher–Yates shuffle
/// of `0..point_count`, so every point lands on exactly one of the first `point_count` slots and
/// the same text does not map onto the same particles twice in a row.
pub fn shuffled_order<R: Rng + ?Sized>(point_count: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..point_count).collect();
    order.shuffle(rng);
    order
}

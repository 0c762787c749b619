use rand::Rng;

/// Rows to plot out of `len`, capped at `cap`.
///
/// * No cap, or `len <= cap` → every row, in order.
/// * Otherwise → exactly `cap` distinct rows chosen uniformly at random,
///   returned in ascending order.
pub fn subsample_indices<R: Rng + ?Sized>(len: usize, cap: Option<usize>, rng: &mut R) -> Vec<usize> {
    match cap {
        Some(cap) if len > cap => {
            let mut picked = rand::seq::index::sample(rng, len, cap).into_vec();
            picked.sort_unstable();
            picked
        }
        _ => (0..len).collect(),
    }
}

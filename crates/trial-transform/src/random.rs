use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator for one transform run.
///
/// With `Some(seed)` the output tables are reproducible; with `None` a fresh
/// seed is drawn from the thread-local generator.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// Pick from `(value, weight)` pairs by a cumulative roll over the total weight.
pub(crate) fn pick_weighted<T: Copy, const N: usize>(
    choices: &[(T, f64); N],
    rng: &mut dyn rand::RngCore,
) -> T {
    let total: f64 = choices.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.random::<f64>() * total;
    for (value, weight) in choices {
        if roll < *weight {
            return *value;
        }
        roll -= weight;
    }
    choices[N - 1].0
}

/// Uniform pick from a non-empty slice.
pub(crate) fn pick_uniform<'a, T>(values: &'a [T], rng: &mut dyn rand::RngCore) -> Option<&'a T> {
    if values.is_empty() {
        return None;
    }
    values.get(rng.random_range(0..values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = seeded_rng(Some(7));
        let mut b = seeded_rng(Some(7));
        let xs: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn weighted_pick_follows_weights() {
        let mut rng = seeded_rng(Some(1));
        let choices = [("a", 0.6), ("b", 0.3), ("c", 0.1)];
        let n = 20_000;
        let a = (0..n)
            .filter(|_| pick_weighted(&choices, &mut rng) == "a")
            .count();
        let share = a as f64 / f64::from(n);
        assert!((share - 0.6).abs() < 0.02, "share {share}");
    }

    #[test]
    fn zero_weight_is_never_picked() {
        let mut rng = seeded_rng(Some(2));
        let choices = [("never", 0.0), ("always", 1.0)];
        for _ in 0..1000 {
            assert_eq!(pick_weighted(&choices, &mut rng), "always");
        }
    }

    #[test]
    fn uniform_pick_of_empty_slice() {
        let mut rng = seeded_rng(Some(3));
        let empty: [u8; 0] = [];
        assert_eq!(pick_uniform(&empty, &mut rng), None);
    }
}

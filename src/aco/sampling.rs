//! Roulette-wheel selection.
//!
//! # Reference
//! Dorigo & Stützle (2004), "Ant Colony Optimization", §3.3.1

use rand::Rng;

/// Selects an index with probability proportional to its score.
///
/// Draws `r` uniformly in `[0, total)` and returns the first index whose
/// cumulative score exceeds `r`; floating round-off past the end falls
/// back to the last index. A zero, negative or non-finite `total`
/// returns index 0 without consuming randomness.
///
/// `scores` must be non-empty and non-negative; `total` is their sum.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_linebalance::aco::roulette_select;
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// // Only index 2 carries weight.
/// assert_eq!(roulette_select(&[0.0, 0.0, 5.0], 5.0, &mut rng), 2);
/// // Degenerate weights fall back to the first candidate.
/// assert_eq!(roulette_select(&[0.0, 0.0], 0.0, &mut rng), 0);
/// ```
pub fn roulette_select<R: Rng>(scores: &[f64], total: f64, rng: &mut R) -> usize {
    debug_assert!(!scores.is_empty());
    if !(total.is_finite() && total > 0.0) {
        return 0;
    }
    let r = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &score) in scores.iter().enumerate() {
        cumulative += score;
        if cumulative > r {
            return i;
        }
    }
    scores.len() - 1
}

/// `trail^alpha * heuristic^beta`, with a zero heuristic mapped to zero.
#[inline]
pub(crate) fn attractiveness(trail: f64, heuristic: f64, alpha: f64, beta: f64) -> f64 {
    if heuristic <= 0.0 {
        return 0.0;
    }
    let score = trail.powf(alpha) * heuristic.powf(beta);
    if score.is_finite() {
        score
    } else {
        f64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_proportional_selection() {
        let mut rng = SmallRng::seed_from_u64(42);
        let scores = [1.0, 3.0];
        let mut hits = [0usize; 2];
        for _ in 0..4000 {
            hits[roulette_select(&scores, 4.0, &mut rng)] += 1;
        }
        let share = hits[1] as f64 / 4000.0;
        assert!((share - 0.75).abs() < 0.05, "share {share}");
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_ne!(roulette_select(&[0.0, 2.0, 0.0, 1.0], 3.0, &mut rng), 0);
        }
    }

    #[test]
    fn test_degenerate_total() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(roulette_select(&[0.0, 0.0, 0.0], 0.0, &mut rng), 0);
        assert_eq!(roulette_select(&[1.0, 1.0], f64::NAN, &mut rng), 0);
        assert_eq!(roulette_select(&[1.0, 1.0], f64::INFINITY, &mut rng), 0);
    }

    #[test]
    fn test_overstated_total_falls_back_to_last() {
        let mut rng = SmallRng::seed_from_u64(3);
        // Total larger than the true sum: draws beyond 2.0 land on the last index.
        let mut last = 0;
        for _ in 0..200 {
            if roulette_select(&[1.0, 1.0], 100.0, &mut rng) == 1 {
                last += 1;
            }
        }
        assert!(last > 150);
    }

    #[test]
    fn test_attractiveness() {
        assert!((attractiveness(2.0, 3.0, 1.0, 2.0) - 18.0).abs() < 1e-10);
        assert!((attractiveness(2.0, 3.0, 0.0, 0.0) - 1.0).abs() < 1e-10);
        assert_eq!(attractiveness(2.0, 0.0, 1.0, 1.0), 0.0);
    }
}

//! Population dynamics formulas for macro-scale demographic simulation.
//!
//! Pure functions only: no I/O, no clock reads, no RNG. Every function here
//! is a deterministic map from inputs to outputs, so the simulation engine's
//! determinism guarantee reduces to "call these with the same arguments".

use std::collections::HashMap;

/// Discrete logistic growth step.
///
/// `N(t+1) = clamp(N(t) + r * N(t) * (1 - N(t)/K) * dt, 0, K)`, with the
/// addition truncated toward zero before clamping.
///
/// - `k <= 0` returns `0` regardless of `n`.
/// - `n <= 0` returns `0` (no spontaneous generation).
/// - The result never exceeds `k` and is never negative.
pub fn logistic_step(n: i64, r: f64, k: i64, dt: f64) -> i64 {
    if k <= 0 || n <= 0 {
        return 0;
    }

    let n_f = n as f64;
    let k_f = k as f64;
    let delta = r * n_f * (1.0 - n_f / k_f) * dt;
    let new_n = n_f + delta;

    new_n.max(0.0).min(k_f) as i64
}

/// Independent multi-species logistic growth under a single shared capacity.
///
/// Each species in `populations` grows via [`logistic_step`] using its own
/// rate from `rates` (species missing from `rates` default to `0.0`, a
/// no-growth identity). If the resulting sum exceeds `k`, every species is
/// scaled down by `k / sum`, floored to an integer, so the post-scaling sum
/// never exceeds `k`. Species absent from `populations` never appear in the
/// result.
pub fn multi_species_step(
    populations: &HashMap<String, i64>,
    rates: &HashMap<String, f64>,
    k: i64,
    dt: f64,
) -> HashMap<String, i64> {
    if k <= 0 {
        return populations.keys().map(|s| (s.clone(), 0)).collect();
    }

    let mut stepped: HashMap<String, i64> = populations
        .iter()
        .map(|(species, &n)| {
            let r = rates.get(species).copied().unwrap_or(0.0);
            (species.clone(), logistic_step(n, r, k, dt))
        })
        .collect();

    let total: i64 = stepped.values().sum();
    if total > k {
        let scale = k as f64 / total as f64;
        for v in stepped.values_mut() {
            *v = ((*v as f64) * scale) as i64;
        }
    }

    stepped
}

/// Composite carrying capacity: `K = floor(K_base * f_env * f_infra * f_loc)`.
///
/// All factors are expected non-negative; the result is truncated toward
/// zero, matching the source system's `int(K_t)`.
pub fn carrying_capacity(k_base: i64, f_env: f64, f_infra: f64, f_loc: f64) -> i64 {
    (k_base as f64 * f_env * f_infra * f_loc) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_step_zero_capacity_yields_zero() {
        assert_eq!(logistic_step(1000, 0.01, 0, 1.0), 0);
        assert_eq!(logistic_step(1000, 0.01, -5, 1.0), 0);
    }

    #[test]
    fn logistic_step_zero_or_negative_population_yields_zero() {
        assert_eq!(logistic_step(0, 0.01, 1000, 1.0), 0);
        assert_eq!(logistic_step(-10, 0.01, 1000, 1.0), 0);
    }

    #[test]
    fn logistic_step_grows_below_capacity() {
        let result = logistic_step(100, 0.1, 1000, 1.0);
        assert!(result > 100);
        assert!(result <= 1000);
    }

    #[test]
    fn logistic_step_never_exceeds_capacity() {
        // N > K relaxes toward K, never above it.
        let result = logistic_step(2000, 0.1, 1000, 1.0);
        assert!(result < 2000);
        assert!(result <= 1000);
    }

    #[test]
    fn logistic_step_at_capacity_is_stable() {
        assert_eq!(logistic_step(1000, 0.1, 1000, 1.0), 1000);
    }

    #[test]
    fn logistic_step_smaller_dt_shrinks_delta() {
        let full = logistic_step(100, 0.1, 1000, 1.0);
        let half = logistic_step(100, 0.1, 1000, 0.5);
        let full_delta = full - 100;
        let half_delta = half - 100;
        assert!(half_delta <= full_delta);
        assert!(half_delta >= full_delta / 2 - 1);
    }

    #[test]
    fn multi_species_zero_capacity_zeroes_everyone() {
        let pops = HashMap::from([("huum".to_string(), 500), ("sint".to_string(), 300)]);
        let rates = HashMap::from([("huum".to_string(), 0.01)]);
        let result = multi_species_step(&pops, &rates, 0, 1.0);
        assert_eq!(result.get("huum"), Some(&0));
        assert_eq!(result.get("sint"), Some(&0));
    }

    #[test]
    fn multi_species_missing_rate_defaults_to_no_growth() {
        let pops = HashMap::from([("huum".to_string(), 500)]);
        let rates = HashMap::new();
        let result = multi_species_step(&pops, &rates, 10_000, 1.0);
        assert_eq!(result.get("huum"), Some(&500));
    }

    #[test]
    fn multi_species_absent_species_stays_absent() {
        let pops = HashMap::from([("huum".to_string(), 500)]);
        let rates = HashMap::from([
            ("huum".to_string(), 0.01),
            ("sint".to_string(), 0.02),
        ]);
        let result = multi_species_step(&pops, &rates, 10_000, 1.0);
        assert_eq!(result.len(), 1);
        assert!(!result.contains_key("sint"));
    }

    #[test]
    fn multi_species_scales_down_when_sum_exceeds_capacity() {
        let pops = HashMap::from([
            ("huum".to_string(), 9_000),
            ("sint".to_string(), 9_000),
        ]);
        let rates = HashMap::from([
            ("huum".to_string(), 0.05),
            ("sint".to_string(), 0.05),
        ]);
        let k = 10_000;
        let result = multi_species_step(&pops, &rates, k, 1.0);
        let sum: i64 = result.values().sum();
        assert!(sum <= k);
        // Ratios preserved within integer-rounding slack.
        let huum = *result.get("huum").unwrap() as f64;
        let sint = *result.get("sint").unwrap() as f64;
        assert!((huum - sint).abs() <= 1.0);
    }

    #[test]
    fn carrying_capacity_multiplies_and_truncates() {
        assert_eq!(carrying_capacity(10_000, 1.0, 1.0, 1.0), 10_000);
        assert_eq!(carrying_capacity(10_000, 0.85, 1.0, 1.0), 8_500);
        // Truncation toward zero, not rounding.
        assert_eq!(carrying_capacity(3, 0.999, 1.0, 1.0), 2);
    }

    #[test]
    fn carrying_capacity_is_non_negative_for_non_negative_factors() {
        assert_eq!(carrying_capacity(0, 1.0, 1.0, 1.0), 0);
    }
}

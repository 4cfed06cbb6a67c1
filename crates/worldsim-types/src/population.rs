//! In-memory population breakdowns (spec §3 `PopulationState`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use worldsim_formulas::multi_species_step;

/// `{ total, by_species, by_habitat }`. Invariant: whenever `by_species` is
/// non-empty, `total == sum(by_species.values())` after every mutation; all
/// values are non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    pub total: i64,
    pub by_species: HashMap<String, i64>,
    pub by_habitat: HashMap<String, i64>,
}

impl PopulationState {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(
        total: i64,
        by_species: HashMap<String, i64>,
        by_habitat: HashMap<String, i64>,
    ) -> Self {
        Self {
            total,
            by_species,
            by_habitat,
        }
    }

    /// Advances population one step via the shared-capacity multi-species
    /// logistic model, then scales `by_habitat` proportionally to the
    /// change in total (preserving zero if the prior total was zero).
    pub fn apply_growth(&self, rates: &HashMap<String, f64>, k: i64, dt: f64) -> Self {
        if self.by_species.is_empty() {
            // No species breakdown to grow; nothing changes (matches the
            // "zero start, no seed data" scenario where total stays 0).
            return self.clone();
        }

        let new_by_species = multi_species_step(&self.by_species, rates, k, dt);
        let new_total: i64 = new_by_species.values().sum();

        let new_by_habitat = if self.total > 0 {
            let scale = new_total as f64 / self.total as f64;
            self.by_habitat
                .iter()
                .map(|(habitat, &pop)| (habitat.clone(), ((pop as f64) * scale) as i64))
                .collect()
        } else {
            self.by_habitat.clone()
        };

        Self {
            total: new_total,
            by_species: new_by_species,
            by_habitat: new_by_habitat,
        }
    }

    /// Applies a population shock (famine, war, disaster): multiplies every
    /// component by `multiplier` (clamped to `[0, 1]` by the caller),
    /// flooring to an integer. When `by_species` is present, `total` is
    /// re-derived as the exact sum of the scaled species so the invariant
    /// `total == sum(by_species)` holds after the shock (spec §4.3,
    /// resolving Open Question 1 in favor of exact recomputation).
    pub fn apply_shock(&self, multiplier: f64) -> Self {
        let scale = |v: i64| -> i64 { ((v as f64) * multiplier) as i64 };

        let new_by_habitat: HashMap<String, i64> = self
            .by_habitat
            .iter()
            .map(|(h, &v)| (h.clone(), scale(v)))
            .collect();

        if self.by_species.is_empty() {
            return Self {
                total: scale(self.total),
                by_species: HashMap::new(),
                by_habitat: new_by_habitat,
            };
        }

        let new_by_species: HashMap<String, i64> = self
            .by_species
            .iter()
            .map(|(s, &v)| (s.clone(), scale(v)))
            .collect();
        let new_total: i64 = new_by_species.values().sum();

        Self {
            total: new_total,
            by_species: new_by_species,
            by_habitat: new_by_habitat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_shock_recomputes_total_from_species_sum() {
        let state = PopulationState::new(
            100,
            HashMap::from([("huum".to_string(), 60), ("sint".to_string(), 40)]),
            HashMap::new(),
        );
        let shocked = state.apply_shock(0.75);
        let expected_total: i64 = shocked.by_species.values().sum();
        assert_eq!(shocked.total, expected_total);
        assert_eq!(shocked.by_species["huum"], 45);
        assert_eq!(shocked.by_species["sint"], 30);
        assert_eq!(shocked.total, 75);
    }

    #[test]
    fn apply_shock_without_breakdown_scales_total_directly() {
        let state = PopulationState::new(100, HashMap::new(), HashMap::new());
        let shocked = state.apply_shock(0.5);
        assert_eq!(shocked.total, 50);
    }

    #[test]
    fn apply_growth_on_zero_species_is_identity() {
        let state = PopulationState::zero();
        let rates = HashMap::from([("huum".to_string(), 0.01)]);
        let grown = state.apply_growth(&rates, 10_000, 1.0);
        assert_eq!(grown.total, 0);
    }

    #[test]
    fn apply_growth_scales_habitat_proportionally() {
        let state = PopulationState::new(
            1000,
            HashMap::from([("huum".to_string(), 1000)]),
            HashMap::from([("on_ground".to_string(), 800), ("under_ground".to_string(), 200)]),
        );
        let rates = HashMap::from([("huum".to_string(), 0.1)]);
        let grown = state.apply_growth(&rates, 10_000, 1.0);
        assert!(grown.total > 1000);
        let habitat_sum: i64 = grown.by_habitat.values().sum();
        // Habitat total tracks population total within integer rounding.
        assert!((habitat_sum - grown.total).abs() <= 2);
    }

    #[test]
    fn apply_growth_preserves_zero_habitat_when_total_was_zero() {
        let state = PopulationState::new(
            0,
            HashMap::from([("huum".to_string(), 0)]),
            HashMap::from([("on_ground".to_string(), 0)]),
        );
        let rates = HashMap::from([("huum".to_string(), 0.1)]);
        let grown = state.apply_growth(&rates, 10_000, 1.0);
        assert_eq!(grown.by_habitat["on_ground"], 0);
    }
}

//! Soft, per-chunk validation checks (spec §7 `ValidationWarning`).
//!
//! Broadened beyond the original's three checks (negative population,
//! infrastructure floor, environmental floor) per SPEC_FULL §C.7: also
//! flags per-step growth exceeding the configured threshold and a
//! collapsed effective capacity.

use serde::{Deserialize, Serialize};

/// A soft issue detected at chunk end. Attached to a [`crate::ChunkReport`];
/// never aborts the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationWarning {
    NegativePopulation { total: i64 },
    LowInfrastructureFactor { value: f64 },
    LowEnvironmentalFactor { value: f64 },
    GrowthRateExceeded { observed: f64, max_allowed: f64 },
    CapacityCollapsed { capacity: i64, population: i64 },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::NegativePopulation { total } => {
                write!(f, "negative population: {total}")
            }
            ValidationWarning::LowInfrastructureFactor { value } => {
                write!(f, "very low infrastructure factor: {value:.3}")
            }
            ValidationWarning::LowEnvironmentalFactor { value } => {
                write!(f, "very low environmental factor: {value:.3}")
            }
            ValidationWarning::GrowthRateExceeded {
                observed,
                max_allowed,
            } => write!(
                f,
                "per-step growth rate {observed:.4} exceeds max allowed {max_allowed:.4}"
            ),
            ValidationWarning::CapacityCollapsed {
                capacity,
                population,
            } => write!(
                f,
                "effective capacity collapsed to {capacity} with population {population}"
            ),
        }
    }
}

/// The floor below which a mutable factor (infrastructure, environmental)
/// is considered dangerously low, matching the original's threshold.
pub const FACTOR_FLOOR: f64 = 0.1;

/// Runs the broadened set of end-of-chunk checks (spec §C.7).
///
/// `growth_ratio` is `(total_after - total_before) / total_before` for the
/// chunk's last step, or `0.0` if `total_before` was zero.
#[allow(clippy::too_many_arguments)]
pub fn validate_chunk(
    population_total: i64,
    infrastructure_factor: f64,
    environmental_factor: f64,
    effective_capacity: i64,
    growth_ratio: f64,
    max_growth_rate_per_step: f64,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if population_total < 0 {
        warnings.push(ValidationWarning::NegativePopulation {
            total: population_total,
        });
    }

    if infrastructure_factor < FACTOR_FLOOR {
        warnings.push(ValidationWarning::LowInfrastructureFactor {
            value: infrastructure_factor,
        });
    }

    if environmental_factor < FACTOR_FLOOR {
        warnings.push(ValidationWarning::LowEnvironmentalFactor {
            value: environmental_factor,
        });
    }

    if growth_ratio.abs() > max_growth_rate_per_step {
        warnings.push(ValidationWarning::GrowthRateExceeded {
            observed: growth_ratio,
            max_allowed: max_growth_rate_per_step,
        });
    }

    if effective_capacity <= 0 && population_total > 0 {
        warnings.push(ValidationWarning::CapacityCollapsed {
            capacity: effective_capacity,
            population: population_total,
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_warnings_for_healthy_chunk() {
        let warnings = validate_chunk(10_000, 1.0, 1.0, 50_000, 0.01, 0.10);
        assert!(warnings.is_empty());
    }

    #[test]
    fn flags_negative_population() {
        let warnings = validate_chunk(-5, 1.0, 1.0, 50_000, 0.0, 0.10);
        assert!(matches!(
            warnings[0],
            ValidationWarning::NegativePopulation { total: -5 }
        ));
    }

    #[test]
    fn flags_low_infrastructure_and_environmental_factors() {
        let warnings = validate_chunk(10_000, 0.05, 0.05, 50_000, 0.0, 0.10);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn flags_growth_rate_exceeding_threshold() {
        let warnings = validate_chunk(10_000, 1.0, 1.0, 50_000, 0.5, 0.10);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::GrowthRateExceeded { .. })));
    }

    #[test]
    fn flags_collapsed_capacity_only_when_population_positive() {
        let warnings = validate_chunk(10_000, 1.0, 1.0, 0, 0.0, 0.10);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::CapacityCollapsed { .. })));

        let warnings_zero_pop = validate_chunk(0, 1.0, 1.0, 0, 0.0, 0.10);
        assert!(warnings_zero_pop.is_empty());
    }
}

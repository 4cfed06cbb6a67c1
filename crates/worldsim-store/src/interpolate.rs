//! Linear interpolation between the two nearest stored snapshots (spec
//! §4.2 "Interpolation rules"). Shared by every [`crate::SnapshotStore`]
//! backend so each one only needs to supply `nearest`.

use std::collections::HashMap;
use worldsim_types::{InterpolationInfo, Snapshot};

/// Implements the five interpolation rules given the nearest snapshot
/// before and after the target day (both already fetched by the caller via
/// `nearest`, inclusive of equality in each direction).
pub fn interpolate(before: Option<&Snapshot>, after: Option<&Snapshot>, day: i64) -> Option<Snapshot> {
    match (before, after) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (Some(before), Some(after)) => {
            if before.id == after.id {
                // Exact match on day.
                return Some(before.clone());
            }

            let span = (after.astro_day.value() - before.astro_day.value()) as f64;
            let t = (day - before.astro_day.value()) as f64 / span;

            let total = round_lerp(before.population_total as f64, after.population_total as f64, t);

            let population_by_species =
                interpolate_breakdown(&before.population_by_species, &after.population_by_species, t);
            let population_by_habitat =
                interpolate_breakdown(&before.population_by_habitat, &after.population_by_habitat, t);

            Some(Snapshot {
                id: None,
                entity: before.entity,
                astro_day: worldsim_types::TemporalDay(day),
                snapshot_type: worldsim_types::SNAPSHOT_TYPE_INTERPOLATED.to_string(),
                granularity: before.granularity.clone(),
                population_total: total,
                population_by_species,
                population_by_habitat,
                // Step-function semantics: categorical/narrative fields take
                // the *before* snapshot's value verbatim, never blended.
                cultural_composition: before.cultural_composition.clone(),
                economic_data: before.economic_data.clone(),
                metadata: before.metadata.clone(),
                interpolation_info: Some(InterpolationInfo {
                    before_day: before.astro_day,
                    after_day: after.astro_day,
                    before_id: before.id.expect("stored snapshot always has an id"),
                    after_id: after.id.expect("stored snapshot always has an id"),
                    t,
                }),
            })
        }
    }
}

fn round_lerp(before: f64, after: f64, t: f64) -> i64 {
    (before + t * (after - before)).round() as i64
}

/// Interpolates per key across the union of keys in both breakdowns;
/// missing keys on either side count as zero. `None` propagates only when
/// both sides are `None` (nothing to interpolate).
fn interpolate_breakdown(
    before: &Option<HashMap<String, i64>>,
    after: &Option<HashMap<String, i64>>,
    t: f64,
) -> Option<HashMap<String, i64>> {
    match (before, after) {
        (None, None) => None,
        (before, after) => {
            let empty = HashMap::new();
            let before = before.as_ref().unwrap_or(&empty);
            let after = after.as_ref().unwrap_or(&empty);
            let keys = before.keys().chain(after.keys()).cloned().collect::<std::collections::HashSet<_>>();
            Some(
                keys.into_iter()
                    .map(|key| {
                        let b = before.get(&key).copied().unwrap_or(0) as f64;
                        let a = after.get(&key).copied().unwrap_or(0) as f64;
                        (key, round_lerp(b, a, t))
                    })
                    .collect(),
            )
        }
    }
}

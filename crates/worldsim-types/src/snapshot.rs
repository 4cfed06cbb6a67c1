//! Demographic snapshots: the unit of persistence in the snapshot store
//! (spec §3, §4.2).

use crate::entity::EntityRef;
use crate::metadata::Metadata;
use crate::temporal::TemporalDay;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub const SNAPSHOT_TYPE_CENSUS: &str = "census";
pub const SNAPSHOT_TYPE_SIMULATION: &str = "simulation";
pub const SNAPSHOT_TYPE_ESTIMATE: &str = "estimate";
pub const SNAPSHOT_TYPE_INTERPOLATED: &str = "interpolated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub Uuid);

/// A demographic record at a single day for a single entity.
///
/// `snapshot_type = "interpolated"` records are synthesized on demand by
/// [`interpolate`](../worldsim_store/trait.SnapshotStore.html#tymethod.interpolate)
/// and never persisted; every other `Snapshot` returned by the store carries
/// an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Option<SnapshotId>,
    pub entity: EntityRef,
    pub astro_day: TemporalDay,
    pub snapshot_type: String,
    pub granularity: String,
    pub population_total: i64,
    pub population_by_species: Option<HashMap<String, i64>>,
    pub population_by_habitat: Option<HashMap<String, i64>>,
    pub cultural_composition: Option<serde_json::Value>,
    pub economic_data: Option<serde_json::Value>,
    pub metadata: Option<Metadata>,
    /// Present only on ephemeral records produced by `interpolate`.
    pub interpolation_info: Option<InterpolationInfo>,
}

/// The fields a caller supplies to create a new snapshot; the store assigns
/// `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSnapshot {
    pub entity: EntityRef,
    pub astro_day: TemporalDay,
    pub snapshot_type: String,
    pub granularity: String,
    pub population_total: i64,
    pub population_by_species: Option<HashMap<String, i64>>,
    pub population_by_habitat: Option<HashMap<String, i64>>,
    pub cultural_composition: Option<serde_json::Value>,
    pub economic_data: Option<serde_json::Value>,
    pub metadata: Option<Metadata>,
}

impl NewSnapshot {
    pub fn into_snapshot(self, id: SnapshotId) -> Snapshot {
        Snapshot {
            id: Some(id),
            entity: self.entity,
            astro_day: self.astro_day,
            snapshot_type: self.snapshot_type,
            granularity: self.granularity,
            population_total: self.population_total,
            population_by_species: self.population_by_species,
            population_by_habitat: self.population_by_habitat,
            cultural_composition: self.cultural_composition,
            economic_data: self.economic_data,
            metadata: self.metadata,
            interpolation_info: None,
        }
    }
}

/// Recorded on an interpolated (non-persistent) snapshot: which two stored
/// snapshots it was synthesized from, and the interpolation factor used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationInfo {
    pub before_day: TemporalDay,
    pub after_day: TemporalDay,
    pub before_id: SnapshotId,
    pub after_id: SnapshotId,
    pub t: f64,
}

/// Which direction to search in [`nearest`](../worldsim_store/trait.SnapshotStore.html#tymethod.nearest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Before,
    After,
}

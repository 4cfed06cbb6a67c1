//! The `SnapshotStore` contract (spec §4.2).

use worldsim_types::{
    Direction, EntityRef, Error, NewSnapshot, Snapshot, SnapshotId, TemporalDay,
};

/// Optional filters for [`SnapshotStore::list`].
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub start: Option<TemporalDay>,
    pub end: Option<TemporalDay>,
    pub snapshot_type: Option<String>,
    pub granularity: Option<String>,
}

/// Checked at `create` time. Implementors decide how entity existence is
/// determined; the in-memory store defaults to "everything exists" unless
/// constructed with a check (see [`crate::memory::MemoryStore::with_existence_check`]).
pub trait EntityExistenceCheck: Send + Sync {
    fn exists(&self, entity: EntityRef) -> bool;
}

/// Always reports the entity as existing. Useful for tests and for
/// deployments where entity existence is enforced upstream.
pub struct AlwaysExists;

impl EntityExistenceCheck for AlwaysExists {
    fn exists(&self, _entity: EntityRef) -> bool {
        true
    }
}

/// A queryable, append-mostly time-series of demographic snapshots, keyed
/// by `(entity_kind, entity_id, astro_day)` with at most one stored row per
/// key (spec §4.2).
pub trait SnapshotStore {
    /// Persists a new snapshot. Fails with [`Error::NotFound`] if the
    /// entity does not exist, [`Error::Duplicate`] if a snapshot already
    /// exists at `(entity, day)`, or [`Error::InvalidArgument`] if
    /// `astro_day < 0` or `population_total < 0` (the latter is enforced
    /// by construction via [`TemporalDay`] and the `i64` contract, but is
    /// checked again defensively here).
    fn create(&self, new_snapshot: NewSnapshot) -> Result<Snapshot, Error>;

    /// Exact lookup at `(entity, day)`. Returns `None` if no snapshot is
    /// stored there — that is not an error; `NotFound` is reserved for a
    /// missing *entity*.
    fn get_at(&self, entity: EntityRef, day: TemporalDay) -> Result<Option<Snapshot>, Error>;

    /// All snapshots for `entity` matching `filter`, ordered by ascending
    /// day.
    fn list(&self, entity: EntityRef, filter: &ListFilter) -> Result<Vec<Snapshot>, Error>;

    /// The snapshot with the closest day in `direction`, inclusive of
    /// equality.
    fn nearest(
        &self,
        entity: EntityRef,
        day: TemporalDay,
        direction: Direction,
    ) -> Result<Option<Snapshot>, Error>;

    /// An ephemeral, never-persisted snapshot-shaped record synthesized by
    /// linear interpolation between the nearest stored snapshots on either
    /// side of `day` (spec §4.2 interpolation rules).
    fn interpolate(&self, entity: EntityRef, day: TemporalDay) -> Result<Option<Snapshot>, Error>;

    /// Applies `patch` to the stored snapshot with the given id.
    fn update(
        &self,
        id: SnapshotId,
        patch: &dyn Fn(&mut Snapshot),
    ) -> Result<Snapshot, Error>;

    fn delete(&self, id: SnapshotId) -> Result<(), Error>;
}

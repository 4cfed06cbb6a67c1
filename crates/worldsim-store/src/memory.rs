//! An in-process [`SnapshotStore`] backed by a sorted map per
//! `(entity_kind, entity_id)`, guarded by a single `RwLock`.
//!
//! The teacher's own dependency stack reaches for no concurrent-map crate
//! (no `dashmap`), so this mirrors the simplest thing that satisfies spec
//! §5's isolation requirement: a `BTreeMap` gives ordered iteration for
//! `list`/`nearest` for free, and the lock scope never crosses an `.await`
//! point because nothing here is async.

use crate::interpolate::interpolate;
use crate::store::{AlwaysExists, EntityExistenceCheck, ListFilter, SnapshotStore};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use uuid::Uuid;
use worldsim_types::{
    Direction, EntityKind, EntityRef, Error, NewSnapshot, Snapshot, SnapshotId, TemporalDay,
};

type Key = (u8, u64, i64);

fn kind_tag(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Region => 0,
        EntityKind::Province => 1,
    }
}

fn key_of(entity: EntityRef, day: i64) -> Key {
    (kind_tag(entity.kind), entity.id, day)
}

#[derive(Default)]
struct Inner {
    by_key: BTreeMap<Key, Snapshot>,
    by_id: HashMap<Uuid, Key>,
}

pub struct MemoryStore<C: EntityExistenceCheck = AlwaysExists> {
    existence: C,
    inner: RwLock<Inner>,
}

impl MemoryStore<AlwaysExists> {
    /// A store that treats every entity as existing. Suitable for tests
    /// and for callers that enforce entity existence elsewhere.
    pub fn new() -> Self {
        Self {
            existence: AlwaysExists,
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore<AlwaysExists> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: EntityExistenceCheck> MemoryStore<C> {
    pub fn with_existence_check(existence: C) -> Self {
        Self {
            existence,
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl<C: EntityExistenceCheck> SnapshotStore for MemoryStore<C> {
    fn create(&self, new_snapshot: NewSnapshot) -> Result<Snapshot, Error> {
        if new_snapshot.astro_day.value() < 0 {
            return Err(Error::InvalidArgument(format!(
                "astro_day must be >= 0, got {}",
                new_snapshot.astro_day.value()
            )));
        }
        if new_snapshot.population_total < 0 {
            return Err(Error::InvalidArgument(format!(
                "population_total must be >= 0, got {}",
                new_snapshot.population_total
            )));
        }
        if !self.existence.exists(new_snapshot.entity) {
            return Err(Error::NotFound(format!(
                "entity {} does not exist",
                new_snapshot.entity
            )));
        }

        let key = key_of(new_snapshot.entity, new_snapshot.astro_day.value());
        let mut inner = self.inner.write().expect("store lock poisoned");

        if inner.by_key.contains_key(&key) {
            return Err(Error::Duplicate(format!(
                "snapshot already exists for {} at day {}",
                new_snapshot.entity,
                new_snapshot.astro_day
            )));
        }

        let id = SnapshotId(Uuid::new_v4());
        let snapshot = new_snapshot.into_snapshot(id);
        inner.by_key.insert(key, snapshot.clone());
        inner.by_id.insert(id.0, key);

        tracing::debug!(entity = %snapshot.entity, day = snapshot.astro_day.value(), "snapshot created");
        Ok(snapshot)
    }

    fn get_at(&self, entity: EntityRef, day: TemporalDay) -> Result<Option<Snapshot>, Error> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.by_key.get(&key_of(entity, day.value())).cloned())
    }

    fn list(&self, entity: EntityRef, filter: &ListFilter) -> Result<Vec<Snapshot>, Error> {
        let inner = self.inner.read().expect("store lock poisoned");
        let tag = kind_tag(entity.kind);
        let low = filter.start.map(|d| d.value()).unwrap_or(i64::MIN);
        let high = filter.end.map(|d| d.value()).unwrap_or(i64::MAX);

        let results = inner
            .by_key
            .range((tag, entity.id, low)..=(tag, entity.id, high))
            .map(|(_, snapshot)| snapshot)
            .filter(|s| {
                filter
                    .snapshot_type
                    .as_deref()
                    .map(|t| s.snapshot_type == t)
                    .unwrap_or(true)
            })
            .filter(|s| {
                filter
                    .granularity
                    .as_deref()
                    .map(|g| s.granularity == g)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        Ok(results)
    }

    fn nearest(
        &self,
        entity: EntityRef,
        day: TemporalDay,
        direction: Direction,
    ) -> Result<Option<Snapshot>, Error> {
        let inner = self.inner.read().expect("store lock poisoned");
        let tag = kind_tag(entity.kind);
        let day = day.value();

        let found = match direction {
            Direction::Before => inner
                .by_key
                .range((tag, entity.id, i64::MIN)..=(tag, entity.id, day))
                .next_back(),
            Direction::After => inner
                .by_key
                .range((tag, entity.id, day)..=(tag, entity.id, i64::MAX))
                .next(),
        };

        Ok(found.map(|(_, snapshot)| snapshot.clone()))
    }

    fn interpolate(&self, entity: EntityRef, day: TemporalDay) -> Result<Option<Snapshot>, Error> {
        let before = self.nearest(entity, day, Direction::Before)?;
        let after = self.nearest(entity, day, Direction::After)?;
        Ok(interpolate(before.as_ref(), after.as_ref(), day.value()))
    }

    fn update(&self, id: SnapshotId, patch: &dyn Fn(&mut Snapshot)) -> Result<Snapshot, Error> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let key = *inner
            .by_id
            .get(&id.0)
            .ok_or_else(|| Error::NotFound(format!("snapshot {:?} not found", id.0)))?;
        let snapshot = inner
            .by_key
            .get_mut(&key)
            .expect("by_id and by_key must agree");
        patch(snapshot);
        Ok(snapshot.clone())
    }

    fn delete(&self, id: SnapshotId) -> Result<(), Error> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let key = inner
            .by_id
            .remove(&id.0)
            .ok_or_else(|| Error::NotFound(format!("snapshot {:?} not found", id.0)))?;
        inner.by_key.remove(&key);
        Ok(())
    }
}

//! Collaborator traits the engine consumes but does not implement (spec §6,
//! §9 "a small dispatch table keyed by `entity_kind`").
//!
//! Keeping these as traits over `(EntityKind, id)` rather than a
//! trait-object hierarchy per entity kind is what makes the engine
//! unit-testable with stub collaborators, grounded on the teacher's
//! `sim_events::fixtures` module (ready-made test data behind a narrow
//! read surface).

use worldsim_types::{EntityKind, EntityRecord, EntityRef, Event};

/// A read interface over entity identity (spec §6 "Entity resolver").
pub trait EntityResolver: Send + Sync {
    /// Looks up an entity's record, or `None` if it does not exist.
    fn resolve(&self, entity: EntityRef) -> Option<EntityRecord>;
}

/// A read interface over the timeline (spec §6 "Event source"). Returns
/// active (non-deprecated) events scoped to `entity` with
/// `astro_day ∈ [start_day, end_day]`, ordered by `(astro_day, id)`.
pub trait EventSource: Send + Sync {
    fn list_active_events(
        &self,
        entity_kind: EntityKind,
        entity_id: u64,
        start_day: i64,
        end_day: i64,
    ) -> Vec<Event>;
}

#[cfg(test)]
pub mod fixtures {
    //! Stub collaborators for engine unit tests. Not part of the public API.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Resolves a fixed set of entities registered up front.
    pub struct FixtureResolver {
        entities: HashMap<EntityRef, EntityRecord>,
    }

    impl FixtureResolver {
        pub fn new() -> Self {
            Self {
                entities: HashMap::new(),
            }
        }

        pub fn with_entity(mut self, entity: EntityRef, name: &str) -> Self {
            self.entities.insert(
                entity,
                EntityRecord {
                    entity,
                    name: name.to_string(),
                    base_carrying_capacity_override: None,
                },
            );
            self
        }
    }

    impl EntityResolver for FixtureResolver {
        fn resolve(&self, entity: EntityRef) -> Option<EntityRecord> {
            self.entities.get(&entity).cloned()
        }
    }

    /// An in-memory, append-only timeline for tests. Events with
    /// `is_deprecated = true` are filtered out by `list_active_events`,
    /// matching the real event source's contract.
    pub struct FixtureEventSource {
        events: Mutex<Vec<Event>>,
    }

    impl FixtureEventSource {
        pub fn new(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
            }
        }
    }

    impl EventSource for FixtureEventSource {
        fn list_active_events(
            &self,
            entity_kind: EntityKind,
            entity_id: u64,
            start_day: i64,
            end_day: i64,
        ) -> Vec<Event> {
            let mut matching: Vec<Event> = self
                .events
                .lock()
                .expect("fixture lock poisoned")
                .iter()
                .filter(|e| !e.is_deprecated)
                .filter(|e| e.astro_day.value() >= start_day && e.astro_day.value() <= end_day)
                .filter(|e| e.region_or_province() == Some((entity_kind, entity_id)))
                .cloned()
                .collect();
            matching.sort_by_key(|e| (e.astro_day.value(), e.id));
            matching
        }
    }
}

//! Entities: the polymorphic target of simulation (spec §3).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two entity kinds the core simulates. A small dispatch table keyed by
/// this enum (rather than a trait-object hierarchy) is enough to keep the
/// engine unit-testable with stub collaborators (spec §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Region,
    Province,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Region => write!(f, "region"),
            EntityKind::Province => write!(f, "province"),
        }
    }
}

/// A reference to a specific entity, cheap to copy and pass around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A resolved entity record, as returned by an `EntityResolver`.
///
/// Lifecycle: created externally; the core never destroys an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub entity: EntityRef,
    pub name: String,
    /// Overrides the configuration default base carrying capacity for this
    /// entity's kind, when present.
    pub base_carrying_capacity_override: Option<i64>,
}

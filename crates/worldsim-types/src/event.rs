//! Human-authored timeline events (spec §3, §4.3).

use crate::temporal::TemporalDay;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exactly one scope binds an event to the entity it affects. The core only
/// consumes `Region`/`Province` scopes; `Settlement` events exist for
/// higher-level tools and are filtered out before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope_kind", rename_all = "snake_case")]
pub enum EventScope {
    Region { region_id: u64 },
    Province { province_id: u64 },
    Settlement { settlement_id: u64 },
}

/// An immutable, human-authored historical record.
///
/// Corrections use deprecation plus a `supersedes` pointer, never in-place
/// edits. `effects` is a flat map; unknown keys are ignored silently by
/// [`worldsim_effects`](../worldsim_effects/index.html) so new effect types
/// can be authored without a schema migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable ascending id; same-day events apply in this order (spec §4.3).
    pub id: u64,
    pub astro_day: TemporalDay,
    pub kind: String,
    pub scope: EventScope,
    #[serde(default)]
    pub is_deprecated: bool,
    /// Pointer to the event this one supersedes, if any. The core does not
    /// read this field; it exists for the timeline editor.
    #[serde(default)]
    pub supersedes: Option<u64>,
    #[serde(default)]
    pub effects: HashMap<String, f64>,
    /// Descriptive fields the core does not read (title, description,
    /// sources, tags, ...), carried through untouched.
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl Event {
    /// The entity this event targets, if it is a region or province
    /// (settlement-scoped events have no core-relevant entity).
    pub fn region_or_province(&self) -> Option<(crate::EntityKind, u64)> {
        match self.scope {
            EventScope::Region { region_id } => Some((crate::EntityKind::Region, region_id)),
            EventScope::Province { province_id } => {
                Some((crate::EntityKind::Province, province_id))
            }
            EventScope::Settlement { .. } => None,
        }
    }
}

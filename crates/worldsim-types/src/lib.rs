//! Shared value types for the demographic simulation core: entities,
//! events, snapshots, population state, and the error taxonomy.
//!
//! No I/O lives here. This crate is the vocabulary every other core crate
//! (`worldsim-effects`, `worldsim-store`, `worldsim-engine`) speaks.

pub mod entity;
pub mod error;
pub mod event;
pub mod metadata;
pub mod population;
pub mod snapshot;
pub mod temporal;

pub use entity::{EntityKind, EntityRecord, EntityRef};
pub use error::{Error, Result};
pub use event::{Event, EventScope};
pub use metadata::{Metadata, MetadataValue};
pub use population::PopulationState;
pub use snapshot::{
    Direction, InterpolationInfo, NewSnapshot, Snapshot, SnapshotId, SNAPSHOT_TYPE_CENSUS,
    SNAPSHOT_TYPE_ESTIMATE, SNAPSHOT_TYPE_INTERPOLATED, SNAPSHOT_TYPE_SIMULATION,
};
pub use temporal::{Granularity, TemporalDay};

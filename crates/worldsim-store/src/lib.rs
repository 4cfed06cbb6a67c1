//! The demographic snapshot store (spec §4.2): a queryable time-series of
//! [`worldsim_types::Snapshot`] rows, plus linear interpolation between
//! stored points.

pub mod interpolate;
pub mod memory;
pub mod store;

pub use interpolate::interpolate;
pub use memory::MemoryStore;
pub use store::{AlwaysExists, EntityExistenceCheck, ListFilter, SnapshotStore};

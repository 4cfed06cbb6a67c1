//! The error taxonomy shared by every core component (spec §7).
//!
//! `InvalidArgument`, `NotFound`, and `Duplicate` are hard errors: surfaced
//! to the caller, no recovery attempted anywhere in the core. `Store`
//! wraps a fatal failure of the snapshot store's read or write path.
//! Soft issues (negative population, factors drifting outside their sane
//! bounds, ...) are not represented here — they are
//! [`crate::ValidationWarning`]s attached to a chunk report, not propagated
//! as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

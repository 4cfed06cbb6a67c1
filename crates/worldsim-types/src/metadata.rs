//! Flat metadata values (spec §3, §9 "Flat metadata only").
//!
//! Nested objects and arrays are rejected by construction: there is simply
//! no variant for them. This keeps snapshot indexing, diffing, and
//! migration tractable and prevents `metadata` from silently absorbing
//! structure that deserves first-class columns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

pub type Metadata = HashMap<String, MetadataValue>;

//! Body shapes shared by typical REST endpoints.
//!
//! # Design
//! These cover the payloads most resource APIs agree on: an id, a count of
//! affected rows, and a record flattened next to its id. Anything more
//! specific belongs to the caller's own types.

use serde::{Deserialize, Serialize};

/// A body that carries only an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdBody {
    pub id: String,
}

/// The number of records a write touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AffectedBody {
    pub count: u64,
}

/// A record of type `T` with its id alongside. `T`'s fields are flattened,
/// so `WithId<User>` reads `{"id": "...", "name": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithId<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

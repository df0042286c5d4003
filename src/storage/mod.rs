//! Persisted state.
//!
//! Defines the snapshot format that a storage medium must round-trip and a
//! store-backed session that performs one read-modify-write per operation.
//! The medium itself is supplied by the caller through `StateStore`.

pub mod snapshot;
pub mod store;

pub use snapshot::{encode_snapshot, parse_snapshot, Snapshot, SnapshotError};
pub use store::{MemoryStore, Session, SessionError, StateStore};

//! Outbound adapters implementing the domain ports.
//!
//! [`json_snapshot`] serves the document store from a JSON file on disk.

pub mod json_snapshot;

pub use json_snapshot::{JsonSnapshotDocumentStore, SnapshotFileError};

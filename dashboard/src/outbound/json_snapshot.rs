//! Document store backed by a JSON snapshot file.
//!
//! The file maps collection names to arrays of documents:
//!
//! ```json
//! { "transfers": [{ "id": "t1", "tforNumber": "100", "status": "pending" }] }
//! ```
//!
//! Every read parses the file afresh so external edits show up on the next
//! reload. Updates rewrite the whole file.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{DocumentStore, DocumentStoreError, merge_fields};
use crate::domain::{Collection, Document, DocumentFields};

type SnapshotFile = BTreeMap<Collection, Vec<Document>>;

/// Errors raised while reading or writing the snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotFileError {
    /// The file or its directory could not be read.
    #[error("failed to read snapshot at {path}: {source}")]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid snapshot.
    #[error("snapshot at {path} is not valid: {source}")]
    Parse {
        /// Snapshot path.
        path: PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The file could not be rewritten.
    #[error("failed to write snapshot at {path}: {source}")]
    Write {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl From<SnapshotFileError> for DocumentStoreError {
    fn from(error: SnapshotFileError) -> Self {
        match error {
            SnapshotFileError::Read { .. } => Self::connection(error.to_string()),
            SnapshotFileError::Parse { .. } | SnapshotFileError::Write { .. } => {
                Self::query(error.to_string())
            }
        }
    }
}

/// Document store reading and writing one JSON file through a capability
/// handle on its directory.
#[derive(Debug)]
pub struct JsonSnapshotDocumentStore {
    dir: Dir,
    file_name: PathBuf,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSnapshotDocumentStore {
    /// Open the snapshot at `path` and check that it parses.
    ///
    /// # Errors
    /// Returns [`SnapshotFileError::Read`] when the file cannot be read and
    /// [`SnapshotFileError::Parse`] when it is not a snapshot.
    pub fn open(path: &Path) -> Result<Self, SnapshotFileError> {
        let read_error = |source| SnapshotFileError::Read {
            path: path.to_path_buf(),
            source,
        };
        let parent = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            read_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "snapshot path must name a file",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;

        let store = Self {
            dir,
            file_name: PathBuf::from(file_name),
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        };
        let snapshot = store.read_snapshot()?;
        info!(
            path = %store.path.display(),
            collections = snapshot.len(),
            "snapshot file opened"
        );
        Ok(store)
    }

    /// Location of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<SnapshotFile, SnapshotFileError> {
        let payload = self
            .dir
            .read(&self.file_name)
            .map_err(|source| SnapshotFileError::Read {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_slice(&payload).map_err(|source| SnapshotFileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_snapshot(&self, snapshot: &SnapshotFile) -> Result<(), SnapshotFileError> {
        let payload = serde_json::to_vec_pretty(snapshot).map_err(|source| {
            SnapshotFileError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        self.dir
            .write(&self.file_name, payload)
            .map_err(|source| SnapshotFileError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl DocumentStore for JsonSnapshotDocumentStore {
    async fn fetch_collection(
        &self,
        collection: Collection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let mut snapshot = self.read_snapshot()?;
        let documents = snapshot.remove(&collection).unwrap_or_default();
        debug!(%collection, documents = documents.len(), "collection read from snapshot");
        Ok(documents)
    }

    async fn fetch_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let mut snapshot = self.read_snapshot()?;
        Ok(snapshot
            .remove(&collection)
            .and_then(|documents| documents.into_iter().find(|document| document.id == id)))
    }

    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DocumentStoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut snapshot = self.read_snapshot()?;
        let documents = snapshot.entry(collection).or_default();
        merge_fields(documents, collection, id, fields)?;
        self.write_snapshot(&snapshot)?;
        info!(%collection, document_id = id, "snapshot document updated");
        Ok(())
    }
}

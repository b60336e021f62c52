//! Port for the remote document store.
//!
//! The dashboard reads six named collections and writes back a handful of
//! profile fields. Adapters translate their transport failures into
//! [`DocumentStoreError`] so the domain never sees backend-specific errors.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{Collection, Document, DocumentFields};

/// Errors raised by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// The store could not be reached.
    #[error("document store connection failed: {message}")]
    Connection {
        /// Transport failure description.
        message: String,
    },
    /// The store rejected or failed a read or write.
    #[error("document store query failed: {message}")]
    Query {
        /// Backend failure description.
        message: String,
    },
    /// The addressed document does not exist.
    #[error("document '{id}' not found in {collection}")]
    NotFound {
        /// Collection that was addressed.
        collection: Collection,
        /// Missing document identifier.
        id: String,
    },
}

impl DocumentStoreError {
    /// Build a [`DocumentStoreError::Connection`].
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`DocumentStoreError::Query`].
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`DocumentStoreError::NotFound`].
    #[must_use]
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}

/// Read and update access to the named collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document of a collection.
    async fn fetch_collection(
        &self,
        collection: Collection,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Fetch a single document by identifier.
    ///
    /// Returns `None` when the document does not exist.
    async fn fetch_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Merge `fields` into an existing document.
    ///
    /// Fields not named in `fields` are left untouched. Updating a missing
    /// document fails with [`DocumentStoreError::NotFound`].
    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DocumentStoreError>;
}

/// Merge `fields` into the document `id` of `documents`.
pub(crate) fn merge_fields(
    documents: &mut [Document],
    collection: Collection,
    id: &str,
    fields: DocumentFields,
) -> Result<(), DocumentStoreError> {
    let document = documents
        .iter_mut()
        .find(|document| document.id == id)
        .ok_or_else(|| DocumentStoreError::not_found(collection, id))?;
    document.fields.extend(fields);
    Ok(())
}

/// In-memory document store seeded by tests and demos.
///
/// Collections can be marked as failing to exercise partial-load handling.
#[derive(Debug, Default)]
pub struct FixtureDocumentStore {
    collections: Mutex<BTreeMap<Collection, Vec<Document>>>,
    failing: Mutex<Vec<Collection>>,
}

impl FixtureDocumentStore {
    /// Store with no collections and no failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `collection` with `documents`, replacing previous content.
    #[must_use]
    pub fn with_documents(self, collection: Collection, documents: Vec<Document>) -> Self {
        self.insert(collection, documents);
        self
    }

    /// Replace the content of `collection`.
    pub fn insert(&self, collection: Collection, documents: Vec<Document>) {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(collection, documents);
    }

    /// Make every read of `collection` fail until [`Self::recover`] is called.
    pub fn fail_collection(&self, collection: Collection) {
        let mut failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if !failing.contains(&collection) {
            failing.push(collection);
        }
    }

    /// Clear all injected failures.
    pub fn recover(&self) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Current content of `collection`.
    #[must_use]
    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self, collection: Collection) -> Result<(), DocumentStoreError> {
        let failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(&collection) {
            return Err(DocumentStoreError::connection(format!(
                "{collection} is unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FixtureDocumentStore {
    async fn fetch_collection(
        &self,
        collection: Collection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.check_available(collection)?;
        Ok(self.documents(collection))
    }

    async fn fetch_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        self.check_available(collection)?;
        Ok(self
            .documents(collection)
            .into_iter()
            .find(|document| document.id == id))
    }

    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        fields: DocumentFields,
    ) -> Result<(), DocumentStoreError> {
        self.check_available(collection)?;
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let documents = collections.entry(collection).or_default();
        merge_fields(documents, collection, id, fields)
    }
}

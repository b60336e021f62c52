//! In-memory record store.
//!
//! The store holds one immutable [`RecordSnapshot`]. A reload builds a fresh
//! snapshot and swaps it in whole; readers keep whatever `Arc` they cloned,
//! so no derived view ever mixes two loads.

use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::records::{CompletedTransfer, Issue, IssuesByTransfer, Score, StarPoints, Transfer};
use crate::domain::{Collection, DecodeError, Document, UserId, UserProfile};

/// Raw documents for every collection, as returned by one reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedCollections {
    /// `transfers` documents.
    pub transfers: Vec<Document>,
    /// `completedTransfers` documents.
    pub completed_transfers: Vec<Document>,
    /// `issues` documents.
    pub issues: Vec<Document>,
    /// `scores` documents.
    pub scores: Vec<Document>,
    /// `users` documents.
    pub users: Vec<Document>,
    /// `starPoints` documents.
    pub star_points: Vec<Document>,
}

/// Typed snapshot of all fetched collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSnapshot {
    /// Open and historical transfers.
    pub transfers: Vec<Transfer>,
    /// Completed transfers.
    pub completed_transfers: Vec<CompletedTransfer>,
    /// Issues grouped by TFOR number.
    pub issues: IssuesByTransfer,
    /// Score entries.
    pub scores: Vec<Score>,
    /// User profiles.
    pub users: Vec<UserProfile>,
    /// Star counter records.
    pub star_points: Vec<StarPoints>,
    /// Documents dropped at the store boundary.
    pub rejected: Vec<DecodeError>,
}

impl RecordSnapshot {
    /// Decode fetched documents, rejecting the ones that fail validation.
    #[must_use]
    pub fn from_documents(fetched: &FetchedCollections) -> Self {
        let mut rejected = Vec::new();
        let transfers = decode_all(&fetched.transfers, Collection::Transfers, &mut rejected);
        let completed_transfers = decode_all(
            &fetched.completed_transfers,
            Collection::CompletedTransfers,
            &mut rejected,
        );
        let issues = decode_all::<Issue>(&fetched.issues, Collection::Issues, &mut rejected)
            .into_iter()
            .collect();
        let scores = decode_all(&fetched.scores, Collection::Scores, &mut rejected);
        let users = decode_all(&fetched.users, Collection::Users, &mut rejected);
        let star_points = decode_all(&fetched.star_points, Collection::StarPoints, &mut rejected);

        Self {
            transfers,
            completed_transfers,
            issues,
            scores,
            users,
            star_points,
            rejected,
        }
    }

    /// Look up a user profile by identifier.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&UserProfile> {
        self.users.iter().find(|user| user.id() == id)
    }
}

fn decode_all<T: DeserializeOwned>(
    documents: &[Document],
    collection: Collection,
    rejected: &mut Vec<DecodeError>,
) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match document.decode(collection) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    collection = %err.collection,
                    document_id = %err.id,
                    reason = %err.message,
                    "document rejected at store boundary"
                );
                rejected.push(err);
                None
            }
        })
        .collect()
}

/// Holder of the current snapshot.
#[derive(Debug, Default)]
pub struct RecordStore {
    current: RwLock<Arc<RecordSnapshot>>,
}

impl RecordStore {
    /// Store holding an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot visible right now.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RecordSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new snapshot wholesale and return the shared copy.
    #[must_use]
    pub fn replace(&self, snapshot: RecordSnapshot) -> Arc<RecordSnapshot> {
        let shared = Arc::new(snapshot);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&shared);
        shared
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn fetched() -> FetchedCollections {
        FetchedCollections {
            transfers: vec![
                Document::from_json("t1", json!({ "tforNumber": "1", "status": "pending" })),
                Document::from_json("t2", json!({ "tforNumber": "2" })),
            ],
            issues: vec![Document::from_json("i1", json!({ "tforNumber": "1" }))],
            users: vec![Document::from_json(
                "u1",
                json!({ "firstName": "A", "lastName": "B", "email": "a@b.c" }),
            )],
            star_points: vec![Document::from_json("u1", json!({ "smallStars": 3 }))],
            ..FetchedCollections::default()
        }
    }

    #[rstest]
    fn snapshot_keeps_valid_and_reports_rejected() {
        let snapshot = RecordSnapshot::from_documents(&fetched());

        assert_eq!(snapshot.transfers.len(), 1);
        assert_eq!(snapshot.issues.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);
        let rejected = snapshot.rejected.first().expect("one rejection");
        assert_eq!(rejected.collection, Collection::Transfers);
        assert_eq!(rejected.id, "t2");
    }

    #[rstest]
    fn lookups_find_users_and_keep_star_points() {
        let snapshot = RecordSnapshot::from_documents(&fetched());
        let id = UserId::new("u1").expect("id");

        assert_eq!(snapshot.user(&id).map(UserProfile::display_name).as_deref(), Some("A B"));
        assert_eq!(snapshot.star_points.first().map(|p| p.small_stars), Some(3));
        assert!(snapshot.user(&UserId::new("nobody").expect("id")).is_none());
    }

    #[rstest]
    fn replace_swaps_whole_snapshot() {
        let store = RecordStore::new();
        let before = store.snapshot();
        assert!(before.transfers.is_empty());

        let installed = store.replace(RecordSnapshot::from_documents(&fetched()));

        assert_eq!(installed.transfers.len(), 1);
        assert!(Arc::ptr_eq(&installed, &store.snapshot()));
        assert!(before.transfers.is_empty(), "held snapshots are unaffected");
    }
}

//! Raw documents exchanged with the document store and their decoding.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Free-form document fields keyed by field name.
pub type DocumentFields = Map<String, Value>;

/// Named collections read by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    /// Open and historical transfers.
    Transfers,
    /// Transfers that have been checked and received.
    CompletedTransfers,
    /// Reported problems with transfers.
    Issues,
    /// Awarded and deducted stars.
    Scores,
    /// User profiles.
    Users,
    /// Per-user star counters.
    StarPoints,
}

impl Collection {
    /// Every collection fetched on a full reload.
    pub const ALL: [Self; 6] = [
        Self::Transfers,
        Self::CompletedTransfers,
        Self::Issues,
        Self::Scores,
        Self::Users,
        Self::StarPoints,
    ];

    /// Collection name used by the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transfers => "transfers",
            Self::CompletedTransfers => "completedTransfers",
            Self::Issues => "issues",
            Self::Scores => "scores",
            Self::Users => "users",
            Self::StarPoints => "starPoints",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored document: identifier plus field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier within its collection.
    pub id: String,
    /// Stored fields.
    #[serde(flatten)]
    pub fields: DocumentFields,
}

impl Document {
    /// Wrap an identifier and its fields.
    #[must_use]
    pub fn new(id: impl Into<String>, fields: DocumentFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a document from a JSON object literal. Non-object values yield
    /// an empty field map.
    #[must_use]
    pub fn from_json(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    /// Decode into a typed record. The document id is exposed to the record
    /// as the `id` field, overriding any stored field of the same name.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] naming the document when the fields do not
    /// form a valid `T`.
    pub fn decode<T: DeserializeOwned>(&self, collection: Collection) -> Result<T, DecodeError> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_owned(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|err| DecodeError {
            collection,
            id: self.id.clone(),
            message: err.to_string(),
        })
    }
}

/// A document that failed validation at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("rejected {collection} document '{id}': {message}")]
#[serde(rename_all = "camelCase")]
pub struct DecodeError {
    /// Collection the document came from.
    pub collection: Collection,
    /// Identifier of the rejected document.
    pub id: String,
    /// Decoder message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Named {
        id: String,
        name: String,
    }

    #[rstest]
    fn decode_injects_document_id() {
        let doc = Document::from_json("doc-1", json!({ "id": "stale", "name": "n" }));
        let named: Named = doc.decode(Collection::Users).expect("decodes");
        assert_eq!(named.id, "doc-1");
        assert_eq!(named.name, "n");
    }

    #[rstest]
    fn decode_reports_collection_and_id() {
        let doc = Document::from_json("doc-2", json!({}));
        let err = doc.decode::<Named>(Collection::Scores).expect_err("missing name");
        assert_eq!(err.collection, Collection::Scores);
        assert_eq!(err.id, "doc-2");
        assert!(err.to_string().starts_with("rejected scores document 'doc-2'"));
    }

    #[rstest]
    fn documents_serialise_flat() {
        let doc = Document::from_json("t1", json!({ "status": "pending" }));
        let value = serde_json::to_value(&doc).expect("serialise");
        assert_eq!(value, json!({ "id": "t1", "status": "pending" }));
    }

    #[rstest]
    fn collection_names_match_store() {
        let names: Vec<_> = Collection::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "transfers",
                "completedTransfers",
                "issues",
                "scores",
                "users",
                "starPoints"
            ]
        );
    }
}

//! Typed records decoded from the fetched collections.
//!
//! Purpose: replace free-form documents with explicit record types. Each
//! type validates on deserialisation (`serde(try_from = ...)`) so a document
//! missing a required field is rejected at the store boundary instead of
//! flowing into the derived views half-populated.
//!
//! Public surface:
//! - [`Transfer`], [`CompletedTransfer`] and [`TransferStatus`].
//! - [`Issue`] and [`IssuesByTransfer`], the TFOR-number grouping.
//! - [`Score`] and [`StarPoints`].
//! - [`TforNumber`], the transfer-order number joining transfers and issues.

mod issue;
mod score;
mod transfer;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::UserValidationError;

pub use issue::{Issue, IssueGroup, IssuesByTransfer};
pub use score::{Score, StarPoints};
pub use transfer::{CompletedTransfer, Transfer, TransferStatus};

/// Validation errors raised while decoding records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// The TFOR number was blank.
    EmptyTforNumber,
    /// A score carried no reason.
    EmptyReason,
    /// A user reference failed identifier validation.
    InvalidUserId(UserValidationError),
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTforNumber => write!(f, "TFOR number must not be empty"),
            Self::EmptyReason => write!(f, "score reason must not be empty"),
            Self::InvalidUserId(err) => write!(f, "invalid user reference: {err}"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

impl From<UserValidationError> for RecordValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUserId(value)
    }
}

/// Transfer-order number shared by transfers and their issues.
///
/// Stored either as text or as a bare integer; both normalise to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TforNumberRaw", into = "String")]
pub struct TforNumber(String);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TforNumberRaw {
    Text(String),
    Number(u64),
}

impl TforNumber {
    /// Validate and trim a TFOR number.
    ///
    /// # Errors
    /// Returns [`RecordValidationError::EmptyTforNumber`] when `raw` is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, RecordValidationError> {
        let text: String = raw.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::EmptyTforNumber);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Optional TFOR number; absent and blank values both become `None`.
    fn optional(raw: Option<TforNumberRaw>) -> Option<Self> {
        raw.and_then(|value| Self::try_from(value).ok())
    }

    /// Borrow the number as text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<TforNumberRaw> for TforNumber {
    type Error = RecordValidationError;

    fn try_from(value: TforNumberRaw) -> Result<Self, Self::Error> {
        match value {
            TforNumberRaw::Text(text) => Self::new(text),
            TforNumberRaw::Number(number) => Self::new(number.to_string()),
        }
    }
}

impl From<TforNumber> for String {
    fn from(value: TforNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for TforNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TforNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Treat blank optional text as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

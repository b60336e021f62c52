//! Transient success and failure messages shown to the user.

use serde::Serialize;

use crate::domain::DomainError;

/// Whether the action succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The action completed.
    Success,
    /// The action failed and state was left as it was.
    Failure,
}

/// A toast raised by a router action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Success or failure.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Failure toast.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
        }
    }

    /// Failure toast prefixed with the action that failed.
    #[must_use]
    pub fn from_error(action: &str, error: &DomainError) -> Self {
        Self::failure(format!("{action}: {}", error.message()))
    }

    /// Whether this reports a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.kind, NotificationKind::Failure)
    }
}

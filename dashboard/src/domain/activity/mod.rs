//! Recent-activity feed for the profile view.
//!
//! Joins transfers, completed transfers and issues on the acting user's
//! identity and orders the matches newest first.

use std::cmp::Reverse;

use serde::Serialize;

use crate::domain::records::{CompletedTransfer, Issue, IssuesByTransfer, TforNumber, Transfer};
use crate::domain::{Timestamp, UserId, normalize_timestamp};

/// Number of activity items shown when the caller has no preference.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 5;

/// What the user did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// The user created the transfer.
    Created,
    /// The user last checked the completed transfer.
    Checked,
    /// The user last received the completed transfer.
    Received,
    /// The user reported the issue.
    ReportedIssue,
    /// The user was the checker who found the issue.
    FoundIssue,
}

impl ActivityKind {
    /// Sentence shown under the TFOR heading.
    #[must_use]
    pub const fn action_text(self) -> &'static str {
        match self {
            Self::Created => "You created this TFOR",
            Self::Checked => "You finished checking this TFOR",
            Self::Received => "You received the goods for this TFOR",
            Self::ReportedIssue => "You reported an issue",
            Self::FoundIssue => "You found an issue in this TFOR",
        }
    }
}

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    /// What the user did.
    pub kind: ActivityKind,
    /// Identifier of the transfer or issue document.
    pub record_id: String,
    /// Transfer-order number, absent for transfers stored without one.
    pub tfor_number: Option<TforNumber>,
    /// Branch of the record.
    pub branch: Option<String>,
    /// Delivery date for transfers, report date for issues.
    pub display_date: Option<String>,
    /// Normalised creation timestamp used for ordering.
    pub timestamp_millis: i64,
}

impl ActivityItem {
    fn from_transfer(kind: ActivityKind, transfer: &Transfer) -> Self {
        Self {
            kind,
            record_id: transfer.id.clone(),
            tfor_number: transfer.tfor_number.clone(),
            branch: transfer.branch.clone(),
            display_date: transfer.delivery_date.clone(),
            timestamp_millis: event_millis(transfer.created_at.as_ref()),
        }
    }

    fn from_issue(kind: ActivityKind, issue: &Issue) -> Self {
        Self {
            kind,
            record_id: issue.id.clone(),
            tfor_number: Some(issue.tfor_number.clone()),
            branch: issue.branch.clone(),
            display_date: issue.report_date.clone(),
            timestamp_millis: event_millis(issue.created_at.as_ref()),
        }
    }
}

// Checked and received events are dated by the record's creation time; the
// store keeps no per-event timestamp for them.
fn event_millis(created_at: Option<&Timestamp>) -> i64 {
    normalize_timestamp(created_at)
}

fn is_user(reference: Option<&UserId>, user: &UserId) -> bool {
    reference == Some(user)
}

/// Derive the newest `limit` activity items for `user`.
///
/// Candidates are collected in a fixed category order (created, checked,
/// received, reported, found) and then stably sorted by descending
/// timestamp, so equal timestamps keep that order.
#[must_use]
pub fn derive_recent_activity(
    user: &UserId,
    transfers: &[Transfer],
    completed_transfers: &[CompletedTransfer],
    issues: &IssuesByTransfer,
    limit: usize,
) -> Vec<ActivityItem> {
    let completed = || completed_transfers.iter();

    let created = transfers
        .iter()
        .chain(completed().map(|done| &done.transfer))
        .filter(|transfer| is_user(transfer.created_by.as_ref(), user))
        .map(|transfer| ActivityItem::from_transfer(ActivityKind::Created, transfer));
    let checked = completed()
        .filter(|done| is_user(done.last_checked_by.as_ref(), user))
        .map(|done| ActivityItem::from_transfer(ActivityKind::Checked, &done.transfer));
    let received = completed()
        .filter(|done| is_user(done.last_received_by.as_ref(), user))
        .map(|done| ActivityItem::from_transfer(ActivityKind::Received, &done.transfer));
    let reported = issues
        .iter()
        .filter(|issue| is_user(issue.reported_by.as_ref(), user))
        .map(|issue| ActivityItem::from_issue(ActivityKind::ReportedIssue, issue));
    let found = issues
        .iter()
        .filter(|issue| is_user(issue.checker.as_ref(), user))
        .map(|issue| ActivityItem::from_issue(ActivityKind::FoundIssue, issue));

    let mut items: Vec<ActivityItem> = created
        .chain(checked)
        .chain(received)
        .chain(reported)
        .chain(found)
        .collect();
    items.sort_by_key(|item| Reverse(item.timestamp_millis));
    items.truncate(limit);
    items
}

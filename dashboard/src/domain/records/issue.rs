//! Issue records and their grouping by TFOR number.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{RecordValidationError, TforNumber, non_blank};
use crate::domain::{Timestamp, UserId};

/// A problem reported against a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IssueDto")]
pub struct Issue {
    /// Document identifier.
    pub id: String,
    /// Grouping key; never empty.
    pub tfor_number: TforNumber,
    /// Branch the transfer was delivered to.
    pub branch: Option<String>,
    /// User who reported the issue.
    pub reported_by: Option<UserId>,
    /// Checker who identified the issue.
    pub checker: Option<UserId>,
    /// Report day as stored (`YYYY-MM-DD`).
    pub report_date: Option<String>,
    /// Creation time.
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueDto {
    id: String,
    tfor_number: TforNumber,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    reported_by_uid: Option<String>,
    #[serde(default)]
    checker_uid: Option<String>,
    #[serde(default)]
    report_date: Option<String>,
    #[serde(default)]
    created_at: Option<Timestamp>,
}

impl TryFrom<IssueDto> for Issue {
    type Error = RecordValidationError;

    fn try_from(value: IssueDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            tfor_number: value.tfor_number,
            branch: non_blank(value.branch),
            reported_by: UserId::from_reference(value.reported_by_uid),
            checker: UserId::from_reference(value.checker_uid),
            report_date: non_blank(value.report_date),
            created_at: value.created_at,
        })
    }
}

/// Issues sharing one TFOR number, in fetch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueGroup {
    /// Shared key.
    pub tfor_number: TforNumber,
    /// Members in fetch order.
    pub issues: Vec<Issue>,
}

/// Issues grouped by TFOR number.
///
/// Groups keep the order in which their key was first seen; issues inside a
/// group keep fetch order. [`IssuesByTransfer::iter`] flattens in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuesByTransfer {
    groups: Vec<IssueGroup>,
    positions: HashMap<TforNumber, usize>,
}

impl IssuesByTransfer {
    /// An empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue to its group, opening the group if needed.
    pub fn push(&mut self, issue: Issue) {
        if let Some(group) = self
            .positions
            .get(&issue.tfor_number)
            .and_then(|&position| self.groups.get_mut(position))
        {
            group.issues.push(issue);
            return;
        }
        self.positions
            .insert(issue.tfor_number.clone(), self.groups.len());
        self.groups.push(IssueGroup {
            tfor_number: issue.tfor_number.clone(),
            issues: vec![issue],
        });
    }

    /// Issues recorded against `tfor_number`, empty when none.
    #[must_use]
    pub fn for_transfer(&self, tfor_number: &TforNumber) -> &[Issue] {
        self.positions
            .get(tfor_number)
            .and_then(|&position| self.groups.get(position))
            .map_or(&[], |group| group.issues.as_slice())
    }

    /// Groups in first-seen order.
    #[must_use]
    pub const fn groups(&self) -> &[IssueGroup] {
        self.groups.as_slice()
    }

    /// Flattened view across every group.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.groups.iter().flat_map(|group| group.issues.iter())
    }

    /// Total number of issues across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.issues.len()).sum()
    }

    /// Whether no issue has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<Issue> for IssuesByTransfer {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for issue in iter {
            grouped.push(issue);
        }
        grouped
    }
}

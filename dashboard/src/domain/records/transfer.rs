//! Transfer records from the `transfers` and `completedTransfers` collections.

use serde::{Deserialize, Serialize};

use super::{RecordValidationError, TforNumber, TforNumberRaw, non_blank};
use crate::domain::{Timestamp, UserId};

/// Lifecycle state of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferStatus {
    /// Waiting to be picked up.
    Pending,
    /// Being checked or received.
    InProgress,
    /// Checked and received.
    Completed,
}

impl TransferStatus {
    /// Whether the transfer still awaits work (`pending` or `in-progress`).
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// A logistics movement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransferDto")]
pub struct Transfer {
    /// Document identifier.
    pub id: String,
    /// Transfer-order number, when the document carries one.
    pub tfor_number: Option<TforNumber>,
    /// Planned delivery day as stored (`YYYY-MM-DD`).
    pub delivery_date: Option<String>,
    /// Lifecycle state.
    pub status: TransferStatus,
    /// Receiving branch.
    pub branch: Option<String>,
    /// User who created the transfer.
    pub created_by: Option<UserId>,
    /// Creation time.
    pub created_at: Option<Timestamp>,
}

/// A transfer that has been checked and received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompletedTransferDto")]
pub struct CompletedTransfer {
    /// Fields shared with open transfers.
    #[serde(flatten)]
    pub transfer: Transfer,
    /// Completion time.
    pub completed_at: Option<Timestamp>,
    /// User who last checked the goods.
    pub last_checked_by: Option<UserId>,
    /// User who last received the goods.
    pub last_received_by: Option<UserId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferDto {
    id: String,
    #[serde(default)]
    tfor_number: Option<TforNumberRaw>,
    #[serde(default)]
    delivery_date: Option<String>,
    status: TransferStatus,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    created_by_uid: Option<String>,
    #[serde(default)]
    created_at: Option<Timestamp>,
}

impl TryFrom<TransferDto> for Transfer {
    type Error = RecordValidationError;

    fn try_from(value: TransferDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            tfor_number: TforNumber::optional(value.tfor_number),
            delivery_date: non_blank(value.delivery_date),
            status: value.status,
            branch: non_blank(value.branch),
            created_by: UserId::from_reference(value.created_by_uid),
            created_at: value.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletedTransferDto {
    id: String,
    #[serde(default)]
    tfor_number: Option<TforNumberRaw>,
    #[serde(default)]
    delivery_date: Option<String>,
    #[serde(default)]
    status: Option<TransferStatus>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    created_by_uid: Option<String>,
    #[serde(default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    completed_at: Option<Timestamp>,
    #[serde(default)]
    last_checked_by_uid: Option<String>,
    #[serde(default)]
    last_received_by_uid: Option<String>,
}

impl TryFrom<CompletedTransferDto> for CompletedTransfer {
    type Error = RecordValidationError;

    fn try_from(value: CompletedTransferDto) -> Result<Self, Self::Error> {
        let transfer = Transfer::try_from(TransferDto {
            id: value.id,
            tfor_number: value.tfor_number,
            delivery_date: value.delivery_date,
            status: value.status.unwrap_or(TransferStatus::Completed),
            branch: value.branch,
            created_by_uid: value.created_by_uid,
            created_at: value.created_at,
        })?;
        Ok(Self {
            transfer,
            completed_at: value.completed_at,
            last_checked_by: UserId::from_reference(value.last_checked_by_uid),
            last_received_by: UserId::from_reference(value.last_received_by_uid),
        })
    }
}

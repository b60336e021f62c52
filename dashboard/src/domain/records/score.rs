//! Score awards and star-point counters.

use serde::{Deserialize, Serialize};

use super::{RecordValidationError, non_blank};
use crate::domain::{Timestamp, UserId};

/// A signed point adjustment awarded to a user.
///
/// ## Invariants
/// - `reason` is non-empty once trimmed.
/// - Negative `value` is a penalty, positive a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScoreDto")]
pub struct Score {
    /// Document identifier.
    pub id: String,
    /// User the score was awarded to.
    pub user_id: UserId,
    /// Signed point value.
    pub value: i32,
    /// Why the score was awarded.
    pub reason: String,
    /// Optional supervisor note.
    pub notes: Option<String>,
    /// Supervisor who awarded the score.
    pub awarded_by: Option<UserId>,
    /// Award time.
    pub timestamp: Option<Timestamp>,
}

impl Score {
    /// Whether the score takes points away.
    #[must_use]
    pub const fn is_penalty(&self) -> bool {
        self.value < 0
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreDto {
    id: String,
    user_id: String,
    score: i32,
    reason: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    awarded_by_uid: Option<String>,
    #[serde(default)]
    timestamp: Option<Timestamp>,
}

impl TryFrom<ScoreDto> for Score {
    type Error = RecordValidationError;

    fn try_from(value: ScoreDto) -> Result<Self, Self::Error> {
        if value.reason.trim().is_empty() {
            return Err(RecordValidationError::EmptyReason);
        }
        Ok(Self {
            id: value.id,
            user_id: UserId::new(value.user_id)?,
            value: value.score,
            reason: value.reason,
            notes: non_blank(value.notes),
            awarded_by: UserId::from_reference(value.awarded_by_uid),
            timestamp: value.timestamp,
        })
    }
}

/// Small stars accumulate; every ten convert into one big star.
///
/// The conversion is displayed, not enforced: the counters are stored as
/// written by the awarding side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StarPointsDto")]
pub struct StarPoints {
    /// Document identifier.
    pub id: String,
    /// Owner of the counters.
    pub user_id: UserId,
    /// Small stars towards the next big star.
    pub small_stars: u32,
    /// Big stars earned.
    pub big_stars: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StarPointsDto {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    small_stars: u32,
    #[serde(default)]
    big_stars: u32,
}

impl TryFrom<StarPointsDto> for StarPoints {
    type Error = RecordValidationError;

    fn try_from(value: StarPointsDto) -> Result<Self, Self::Error> {
        let owner = non_blank(value.user_id).unwrap_or_else(|| value.id.clone());
        Ok(Self {
            id: value.id,
            user_id: UserId::new(owner)?,
            small_stars: value.small_stars,
            big_stars: value.big_stars,
        })
    }
}

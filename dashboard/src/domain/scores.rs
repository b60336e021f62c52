//! Score history shown on the profile view.

use std::cmp::Reverse;

use serde::Serialize;

use crate::domain::records::Score;
use crate::domain::{CalendarDay, UserId, UserProfile, normalize_timestamp};

/// Attribution used when the awarding user cannot be resolved.
pub const UNKNOWN_AWARDER: &str = "N/A";

/// One score entry resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    /// Score document identifier.
    pub score_id: String,
    /// Why the score was given.
    pub reason: String,
    /// Signed star value.
    pub value: i32,
    /// Number of star glyphs, `|value|`.
    pub stars: u32,
    /// Whether the value is negative.
    pub is_penalty: bool,
    /// Free-text notes from the awarder.
    pub notes: Option<String>,
    /// Display name of the awarder, or [`UNKNOWN_AWARDER`].
    pub awarded_by_name: String,
    /// Normalised award time in epoch milliseconds.
    pub timestamp_millis: i64,
    /// Award day; absent when the score carries no timestamp.
    pub day: Option<CalendarDay>,
}

impl ScoreView {
    fn resolve(score: &Score, users: &[UserProfile]) -> Self {
        let awarded_by_name = score
            .awarded_by
            .as_ref()
            .and_then(|awarder| users.iter().find(|user| user.id() == awarder))
            .map_or_else(|| UNKNOWN_AWARDER.to_owned(), UserProfile::display_name);
        let timestamp_millis = normalize_timestamp(score.timestamp.as_ref());
        let day = score
            .timestamp
            .as_ref()
            .and_then(|_| CalendarDay::from_millis(timestamp_millis));

        Self {
            score_id: score.id.clone(),
            reason: score.reason.clone(),
            value: score.value,
            stars: score.value.unsigned_abs(),
            is_penalty: score.is_penalty(),
            notes: score.notes.clone(),
            awarded_by_name,
            timestamp_millis,
            day,
        }
    }
}

/// Scores awarded to `user`, newest first.
///
/// # Examples
/// ```
/// use dashboard::domain::{UserId, derive_user_score_history};
///
/// let user = UserId::new("u1").expect("valid id");
/// assert!(derive_user_score_history(&user, &[], &[]).is_empty());
/// ```
#[must_use]
pub fn derive_user_score_history(
    user: &UserId,
    scores: &[Score],
    users: &[UserProfile],
) -> Vec<ScoreView> {
    let mut history: Vec<ScoreView> = scores
        .iter()
        .filter(|score| &score.user_id == user)
        .map(|score| ScoreView::resolve(score, users))
        .collect();
    history.sort_by_key(|view| Reverse(view.timestamp_millis));
    history
}

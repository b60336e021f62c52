//! Star-point achievements.
//!
//! Ten small stars make one big star. The counters are stored separately and
//! the conversion is not modelled locally, so a profile can momentarily hold
//! exactly ten small stars; such a profile shows neither a progress badge nor
//! an extra big-star badge until the stored counters catch up.

use serde::Serialize;

use crate::domain::UserProfile;

/// Small stars needed for one big star.
pub const SMALL_STARS_PER_BIG_STAR: u32 = 10;

/// A badge on the achievements shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Badge {
    /// One fully earned big star.
    BigStar,
    /// Progress toward the next big star, `small_stars / 10`.
    InProgress {
        /// Small stars collected so far.
        small_stars: u32,
    },
}

/// Derive the achievement badges for a star count.
///
/// # Examples
/// ```
/// use dashboard::domain::{Badge, derive_achievements};
///
/// assert!(derive_achievements(0, 0).is_empty());
/// assert_eq!(
///     derive_achievements(5, 1),
///     vec![Badge::BigStar, Badge::InProgress { small_stars: 5 }]
/// );
/// assert_eq!(derive_achievements(10, 1), vec![Badge::BigStar]);
/// ```
#[must_use]
pub fn derive_achievements(small_stars: u32, big_stars: u32) -> Vec<Badge> {
    let earned = (0..big_stars).map(|_| Badge::BigStar);
    let progress = (small_stars > 0 && small_stars < SMALL_STARS_PER_BIG_STAR)
        .then_some(Badge::InProgress { small_stars });
    earned.chain(progress).collect()
}

/// Width of the progress bar toward the next big star, in percent.
#[must_use]
pub const fn star_progress_percent(small_stars: u32) -> u32 {
    small_stars
        .rem_euclid(SMALL_STARS_PER_BIG_STAR)
        .saturating_mul(10)
}

/// Star counters, progress and badges for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSummary {
    /// Small stars on the profile.
    pub small_stars: u32,
    /// Big stars on the profile.
    pub big_stars: u32,
    /// Progress bar width toward the next big star.
    pub progress_percent: u32,
    /// Badges in shelf order.
    pub badges: Vec<Badge>,
}

impl StarSummary {
    /// Bundle counters with their derived progress and badges.
    #[must_use]
    pub fn new(small_stars: u32, big_stars: u32) -> Self {
        Self {
            small_stars,
            big_stars,
            progress_percent: star_progress_percent(small_stars),
            badges: derive_achievements(small_stars, big_stars),
        }
    }

    /// Summary for the counters stored on a profile.
    #[must_use]
    pub fn for_profile(profile: &UserProfile) -> Self {
        Self::new(profile.small_stars(), profile.big_stars())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, vec![])]
    #[case(5, 1, vec![Badge::BigStar, Badge::InProgress { small_stars: 5 }])]
    #[case(10, 1, vec![Badge::BigStar])]
    #[case(10, 0, vec![])]
    #[case(1, 0, vec![Badge::InProgress { small_stars: 1 }])]
    #[case(9, 2, vec![Badge::BigStar, Badge::BigStar, Badge::InProgress { small_stars: 9 }])]
    #[case(23, 2, vec![Badge::BigStar, Badge::BigStar])]
    fn badges_follow_thresholds(
        #[case] small_stars: u32,
        #[case] big_stars: u32,
        #[case] expected: Vec<Badge>,
    ) {
        assert_eq!(derive_achievements(small_stars, big_stars), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 50)]
    #[case(9, 90)]
    #[case(10, 0)]
    #[case(27, 70)]
    fn progress_wraps_every_ten(#[case] small_stars: u32, #[case] percent: u32) {
        assert_eq!(star_progress_percent(small_stars), percent);
    }

    #[rstest]
    fn progress_stays_within_bounds() {
        assert!((0..200).map(star_progress_percent).all(|percent| percent <= 90));
    }

    #[rstest]
    fn summary_bundles_counts() {
        let summary = StarSummary::new(4, 1);
        assert_eq!(summary.progress_percent, 40);
        assert_eq!(summary.badges.len(), 2);
    }

    #[rstest]
    fn badges_serialise_with_kind_tag() {
        let value = serde_json::to_value(Badge::InProgress { small_stars: 3 }).expect("serialise");
        assert_eq!(value, serde_json::json!({ "kind": "in_progress", "smallStars": 3 }));
    }
}

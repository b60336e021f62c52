//! Read models composed from a snapshot for the main menu and profile view.

use serde::Serialize;

use crate::domain::{
    ActivityItem, CalendarDay, DEFAULT_AVATARS, PLACEHOLDER_PICTURE, ProfilePicture,
    RecordSnapshot, Role, ScoreView, StarSummary, SummaryCounts, UserId, UserProfile,
    compute_summary_counts, derive_recent_activity, derive_user_score_history,
};

/// Summary counters for `snapshot` against `today`.
#[must_use]
pub fn summarize(snapshot: &RecordSnapshot, today: &CalendarDay) -> SummaryCounts {
    compute_summary_counts(
        &snapshot.transfers,
        &snapshot.completed_transfers,
        &snapshot.issues,
        today,
    )
}

/// Main-menu header and summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainMenuView {
    /// `"First Last"` of the signed-in user.
    pub display_name: String,
    /// Role label for the header badge.
    pub role: Role,
    /// `None` when the last load failed and no counts can be shown.
    pub counts: Option<SummaryCounts>,
}

impl MainMenuView {
    /// Header for `profile` above the given counters.
    #[must_use]
    pub fn new(profile: &UserProfile, counts: Option<SummaryCounts>) -> Self {
        Self {
            display_name: profile.display_name(),
            role: profile.role().clone(),
            counts,
        }
    }
}

/// One entry of the avatar gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarChoice {
    /// Avatar image URL.
    pub url: String,
    /// Whether it is the picture currently shown.
    pub selected: bool,
}

/// Everything the profile page shows for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Signed-in user.
    pub user_id: UserId,
    /// `"First Last"`.
    pub display_name: String,
    /// Given name, prefilled on the form.
    pub first_name: String,
    /// Family name, prefilled on the form.
    pub last_name: String,
    /// Sign-in email.
    pub email: String,
    /// Role label.
    pub role: Role,
    /// Lower-cased role for presentation.
    pub role_class: String,
    /// The pending picture when one is selected, else the stored one.
    pub picture_url: String,
    /// Default avatar gallery.
    pub avatars: Vec<AvatarChoice>,
    /// Recent activity, newest first.
    pub activity: Vec<ActivityItem>,
    /// Score history, newest first.
    pub scores: Vec<ScoreView>,
    /// Star counters and badges from the profile document.
    pub stars: StarSummary,
}

impl ProfileView {
    /// Compose the profile page for `profile` from `snapshot`.
    ///
    /// Star counters are the ones stored on the profile document.
    #[must_use]
    pub fn derive(
        snapshot: &RecordSnapshot,
        profile: &UserProfile,
        pending_picture: Option<&ProfilePicture>,
        activity_limit: usize,
    ) -> Self {
        let user = profile.id();
        let picture_url = pending_picture
            .map(ProfilePicture::url)
            .or_else(|| profile.profile_picture_url())
            .unwrap_or(PLACEHOLDER_PICTURE)
            .to_owned();
        let avatars = DEFAULT_AVATARS
            .iter()
            .map(|url| AvatarChoice {
                url: (*url).to_owned(),
                selected: *url == picture_url,
            })
            .collect();

        Self {
            user_id: user.clone(),
            display_name: profile.display_name(),
            first_name: profile.first_name().to_owned(),
            last_name: profile.last_name().to_owned(),
            email: profile.email().to_owned(),
            role: profile.role().clone(),
            role_class: profile.role().css_class(),
            picture_url,
            avatars,
            activity: derive_recent_activity(
                user,
                &snapshot.transfers,
                &snapshot.completed_transfers,
                &snapshot.issues,
                activity_limit,
            ),
            scores: derive_user_score_history(user, &snapshot.scores, &snapshot.users),
            stars: StarSummary::for_profile(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::records::StarPoints;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile() -> UserProfile {
        UserProfile::builder(UserId::new("u1").expect("id"), "Ann", "Lee", "ann@example.com")
            .stars(3, 1)
            .build()
            .expect("profile")
    }

    #[rstest]
    fn picture_falls_back_to_placeholder(profile: UserProfile) {
        let view = ProfileView::derive(&RecordSnapshot::default(), &profile, None, 5);
        assert_eq!(view.picture_url, PLACEHOLDER_PICTURE);
        assert!(view.avatars.iter().all(|avatar| !avatar.selected));
        assert_eq!(view.avatars.len(), DEFAULT_AVATARS.len());
    }

    #[rstest]
    fn pending_picture_wins_and_is_selected(profile: UserProfile) {
        let url = DEFAULT_AVATARS.get(2).copied().expect("gallery entry");
        let pending = ProfilePicture::default_avatar(url).expect("known avatar");

        let view = ProfileView::derive(&RecordSnapshot::default(), &profile, Some(&pending), 5);

        assert_eq!(view.picture_url, url);
        let selected: Vec<_> = view.avatars.iter().filter(|a| a.selected).collect();
        assert_eq!(selected.len(), 1);
    }

    #[rstest]
    fn stars_come_from_the_profile_document(profile: UserProfile) {
        let bare = ProfileView::derive(&RecordSnapshot::default(), &profile, None, 5);
        assert_eq!(bare.stars, StarSummary::new(3, 1));

        let snapshot = RecordSnapshot {
            star_points: vec![StarPoints {
                id: "u1".to_owned(),
                user_id: profile.id().clone(),
                small_stars: 7,
                big_stars: 2,
            }],
            ..RecordSnapshot::default()
        };
        let with_record = ProfileView::derive(&snapshot, &profile, None, 5);
        assert_eq!(with_record.stars, StarSummary::new(3, 1));
    }

    #[rstest]
    fn main_menu_carries_identity(profile: UserProfile) {
        let view = MainMenuView::new(&profile, Some(SummaryCounts::default()));
        assert_eq!(view.display_name, "Ann Lee");
        assert_eq!(view.role.as_ref(), "Officer");
        assert_eq!(view.counts, Some(SummaryCounts::default()));
    }
}

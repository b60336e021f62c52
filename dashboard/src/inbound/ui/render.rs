//! Plain-text rendering of view models for terminals and logs.

use chrono::NaiveDate;

use super::{Notification, NotificationKind, ViewModel};
use crate::domain::records::TforNumber;
use crate::domain::{
    ActivityItem, Badge, CHAT_GREETING, ChatAuthor, ChatTranscript, MainMenuView, ProfileView,
    SMALL_STARS_PER_BIG_STAR, ScoreView,
};

const NO_DATA: &str = "No data";
const NO_DATE: &str = "No date";
const NO_TFOR: &str = "N/A";

/// Abbreviate a stored `YYYY-MM-DD` day as `Jan 5`.
///
/// Missing days render as `No data`; unparseable days are shown verbatim.
///
/// # Examples
/// ```
/// use dashboard::inbound::ui::format_day_abbreviated;
///
/// assert_eq!(format_day_abbreviated(Some("2024-03-07")), "Mar 7");
/// assert_eq!(format_day_abbreviated(None), "No data");
/// ```
#[must_use]
pub fn format_day_abbreviated(day: Option<&str>) -> String {
    day.map_or_else(
        || NO_DATA.to_owned(),
        |raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_or_else(|_| raw.to_owned(), |date| date.format("%b %-d").to_string())
        },
    )
}

/// Render a notification as `[ok] ...` or `[error] ...`.
#[must_use]
pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Failure => "error",
    };
    format!("[{marker}] {}", notification.message)
}

/// Render a view model as human-readable lines.
#[must_use]
pub fn render_text(model: &ViewModel) -> String {
    let lines = match model {
        ViewModel::Login => vec!["== Login ==".to_owned(), "Please sign in.".to_owned()],
        ViewModel::MainMenu(menu) => main_menu_lines(menu),
        ViewModel::Profile(profile) => profile_lines(profile),
        ViewModel::AiChat(transcript) => chat_lines(transcript),
        ViewModel::Page(view) => vec![format!("== {view:?} ==")],
    };
    lines.join("\n")
}

fn main_menu_lines(menu: &MainMenuView) -> Vec<String> {
    let mut lines = vec![
        "== Main menu ==".to_owned(),
        format!("{} ({})", menu.display_name, menu.role),
    ];
    lines.extend(menu.counts.map_or_else(
        || vec!["Summary unavailable".to_owned()],
        |counts| {
            vec![
                format!("Today's plan: {}", counts.todays_plan),
                format!("Pending: {}", counts.pending),
                format!("Completed today: {}", counts.completed_today),
                format!("Issues: {}", counts.issues),
            ]
        },
    ));
    lines
}

fn profile_lines(profile: &ProfileView) -> Vec<String> {
    let mut lines = vec![
        "== Profile ==".to_owned(),
        format!("{} ({})", profile.display_name, profile.role),
        profile.email.clone(),
        format!("Picture: {}", profile.picture_url),
        String::new(),
        "Recent activity".to_owned(),
    ];
    if profile.activity.is_empty() {
        lines.push("No recent activity".to_owned());
    }
    lines.extend(profile.activity.iter().flat_map(activity_lines));

    lines.extend([String::new(), "Scores".to_owned()]);
    if profile.scores.is_empty() {
        lines.push("No scores from supervisors yet".to_owned());
    }
    lines.extend(profile.scores.iter().flat_map(score_lines));

    let stars = &profile.stars;
    lines.extend([
        String::new(),
        format!(
            "Stars: {} small, {} big ({}% to next big star)",
            stars.small_stars, stars.big_stars, stars.progress_percent
        ),
    ]);
    lines.extend(stars.badges.iter().map(|badge| match badge {
        Badge::BigStar => "* Big star".to_owned(),
        Badge::InProgress { small_stars } => {
            format!("- Big star ({small_stars}/{SMALL_STARS_PER_BIG_STAR})")
        }
    }));
    lines
}

fn activity_lines(item: &ActivityItem) -> [String; 2] {
    let branch = item.branch.as_deref().unwrap_or(NO_DATA);
    let tfor = item
        .tfor_number
        .as_ref()
        .map_or(NO_TFOR, TforNumber::as_str);
    [
        format!("TFOR: ...{tfor} ({branch})"),
        format!(
            "  {} - {}",
            item.kind.action_text(),
            format_day_abbreviated(item.display_date.as_deref())
        ),
    ]
}

fn score_lines(score: &ScoreView) -> Vec<String> {
    let stars = "★".repeat(usize::try_from(score.stars).unwrap_or_default());
    let penalty = if score.is_penalty { " (penalty)" } else { "" };
    let day = score
        .day
        .as_ref()
        .map_or_else(|| NO_DATE.to_owned(), ToString::to_string);
    let mut lines = vec![
        format!("{} {stars}{penalty}", score.reason),
        format!("  by: {} - {day}", score.awarded_by_name),
    ];
    if let Some(notes) = &score.notes {
        lines.push(format!("  \"{notes}\""));
    }
    lines
}

fn chat_lines(transcript: &ChatTranscript) -> Vec<String> {
    let mut lines = vec!["== Assistant ==".to_owned()];
    if transcript.messages().is_empty() {
        lines.push(CHAT_GREETING.to_owned());
    }
    lines.extend(transcript.messages().iter().map(|message| {
        let author = match message.author {
            ChatAuthor::User => "you",
            ChatAuthor::Assistant => "assistant",
        };
        format!("{author}: {}", message.text)
    }));
    lines
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ActivityKind, SummaryCounts};
    use rstest::rstest;

    #[rstest]
    #[case(Some("2024-01-05"), "Jan 5")]
    #[case(Some("2024-12-25"), "Dec 25")]
    #[case(Some("tomorrow"), "tomorrow")]
    #[case(None, "No data")]
    fn abbreviates_days(#[case] day: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_day_abbreviated(day), expected);
    }

    #[rstest]
    fn activity_lines_name_tfor_branch_and_action() {
        let item = ActivityItem {
            kind: ActivityKind::Checked,
            record_id: "c1".to_owned(),
            tfor_number: TforNumber::new("4821").ok(),
            branch: Some("Bangna".to_owned()),
            display_date: Some("2024-01-05".to_owned()),
            timestamp_millis: 0,
        };

        let [heading, detail] = activity_lines(&item);

        assert_eq!(heading, "TFOR: ...4821 (Bangna)");
        assert_eq!(detail, "  You finished checking this TFOR - Jan 5");
    }

    #[rstest]
    fn activity_without_tfor_number_is_marked() {
        let item = ActivityItem {
            kind: ActivityKind::Created,
            record_id: "t1".to_owned(),
            tfor_number: None,
            branch: None,
            display_date: None,
            timestamp_millis: 0,
        };

        let [heading, detail] = activity_lines(&item);

        assert_eq!(heading, "TFOR: ...N/A (No data)");
        assert_eq!(detail, "  You created this TFOR - No data");
    }

    #[rstest]
    fn main_menu_without_counts_says_so() {
        let menu = MainMenuView {
            display_name: "Ann Lee".to_owned(),
            role: crate::domain::Role::default(),
            counts: None,
        };
        let text = render_text(&ViewModel::MainMenu(menu.clone()));
        assert!(text.contains("Summary unavailable"));

        let counted = MainMenuView {
            counts: Some(SummaryCounts {
                todays_plan: 2,
                ..SummaryCounts::default()
            }),
            ..menu
        };
        assert!(render_text(&ViewModel::MainMenu(counted)).contains("Today's plan: 2"));
    }

    #[rstest]
    fn empty_chat_shows_greeting() {
        let text = render_text(&ViewModel::AiChat(ChatTranscript::default()));
        assert!(text.contains(CHAT_GREETING));
    }

    #[rstest]
    fn notifications_are_tagged() {
        assert_eq!(
            render_notification(&Notification::failure("boom")),
            "[error] boom"
        );
        assert_eq!(render_notification(&Notification::success("done")), "[ok] done");
    }
}

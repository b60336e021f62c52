//! Views and the navigation events that select them.

use serde::{Deserialize, Serialize};

/// A top-level view. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Shown while nobody is signed in.
    #[default]
    Login,
    /// Header and summary cards.
    MainMenu,
    /// Product check placeholder.
    CheckProduct,
    /// Profile, activity, scores and account settings.
    Profile,
    /// KPI placeholder.
    Kpi,
    /// Today's plan placeholder.
    TodaysPlan,
    /// Assistant chat.
    AiChat,
    /// Transfers placeholder.
    Transfers,
    /// Calendar placeholder.
    Calendar,
    /// Statistics placeholder.
    Statistics,
}

/// User interactions that switch the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationEvent {
    /// Menu entry for product checks.
    GoToCheckProduct,
    /// Menu entry for the assistant.
    GoToAiChat,
    /// Menu entry for transfers.
    GoToTransfers,
    /// Menu entry for the calendar.
    GoToCalendar,
    /// Menu entry for statistics.
    GoToStatistics,
    /// Menu entry for KPIs.
    GoToKpi,
    /// Any back button.
    BackToMainMenu,
    /// Header avatar.
    OpenProfile,
    /// "Today's plan" summary card.
    TodaysPlanCard,
    /// "Pending" summary card.
    PendingCard,
    /// "Completed today" summary card.
    CompletedTodayCard,
    /// "Issues" summary card.
    IssuesCard,
}

impl NavigationEvent {
    /// The view this event activates.
    ///
    /// # Examples
    /// ```
    /// use dashboard::inbound::ui::{NavigationEvent, View};
    ///
    /// assert_eq!(NavigationEvent::PendingCard.target(), View::Transfers);
    /// ```
    #[must_use]
    pub const fn target(self) -> View {
        match self {
            Self::GoToCheckProduct => View::CheckProduct,
            Self::GoToAiChat => View::AiChat,
            Self::GoToTransfers | Self::PendingCard | Self::IssuesCard => View::Transfers,
            Self::GoToCalendar => View::Calendar,
            Self::GoToStatistics | Self::CompletedTodayCard => View::Statistics,
            Self::GoToKpi => View::Kpi,
            Self::BackToMainMenu => View::MainMenu,
            Self::OpenProfile => View::Profile,
            Self::TodaysPlanCard => View::TodaysPlan,
        }
    }
}

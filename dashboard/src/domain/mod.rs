//! Domain primitives, derivations and services.
//!
//! Purpose: decode the stored collections into validated records, derive the
//! dashboard read models from one consistent snapshot, and expose the
//! dashboard use-cases through the [`ports::DashboardSession`] driving port.
//!
//! Public surface:
//! - `DomainError` / `ErrorCode`: error payload shared by every use-case.
//! - `Timestamp`, `normalize_timestamp`, `CalendarDay`: time handling.
//! - `records`: typed transfers, issues, scores and star counters.
//! - `RecordStore` / `RecordSnapshot`: the atomically replaced data set.
//! - `derive_recent_activity`, `derive_user_score_history`,
//!   `derive_achievements`, `compute_summary_counts`: pure derivations.
//! - `DashboardService`: the driving-port implementation.

pub mod achievements;
pub mod activity;
pub mod chat;
pub mod credentials;
pub mod dashboard_service;
pub mod document;
pub mod error;
pub mod ports;
pub mod profile;
pub mod record_store;
pub mod records;
pub mod scores;
pub mod summary;
pub mod timestamp;
pub mod user;
pub mod views;

pub use self::achievements::{
    Badge, SMALL_STARS_PER_BIG_STAR, StarSummary, derive_achievements, star_progress_percent,
};
pub use self::activity::{ActivityItem, ActivityKind, DEFAULT_ACTIVITY_LIMIT, derive_recent_activity};
pub use self::chat::{CANNED_REPLIES, CHAT_GREETING, ChatAssistant, ChatAuthor, ChatMessage, ChatTranscript};
pub use self::credentials::{PASSWORD_MIN_LENGTH, Password, PasswordChange, PasswordChangeError};
pub use self::dashboard_service::DashboardService;
pub use self::document::{Collection, DecodeError, Document, DocumentFields};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::profile::{
    DEFAULT_AVATARS, PLACEHOLDER_PICTURE, ProfilePicture, ProfileUpdate, ProfileValidationError,
};
pub use self::record_store::{FetchedCollections, RecordSnapshot, RecordStore};
pub use self::scores::{ScoreView, UNKNOWN_AWARDER, derive_user_score_history};
pub use self::summary::{SummaryCounts, compute_summary_counts};
pub use self::timestamp::{CalendarDay, StoreTimestamp, Timestamp, normalize_timestamp};
pub use self::user::{DEFAULT_ROLE, Role, UserId, UserProfile, UserProfileBuilder, UserValidationError};
pub use self::views::{AvatarChoice, MainMenuView, ProfileView, summarize};

/// Convenient result alias for dashboard use-cases.
///
/// # Examples
/// ```
/// use dashboard::domain::{DomainError, DomainResult};
///
/// fn load() -> DomainResult<()> {
///     Err(DomainError::service_unavailable("store offline"))
/// }
///
/// assert!(load().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;

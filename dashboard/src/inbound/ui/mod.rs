//! View routing and presentation for the dashboard.

pub mod navigation;
pub mod notification;
pub mod render;
pub mod router;

pub use navigation::{NavigationEvent, View};
pub use notification::{Notification, NotificationKind};
pub use render::{format_day_abbreviated, render_notification, render_text};
pub use router::{AppState, ViewModel, ViewRouter};

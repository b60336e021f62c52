//! Headless core of the inbound operations dashboard.
//!
//! Loads transfers, completed transfers, issues, scores, users and star
//! points from a document store into one atomically replaced snapshot, and
//! derives the main-menu summary, recent activity, score history and
//! achievements from it. The view router drives navigation and profile
//! actions on top of the [`domain::ports::DashboardSession`] port.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::DashboardSettings;

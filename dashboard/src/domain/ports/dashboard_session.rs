//! Driving port for the dashboard use-cases.
//!
//! Inbound adapters (the view router) call this port to sign in, load data
//! and change the profile without knowing which store or provider backs it.
//! Router tests substitute the generated mock.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    CalendarDay, DomainResult, PasswordChange, ProfileUpdate, RecordSnapshot, UserProfile,
};

/// Dashboard use-cases for the signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardSession: Send + Sync {
    /// Resolve the signed-in user's profile.
    ///
    /// Returns `None` when nobody is signed in. A signed-in identity without
    /// a profile document is signed out and reported as an error.
    async fn sign_in(&self) -> DomainResult<Option<UserProfile>>;

    /// Fetch every collection and publish a fresh snapshot.
    ///
    /// The published snapshot is left untouched when any fetch fails.
    async fn reload(&self) -> DomainResult<Arc<RecordSnapshot>>;

    /// The most recently published snapshot.
    fn snapshot(&self) -> Arc<RecordSnapshot>;

    /// Today's calendar day according to the session clock.
    fn today(&self) -> CalendarDay;

    /// Persist a profile edit and return the updated profile.
    async fn update_profile(
        &self,
        profile: &UserProfile,
        update: ProfileUpdate,
    ) -> DomainResult<UserProfile>;

    /// Re-verify the current password, then replace it.
    async fn change_password(&self, email: &str, change: PasswordChange) -> DomainResult<()>;

    /// End the session.
    async fn sign_out(&self) -> DomainResult<()>;
}

//! View router.
//!
//! The router owns the application state explicitly: the signed-in profile,
//! the active view, the pending profile picture and the chat transcript.
//! Actions call the [`DashboardSession`] port and turn every failure into a
//! [`Notification`]; the returned [`ViewModel`] is what the active view shows.

use std::mem;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::{NavigationEvent, Notification, View};
use crate::domain::ports::DashboardSession;
use crate::domain::{
    ChatAssistant, ChatTranscript, MainMenuView, PasswordChange, ProfilePicture, ProfileUpdate,
    ProfileView, UserProfile, summarize,
};

/// Content of the active view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum ViewModel {
    /// Nobody is signed in.
    Login,
    /// Header and summary cards.
    MainMenu(MainMenuView),
    /// The signed-in user's profile page.
    Profile(Box<ProfileView>),
    /// The chat transcript.
    AiChat(ChatTranscript),
    /// A view whose content is served outside the dashboard core.
    Page(View),
}

impl ViewModel {
    /// The view this model renders.
    #[must_use]
    pub const fn view(&self) -> View {
        match self {
            Self::Login => View::Login,
            Self::MainMenu(_) => View::MainMenu,
            Self::Profile(_) => View::Profile,
            Self::AiChat(_) => View::AiChat,
            Self::Page(view) => *view,
        }
    }
}

/// Explicit application state owned by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Profile of the signed-in user.
    pub session: Option<UserProfile>,
    /// View currently shown.
    pub active_view: View,
    /// Picture chosen on the profile form but not yet saved.
    pub pending_picture: Option<ProfilePicture>,
    /// Chat messages of this session.
    pub chat: ChatTranscript,
    /// Whether a load has succeeded since sign-in.
    pub loaded: bool,
}

/// Drives view selection and user actions for one session.
pub struct ViewRouter<S> {
    dashboard: Arc<S>,
    assistant: ChatAssistant,
    activity_limit: usize,
    state: AppState,
    notifications: Vec<Notification>,
}

impl<S> ViewRouter<S>
where
    S: DashboardSession,
{
    /// Router for a signed-out session showing up to `activity_limit`
    /// activity items on the profile page.
    #[must_use]
    pub fn new(dashboard: Arc<S>, assistant: ChatAssistant, activity_limit: usize) -> Self {
        Self {
            dashboard,
            assistant,
            activity_limit,
            state: AppState::default(),
            notifications: Vec::new(),
        }
    }

    /// Current application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Drain notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// Resolve the signed-in user and load the dashboard data.
    pub async fn start(&mut self) -> ViewModel {
        match self.dashboard.sign_in().await {
            Ok(Some(profile)) => {
                self.state.session = Some(profile);
                self.state.active_view = View::MainMenu;
                self.load().await;
            }
            Ok(None) => self.state = AppState::default(),
            Err(err) => {
                self.state = AppState::default();
                self.notify(Notification::from_error("Could not load user data", &err));
            }
        }
        self.render()
    }

    /// Fetch fresh data for the current session.
    pub async fn reload(&mut self) -> ViewModel {
        if self.state.session.is_some() {
            self.load().await;
        }
        self.render()
    }

    /// Switch to the view selected by `event`.
    ///
    /// Unauthenticated sessions always stay on the login view.
    pub fn navigate(&mut self, event: NavigationEvent) -> ViewModel {
        if self.state.session.is_some() {
            self.state.active_view = event.target();
            debug!(view = ?self.state.active_view, "navigated");
        }
        self.render()
    }

    /// Model for the active view, computed from the current snapshot.
    #[must_use]
    pub fn render(&self) -> ViewModel {
        let Some(profile) = &self.state.session else {
            return ViewModel::Login;
        };
        match self.state.active_view {
            View::Login => ViewModel::Login,
            View::MainMenu => {
                let counts = self
                    .state
                    .loaded
                    .then(|| summarize(&self.dashboard.snapshot(), &self.dashboard.today()));
                ViewModel::MainMenu(MainMenuView::new(profile, counts))
            }
            View::Profile => ViewModel::Profile(Box::new(ProfileView::derive(
                &self.dashboard.snapshot(),
                profile,
                self.state.pending_picture.as_ref(),
                self.activity_limit,
            ))),
            View::AiChat => ViewModel::AiChat(self.state.chat.clone()),
            other => ViewModel::Page(other),
        }
    }

    /// Pick an avatar from the default gallery as the pending picture.
    pub fn select_default_avatar(&mut self, url: &str) -> ViewModel {
        match ProfilePicture::default_avatar(url) {
            Ok(picture) => self.state.pending_picture = Some(picture),
            Err(err) => self.notify(Notification::failure(format!(
                "Could not select picture: {err}"
            ))),
        }
        self.render()
    }

    /// Use an uploaded image as the pending picture.
    pub fn upload_profile_picture(&mut self, mime_type: &str, bytes: &[u8]) -> ViewModel {
        match ProfilePicture::from_upload(mime_type, bytes) {
            Ok(picture) => self.state.pending_picture = Some(picture),
            Err(err) => self.notify(Notification::failure(format!(
                "Could not process picture: {err}"
            ))),
        }
        self.render()
    }

    /// Save the profile form together with any pending picture.
    ///
    /// A successful save returns to the main menu.
    pub async fn submit_profile(&mut self, first_name: &str, last_name: &str) -> ViewModel {
        let Some(profile) = self.state.session.clone() else {
            return self.render();
        };
        let update =
            match ProfileUpdate::new(first_name, last_name, self.state.pending_picture.clone()) {
                Ok(update) => update,
                Err(err) => {
                    self.notify(Notification::failure(format!(
                        "Profile update failed: {err}"
                    )));
                    return self.render();
                }
            };
        match self.dashboard.update_profile(&profile, update).await {
            Ok(updated) => {
                self.state.session = Some(updated);
                self.state.pending_picture = None;
                self.state.active_view = View::MainMenu;
                self.notify(Notification::success("Profile updated"));
            }
            Err(err) => self.notify(Notification::from_error("Profile update failed", &err)),
        }
        self.render()
    }

    /// Validate the password form and change the password.
    pub async fn change_password(
        &mut self,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> ViewModel {
        let Some(email) = self
            .state
            .session
            .as_ref()
            .map(|profile| profile.email().to_owned())
        else {
            return self.render();
        };
        let change = match PasswordChange::new(current, new_password, confirm) {
            Ok(change) => change,
            Err(err) => {
                self.notify(Notification::failure(format!(
                    "Password change failed: {err}"
                )));
                return self.render();
            }
        };
        match self.dashboard.change_password(&email, change).await {
            Ok(()) => self.notify(Notification::success("Password changed")),
            Err(err) => self.notify(Notification::from_error("Password change failed", &err)),
        }
        self.render()
    }

    /// Send a message to the assistant and show the chat.
    pub fn send_chat_message(&mut self, message: &str) -> ViewModel {
        if self.state.session.is_some() {
            self.state.chat.submit(message, &self.assistant);
            self.state.active_view = View::AiChat;
        }
        self.render()
    }

    /// End the session and return to the login view.
    pub async fn sign_out(&mut self) -> ViewModel {
        match self.dashboard.sign_out().await {
            Ok(()) => {
                self.state = AppState::default();
                self.notify(Notification::success("Signed out"));
            }
            Err(err) => self.notify(Notification::from_error("Sign-out failed", &err)),
        }
        self.render()
    }

    async fn load(&mut self) {
        match self.dashboard.reload().await {
            Ok(_) => self.state.loaded = true,
            Err(err) => {
                warn!(error = %err, "dashboard data load failed");
                self.notify(Notification::from_error("Failed to load data", &err));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

//! Port for the authentication provider.
//!
//! The provider owns the signed-in identity and the user's credentials. The
//! dashboard only asks who is signed in, re-verifies the current password
//! before sensitive changes and signs the user out.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Password, UserId};

/// Errors raised by identity provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityProviderError {
    /// The supplied credential did not verify.
    #[error("invalid credential: {message}")]
    InvalidCredential {
        /// Provider explanation.
        message: String,
    },
    /// The provider refused the new password.
    #[error("weak password: {message}")]
    WeakPassword {
        /// Provider explanation.
        message: String,
    },
    /// The operation needs a signed-in user.
    #[error("no user is signed in")]
    NotSignedIn,
    /// The provider could not be reached.
    #[error("identity provider unavailable: {message}")]
    Unavailable {
        /// Transport failure description.
        message: String,
    },
}

impl IdentityProviderError {
    /// Build an [`IdentityProviderError::InvalidCredential`].
    #[must_use]
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential {
            message: message.into(),
        }
    }

    /// Build an [`IdentityProviderError::WeakPassword`].
    #[must_use]
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::WeakPassword {
            message: message.into(),
        }
    }

    /// Build an [`IdentityProviderError::Unavailable`].
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account identifier, also the profile document id.
    pub uid: UserId,
    /// Sign-in email.
    pub email: String,
}

impl Identity {
    /// Pair an identifier with its sign-in email.
    #[must_use]
    pub fn new(uid: UserId, email: impl Into<String>) -> Self {
        Self {
            uid,
            email: email.into(),
        }
    }
}

/// Authentication operations used by the dashboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in identity, or `None` when nobody is signed in.
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityProviderError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), IdentityProviderError>;

    /// Verify `password` for `email` against the signed-in account.
    async fn reauthenticate(&self, email: &str, password: &str)
    -> Result<(), IdentityProviderError>;

    /// Replace the signed-in account's password.
    async fn update_password(&self, new_password: &str) -> Result<(), IdentityProviderError>;
}

/// Minimum password length the in-memory provider accepts.
const PROVIDER_MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Default)]
struct FixtureAccount {
    identity: Option<Identity>,
    email: String,
    password: Password,
    offline: bool,
}

/// In-memory identity provider for a single account.
///
/// Used by tests and by the binary, which signs in the account named in its
/// settings.
#[derive(Debug, Default)]
pub struct FixtureIdentityProvider {
    account: Mutex<FixtureAccount>,
}

impl FixtureIdentityProvider {
    /// A provider with `identity` already signed in.
    #[must_use]
    pub fn signed_in(identity: Identity, password: &str) -> Self {
        Self {
            account: Mutex::new(FixtureAccount {
                email: identity.email.clone(),
                identity: Some(identity),
                password: Zeroizing::new(password.to_owned()),
                offline: false,
            }),
        }
    }

    /// A provider with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Simulate the provider going offline or coming back.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Whether `password` is the account's current password.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.lock().password.as_str() == password
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureAccount> {
        self.account.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_online(account: &FixtureAccount) -> Result<(), IdentityProviderError> {
    if account.offline {
        return Err(IdentityProviderError::unavailable("provider is offline"));
    }
    Ok(())
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, IdentityProviderError> {
        let account = self.lock();
        ensure_online(&account)?;
        Ok(account.identity.clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        let mut account = self.lock();
        ensure_online(&account)?;
        account.identity = None;
        Ok(())
    }

    async fn reauthenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityProviderError> {
        let account = self.lock();
        ensure_online(&account)?;
        if account.identity.is_none() {
            return Err(IdentityProviderError::NotSignedIn);
        }
        if account.email != email || account.password.as_str() != password {
            return Err(IdentityProviderError::invalid_credential(
                "current password is incorrect",
            ));
        }
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<(), IdentityProviderError> {
        let mut account = self.lock();
        ensure_online(&account)?;
        if account.identity.is_none() {
            return Err(IdentityProviderError::NotSignedIn);
        }
        if new_password.chars().count() < PROVIDER_MIN_PASSWORD_LENGTH {
            return Err(IdentityProviderError::weak_password(format!(
                "password should be at least {PROVIDER_MIN_PASSWORD_LENGTH} characters"
            )));
        }
        account.password = Zeroizing::new(new_password.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> FixtureIdentityProvider {
        let uid = UserId::new("u1").expect("valid id");
        FixtureIdentityProvider::signed_in(Identity::new(uid, "ann@example.com"), "secret1")
    }

    #[rstest]
    #[tokio::test]
    async fn sign_out_clears_identity(provider: FixtureIdentityProvider) {
        assert!(provider.current_identity().await.expect("online").is_some());
        provider.sign_out().await.expect("sign out");
        assert!(provider.current_identity().await.expect("online").is_none());
    }

    #[rstest]
    #[case("ann@example.com", "secret1", true)]
    #[case("ann@example.com", "wrong", false)]
    #[case("bob@example.com", "secret1", false)]
    #[tokio::test]
    async fn reauthenticate_checks_email_and_password(
        provider: FixtureIdentityProvider,
        #[case] email: &str,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        let result = provider.reauthenticate(email, password).await;
        assert_eq!(result.is_ok(), accepted);
        if let Err(err) = result {
            assert!(matches!(err, IdentityProviderError::InvalidCredential { .. }));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn update_password_replaces_credential(provider: FixtureIdentityProvider) {
        provider.update_password("another1").await.expect("update");
        assert!(provider.password_matches("another1"));
        assert!(!provider.password_matches("secret1"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_password_rejects_weak_passwords(provider: FixtureIdentityProvider) {
        let err = provider.update_password("abc").await.expect_err("weak");
        assert!(matches!(err, IdentityProviderError::WeakPassword { .. }));
        assert!(provider.password_matches("secret1"));
    }

    #[rstest]
    #[tokio::test]
    async fn signed_out_provider_refuses_password_operations() {
        let provider = FixtureIdentityProvider::signed_out();
        assert_eq!(
            provider.update_password("another1").await,
            Err(IdentityProviderError::NotSignedIn)
        );
        assert_eq!(
            provider.reauthenticate("", "").await,
            Err(IdentityProviderError::NotSignedIn)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn offline_provider_reports_unavailable(provider: FixtureIdentityProvider) {
        provider.set_offline(true);
        let err = provider.sign_out().await.expect_err("offline");
        assert!(matches!(err, IdentityProviderError::Unavailable { .. }));
        provider.set_offline(false);
        assert!(provider.current_identity().await.expect("online").is_some());
    }
}

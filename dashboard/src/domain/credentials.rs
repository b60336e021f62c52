//! Password-change form validation.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum length of a new password, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// A password held in memory only for the duration of a request.
pub type Password = Zeroizing<String>;

/// Validation errors for the password-change form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeError {
    /// The confirmation differs from the new password.
    Mismatch,
    /// The new password is shorter than the minimum.
    TooShort {
        /// Required minimum length.
        min: usize,
    },
}

impl fmt::Display for PasswordChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch => write!(f, "new passwords do not match"),
            Self::TooShort { min } => {
                write!(f, "new password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for PasswordChangeError {}

/// A validated request to replace the signed-in user's password.
pub struct PasswordChange {
    current: Password,
    new: Password,
}

impl PasswordChange {
    /// Validate the form: the confirmation must match and the new password
    /// must be long enough.
    ///
    /// # Errors
    /// Returns [`PasswordChangeError::Mismatch`] before checking the length.
    pub fn new(current: &str, new: &str, confirm: &str) -> Result<Self, PasswordChangeError> {
        if new != confirm {
            return Err(PasswordChangeError::Mismatch);
        }
        if new.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordChangeError::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self {
            current: Zeroizing::new(current.to_owned()),
            new: Zeroizing::new(new.to_owned()),
        })
    }

    /// Password the user claims to have now.
    #[must_use]
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Replacement password.
    #[must_use]
    pub fn new_password(&self) -> &str {
        self.new.as_str()
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current", &"<redacted>")
            .field("new", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("old", "secret1", "secret2", Err(PasswordChangeError::Mismatch))]
    #[case("old", "short", "short", Err(PasswordChangeError::TooShort { min: 6 }))]
    #[case("old", "ยาวพอ12", "ยาวพอ12", Ok(()))]
    #[case("old", "sixsix", "sixsix", Ok(()))]
    fn validates_form(
        #[case] current: &str,
        #[case] new: &str,
        #[case] confirm: &str,
        #[case] expected: Result<(), PasswordChangeError>,
    ) {
        assert_eq!(PasswordChange::new(current, new, confirm).map(|_| ()), expected);
    }

    #[rstest]
    fn mismatch_is_reported_before_length() {
        assert_eq!(
            PasswordChange::new("old", "a", "b").map(|_| ()),
            Err(PasswordChangeError::Mismatch)
        );
    }

    #[rstest]
    fn debug_output_redacts_passwords() {
        let change = PasswordChange::new("hunter2", "correct horse", "correct horse").expect("valid");
        let rendered = format!("{change:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("correct horse"));
        assert_eq!(change.new_password(), "correct horse");
        assert_eq!(change.current(), "hunter2");
    }
}

//! User identity and profile model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned while building users and profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier carried surrounding whitespace.
    InvalidId,
    /// The first name was blank.
    EmptyFirstName,
    /// The last name was blank.
    EmptyLastName,
    /// The email was blank.
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyId`] for empty input and
    /// [`UserValidationError::InvalidId`] when it has surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Lenient conversion for optional references inside other documents.
    ///
    /// Absent, blank or malformed references resolve to `None`; such records
    /// simply never match any user.
    #[must_use]
    pub fn from_reference(reference: Option<String>) -> Option<Self> {
        reference.and_then(|raw| Self::from_owned(raw).ok())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Role label shown next to the user's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

/// Role assigned when a profile carries none.
pub const DEFAULT_ROLE: &str = "Officer";

impl Role {
    /// Wrap a role label; blank labels fall back to [`DEFAULT_ROLE`].
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        let label: String = role.into();
        if label.trim().is_empty() {
            Self::default()
        } else {
            Self(label)
        }
    }

    /// Lower-cased role used to toggle role-specific presentation.
    #[must_use]
    pub fn css_class(&self) -> String {
        self.0.to_lowercase()
    }
}

impl Default for Role {
    fn default() -> Self {
        Self(DEFAULT_ROLE.to_owned())
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user document from the `users` collection.
///
/// ## Invariants
/// - `first_name`, `last_name` and `email` are non-empty once trimmed.
/// - `role` defaults to [`DEFAULT_ROLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserProfileDto", into = "UserProfileDto")]
pub struct UserProfile {
    id: UserId,
    first_name: String,
    last_name: String,
    role: Role,
    email: String,
    profile_picture_url: Option<String>,
    small_stars: u32,
    big_stars: u32,
}

impl UserProfile {
    /// Start building a profile from its required parts.
    #[must_use]
    pub fn builder(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> UserProfileBuilder {
        UserProfileBuilder {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role: Role::default(),
            profile_picture_url: None,
            small_stars: 0,
            big_stars: 0,
        }
    }

    /// Identity the profile belongs to.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub const fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    #[must_use]
    pub const fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// `"First Last"`, as shown in headers and score attributions.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Role label.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Sign-in email.
    #[must_use]
    pub const fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stored picture URL, if any.
    #[must_use]
    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }

    /// Small stars recorded on the profile document.
    #[must_use]
    pub const fn small_stars(&self) -> u32 {
        self.small_stars
    }

    /// Big stars recorded on the profile document.
    #[must_use]
    pub const fn big_stars(&self) -> u32 {
        self.big_stars
    }

    /// Return a copy with new names and, optionally, a new picture.
    #[must_use]
    pub fn with_names_and_picture(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        profile_picture_url: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile_picture_url: profile_picture_url.or_else(|| self.profile_picture_url.clone()),
            ..self.clone()
        }
    }
}

/// Builder for [`UserProfile`].
#[derive(Debug, Clone)]
pub struct UserProfileBuilder {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    role: Role,
    profile_picture_url: Option<String>,
    small_stars: u32,
    big_stars: u32,
}

impl UserProfileBuilder {
    /// Set the role label.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the stored picture URL.
    #[must_use]
    pub fn profile_picture_url(mut self, url: impl Into<String>) -> Self {
        self.profile_picture_url = Some(url.into());
        self
    }

    /// Set the star counters.
    #[must_use]
    pub const fn stars(mut self, small_stars: u32, big_stars: u32) -> Self {
        self.small_stars = small_stars;
        self.big_stars = big_stars;
        self
    }

    /// Validate and build the profile.
    ///
    /// # Errors
    /// Returns the first blank required field as a [`UserValidationError`].
    pub fn build(self) -> Result<UserProfile, UserValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        if self.email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(UserProfile {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            email: self.email,
            profile_picture_url: self.profile_picture_url,
            small_stars: self.small_stars,
            big_stars: self.big_stars,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileDto {
    id: String,
    first_name: String,
    last_name: String,
    #[serde(default)]
    role: Option<String>,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_picture_url: Option<String>,
    #[serde(default)]
    small_stars: u32,
    #[serde(default)]
    big_stars: u32,
}

impl From<UserProfile> for UserProfileDto {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.into(),
            first_name: value.first_name,
            last_name: value.last_name,
            role: Some(value.role.0),
            email: value.email,
            profile_picture_url: value.profile_picture_url,
            small_stars: value.small_stars,
            big_stars: value.big_stars,
        }
    }
}

impl TryFrom<UserProfileDto> for UserProfile {
    type Error = UserValidationError;

    fn try_from(value: UserProfileDto) -> Result<Self, Self::Error> {
        let mut builder = Self::builder(
            UserId::new(value.id)?,
            value.first_name,
            value.last_name,
            value.email,
        )
        .role(value.role.map(Role::new).unwrap_or_default())
        .stars(value.small_stars, value.big_stars);
        if let Some(url) = value
            .profile_picture_url
            .filter(|raw| !raw.trim().is_empty())
        {
            builder = builder.profile_picture_url(url);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests;

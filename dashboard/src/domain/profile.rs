//! Profile editing: names, pictures and the default avatar gallery.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// Gallery of stock avatars offered on the profile form.
pub const DEFAULT_AVATARS: [&str; 6] = [
    "https://avatar.iran.liara.run/public/boy?username=Scott",
    "https://avatar.iran.liara.run/public/girl?username=Amy",
    "https://avatar.iran.liara.run/public/boy?username=James",
    "https://avatar.iran.liara.run/public/girl?username=Sara",
    "https://avatar.iran.liara.run/public/boy?username=Tom",
    "https://avatar.iran.liara.run/public/girl?username=Nia",
];

/// Picture shown when a profile has none.
pub const PLACEHOLDER_PICTURE: &str = "https://placehold.co/128x128/e0e0e0/757575?text=Photo";

/// Validation errors for profile edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// The first name was blank.
    EmptyFirstName,
    /// The last name was blank.
    EmptyLastName,
    /// The avatar is not in [`DEFAULT_AVATARS`].
    UnknownAvatar,
    /// The upload is not an image.
    NotAnImage {
        /// MIME type reported for the upload.
        mime_type: String,
    },
    /// The upload has no content.
    EmptyUpload,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::UnknownAvatar => write!(f, "avatar is not part of the default gallery"),
            Self::NotAnImage { mime_type } => {
                write!(f, "uploaded file must be an image, got '{mime_type}'")
            }
            Self::EmptyUpload => write!(f, "uploaded file is empty"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// A picture chosen on the profile form but not yet saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "url", rename_all = "snake_case")]
pub enum ProfilePicture {
    /// One of [`DEFAULT_AVATARS`].
    DefaultAvatar(String),
    /// An uploaded image encoded as a `data:` URL.
    Upload(String),
}

impl ProfilePicture {
    /// Select an avatar from the default gallery.
    ///
    /// # Errors
    /// Returns [`ProfileValidationError::UnknownAvatar`] for any other URL.
    pub fn default_avatar(url: &str) -> Result<Self, ProfileValidationError> {
        DEFAULT_AVATARS
            .iter()
            .find(|candidate| **candidate == url)
            .map(|candidate| Self::DefaultAvatar((*candidate).to_owned()))
            .ok_or(ProfileValidationError::UnknownAvatar)
    }

    /// Convert an uploaded image into a `data:<mime>;base64,<payload>` URL.
    ///
    /// # Errors
    /// Rejects non-image MIME types and empty uploads.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::ProfilePicture;
    ///
    /// let picture = ProfilePicture::from_upload("image/png", b"png").expect("image");
    /// assert_eq!(picture.url(), "data:image/png;base64,cG5n");
    /// ```
    pub fn from_upload(mime_type: &str, bytes: &[u8]) -> Result<Self, ProfileValidationError> {
        if !mime_type.starts_with("image/") {
            return Err(ProfileValidationError::NotAnImage {
                mime_type: mime_type.to_owned(),
            });
        }
        if bytes.is_empty() {
            return Err(ProfileValidationError::EmptyUpload);
        }
        let payload = STANDARD.encode(bytes);
        Ok(Self::Upload(format!("data:{mime_type};base64,{payload}")))
    }

    /// URL to store on the profile.
    #[must_use]
    pub const fn url(&self) -> &str {
        match self {
            Self::DefaultAvatar(url) | Self::Upload(url) => url.as_str(),
        }
    }

    /// Consume the picture, keeping only its URL.
    #[must_use]
    pub fn into_url(self) -> String {
        match self {
            Self::DefaultAvatar(url) | Self::Upload(url) => url,
        }
    }
}

/// Submitted profile form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    first_name: String,
    last_name: String,
    picture: Option<ProfilePicture>,
}

impl ProfileUpdate {
    /// Validate the submitted names; surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns the first blank name as a [`ProfileValidationError`].
    pub fn new(
        first_name: &str,
        last_name: &str,
        picture: Option<ProfilePicture>,
    ) -> Result<Self, ProfileValidationError> {
        let first = first_name.trim();
        let last = last_name.trim();
        if first.is_empty() {
            return Err(ProfileValidationError::EmptyFirstName);
        }
        if last.is_empty() {
            return Err(ProfileValidationError::EmptyLastName);
        }
        Ok(Self {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            picture,
        })
    }

    /// Trimmed first name.
    #[must_use]
    pub const fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Trimmed last name.
    #[must_use]
    pub const fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Newly chosen picture, if any.
    #[must_use]
    pub const fn picture(&self) -> Option<&ProfilePicture> {
        self.picture.as_ref()
    }

    /// Replace the picture carried by the update.
    #[must_use]
    pub fn with_picture(mut self, picture: Option<ProfilePicture>) -> Self {
        self.picture = picture;
        self
    }
}

mod builder;
mod rdo;
mod repository;
mod request;
mod service;

pub use builder::*;
pub use rdo::*;
pub use repository::*;
pub use request::*;
pub use service::*;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::crypto::Hasher;

/// Minimum `name` length, counted after trimming.
pub const NAME_MIN_LENGTH: usize = 1;
/// Maximum `name` length, counted after trimming.
pub const NAME_MAX_LENGTH: usize = 15;
/// Minimum plaintext password length, checked before hashing.
pub const PASSWORD_MIN_LENGTH: usize = 6;
/// Maximum plaintext password length, checked before hashing.
pub const PASSWORD_MAX_LENGTH: usize = 12;

static AVATAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(jpg|png)$").unwrap());

/// Role of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Regular,
    Pro,
}

impl UserType {
    /// Whether this role grants the professional tier.
    pub fn is_pro(&self) -> bool {
        matches!(self, UserType::Pro)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Regular => write!(f, "regular"),
            UserType::Pro => write!(f, "pro"),
        }
    }
}

/// User as persisted on the storage layer.
///
/// `id`, `created_at` and `updated_at` stay `None` until the storage layer
/// assigns them on first insert.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    Validate,
    sqlx::FromRow,
)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<uuid::Uuid>,
    #[validate(custom(
        function = validate_name,
        message = "Name must contain 1 to 15 characters."
    ))]
    pub name: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(custom(
        function = validate_avatar_path,
        message = "Avatar path must end with '.jpg' or '.png'."
    ))]
    pub avatar_path: String,
    #[serde(skip)]
    password: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new [`UserBuilder`].
    pub fn builder() -> UserBuilder<Missing> {
        UserBuilder::new()
    }

    /// Hash `plain` with `hasher` and store the digest, replacing any
    /// previous one.
    ///
    /// The plaintext length rule applies before hashing; the stored digest
    /// has a fixed length of its own.
    pub fn set_password(
        &mut self,
        plain: &str,
        hasher: &Hasher,
    ) -> Result<(), ValidationErrors> {
        let length = plain.chars().count();
        if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
            return Err(invalid_password());
        }

        self.password = hasher.digest(plain);
        Ok(())
    }

    /// Stored password digest. Empty string until a password is set.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Recompute the digest of `plain` and compare it to the stored one.
    ///
    /// An unset password never matches: SHA-256 does not produce the
    /// empty string.
    pub fn verify_password(&self, plain: &str, hasher: &Hasher) -> bool {
        self.password == hasher.digest(plain)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

pub(crate) fn validate_avatar_path(
    path: &str,
) -> Result<(), ValidationError> {
    if path.is_empty() || AVATAR_RE.is_match(path) {
        Ok(())
    } else {
        Err(ValidationError::new("extension"))
    }
}

fn invalid_password() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        "password",
        ValidationError::new("length").with_message(
            format!(
                "Password must contain {PASSWORD_MIN_LENGTH} to \
                 {PASSWORD_MAX_LENGTH} characters."
            )
            .into(),
        ),
    );
    errors
}

//! Typed builder for User.

use crate::user::{User, UserType};

/// [`User`] builder.
#[derive(Debug, Clone)]
pub struct UserBuilder<Email> {
    name: String,
    email: Email,
    avatar_path: String,
    user_type: UserType,
}

/// Value is missing on [`UserBuilder`].
#[derive(Debug, Clone)]
pub struct Missing;

/// Value is present on [`UserBuilder`].
#[derive(Debug, Clone)]
pub struct Present<T>(pub T);

impl UserBuilder<Missing> {
    /// Create a new [`UserBuilder`].
    pub fn new() -> Self {
        Self {
            name: String::default(),
            email: Missing,
            avatar_path: String::default(),
            user_type: UserType::default(),
        }
    }

    /// Update `email` field on [`UserBuilder`].
    ///
    /// The address is trimmed and lowercased so uniqueness holds
    /// case-insensitively.
    pub fn email(
        self,
        email: impl AsRef<str>,
    ) -> UserBuilder<Present<String>> {
        UserBuilder {
            name: self.name,
            email: Present(email.as_ref().trim().to_lowercase()),
            avatar_path: self.avatar_path,
            user_type: self.user_type,
        }
    }
}

impl Default for UserBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Email> UserBuilder<Email> {
    /// Update `name` field on [`UserBuilder`].
    pub fn name(mut self, name: impl AsRef<str>) -> Self {
        self.name = name.as_ref().trim().to_owned();
        self
    }

    /// Update `avatar_path` field on [`UserBuilder`].
    pub fn avatar_path(mut self, avatar_path: impl ToString) -> Self {
        self.avatar_path = avatar_path.to_string();
        self
    }

    /// Update `user_type` field on [`UserBuilder`].
    pub fn user_type(mut self, user_type: UserType) -> Self {
        self.user_type = user_type;
        self
    }
}

impl UserBuilder<Present<String>> {
    /// Build a [`User`] with no password and no storage-assigned fields.
    pub fn build(self) -> User {
        User {
            id: None,
            name: self.name,
            email: self.email.0,
            avatar_path: self.avatar_path,
            user_type: self.user_type,
            created_at: None,
            updated_at: None,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let user = User::builder().name("Ann").email("a@b.com").build();

        assert_eq!(user.id, None);
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.avatar_path, "");
        assert_eq!(user.password(), "");
        assert_eq!(user.user_type, UserType::Regular);
        assert_eq!(user.created_at, None);
        assert_eq!(user.updated_at, None);
    }

    #[test]
    fn test_name_and_email_are_trimmed() {
        let user = User::builder()
            .name("  Ann ")
            .email(" Ann@Example.COM ")
            .build();

        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@example.com");
    }

    #[test]
    fn test_explicit_fields() {
        let user = User::builder()
            .name("Pro Ann")
            .email("pro@b.com")
            .user_type(UserType::Pro)
            .avatar_path("me.png")
            .build();

        assert_eq!(user.user_type, UserType::Pro);
        assert_eq!(user.avatar_path, "me.png");
    }
}

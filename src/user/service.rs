use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::crypto::Hasher;
use crate::error::{Result, StoreError};
use crate::user::{CreateUserRequest, User, UserRepository};

/// User manager.
///
/// Runs the validate → hash → persist sequence over any
/// [`UserRepository`] implementation.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: Hasher,
}

impl UserService {
    /// Create a new [`UserService`].
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Hasher) -> Self {
        Self { repo, hasher }
    }

    /// Create a user from a creation request and a plaintext password.
    ///
    /// The password never reaches storage: only its digest is persisted.
    pub async fn register(
        &self,
        request: CreateUserRequest,
        password: &str,
    ) -> Result<User> {
        request.validate()?;

        let mut user = User::from(request);
        user.set_password(password, &self.hasher)?;

        let user = self.repo.insert(&user).await?;
        tracing::info!(user_id = ?user.id, email = %user.email, "user created");

        Ok(user)
    }

    /// Find a user using the `email` unique field.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repo.find_by_email(&normalize_email(email)).await
    }

    /// Find a user using the `id` unique field.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Return the user registered under the request's email, creating one
    /// when none exists.
    pub async fn find_or_create(
        &self,
        request: CreateUserRequest,
        password: &str,
    ) -> Result<User> {
        if let Some(user) = self.find_by_email(&request.email).await? {
            return Ok(user);
        }

        self.register(request, password).await
    }

    /// Replace the avatar path of an existing user.
    pub async fn update_avatar(&self, id: Uuid, path: &str) -> Result<User> {
        let Some(mut user) = self.repo.find_by_id(id).await? else {
            return Err(StoreError::UnknownUser);
        };

        user.avatar_path = path.to_owned();
        self.repo.update(&user).await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{MemoryUserRepository, UserType};

    fn service() -> UserService {
        UserService::new(
            Arc::new(MemoryUserRepository::new()),
            Hasher::new(b"salt"),
        )
    }

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Ann".to_owned(),
            email: email.to_owned(),
            user_type: UserType::Regular,
        }
    }

    #[tokio::test]
    async fn test_register_persists_digest_only() {
        let service = service();

        let user = service.register(request("a@b.com"), "secret").await.unwrap();

        assert!(user.id.is_some());
        assert!(user.created_at.is_some());
        assert_ne!(user.password(), "secret");
        assert!(user.verify_password("secret", &Hasher::new(b"salt")));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = service();
        service.register(request("a@b.com"), "secret").await.unwrap();

        let err = service
            .register(request("a@b.com"), "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_request() {
        let service = service();
        let mut bad = request("a@b.com");
        bad.name = String::new();

        let err = service.register(bad, "secret").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_out_of_range_password() {
        let service = service();

        let err = service.register(request("a@b.com"), "12345").await;
        assert!(matches!(err, Err(StoreError::Validation(_))));

        let err = service.register(request("a@b.com"), "1234567890123").await;
        assert!(matches!(err, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_by_email_normalizes() {
        let service = service();
        service.register(request("a@b.com"), "secret").await.unwrap();

        let found = service.find_by_email(" A@B.COM ").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_find_or_create_is_idempotent_per_email() {
        let service = service();

        let first = service
            .find_or_create(request("a@b.com"), "secret")
            .await
            .unwrap();
        let second = service
            .find_or_create(request("a@b.com"), "other1")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.verify_password("secret", &Hasher::new(b"salt")));
    }

    #[tokio::test]
    async fn test_update_avatar() {
        let service = service();
        let user = service.register(request("a@b.com"), "secret").await.unwrap();

        let updated = service
            .update_avatar(user.id.unwrap(), "me.png")
            .await
            .unwrap();

        assert_eq!(updated.avatar_path, "me.png");
        assert!(updated.updated_at >= user.updated_at);

        let err = service
            .update_avatar(user.id.unwrap(), "me.gif")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_avatar_requires_known_user() {
        let service = service();

        let err = service
            .update_avatar(Uuid::new_v4(), "me.png")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser));
    }
}

//! Handle storage requests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Result, StoreError};
use crate::user::User;

/// Port for user persistence.
///
/// Implementations run entity validation before any write, so callers
/// get structured field errors instead of storage-level failures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new [`User`]; the returned copy carries the
    /// storage-assigned `id` and timestamps.
    async fn insert(&self, user: &User) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Persist changed fields of an already-inserted [`User`],
    /// refreshing `updated_at`.
    async fn update(&self, user: &User) -> Result<User>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

const USER_COLUMNS: &str =
    "id, name, email, avatar_path, password, user_type, created_at, \
     updated_at";

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new [`PgUserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &User) -> Result<User> {
        user.validate()?;

        let query = format!(
            r#"INSERT INTO users (name, email, avatar_path, password, user_type)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {USER_COLUMNS}"#,
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.avatar_path)
            .bind(user.password())
            .bind(user.user_type)
            .fetch_one(&self.pool)
            .await
            .map_err(unique_violation_into_email_taken)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User> {
        user.validate()?;
        let Some(id) = user.id else {
            return Err(StoreError::UnknownUser);
        };

        let query = format!(
            r#"UPDATE users
                SET name = $1, email = $2, avatar_path = $3, password = $4,
                    user_type = $5, updated_at = NOW()
                WHERE id = $6
                RETURNING {USER_COLUMNS}"#,
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.avatar_path)
            .bind(user.password())
            .bind(user.user_type)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unique_violation_into_email_taken)?
            .ok_or(StoreError::UnknownUser)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn unique_violation_into_email_taken(err: sqlx::Error) -> StoreError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StoreError::EmailTaken
    } else {
        StoreError::Sql(err)
    }
}

/// In-process user repository backing tests and embedders that bring
/// their own persistence.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    /// Create an empty [`MemoryUserRepository`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<User> {
        user.validate()?;

        let mut users = self.users.lock().expect("user map lock poisoned");
        if users.values().any(|stored| stored.email == user.email) {
            return Err(StoreError::EmailTaken);
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut stored = user.clone();
        stored.id = Some(id);
        stored.created_at = Some(now);
        stored.updated_at = Some(now);

        users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.lock().expect("user map lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().expect("user map lock poisoned");
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn update(&self, user: &User) -> Result<User> {
        user.validate()?;
        let Some(id) = user.id else {
            return Err(StoreError::UnknownUser);
        };

        let mut users = self.users.lock().expect("user map lock poisoned");
        if users
            .values()
            .any(|stored| stored.email == user.email && stored.id != Some(id))
        {
            return Err(StoreError::EmailTaken);
        }

        let Some(existing) = users.get(&id) else {
            return Err(StoreError::UnknownUser);
        };

        let mut stored = user.clone();
        stored.created_at = existing.created_at;
        stored.updated_at = Some(Utc::now());

        users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.lock().expect("user map lock poisoned");
        users.remove(&id);
        Ok(())
    }
}

//! Userstore is a user data model and access layer for web backends.
//!
//! It declares the persisted shape of a user, validates it before
//! persistence, hashes and verifies passwords with salted SHA-256, and
//! shapes what the read path exposes. Persistence goes through the
//! [`user::UserRepository`] port; a PostgreSQL adapter and an in-process
//! one are provided.

#![forbid(unsafe_code)]

pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod telemetry;
pub mod user;

use std::sync::Arc;

pub use error::{FieldError, Result, StoreError};

/// Initialize a [`user::UserService`] backed by PostgreSQL.
///
/// Connects with the `postgres` configuration entry, runs the embedded
/// migrations, and wires the hashing salt.
pub async fn initialize(
    config: Arc<config::Configuration>,
) -> Result<user::UserService> {
    let salt = config.salt().ok_or(StoreError::MissingSalt)?;

    let db = match config.postgres {
        Some(ref config) => {
            database::Database::new(
                &config.address,
                &config
                    .username
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &config
                    .password
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &config
                    .database
                    .clone()
                    .unwrap_or(database::DEFAULT_DATABASE_NAME.into()),
                config.pool_size.unwrap_or(database::DEFAULT_POOL_SIZE),
            )
            .await?
        },
        None => {
            return Err(StoreError::MissingDatabase);
        },
    };

    // execute migrations scripts on start.
    db.migrate().await?;

    Ok(user::UserService::new(
        Arc::new(user::PgUserRepository::new(db.postgres.clone())),
        crypto::Hasher::new(salt),
    ))
}

//! Error handler for userstore.

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Enum representing data-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error("email is already taken")]
    EmailTaken,

    #[error("user does not exist")]
    UnknownUser,

    #[error("SQL request failed: {0}")]
    Sql(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("missing `salt` entry on `config.yaml` and `SALT` environment variable")]
    MissingSalt,

    #[error("missing `postgres` entry on `config.yaml` file")]
    MissingDatabase,
}

/// Structure for detailed per-field errors.
#[derive(Debug, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl StoreError {
    /// Flatten the error into a list of [`FieldError`], one per violated
    /// rule. Non-validation errors yield an empty list.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            StoreError::Validation(errors) => parse_validation_errors(errors),
            StoreError::EmailTaken => vec![FieldError {
                field: "email".to_owned(),
                message: self.to_string(),
            }],
            _ => Vec::new(),
        }
    }
}

fn parse_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, issues)| {
            issues.iter().map(move |issue| FieldError {
                field: field.to_string(),
                message: issue.to_string(),
            })
        })
        .collect()
}

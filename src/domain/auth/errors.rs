use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Email address has not been verified")]
  EmailNotVerified,

  #[error("Account already verified")]
  AlreadyVerified,

  #[error("Invalid or expired verification")]
  InvalidVerification,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),

  #[error("Notification error: {0}")]
  Notification(#[from] NotificationError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Signed token errors (login tokens and verification links)
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Failed to sign token: {0}")]
  SigningFailed(String),

  #[error("Token is invalid or expired")]
  Invalid,

  #[error("Signing secret is too short, minimum {min} bytes required")]
  SecretTooShort { min: usize },
}

/// Email delivery errors
#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Failed to send verification email: {0}")]
  DeliveryFailed(String),

  #[error("Email provider rejected the message (status {status}): {body}")]
  Rejected { status: u16, body: String },

  #[error("Email provider is not configured: {0}")]
  NotConfigured(String),
}

/// Input validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("Missing required field: {field}")]
  MissingField { field: String },
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl From<reqwest::Error> for NotificationError {
  fn from(error: reqwest::Error) -> Self {
    NotificationError::DeliveryFailed(error.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_row_not_found_maps_to_not_found() {
    let err = RepositoryError::from(sqlx::Error::RowNotFound);
    assert!(matches!(err, RepositoryError::NotFound));
  }

  #[test]
  fn test_pool_timeout_maps_to_connection_failed() {
    let err: AuthError = sqlx::Error::PoolTimedOut.into();
    assert!(matches!(
      err,
      AuthError::Repository(RepositoryError::ConnectionFailed(_))
    ));
  }

  #[test]
  fn test_notification_error_message() {
    let err = NotificationError::Rejected {
      status: 401,
      body: "bad key".to_string(),
    };
    assert_eq!(
      err.to_string(),
      "Email provider rejected the message (status 401): bad key"
    );
  }
}

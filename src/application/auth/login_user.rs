use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::{AuthError, ValidationError};
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  /// Unique identifier of the account
  pub user_id: Uuid,
  /// Account email address
  pub email: String,
  /// Signed bearer token
  pub token: String,
  /// Token expiration timestamp
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case
  ///
  /// Password length rules are not applied here so accounts keep working if
  /// the rules change; only an empty password is rejected up front.
  ///
  /// # Errors
  /// Returns `AuthError` for malformed input, unknown email, wrong password or
  /// an unverified account
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email)?;

    if command.password.is_empty() {
      return Err(
        ValidationError::MissingField {
          field: "password".to_string(),
        }
        .into(),
      );
    }
    let password = Password::unchecked(command.password);

    let (account, token) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      user_id: account.id,
      email: account.email,
      token: token.token,
      expires_at: token.expires_at,
    })
  }
}

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
}

/// Response after successful registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  /// Unique identifier of the newly created account
  pub user_id: Uuid,
  /// Normalized email address
  pub email: String,
  /// Whether the verification email reached the email provider
  pub verification_email_sent: bool,
}

/// Use case for registering a new account
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if the email or password is malformed or the email
  /// is already registered
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let registration = self.auth_service.register(email, password).await?;

    Ok(RegisterUserResponse {
      user_id: registration.account.id,
      email: registration.account.email,
      verification_email_sent: registration.verification_email_sent,
    })
  }
}

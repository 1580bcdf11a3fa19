use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

/// Command for re-sending the verification email
#[derive(Debug, Clone)]
pub struct ResendVerificationCommand {
  pub email: String,
}

/// Use case for issuing and sending fresh verification material
pub struct ResendVerificationUseCase {
  auth_service: Arc<AuthService>,
}

impl ResendVerificationUseCase {
  /// Creates a new instance of ResendVerificationUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the resend use case; earlier codes and links stop working
  pub async fn execute(&self, command: ResendVerificationCommand) -> Result<(), AuthError> {
    let email = Email::new(command.email)?;
    self.auth_service.resend_verification(email).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::{Password, VerificationMethod};
  use crate::test_support::{TestAuth, extract_code};

  #[tokio::test]
  async fn test_resend_replaces_code() {
    let auth = TestAuth::new(VerificationMethod::Code);
    let email = Email::new("resend@example.com").unwrap();
    auth
      .service
      .register(email.clone(), Password::new("password123").unwrap())
      .await
      .unwrap();
    let first = extract_code(&auth.sender.last());
    let use_case = ResendVerificationUseCase::new(auth.service.clone());

    use_case
      .execute(ResendVerificationCommand {
        email: "resend@example.com".to_string(),
      })
      .await
      .unwrap();
    let second = extract_code(&auth.sender.last());
    assert_eq!(auth.sender.messages().len(), 2);

    if first != second {
      let stale = auth
        .service
        .verify_code(email.clone(), &first)
        .await;
      assert!(matches!(stale, Err(AuthError::InvalidVerification)));
    }

    let account = auth
      .service
      .verify_code(email, &second)
      .await
      .unwrap();
    assert!(account.is_verified);
  }

  #[tokio::test]
  async fn test_resend_unknown_email() {
    let auth = TestAuth::new(VerificationMethod::Code);
    let use_case = ResendVerificationUseCase::new(auth.service.clone());

    let result = use_case
      .execute(ResendVerificationCommand {
        email: "ghost@example.com".to_string(),
      })
      .await;

    assert!(matches!(result, Err(AuthError::UserNotFound)));
  }
}

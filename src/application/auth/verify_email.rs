use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::{AuthError, ValidationError};
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, VerificationToken};
use crate::domain::auth::{TokenError, entities::Account};

/// Proof of email ownership submitted by the user
#[derive(Debug, Clone)]
pub enum VerifyEmailCommand {
  /// Code typed back from the verification email
  Code { email: String, code: String },
  /// Token carried by the verification link
  Link { token: String },
}

/// Response after successful verification
#[derive(Debug, Clone)]
pub struct VerifyEmailResponse {
  pub user_id: Uuid,
  pub email: String,
}

impl From<Account> for VerifyEmailResponse {
  fn from(account: Account) -> Self {
    Self {
      user_id: account.id,
      email: account.email,
    }
  }
}

/// Use case for verifying an account's email address
pub struct VerifyEmailUseCase {
  auth_service: Arc<AuthService>,
}

impl VerifyEmailUseCase {
  /// Creates a new instance of VerifyEmailUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the verification use case
  ///
  /// A code that is not eight digits is reported the same way as a wrong
  /// code once the account is found, and a malformed link token the same
  /// way as a forged one.
  ///
  /// # Errors
  /// `Validation` for empty input, `UserNotFound`, `AlreadyVerified`,
  /// `InvalidVerification` or `Token(Invalid)`
  pub async fn execute(
    &self,
    command: VerifyEmailCommand,
  ) -> Result<VerifyEmailResponse, AuthError> {
    let account = match command {
      VerifyEmailCommand::Code { email, code } => {
        if email.trim().is_empty() || code.trim().is_empty() {
          return Err(
            ValidationError::MissingField {
              field: "email and otp".to_string(),
            }
            .into(),
          );
        }
        let email = Email::new(email)?;
        self.auth_service.verify_code(email, &code).await?
      }
      VerifyEmailCommand::Link { token } => {
        if token.trim().is_empty() {
          return Err(
            ValidationError::MissingField {
              field: "token".to_string(),
            }
            .into(),
          );
        }
        let token = VerificationToken::from_string(token.trim())
          .map_err(|_| AuthError::Token(TokenError::Invalid))?;
        self.auth_service.verify_link(token).await?
      }
    };

    Ok(account.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::{Password, VerificationMethod};
  use crate::test_support::{TestAuth, extract_code, extract_token};

  async fn register(auth: &TestAuth, email: &str) {
    auth
      .service
      .register(
        Email::new(email).unwrap(),
        Password::new("password123").unwrap(),
      )
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn test_verify_with_code() {
    let auth = TestAuth::new(VerificationMethod::Code);
    register(&auth, "code@example.com").await;
    let code = extract_code(&auth.sender.last());
    let use_case = VerifyEmailUseCase::new(auth.service.clone());

    let response = use_case
      .execute(VerifyEmailCommand::Code {
        email: "code@example.com".to_string(),
        code: format!(" {code} "),
      })
      .await
      .unwrap();

    assert_eq!(response.email, "code@example.com");
  }

  #[tokio::test]
  async fn test_missing_fields() {
    let auth = TestAuth::new(VerificationMethod::Code);
    let use_case = VerifyEmailUseCase::new(auth.service.clone());

    let result = use_case
      .execute(VerifyEmailCommand::Code {
        email: "code@example.com".to_string(),
        code: String::new(),
      })
      .await;
    assert!(matches!(result, Err(AuthError::Validation(_))));

    let result = use_case
      .execute(VerifyEmailCommand::Link {
        token: "  ".to_string(),
      })
      .await;
    assert!(matches!(result, Err(AuthError::Validation(_))));
  }

  #[tokio::test]
  async fn test_malformed_code_is_invalid_verification() {
    let auth = TestAuth::new(VerificationMethod::Code);
    register(&auth, "code@example.com").await;
    let use_case = VerifyEmailUseCase::new(auth.service.clone());

    let result = use_case
      .execute(VerifyEmailCommand::Code {
        email: "code@example.com".to_string(),
        code: "12ab".to_string(),
      })
      .await;

    assert!(matches!(result, Err(AuthError::InvalidVerification)));
  }

  #[tokio::test]
  async fn test_malformed_code_for_unknown_or_verified_account() {
    let auth = TestAuth::new(VerificationMethod::Code);
    let use_case = VerifyEmailUseCase::new(auth.service.clone());

    let result = use_case
      .execute(VerifyEmailCommand::Code {
        email: "ghost@example.com".to_string(),
        code: "abc".to_string(),
      })
      .await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));

    register(&auth, "done@example.com").await;
    let code = extract_code(&auth.sender.last());
    use_case
      .execute(VerifyEmailCommand::Code {
        email: "done@example.com".to_string(),
        code,
      })
      .await
      .unwrap();

    let result = use_case
      .execute(VerifyEmailCommand::Code {
        email: "done@example.com".to_string(),
        code: "abc".to_string(),
      })
      .await;
    assert!(matches!(result, Err(AuthError::AlreadyVerified)));
  }

  #[tokio::test]
  async fn test_verify_with_link() {
    let auth = TestAuth::new(VerificationMethod::Link);
    register(&auth, "link@example.com").await;
    let token = extract_token(&auth.sender.last());
    let use_case = VerifyEmailUseCase::new(auth.service.clone());

    let response = use_case
      .execute(VerifyEmailCommand::Link { token })
      .await
      .unwrap();

    assert_eq!(response.email, "link@example.com");
  }

  #[tokio::test]
  async fn test_garbage_link_token() {
    let auth = TestAuth::new(VerificationMethod::Link);
    let use_case = VerifyEmailUseCase::new(auth.service.clone());

    let result = use_case
      .execute(VerifyEmailCommand::Link {
        token: "not-a-token".to_string(),
      })
      .await;

    assert!(matches!(result, Err(AuthError::Token(TokenError::Invalid))));
  }
}

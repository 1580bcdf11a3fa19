use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::jwt::{JwtSigner, issued_now};
use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::auth::ports::VerificationIssuer;
use crate::domain::auth::value_objects::{Email, VerificationCode, VerificationToken};

const EMAIL_VERIFICATION_PURPOSE: &str = "email_verification";

/// Claims carried by a verification link token
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VerificationClaims {
  /// Email address the link was issued for
  sub: String,
  purpose: String,
  /// Unique per issue so a resent link never equals the previous one
  jti: String,
  iat: i64,
  exp: i64,
}

/// Issues OS-RNG verification codes and signed verification links
pub struct SecureVerificationIssuer {
  signer: Arc<JwtSigner>,
}

impl SecureVerificationIssuer {
  pub fn new(signer: Arc<JwtSigner>) -> Self {
    Self { signer }
  }
}

#[async_trait]
impl VerificationIssuer for SecureVerificationIssuer {
  async fn issue_code(&self) -> Result<VerificationCode, AuthError> {
    Ok(VerificationCode::generate())
  }

  async fn issue_link_token(
    &self,
    email: &Email,
    ttl: Duration,
  ) -> Result<VerificationToken, AuthError> {
    let (issued_at, expires_at) = issued_now(ttl);
    let claims = VerificationClaims {
      sub: email.as_str().to_string(),
      purpose: EMAIL_VERIFICATION_PURPOSE.to_string(),
      jti: Uuid::new_v4().to_string(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = self.signer.sign(&claims)?;
    Ok(VerificationToken::from_string(token)?)
  }

  async fn decode_link_token(&self, token: &VerificationToken) -> Result<Email, AuthError> {
    let claims: VerificationClaims = self.signer.verify(token.as_str())?;

    // A login token signed with the same key must not verify an account
    if claims.purpose != EMAIL_VERIFICATION_PURPOSE {
      return Err(AuthError::Token(TokenError::Invalid));
    }

    Email::new(claims.sub).map_err(|_| AuthError::Token(TokenError::Invalid))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::Account;
  use crate::domain::auth::ports::LoginTokenIssuer;
  use crate::infrastructure::security::JwtLoginTokenIssuer;

  fn signer() -> Arc<JwtSigner> {
    Arc::new(JwtSigner::new("test-secret-that-is-at-least-32-bytes-long").unwrap())
  }

  #[tokio::test]
  async fn test_issue_code() {
    let issuer = SecureVerificationIssuer::new(signer());

    let code = issuer.issue_code().await.unwrap();

    assert_eq!(code.as_str().len(), 8);
  }

  #[tokio::test]
  async fn test_link_token_round_trip() {
    let issuer = SecureVerificationIssuer::new(signer());
    let email = Email::new("pat@example.com").unwrap();

    let token = issuer
      .issue_link_token(&email, Duration::hours(1))
      .await
      .unwrap();
    let decoded = issuer.decode_link_token(&token).await.unwrap();

    assert_eq!(decoded, email);
  }

  #[tokio::test]
  async fn test_each_link_token_is_unique() {
    let issuer = SecureVerificationIssuer::new(signer());
    let email = Email::new("pat@example.com").unwrap();

    let first = issuer
      .issue_link_token(&email, Duration::hours(1))
      .await
      .unwrap();
    let second = issuer
      .issue_link_token(&email, Duration::hours(1))
      .await
      .unwrap();

    assert_ne!(first.as_str(), second.as_str());
  }

  #[tokio::test]
  async fn test_expired_link_token_rejected() {
    let issuer = SecureVerificationIssuer::new(signer());
    let email = Email::new("pat@example.com").unwrap();

    let token = issuer
      .issue_link_token(&email, Duration::seconds(-10))
      .await
      .unwrap();

    assert!(matches!(
      issuer.decode_link_token(&token).await,
      Err(AuthError::Token(TokenError::Invalid))
    ));
  }

  #[tokio::test]
  async fn test_login_token_is_not_a_verification_link() {
    let signer = signer();
    let issuer = SecureVerificationIssuer::new(signer.clone());
    let login_issuer = JwtLoginTokenIssuer::new(signer, Duration::hours(1));
    let account = Account::new("pat@example.com".to_string(), "hash".to_string());

    let login = login_issuer.issue(&account).await.unwrap();
    let token = VerificationToken::from_string(login.token).unwrap();

    // Missing `purpose`/`jti` fails deserialization
    let result = issuer.decode_link_token(&token).await;
    assert!(matches!(result, Err(AuthError::Token(TokenError::Invalid))));
  }
}

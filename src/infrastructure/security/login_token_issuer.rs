use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::jwt::{JwtSigner, issued_now};
use crate::domain::auth::entities::Account;
use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::auth::ports::LoginTokenIssuer;
use crate::domain::auth::value_objects::LoginToken;

/// Claims carried by the login bearer token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginClaims {
  /// Account id
  pub sub: String,
  pub email: String,
  pub iat: i64,
  pub exp: i64,
}

/// Issues HS256 bearer tokens after a successful login
pub struct JwtLoginTokenIssuer {
  signer: Arc<JwtSigner>,
  ttl: Duration,
}

impl JwtLoginTokenIssuer {
  pub fn new(signer: Arc<JwtSigner>, ttl: Duration) -> Self {
    Self { signer, ttl }
  }

  /// Decodes a token issued by this service
  pub fn decode(&self, token: &str) -> Result<LoginClaims, AuthError> {
    self.signer.verify(token)
  }
}

#[async_trait]
impl LoginTokenIssuer for JwtLoginTokenIssuer {
  async fn issue(&self, account: &Account) -> Result<LoginToken, AuthError> {
    let (issued_at, expires_at) = issued_now(self.ttl);
    let claims = LoginClaims {
      sub: account.id.to_string(),
      email: account.email.clone(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = self.signer.sign(&claims)?;

    Ok(LoginToken {
      token,
      expires_at: to_datetime(claims.exp)?,
    })
  }
}

// Report the second-truncated instant actually encoded in the token
fn to_datetime(timestamp: i64) -> Result<DateTime<Utc>, AuthError> {
  Utc
    .timestamp_opt(timestamp, 0)
    .single()
    .ok_or_else(|| AuthError::Token(TokenError::SigningFailed("exp out of range".to_string())))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn issuer() -> JwtLoginTokenIssuer {
    let signer = Arc::new(JwtSigner::new("test-secret-that-is-at-least-32-bytes-long").unwrap());
    JwtLoginTokenIssuer::new(signer, Duration::hours(1))
  }

  #[tokio::test]
  async fn test_issue_login_token() {
    let issuer = issuer();
    let account = Account::new("jo@example.com".to_string(), "hash".to_string());

    let token = issuer.issue(&account).await.unwrap();
    let claims = issuer.decode(&token.token).unwrap();

    assert_eq!(claims.sub, account.id.to_string());
    assert_eq!(claims.email, "jo@example.com");
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(token.expires_at.timestamp(), claims.exp);
  }

  #[tokio::test]
  async fn test_tampered_token_rejected() {
    let issuer = issuer();
    let account = Account::new("jo@example.com".to_string(), "hash".to_string());

    let token = issuer.issue(&account).await.unwrap();
    let mut tampered = token.token.clone();
    tampered.push('x');

    assert!(issuer.decode(&tampered).is_err());
  }
}

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::auth::errors::{AuthError, TokenError};

/// HMAC-SHA256 signer shared by login tokens and verification links
pub struct JwtSigner {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
}

impl JwtSigner {
  /// Shortest secret accepted for HS256
  pub const MIN_SECRET_BYTES: usize = 32;

  pub fn new(secret: &str) -> Result<Self, AuthError> {
    if secret.len() < Self::MIN_SECRET_BYTES {
      return Err(AuthError::Token(TokenError::SecretTooShort {
        min: Self::MIN_SECRET_BYTES,
      }));
    }

    Ok(Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
    })
  }

  /// Signs `claims` with an HS256 header
  pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, AuthError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());

    encode(&header, claims, &self.encoding_key)
      .map_err(|e| AuthError::Token(TokenError::SigningFailed(e.to_string())))
  }

  /// Verifies signature and `exp` (no leeway) and returns the claims
  ///
  /// Every rejection, including a validly signed token whose claims do not
  /// deserialize into `C`, is `TokenError::Invalid`.
  pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<C>(token, &self.decoding_key, &validation).map_err(|e| {
      tracing::debug!(error = %e, "Token verification failed");
      AuthError::Token(TokenError::Invalid)
    })?;

    Ok(data.claims)
  }
}

/// `iat`/`exp` pair for a token issued now with the given lifetime
pub fn issued_now(ttl: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
  let now = Utc::now();
  (now, now + ttl)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;

  const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

  #[derive(Debug, Serialize, Deserialize, PartialEq)]
  struct TestClaims {
    sub: String,
    exp: i64,
  }

  #[test]
  fn test_short_secret_rejected() {
    assert!(matches!(
      JwtSigner::new("short"),
      Err(AuthError::Token(TokenError::SecretTooShort { min: 32 }))
    ));
  }

  #[test]
  fn test_sign_and_verify() {
    let signer = JwtSigner::new(SECRET).unwrap();
    let claims = TestClaims {
      sub: "someone".to_string(),
      exp: (Utc::now() + Duration::minutes(5)).timestamp(),
    };

    let token = signer.sign(&claims).unwrap();
    let decoded: TestClaims = signer.verify(&token).unwrap();

    assert_eq!(decoded, claims);
  }

  #[test]
  fn test_expired_token_rejected() {
    let signer = JwtSigner::new(SECRET).unwrap();
    let claims = TestClaims {
      sub: "someone".to_string(),
      exp: (Utc::now() - Duration::seconds(5)).timestamp(),
    };

    let token = signer.sign(&claims).unwrap();
    let result: Result<TestClaims, _> = signer.verify(&token);

    assert!(matches!(result, Err(AuthError::Token(TokenError::Invalid))));
  }

  #[test]
  fn test_token_from_other_secret_rejected() {
    let signer = JwtSigner::new(SECRET).unwrap();
    let other = JwtSigner::new("another-secret-that-is-also-32-bytes-long").unwrap();
    let claims = TestClaims {
      sub: "someone".to_string(),
      exp: (Utc::now() + Duration::minutes(5)).timestamp(),
    };

    let token = other.sign(&claims).unwrap();
    let result: Result<TestClaims, _> = signer.verify(&token);

    assert!(matches!(result, Err(AuthError::Token(TokenError::Invalid))));
  }

  #[test]
  fn test_signed_token_with_other_claims_is_invalid() {
    #[derive(Serialize)]
    struct OtherClaims {
      email: String,
      exp: i64,
    }

    let signer = JwtSigner::new(SECRET).unwrap();
    let token = signer
      .sign(&OtherClaims {
        email: "someone@example.com".to_string(),
        exp: (Utc::now() + Duration::minutes(5)).timestamp(),
      })
      .unwrap();
    let result: Result<TestClaims, _> = signer.verify(&token);

    assert!(matches!(result, Err(AuthError::Token(TokenError::Invalid))));
  }

  #[test]
  fn test_issued_now() {
    let (iat, exp) = issued_now(Duration::hours(1));
    assert_eq!(exp - iat, Duration::hours(1));
  }
}

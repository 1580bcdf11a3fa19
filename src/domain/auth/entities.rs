use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{VerificationCode, VerificationDigest, VerificationToken};

/// Account entity representing a registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  /// Unique identifier for the account
  pub id: Uuid,
  /// Normalized email address (unique)
  pub email: String,
  /// Argon2id PHC string
  pub password_hash: String,
  /// Whether the email address has been verified
  pub is_verified: bool,
  /// SHA-256 digest of the live verification code
  pub verification_code_hash: Option<String>,
  /// Expiration time for the verification code
  pub verification_code_expires_at: Option<DateTime<Utc>>,
  /// SHA-256 digest of the live verification link token
  pub verification_token_hash: Option<String>,
  /// Timestamp when the account was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the account was last updated
  pub updated_at: DateTime<Utc>,
}

impl Account {
  /// Creates a new unverified account
  pub fn new(email: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      is_verified: false,
      verification_code_hash: None,
      verification_code_expires_at: None,
      verification_token_hash: None,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates an account from database fields (for reconstruction)
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    is_verified: bool,
    verification_code_hash: Option<String>,
    verification_code_expires_at: Option<DateTime<Utc>>,
    verification_token_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      is_verified,
      verification_code_hash,
      verification_code_expires_at,
      verification_token_hash,
      created_at,
      updated_at,
    }
  }

  /// Stores a new verification code, replacing any earlier code or link
  pub fn set_verification_code(&mut self, digest: VerificationDigest, expires_at: DateTime<Utc>) {
    self.verification_code_hash = Some(digest.into_inner());
    self.verification_code_expires_at = Some(expires_at);
    self.verification_token_hash = None;
    self.updated_at = Utc::now();
  }

  /// Stores a new verification link token, replacing any earlier code or link
  ///
  /// The token carries its own expiry; only its digest is kept here.
  pub fn set_verification_token(&mut self, digest: VerificationDigest) {
    self.verification_token_hash = Some(digest.into_inner());
    self.verification_code_hash = None;
    self.verification_code_expires_at = None;
    self.updated_at = Utc::now();
  }

  /// Checks a submitted code against the stored digest and expiry
  pub fn is_verification_code_valid(&self, code: &VerificationCode, now: DateTime<Utc>) -> bool {
    match (
      &self.verification_code_hash,
      &self.verification_code_expires_at,
    ) {
      (Some(stored), Some(expires_at)) => *expires_at > now && code.digest().matches(stored),
      _ => false,
    }
  }

  /// Checks a submitted link token against the stored digest
  pub fn is_verification_token_valid(&self, token: &VerificationToken) -> bool {
    self
      .verification_token_hash
      .as_deref()
      .is_some_and(|stored| token.digest().matches(stored))
  }

  /// Marks the email as verified and clears all verification material
  pub fn mark_verified(&mut self) {
    self.is_verified = true;
    self.verification_code_hash = None;
    self.verification_code_expires_at = None;
    self.verification_token_hash = None;
    self.updated_at = Utc::now();
  }
}

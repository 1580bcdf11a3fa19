use argon2::PasswordHash as Argon2PasswordHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid verification code format")]
  InvalidVerificationCode,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation.
  ///
  /// Surrounding whitespace is trimmed and the address is lower-cased, so
  /// `" Alice@Example.COM "` and `"alice@example.com"` are the same account.
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let normalized = email.trim().to_lowercase();

    if !normalized.validate_email() || !Self::has_dotted_domain(&normalized) {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    Ok(Self(normalized))
  }

  // validator accepts bare hosts like `user@localhost`; accounts need a real domain
  fn has_dotted_domain(email: &str) -> bool {
    email
      .rsplit_once('@')
      .map(|(_, domain)| {
        domain
          .split_once('.')
          .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
      })
      .unwrap_or(false)
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();
    let length = password.chars().count();

    if length < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if length > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Wraps a password supplied at login without applying the length policy.
  ///
  /// Login must reject a wrong password with 401 regardless of its shape, so
  /// only emptiness is checked by the caller.
  pub fn unchecked(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing PHC hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// VerificationCode Value Object (8-digit one-time code)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VerificationCode(String);

impl VerificationCode {
  pub const LENGTH: usize = 8;
  const MIN: u32 = 10_000_000;
  const MAX: u32 = 99_999_999;

  /// Generates a new random code using the OS RNG
  pub fn generate() -> Self {
    use rand::Rng;

    let value = rand::rngs::OsRng.gen_range(Self::MIN..=Self::MAX);
    Self(value.to_string())
  }

  /// Parses a code submitted by a user
  pub fn from_string(code: impl AsRef<str>) -> Result<Self, ValueObjectError> {
    let code = code.as_ref().trim();

    if code.len() != Self::LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
      return Err(ValueObjectError::InvalidVerificationCode);
    }

    Ok(Self(code.to_string()))
  }

  /// Digest stored in place of the code
  pub fn digest(&self) -> VerificationDigest {
    VerificationDigest::of(&self.0)
  }

  /// Returns the code as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for VerificationCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("VerificationCode(***)")
  }
}

// ============================================================================
// VerificationToken Value Object (signed link token)
// ============================================================================

#[derive(Clone)]
pub struct VerificationToken(String);

impl VerificationToken {
  /// Wraps a token string; only the three-segment JWT shape is checked here
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into().trim().to_string();

    if token.is_empty() || token.split('.').count() != 3 {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// Digest stored in place of the token
  pub fn digest(&self) -> VerificationDigest {
    VerificationDigest::of(&self.0)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for VerificationToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("VerificationToken(***)")
  }
}

// ============================================================================
// VerificationDigest Value Object (SHA-256 of a code or token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDigest(String);

impl VerificationDigest {
  fn of(secret: &str) -> Self {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    Self(hex::encode(hasher.finalize()))
  }

  /// Constant-time comparison against a stored hex digest
  pub fn matches(&self, stored: &str) -> bool {
    self.0.as_bytes().ct_eq(stored.as_bytes()).into()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// VerificationMethod
// ============================================================================

/// How newly registered accounts prove ownership of their email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
  /// 8-digit code typed back into `/verify-otp`
  #[default]
  Code,
  /// Signed link pointing at `/verify-email?token=...`
  Link,
}

impl fmt::Display for VerificationMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Code => write!(f, "code"),
      Self::Link => write!(f, "link"),
    }
  }
}

// ============================================================================
// LoginToken
// ============================================================================

/// Bearer token handed out by a successful login
#[derive(Clone)]
pub struct LoginToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for LoginToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LoginToken")
      .field("token", &"***")
      .field("expires_at", &self.expires_at)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_validation() {
    // Valid emails
    assert!(Email::new("test@example.com").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    // Invalid emails
    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
    assert!(Email::new("test@localhost").is_err());
    assert!(Email::new("with space@example.com").is_err());
    assert!(Email::new("").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("  Test@Example.COM ").unwrap();
    assert_eq!(email.as_str(), "test@example.com");
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("password123").is_ok());

    assert!(matches!(
      Password::new("short"),
      Err(ValueObjectError::PasswordTooShort)
    ));

    let long_password = "a".repeat(129);
    assert!(matches!(
      Password::new(long_password),
      Err(ValueObjectError::PasswordTooLong)
    ));
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("mysecretpassword").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(password.to_string(), "***");
  }

  #[test]
  fn test_invalid_password_hash_rejected() {
    assert!(PasswordHash::from_hash("invalid_hash").is_err());
  }

  #[test]
  fn test_verification_code_generation() {
    for _ in 0..100 {
      let code = VerificationCode::generate();
      assert_eq!(code.as_str().len(), VerificationCode::LENGTH);
      assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
      assert_ne!(code.as_str().chars().next(), Some('0'));
    }
  }

  #[test]
  fn test_verification_code_parsing() {
    assert!(VerificationCode::from_string("12345678").is_ok());
    assert!(VerificationCode::from_string(" 12345678 ").is_ok());
    assert!(VerificationCode::from_string("1234567").is_err());
    assert!(VerificationCode::from_string("123456789").is_err());
    assert!(VerificationCode::from_string("1234abcd").is_err());
    assert!(VerificationCode::from_string("").is_err());
  }

  #[test]
  fn test_verification_digest_matching() {
    let code = VerificationCode::from_string("12345678").unwrap();
    let stored = code.digest().into_inner();

    assert_eq!(stored.len(), 64);
    assert!(code.digest().matches(&stored));

    let other = VerificationCode::from_string("87654321").unwrap();
    assert!(!other.digest().matches(&stored));
    assert!(!code.digest().matches(""));
  }

  #[test]
  fn test_verification_token_shape() {
    assert!(VerificationToken::from_string("a.b.c").is_ok());
    assert!(VerificationToken::from_string("a.b").is_err());
    assert!(VerificationToken::from_string("   ").is_err());
  }

  #[test]
  fn test_verification_method_serde() {
    let method: VerificationMethod = serde_json::from_str("\"link\"").unwrap();
    assert_eq!(method, VerificationMethod::Link);
    assert_eq!(VerificationMethod::default(), VerificationMethod::Code);
    assert_eq!(VerificationMethod::Code.to_string(), "code");
  }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request for account registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's email address
  #[serde(deserialize_with = "trimmed")]
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,
}

/// Request for login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[serde(default, deserialize_with = "trimmed")]
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[serde(default)]
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for verifying an account with an emailed code
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
  #[serde(default)]
  pub email: Option<String>,

  /// Accepted as a JSON string or number
  #[serde(default, deserialize_with = "string_or_number")]
  pub otp: Option<String>,
}

impl VerifyOtpRequest {
  /// Both fields when present and non-blank
  pub fn fields(&self) -> Option<(String, String)> {
    let email = self.email.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    let otp = self.otp.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    Some((email.to_string(), otp.to_string()))
  }
}

/// Query string of a verification link
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailQuery {
  #[serde(default)]
  pub token: Option<String>,
}

/// Request for re-sending the verification email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendVerificationRequest {
  #[serde(deserialize_with = "trimmed")]
  #[validate(email(message = "Invalid email format"))]
  pub email: String,
}

/// Response after successful registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  /// Unique identifier of the newly created account
  pub user_id: Uuid,

  /// Normalized email address
  pub email: String,

  pub verification_email_sent: bool,

  pub message: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  /// Unique identifier of the account
  pub user_id: Uuid,

  /// Account email address
  pub email: String,

  /// Signed bearer token
  pub token: String,

  /// Always `Bearer`
  pub token_type: String,

  /// Token expiration timestamp
  pub expires_at: DateTime<Utc>,

  pub message: String,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(String::deserialize(deserializer)?.trim().to_string())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum StringOrNumber {
    String(String),
    Number(u64),
  }

  Ok(
    Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
      StringOrNumber::String(s) => s,
      StringOrNumber::Number(n) => n.to_string(),
    }),
  )
}

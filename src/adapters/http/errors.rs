use actix_web::{
  HttpRequest, HttpResponse,
  error::{JsonPayloadError, ResponseError},
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError, TokenError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication or verification error (400, 401, 403, 404 or 409)
  Auth(AuthErrorKind),

  /// Email could not be handed to the provider (502 Bad Gateway)
  Notification(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthErrorKind {
  /// Invalid credentials (401)
  InvalidCredentials,

  /// Email already exists (409)
  EmailAlreadyExists,

  /// User not found (404)
  UserNotFound,

  /// Login attempted before verification (403)
  EmailNotVerified,

  /// Account is already verified (400)
  AlreadyVerified,

  /// Wrong, expired or superseded code (400)
  InvalidVerificationCode,

  /// Forged, expired or superseded link (400)
  InvalidVerificationLink,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Notification(msg) => write!(f, "Notification error: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
        AuthErrorKind::EmailNotVerified => StatusCode::FORBIDDEN,
        AuthErrorKind::AlreadyVerified => StatusCode::BAD_REQUEST,
        AuthErrorKind::InvalidVerificationCode => StatusCode::BAD_REQUEST,
        AuthErrorKind::InvalidVerificationLink => StatusCode::BAD_REQUEST,
      },
      ApiError::Notification(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => {
        let (err_type, msg) = match kind {
          AuthErrorKind::InvalidCredentials => ("invalid_credentials", "Invalid credentials."),
          AuthErrorKind::EmailAlreadyExists => (
            "email_already_exists",
            "An account with this email already exists.",
          ),
          AuthErrorKind::UserNotFound => ("user_not_found", "User not found."),
          AuthErrorKind::EmailNotVerified => (
            "email_not_verified",
            "Please verify your email before logging in.",
          ),
          AuthErrorKind::AlreadyVerified => ("already_verified", "Email is already verified."),
          AuthErrorKind::InvalidVerificationCode => {
            ("invalid_verification", "Invalid or expired OTP.")
          }
          AuthErrorKind::InvalidVerificationLink => (
            "invalid_verification",
            "Invalid or expired verification link.",
          ),
        };
        (err_type, msg.to_string())
      }
      ApiError::Notification(msg) => {
        tracing::warn!("Notification error: {}", msg);
        (
          "notification_failed",
          "Failed to send verification email. Please try again later.".to_string(),
        )
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::UserNotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
      AuthError::EmailNotVerified => ApiError::Auth(AuthErrorKind::EmailNotVerified),
      AuthError::AlreadyVerified => ApiError::Auth(AuthErrorKind::AlreadyVerified),
      AuthError::InvalidVerification => ApiError::Auth(AuthErrorKind::InvalidVerificationCode),
      AuthError::Token(TokenError::Invalid) => {
        ApiError::Auth(AuthErrorKind::InvalidVerificationLink)
      }
      AuthError::Token(err) => ApiError::Internal(err.to_string()),
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Notification(err) => ApiError::Notification(err.to_string()),
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}

/// Renders JSON extractor failures (bad JSON, wrong content type) as `ApiError` bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(error = %err, "Rejected request body");

  let message = match &err {
    JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
    JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
      "Request body is too large".to_string()
    }
    JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
    _ => "Invalid request body".to_string(),
  };

  ApiError::Validation(message).into()
}

/// Renders query string failures as `ApiError` bodies
pub fn query_error_handler(
  err: actix_web::error::QueryPayloadError,
  _req: &HttpRequest,
) -> actix_web::Error {
  ApiError::Validation(format!("Invalid query string: {}", err)).into()
}

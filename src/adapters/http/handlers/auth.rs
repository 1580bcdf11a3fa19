use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ResendVerificationRequest,
    SuccessResponse, VerifyEmailQuery, VerifyOtpRequest,
  },
  errors::{ApiError, AuthErrorKind},
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase,
  ResendVerificationCommand, ResendVerificationUseCase, VerifyEmailCommand, VerifyEmailUseCase,
};
use crate::domain::auth::AuthError;

const VERIFIED_MESSAGE: &str = "Email verified successfully.";

/// Handler for account registration
///
/// POST /api/auth/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let RegisterRequest { email, password } = request.into_inner();
  let response = use_case
    .execute(RegisterUserCommand { email, password })
    .await?;

  let message = if response.verification_email_sent {
    "Registration successful. Please check your email to verify your account."
  } else {
    "Registration successful, but the verification email could not be sent. \
     Please request a new verification email."
  };

  Ok(HttpResponse::Created().json(RegisterResponse {
    user_id: response.user_id,
    email: response.email,
    verification_email_sent: response.verification_email_sent,
    message: message.to_string(),
  }))
}

/// Handler for login
///
/// POST /api/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let LoginRequest { email, password } = request.into_inner();
  let response = use_case.execute(LoginUserCommand { email, password }).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    user_id: response.user_id,
    email: response.email,
    token: response.token,
    token_type: "Bearer".to_string(),
    expires_at: response.expires_at,
    message: "Login successful".to_string(),
  }))
}

/// Handler for code verification
///
/// POST /api/auth/verify-otp
/// Body: VerifyOtpRequest (JSON)
/// Response: SuccessResponse (JSON) with status 200
pub async fn verify_otp_handler(
  request: web::Json<VerifyOtpRequest>,
  use_case: web::Data<Arc<VerifyEmailUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let (email, code) = request
    .fields()
    .ok_or_else(|| ApiError::Validation("Email and OTP are required.".to_string()))?;

  use_case
    .execute(VerifyEmailCommand::Code { email, code })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: VERIFIED_MESSAGE.to_string(),
  }))
}

/// Handler for verification links
///
/// GET /api/auth/verify-email?token=<token>
/// Response: SuccessResponse (JSON) with status 200
pub async fn verify_email_handler(
  query: web::Query<VerifyEmailQuery>,
  use_case: web::Data<Arc<VerifyEmailUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let token = query
    .into_inner()
    .token
    .filter(|t| !t.trim().is_empty())
    .ok_or_else(|| ApiError::Validation("Verification token is required.".to_string()))?;

  use_case
    .execute(VerifyEmailCommand::Link { token })
    .await
    .map_err(|e| match e {
      AuthError::InvalidVerification => ApiError::Auth(AuthErrorKind::InvalidVerificationLink),
      e => e.into(),
    })?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: VERIFIED_MESSAGE.to_string(),
  }))
}

/// Handler for re-sending the verification email
///
/// POST /api/auth/resend-verification
/// Body: ResendVerificationRequest (JSON)
/// Response: SuccessResponse (JSON) with status 200
pub async fn resend_verification_handler(
  request: web::Json<ResendVerificationRequest>,
  use_case: web::Data<Arc<ResendVerificationUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  use_case
    .execute(ResendVerificationCommand {
      email: request.into_inner().email,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Verification email sent.".to_string(),
  }))
}

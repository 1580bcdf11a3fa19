pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
  ResendVerificationRequest, SuccessResponse, VerifyEmailQuery, VerifyOtpRequest,
};
pub use errors::{ApiError, AuthErrorKind, json_error_handler};
pub use handlers::auth::{
  login_handler, register_handler, resend_verification_handler, verify_email_handler,
  verify_otp_handler,
};
pub use middleware::{RequestId, RequestIdMiddleware};
pub use routes::configure_auth_routes;

use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  LoginUserUseCase, RegisterUserUseCase, ResendVerificationUseCase, VerifyEmailUseCase,
};

use super::errors::{json_error_handler, query_error_handler};
use super::handlers::auth::{
  login_handler, register_handler, resend_verification_handler, verify_email_handler,
  verify_otp_handler,
};

/// Largest JSON body accepted by the auth endpoints
const JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Configure authentication routes
///
/// Mounts all account endpoints under the provided scope (e.g. /api/auth).
///
/// # Routes
///
/// - POST /register - Register a new account and send its verification email
/// - POST /login - Check credentials and issue a bearer token
/// - POST /verify-otp - Verify an account with the emailed code
/// - GET /verify-email - Verify an account from a signed link
/// - POST /resend-verification - Issue and send fresh verification material
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use accountd::application::auth::*;
/// # use accountd::adapters::http::routes::configure_auth_routes;
///
/// # fn example(
/// #   register_use_case: Arc<RegisterUserUseCase>,
/// #   login_use_case: Arc<LoginUserUseCase>,
/// #   verify_email_use_case: Arc<VerifyEmailUseCase>,
/// #   resend_use_case: Arc<ResendVerificationUseCase>,
/// # ) {
/// let app = App::new().service(web::scope("/api/auth").configure(|cfg| {
///   configure_auth_routes(
///     cfg,
///     register_use_case,
///     login_use_case,
///     verify_email_use_case,
///     resend_use_case,
///   )
/// }));
/// # }
/// ```
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  verify_email_use_case: Arc<VerifyEmailUseCase>,
  resend_verification_use_case: Arc<ResendVerificationUseCase>,
) {
  cfg
    // Extractor failures render the same error body as handler errors
    .app_data(
      web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(verify_email_use_case))
    .app_data(web::Data::new(resend_verification_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/verify-otp", web::post().to(verify_otp_handler))
    .route("/verify-email", web::get().to(verify_email_handler))
    .route(
      "/resend-verification",
      web::post().to(resend_verification_handler),
    );
}

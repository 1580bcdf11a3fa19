//! Authentication use cases
//!
//! This module contains the account use cases that orchestrate the
//! `AuthService` for the HTTP layer.

mod login_user;
mod register_user;
mod resend_verification;
mod verify_email;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use resend_verification::{ResendVerificationCommand, ResendVerificationUseCase};
pub use verify_email::{VerifyEmailCommand, VerifyEmailResponse, VerifyEmailUseCase};

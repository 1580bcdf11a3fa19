use async_trait::async_trait;
use chrono::Duration;

use super::entities::Account;
use super::errors::AuthError;
use super::messages::EmailMessage;
use super::value_objects::{
  Email, LoginToken, Password, PasswordHash, VerificationCode, VerificationToken,
};

/// Repository trait for account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
  /// Creates a new account; a taken email yields `RepositoryError::DuplicateKey`
  async fn create(&self, account: Account) -> Result<Account, AuthError>;

  /// Finds an account by its normalized email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AuthError>;

  /// Updates an existing account
  async fn update(&self, account: Account) -> Result<Account, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Produces and checks email verification material
#[async_trait]
pub trait VerificationIssuer: Send + Sync {
  /// Generates a fresh one-time numeric code
  async fn issue_code(&self) -> Result<VerificationCode, AuthError>;

  /// Signs a link token binding `email`, valid for `ttl`
  async fn issue_link_token(
    &self,
    email: &Email,
    ttl: Duration,
  ) -> Result<VerificationToken, AuthError>;

  /// Checks signature, purpose and expiry; returns the email the token was issued for
  async fn decode_link_token(&self, token: &VerificationToken) -> Result<Email, AuthError>;
}

/// Issues the bearer token returned by a successful login
#[async_trait]
pub trait LoginTokenIssuer: Send + Sync {
  async fn issue(&self, account: &Account) -> Result<LoginToken, AuthError>;
}

/// Delivers outbound email
#[async_trait]
pub trait EmailSender: Send + Sync {
  async fn send(&self, message: &EmailMessage) -> Result<(), AuthError>;
}

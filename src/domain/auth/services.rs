use chrono::{Duration, Utc};
use std::sync::Arc;

use super::entities::Account;
use super::errors::{AuthError, HashError, RepositoryError};
use super::messages::EmailMessage;
use super::ports::{
  AccountRepository, EmailSender, LoginTokenIssuer, PasswordHasher, VerificationIssuer,
};
use super::value_objects::{
  Email, LoginToken, Password, PasswordHash, VerificationCode, VerificationMethod,
  VerificationToken,
};

/// Default lifetime of verification codes and links
const VERIFICATION_TTL_SECONDS: i64 = 3600;

/// Tunables for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub verification_method: VerificationMethod,
  pub code_ttl: Duration,
  pub link_ttl: Duration,
  /// Page or endpoint the verification link points at; `token` is appended as a query parameter
  pub link_base_url: String,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      verification_method: VerificationMethod::Code,
      code_ttl: Duration::seconds(VERIFICATION_TTL_SECONDS),
      link_ttl: Duration::seconds(VERIFICATION_TTL_SECONDS),
      link_base_url: "http://localhost:5000/api/auth/verify-email".to_string(),
    }
  }
}

/// Result of a registration
#[derive(Debug, Clone)]
pub struct Registration {
  pub account: Account,
  /// False when the account was stored but the verification email could not be delivered
  pub verification_email_sent: bool,
}

/// Collaborators required by `AuthService`
pub struct AuthServiceDependencies {
  pub account_repo: Arc<dyn AccountRepository>,
  pub password_hasher: Arc<dyn PasswordHasher>,
  pub verification_issuer: Arc<dyn VerificationIssuer>,
  pub login_token_issuer: Arc<dyn LoginTokenIssuer>,
  pub email_sender: Arc<dyn EmailSender>,
}

/// Authentication service implementing core business logic
pub struct AuthService {
  account_repo: Arc<dyn AccountRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  verification_issuer: Arc<dyn VerificationIssuer>,
  login_token_issuer: Arc<dyn LoginTokenIssuer>,
  email_sender: Arc<dyn EmailSender>,
  config: AuthServiceConfig,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(deps: AuthServiceDependencies, config: AuthServiceConfig) -> Self {
    Self {
      account_repo: deps.account_repo,
      password_hasher: deps.password_hasher,
      verification_issuer: deps.verification_issuer,
      login_token_issuer: deps.login_token_issuer,
      email_sender: deps.email_sender,
      config,
    }
  }

  /// Registers a new unverified account and sends its verification email
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if email is already registered.
  /// A failed email delivery is not an error: the account is kept and
  /// `Registration::verification_email_sent` is false.
  pub async fn register(&self, email: Email, password: Password) -> Result<Registration, AuthError> {
    if self.account_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let mut account = Account::new(email.into_inner(), password_hash.into_inner());
    let message = self.prepare_verification(&mut account).await?;

    // Two concurrent registrations can both pass the lookup above
    let account = match self.account_repo.create(account).await {
      Ok(account) => account,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    tracing::info!(
      user_id = %account.id,
      email = %account.email,
      method = %self.config.verification_method,
      "Account registered"
    );

    let verification_email_sent = match self.email_sender.send(&message).await {
      Ok(()) => true,
      Err(e) => {
        tracing::warn!(
          user_id = %account.id,
          error = %e,
          "Account registered but verification email could not be sent"
        );
        false
      }
    };

    Ok(Registration {
      account,
      verification_email_sent,
    })
  }

  /// Checks credentials and issues a bearer token
  ///
  /// Checks run in a fixed order: unknown email, wrong password, then
  /// unverified account.
  ///
  /// # Errors
  /// `UserNotFound`, `InvalidCredentials` or `EmailNotVerified`
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(Account, LoginToken), AuthError> {
    let account = self
      .account_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    let password_hash =
      PasswordHash::from_hash(&account.password_hash).map_err(|_| HashError::InvalidFormat)?;
    if !self.password_hasher.verify(&password, &password_hash).await? {
      tracing::info!(user_id = %account.id, "Login rejected: invalid credentials");
      return Err(AuthError::InvalidCredentials);
    }

    if !account.is_verified {
      tracing::info!(user_id = %account.id, "Login rejected: email not verified");
      return Err(AuthError::EmailNotVerified);
    }

    let token = self.login_token_issuer.issue(&account).await?;
    tracing::info!(user_id = %account.id, "Login succeeded");

    Ok((account, token))
  }

  /// Verifies an account with the code that was emailed to it
  ///
  /// The account is looked up before `code` is parsed, so a malformed code
  /// still reports an unknown or already verified account first.
  ///
  /// # Errors
  /// `UserNotFound`, `AlreadyVerified`, or `InvalidVerification` when the code
  /// is malformed, wrong, missing or expired
  pub async fn verify_code(&self, email: Email, code: &str) -> Result<Account, AuthError> {
    let account = self.find_unverified(&email).await?;

    let valid = VerificationCode::from_string(code)
      .is_ok_and(|code| account.is_verification_code_valid(&code, Utc::now()));
    if !valid {
      tracing::info!(user_id = %account.id, "Verification rejected: invalid or expired code");
      return Err(AuthError::InvalidVerification);
    }

    self.complete_verification(account).await
  }

  /// Verifies an account from a signed verification link
  ///
  /// Only the most recently issued link is accepted.
  pub async fn verify_link(&self, token: VerificationToken) -> Result<Account, AuthError> {
    let email = self.verification_issuer.decode_link_token(&token).await?;
    let account = self.find_unverified(&email).await?;

    if !account.is_verification_token_valid(&token) {
      tracing::info!(user_id = %account.id, "Verification rejected: superseded link");
      return Err(AuthError::InvalidVerification);
    }

    self.complete_verification(account).await
  }

  /// Issues fresh verification material for an unverified account and sends it
  ///
  /// # Errors
  /// `UserNotFound`, `AlreadyVerified`, or `Notification` if delivery fails
  pub async fn resend_verification(&self, email: Email) -> Result<Account, AuthError> {
    let mut account = self.find_unverified(&email).await?;

    let message = self.prepare_verification(&mut account).await?;
    let account = self.account_repo.update(account).await?;

    self.email_sender.send(&message).await?;
    tracing::info!(user_id = %account.id, "Verification email re-sent");

    Ok(account)
  }

  async fn find_unverified(&self, email: &Email) -> Result<Account, AuthError> {
    let account = self
      .account_repo
      .find_by_email(email)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    if account.is_verified {
      return Err(AuthError::AlreadyVerified);
    }

    Ok(account)
  }

  async fn complete_verification(&self, mut account: Account) -> Result<Account, AuthError> {
    account.mark_verified();
    let account = self.account_repo.update(account).await?;
    tracing::info!(user_id = %account.id, "Email verified");
    Ok(account)
  }

  /// Issues verification material, records its digest on the account and
  /// returns the email to send once the account is persisted
  async fn prepare_verification(&self, account: &mut Account) -> Result<EmailMessage, AuthError> {
    match self.config.verification_method {
      VerificationMethod::Code => {
        let code = self.verification_issuer.issue_code().await?;
        account.set_verification_code(code.digest(), Utc::now() + self.config.code_ttl);
        Ok(EmailMessage::verification_code(
          account.email.clone(),
          code.as_str(),
          self.config.code_ttl,
        ))
      }
      VerificationMethod::Link => {
        let email = Email::new(account.email.clone())?;
        let token = self
          .verification_issuer
          .issue_link_token(&email, self.config.link_ttl)
          .await?;
        account.set_verification_token(token.digest());
        let link = verification_link(&self.config.link_base_url, token.as_str());
        Ok(EmailMessage::verification_link(
          account.email.clone(),
          &link,
          self.config.link_ttl,
        ))
      }
    }
  }
}

fn verification_link(base_url: &str, token: &str) -> String {
  let separator = if base_url.contains('?') { '&' } else { '?' };
  format!("{base_url}{separator}token={token}")
}

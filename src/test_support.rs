//! Fixtures shared by unit tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::auth::{
  AuthError, AuthService, AuthServiceConfig, AuthServiceDependencies, EmailMessage,
  NotificationError, VerificationMethod, ports::EmailSender,
};
use crate::infrastructure::persistence::InMemoryAccountRepository;
use crate::infrastructure::security::{
  Argon2PasswordHasher, JwtLoginTokenIssuer, JwtSigner, SecureVerificationIssuer,
};

pub const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

/// Email sender that keeps every message it is handed
#[derive(Default)]
pub struct RecordingEmailSender {
  messages: Mutex<Vec<EmailMessage>>,
  fail: bool,
}

impl RecordingEmailSender {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records messages but reports every delivery as failed
  pub fn failing() -> Self {
    Self {
      messages: Mutex::new(Vec::new()),
      fail: true,
    }
  }

  pub fn messages(&self) -> Vec<EmailMessage> {
    self.messages.lock().unwrap().clone()
  }

  pub fn last(&self) -> EmailMessage {
    self.messages().pop().expect("no email was sent")
  }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
  async fn send(&self, message: &EmailMessage) -> Result<(), AuthError> {
    self.messages.lock().unwrap().push(message.clone());
    if self.fail {
      return Err(NotificationError::DeliveryFailed("smtp unavailable".to_string()).into());
    }
    Ok(())
  }
}

/// AuthService wired to in-memory adapters and a cheap Argon2 profile
pub struct TestAuth {
  pub service: Arc<AuthService>,
  pub repo: Arc<InMemoryAccountRepository>,
  pub sender: Arc<RecordingEmailSender>,
}

impl TestAuth {
  pub fn new(method: VerificationMethod) -> Self {
    Self::with_sender(method, RecordingEmailSender::new())
  }

  pub fn with_sender(method: VerificationMethod, sender: RecordingEmailSender) -> Self {
    let signer = Arc::new(JwtSigner::new(TEST_SECRET).unwrap());
    let repo = Arc::new(InMemoryAccountRepository::new());
    let sender = Arc::new(sender);

    let service = AuthService::new(
      AuthServiceDependencies {
        account_repo: repo.clone(),
        password_hasher: Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).unwrap()),
        verification_issuer: Arc::new(SecureVerificationIssuer::new(signer.clone())),
        login_token_issuer: Arc::new(JwtLoginTokenIssuer::new(
          signer,
          chrono::Duration::hours(1),
        )),
        email_sender: sender.clone(),
      },
      AuthServiceConfig {
        verification_method: method,
        ..AuthServiceConfig::default()
      },
    );

    Self {
      service: Arc::new(service),
      repo,
      sender,
    }
  }
}

/// Pulls the 8-digit code out of a verification email
pub fn extract_code(message: &EmailMessage) -> String {
  message
    .text_body
    .split(|c: char| !c.is_ascii_digit())
    .find(|part| part.len() == 8)
    .expect("no verification code in email")
    .to_string()
}

/// Pulls the `token` query parameter out of a verification link email
pub fn extract_token(message: &EmailMessage) -> String {
  let start = message
    .text_body
    .find("token=")
    .expect("no verification link in email")
    + "token=".len();

  message.text_body[start..]
    .split(|c: char| c.is_whitespace() || c == '&')
    .next()
    .unwrap_or_default()
    .to_string()
}

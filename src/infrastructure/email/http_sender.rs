use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::domain::auth::errors::{AuthError, NotificationError};
use crate::domain::auth::messages::EmailMessage;
use crate::domain::auth::ports::EmailSender;

/// Settings for a transactional email HTTP API
#[derive(Debug, Clone)]
pub struct HttpEmailSenderConfig {
  pub api_url: String,
  pub api_key: String,
  pub sender_email: String,
  pub sender_name: Option<String>,
  pub timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress<'a> {
  email: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody<'a> {
  sender: EmailAddress<'a>,
  to: Vec<EmailAddress<'a>>,
  subject: &'a str,
  html_content: &'a str,
  text_content: &'a str,
}

/// Delivers email through a JSON HTTP API authenticated with an `api-key` header
pub struct HttpEmailSender {
  client: reqwest::Client,
  config: HttpEmailSenderConfig,
}

impl HttpEmailSender {
  pub fn new(config: HttpEmailSenderConfig) -> Result<Self, AuthError> {
    if config.api_key.trim().is_empty() {
      return Err(NotificationError::NotConfigured("email.api_key is required".to_string()).into());
    }
    if config.sender_email.trim().is_empty() {
      return Err(
        NotificationError::NotConfigured("email.sender_email is required".to_string()).into(),
      );
    }

    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .user_agent(concat!("accountd/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(NotificationError::from)?;

    Ok(Self { client, config })
  }

  fn body<'a>(&'a self, message: &'a EmailMessage) -> SendEmailBody<'a> {
    SendEmailBody {
      sender: EmailAddress {
        email: &self.config.sender_email,
        name: self.config.sender_name.as_deref(),
      },
      to: vec![EmailAddress {
        email: &message.to,
        name: None,
      }],
      subject: &message.subject,
      html_content: &message.html_body,
      text_content: &message.text_body,
    }
  }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
  async fn send(&self, message: &EmailMessage) -> Result<(), AuthError> {
    let response = self
      .client
      .post(&self.config.api_url)
      .header("api-key", &self.config.api_key)
      .header(reqwest::header::ACCEPT, "application/json")
      .json(&self.body(message))
      .send()
      .await
      .map_err(NotificationError::from)?;

    let status = response.status();
    if status.is_success() {
      tracing::debug!(to = %message.to, status = status.as_u16(), "Email accepted by provider");
      return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(
      NotificationError::Rejected {
        status: status.as_u16(),
        body,
      }
      .into(),
    )
  }
}

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::messages::EmailMessage;
use crate::domain::auth::ports::EmailSender;

/// Development sender that writes the message to the log instead of delivering it
#[derive(Clone, Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
  async fn send(&self, message: &EmailMessage) -> Result<(), AuthError> {
    tracing::info!(
      to = %message.to,
      subject = %message.subject,
      body = %message.text_body,
      "Email delivery stub"
    );
    Ok(())
  }
}

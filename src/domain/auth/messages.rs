use chrono::Duration;

/// Outbound email handed to an `EmailSender`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
  pub to: String,
  pub subject: String,
  pub html_body: String,
  pub text_body: String,
}

const VERIFICATION_SUBJECT: &str = "Confirm Your Email Address";

impl EmailMessage {
  /// Email carrying a one-time verification code
  pub fn verification_code(to: impl Into<String>, code: &str, lifetime: Duration) -> Self {
    let lifetime = describe_lifetime(lifetime);
    Self {
      to: to.into(),
      subject: VERIFICATION_SUBJECT.to_string(),
      html_body: format!(
        "<p>Your email verification code is: <strong>{code}</strong></p>\
         <p>This code will expire in {lifetime}.</p>"
      ),
      text_body: format!(
        "Your email verification code is: {code}\nThis code will expire in {lifetime}."
      ),
    }
  }

  /// Email carrying a verification link
  pub fn verification_link(to: impl Into<String>, link: &str, lifetime: Duration) -> Self {
    let lifetime = describe_lifetime(lifetime);
    Self {
      to: to.into(),
      subject: VERIFICATION_SUBJECT.to_string(),
      html_body: format!(
        "<p>Please confirm your email address by clicking the link below:</p>\
         <p><a href=\"{link}\">Verify email</a></p>\
         <p>This link will expire in {lifetime}.</p>"
      ),
      text_body: format!(
        "Please confirm your email address by opening this link:\n{link}\n\
         This link will expire in {lifetime}."
      ),
    }
  }
}

fn describe_lifetime(lifetime: Duration) -> String {
  let minutes = lifetime.num_minutes();
  match minutes {
    m if m >= 60 && m % 60 == 0 => match m / 60 {
      1 => "1 hour".to_string(),
      h => format!("{h} hours"),
    },
    1 => "1 minute".to_string(),
    m if m > 1 => format!("{m} minutes"),
    _ => format!("{} seconds", lifetime.num_seconds().max(0)),
  }
}

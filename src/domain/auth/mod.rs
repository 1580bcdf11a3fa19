pub mod entities;
pub mod errors;
pub mod messages;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::Account;
pub use errors::{
  AuthError, HashError, NotificationError, RepositoryError, TokenError, ValidationError,
};
pub use messages::EmailMessage;
pub use services::{AuthService, AuthServiceConfig, AuthServiceDependencies, Registration};
pub use value_objects::{
  Email, LoginToken, Password, PasswordHash, VerificationCode, VerificationDigest,
  VerificationMethod, VerificationToken,
};

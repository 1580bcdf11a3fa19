mod argon2_hasher;
mod jwt;
mod login_token_issuer;
mod verification_issuer;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::JwtSigner;
pub use login_token_issuer::{JwtLoginTokenIssuer, LoginClaims};
pub use verification_issuer::SecureVerificationIssuer;

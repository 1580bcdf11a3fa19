//! Account service: registration, email verification and login over HTTP
//!
//! Layered as domain (entities, ports, `AuthService`), application (use
//! cases), infrastructure (Postgres, Argon2, JWT, email) and adapters
//! (actix-web handlers).

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

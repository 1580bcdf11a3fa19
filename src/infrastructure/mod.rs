//! Infrastructure layer
//!
//! Implementations of the domain ports plus configuration loading.

pub mod config;
pub mod email;
pub mod persistence;
pub mod security;

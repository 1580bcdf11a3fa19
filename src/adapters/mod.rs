//! Adapters layer
//!
//! Inbound adapters that expose the application use cases over HTTP.

pub mod http;

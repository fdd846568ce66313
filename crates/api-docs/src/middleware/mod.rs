//! Middleware for the documentation service

pub mod security_headers;

pub use security_headers::{SecurityHeaders, SecurityHeadersConfig};

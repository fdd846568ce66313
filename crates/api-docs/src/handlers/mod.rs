//! Request handlers for the documentation service

pub mod health;
pub mod viewer;

// Re-export commonly used handlers
pub use health::*;
pub use viewer::*;

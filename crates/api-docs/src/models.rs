//! Common DTOs shared across the viewer endpoints

use serde::{Deserialize, Serialize};

/// Standard error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Body returned when the viewer password does not match
#[derive(Debug, Serialize, Deserialize)]
pub struct PasswordError {
    pub error: String,
}

impl PasswordError {
    pub fn incorrect() -> Self {
        Self {
            error: "password incorrect".to_string(),
        }
    }
}

/// Favicon link rendered into the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Link target, relative to the viewer mount point
    pub href: String,
    /// `sizes` attribute, e.g. `32x32`
    pub sizes: String,
}

impl Icon {
    pub fn new(href: impl Into<String>, sizes: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            sizes: sizes.into(),
        }
    }

    /// Favicons shipped with the Swagger UI distribution
    pub fn defaults() -> Vec<Icon> {
        vec![
            Icon::new("./favicon-32x32.png", "32x32"),
            Icon::new("./favicon-16x16.png", "16x16"),
        ]
    }
}

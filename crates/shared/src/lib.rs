//! Shared library for the API documentation service
//!
//! This crate provides the functionality behind the documentation viewer:
//! - API definition resolution from AWS API Gateway exports
//! - Error handling types
//! - Configuration management
//! - Logging infrastructure

pub mod apigateway;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use apigateway::{DefinitionResolver, GatewayExportRequest, ResolverError};
pub use config::{Config, GatewayConfig, ViewerConfig};
pub use error::{Error, Result};

/// Initialize tracing subscriber for structured logging
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shared=debug,api_docs=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

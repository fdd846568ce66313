//! API definition resolution from AWS API Gateway.
//!
//! Given a [`GatewayExportRequest`], the [`DefinitionResolver`] exports the
//! OpenAPI/Swagger document of a deployed stage and prepares it for the
//! documentation viewer:
//!
//! 1. Validate the identifiers (no network call on failure)
//! 2. Obtain a client for the region and optional credential profile
//! 3. Run the export, requesting JSON, and decode the body
//! 4. Normalize the document (see [`document`])
//!
//! Every call is a single attempt. Nothing is cached and nothing is retried;
//! the caller decides what a failure means.
//!
//! # Usage
//!
//! ```ignore
//! use shared::apigateway::{aws::AwsClientFactory, DefinitionResolver, GatewayExportRequest};
//!
//! let resolver = DefinitionResolver::new(AwsClientFactory);
//! let request = GatewayExportRequest::new("a1b2c3d4e5", "prod")
//!     .with_parameter("extensions", "integrations");
//! let document = resolver.resolve(request).await?;
//! ```

#[cfg(feature = "aws-apigateway")]
pub mod aws;
pub mod client;
pub mod document;
pub mod types;

use serde_json::Value;
use std::sync::Arc;

pub use client::{ClientFactory, GatewayClient};
pub use document::{decode_document, normalize_document, SELF_REFERENTIAL_PATHS};
pub use types::{
    GatewayExportRequest, ResolverError, DEFAULT_EXPORT_TYPE, DEFAULT_REGION, EXPORT_ACCEPTS,
};

/// Resolves API definitions through a [`ClientFactory`]
///
/// Cheap to clone; clones share the factory and nothing else.
#[derive(Clone)]
pub struct DefinitionResolver {
    factory: Arc<dyn ClientFactory>,
}

impl DefinitionResolver {
    pub fn new<F: ClientFactory + 'static>(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    pub fn from_arc(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }

    /// Export and normalize the API definition described by `request`
    ///
    /// # Errors
    ///
    /// - [`ResolverError::Configuration`] if `rest_api_id`, `stage_name` or
    ///   `export_type` is empty; the client factory is not called
    /// - [`ResolverError::Resolution`] if client setup, the export call, or
    ///   decoding the body fails
    pub async fn resolve(&self, request: GatewayExportRequest) -> Result<Value, ResolverError> {
        request.validate()?;

        tracing::debug!(
            rest_api_id = %request.rest_api_id,
            stage_name = %request.stage_name,
            export_type = %request.export_type,
            region = %request.region,
            "Exporting API definition"
        );

        let client = self
            .factory
            .make_client(request.profile_name.clone(), request.region.clone())
            .await?;

        let body = client
            .export_documentation(&request, EXPORT_ACCEPTS)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    rest_api_id = %request.rest_api_id,
                    stage_name = %request.stage_name,
                    error = %e,
                    "API definition export failed"
                );
            })?;

        let document = normalize_document(decode_document(&body)?)?;

        tracing::info!(
            rest_api_id = %request.rest_api_id,
            stage_name = %request.stage_name,
            bytes = body.len(),
            "Resolved API definition"
        );

        Ok(document)
    }
}

impl std::fmt::Debug for DefinitionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionResolver").finish_non_exhaustive()
    }
}

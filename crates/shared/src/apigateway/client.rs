//! Collaborator traits for the documentation export call

use async_trait::async_trait;
use std::sync::Arc;

use super::types::{GatewayExportRequest, ResolverError};

/// A client able to run the provider's documentation export operation
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Export the documentation of one deployed stage as raw bytes
    ///
    /// `accepts` is the requested content type of the export body.
    async fn export_documentation(
        &self,
        request: &GatewayExportRequest,
        accepts: &str,
    ) -> Result<Vec<u8>, ResolverError>;
}

/// Builds gateway clients scoped to a region and an optional credential profile
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn make_client(
        &self,
        profile_name: Option<String>,
        region: String,
    ) -> Result<Arc<dyn GatewayClient>, ResolverError>;
}

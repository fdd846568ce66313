//! AWS API Gateway integration for documentation export.
//!
//! Wraps the `GetExport` operation of the API Gateway (REST APIs) service.
//!
//! # Prerequisites
//!
//! - AWS credentials available through a named profile or the default chain
//!   (environment, shared credentials file, IAM role)
//! - Required IAM permission: `apigateway:GET` on
//!   `/restapis/{rest_api_id}/stages/{stage_name}/exports/*`
//!
//! # Usage
//!
//! ```no_run
//! use shared::apigateway::{aws::AwsClientFactory, DefinitionResolver, GatewayExportRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = DefinitionResolver::new(AwsClientFactory);
//!     let document = resolver
//!         .resolve(GatewayExportRequest::new("a1b2c3d4e5", "prod"))
//!         .await?;
//!     println!("{}", document);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_apigateway::Client;
use std::sync::Arc;

use super::client::{ClientFactory, GatewayClient};
use super::types::{GatewayExportRequest, ResolverError};

/// Creates API Gateway SDK clients
///
/// A new SDK configuration is loaded for every call; nothing is pooled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsClientFactory;

#[async_trait]
impl ClientFactory for AwsClientFactory {
    async fn make_client(
        &self,
        profile_name: Option<String>,
        region: String,
    ) -> Result<Arc<dyn GatewayClient>, ResolverError> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.clone()));

        if let Some(profile) = profile_name.as_deref() {
            tracing::debug!(profile, region = %region, "Loading AWS config from named profile");
            loader = loader.profile_name(profile);
        } else {
            tracing::debug!(region = %region, "Loading AWS config from default credential chain");
        }

        let config = loader.load().await;

        Ok(Arc::new(AwsGatewayClient {
            client: Client::new(&config),
        }))
    }
}

/// API Gateway SDK client wrapper
pub struct AwsGatewayClient {
    client: Client,
}

impl AwsGatewayClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GatewayClient for AwsGatewayClient {
    async fn export_documentation(
        &self,
        request: &GatewayExportRequest,
        accepts: &str,
    ) -> Result<Vec<u8>, ResolverError> {
        let response = self
            .client
            .get_export()
            .rest_api_id(&request.rest_api_id)
            .stage_name(&request.stage_name)
            .export_type(&request.export_type)
            .set_parameters(Some(request.parameters.clone()))
            .accepts(accepts)
            .send()
            .await
            .map_err(|e| {
                ResolverError::resolution(format!(
                    "Failed to export {} stage {}: {}",
                    request.rest_api_id,
                    request.stage_name,
                    aws_sdk_apigateway::error::DisplayErrorContext(&e)
                ))
            })?;

        let body = response.body().ok_or_else(|| {
            ResolverError::resolution(format!(
                "Export of {} stage {} returned no body",
                request.rest_api_id, request.stage_name
            ))
        })?;

        Ok(body.as_ref().to_vec())
    }
}

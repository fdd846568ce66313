//! Common test utilities for integration tests
//!
//! Substitute gateway collaborators so the viewer can be exercised without
//! AWS credentials or network access.

use async_trait::async_trait;
use shared::apigateway::{ClientFactory, GatewayClient, GatewayExportRequest, ResolverError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Export body used by most gateway tests
pub const WIDGETS_EXPORT: &str = r#"{"openapi":"3.0.1","info":{"title":"Widgets API"},"servers":[{"variables":{"basePath":{"default":"/v1"}}}],"paths":{"/api-doc":{},"/api-doc/{proxy+}":{},"/widgets":{"get":{}}}}"#;

/// Gateway client answering every export with a fixed result
pub struct StaticClient {
    result: Result<Vec<u8>, String>,
    seen: Arc<Mutex<Vec<GatewayExportRequest>>>,
}

#[async_trait]
impl GatewayClient for StaticClient {
    async fn export_documentation(
        &self,
        request: &GatewayExportRequest,
        _accepts: &str,
    ) -> Result<Vec<u8>, ResolverError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        self.result.clone().map_err(ResolverError::resolution)
    }
}

/// Client factory counting how often a client was requested
#[derive(Clone)]
pub struct StubFactory {
    client: Arc<StaticClient>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl StubFactory {
    /// Factory whose client returns `body`
    pub fn returning(body: &str) -> Self {
        Self::with_result(Ok(body.as_bytes().to_vec()))
    }

    /// Factory whose client fails with a transport error
    pub fn failing(message: &str) -> Self {
        Self::with_result(Err(message.to_string()))
    }

    fn with_result(result: Result<Vec<u8>, String>) -> Self {
        Self {
            client: Arc::new(StaticClient {
                result,
                seen: Arc::new(Mutex::new(Vec::new())),
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests the client has received so far
    pub fn seen(&self) -> Vec<GatewayExportRequest> {
        self.client
            .seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ClientFactory for StubFactory {
    async fn make_client(
        &self,
        _profile_name: Option<String>,
        _region: String,
    ) -> Result<Arc<dyn GatewayClient>, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let client: Arc<dyn GatewayClient> = self.client.clone();
        Ok(client)
    }
}

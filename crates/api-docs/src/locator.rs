//! Deployment detection for live API Gateway exports
//!
//! When the viewer is served from the deployed API it documents, the REST API
//! id and stage are taken from the incoming request. How they get there
//! depends on the hosting setup, so the lookup sits behind
//! [`DeploymentLocator`].

use actix_web::HttpRequest;

/// REST API id and stage the viewer should document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub rest_api_id: String,
    pub stage_name: String,
}

impl DeploymentTarget {
    pub fn new(rest_api_id: impl Into<String>, stage_name: impl Into<String>) -> Self {
        Self {
            rest_api_id: rest_api_id.into(),
            stage_name: stage_name.into(),
        }
    }
}

/// Supplies the deployment identifiers for a request
///
/// Values that cannot be determined are returned empty. The resolver rejects
/// empty identifiers as a configuration error before any network call.
pub trait DeploymentLocator: Send + Sync {
    fn locate(&self, req: &HttpRequest) -> DeploymentTarget;
}

/// Identifiers known up front
#[derive(Debug, Clone)]
pub struct FixedDeployment {
    target: DeploymentTarget,
}

impl FixedDeployment {
    pub fn new(rest_api_id: impl Into<String>, stage_name: impl Into<String>) -> Self {
        Self {
            target: DeploymentTarget::new(rest_api_id, stage_name),
        }
    }
}

impl DeploymentLocator for FixedDeployment {
    fn locate(&self, _req: &HttpRequest) -> DeploymentTarget {
        self.target.clone()
    }
}

/// Identifiers read from two request headers set by the front door
///
/// Clients control their own headers. The proxy in front of the service must
/// overwrite or strip both headers, otherwise any caller picks the REST API
/// and stage exported with the service's credentials.
#[derive(Debug, Clone)]
pub struct HeaderDeployment {
    api_id_header: String,
    stage_header: String,
}

impl HeaderDeployment {
    pub fn new(api_id_header: impl Into<String>, stage_header: impl Into<String>) -> Self {
        Self {
            api_id_header: api_id_header.into(),
            stage_header: stage_header.into(),
        }
    }

    fn header(req: &HttpRequest, name: &str) -> String {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

impl DeploymentLocator for HeaderDeployment {
    fn locate(&self, req: &HttpRequest) -> DeploymentTarget {
        let target = DeploymentTarget {
            rest_api_id: Self::header(req, &self.api_id_header),
            stage_name: Self::header(req, &self.stage_header),
        };

        if target.rest_api_id.is_empty() || target.stage_name.is_empty() {
            tracing::warn!(
                api_id_header = %self.api_id_header,
                stage_header = %self.stage_header,
                "Deployment headers missing on documentation request"
            );
        }

        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_fixed_deployment() {
        let req = TestRequest::default().to_http_request();
        let target = FixedDeployment::new("abc123", "prod").locate(&req);

        assert_eq!(target, DeploymentTarget::new("abc123", "prod"));
    }

    #[test]
    fn test_header_deployment() {
        let req = TestRequest::default()
            .insert_header(("x-gateway-api-id", "abc123"))
            .insert_header(("x-gateway-stage", " prod "))
            .to_http_request();

        let target = HeaderDeployment::new("x-gateway-api-id", "x-gateway-stage").locate(&req);

        assert_eq!(target, DeploymentTarget::new("abc123", "prod"));
    }

    #[test]
    fn test_header_deployment_missing_headers_are_empty() {
        let req = TestRequest::default()
            .insert_header(("x-gateway-stage", "prod"))
            .to_http_request();

        let target = HeaderDeployment::new("x-gateway-api-id", "x-gateway-stage").locate(&req);

        assert!(target.rest_api_id.is_empty());
        assert_eq!(target.stage_name, "prod");
    }
}

//! Common types for API Gateway documentation export

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Region used when neither the caller nor the environment names one
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Export format used when the caller does not name one (OpenAPI 3.0.x)
pub const DEFAULT_EXPORT_TYPE: &str = "oas30";

/// Content type requested from the export operation
pub const EXPORT_ACCEPTS: &str = "application/json";

/// Definition resolution errors
///
/// `Configuration` means the caller supplied bad input and no remote call was
/// made. `Resolution` means the remote call or its payload failed.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Missing or empty identifier / export format
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport, authentication, or payload failure
    #[error("Resolution error: {0}")]
    Resolution(String),
}

impl ResolverError {
    /// Create a Configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a Resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_export_type() -> String {
    DEFAULT_EXPORT_TYPE.to_string()
}

/// Identifies one documentation export of a deployed API stage
///
/// Built fresh for every resolution attempt. `parameters` are passed to the
/// provider untouched (e.g. `extensions=integrations`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayExportRequest {
    /// Named credential profile; the default credential chain is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,

    #[serde(default = "default_region")]
    pub region: String,

    /// Identifier of the REST API resource
    #[serde(default)]
    pub rest_api_id: String,

    /// Deployment stage to export
    #[serde(default)]
    pub stage_name: String,

    /// Export format tag, e.g. `oas30` or `swagger`
    ///
    /// Only checked for non-emptiness; the provider decides what is legal.
    #[serde(default = "default_export_type")]
    pub export_type: String,

    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl Default for GatewayExportRequest {
    fn default() -> Self {
        Self {
            profile_name: None,
            region: default_region(),
            rest_api_id: String::new(),
            stage_name: String::new(),
            export_type: default_export_type(),
            parameters: HashMap::new(),
        }
    }
}

impl GatewayExportRequest {
    pub fn new(rest_api_id: impl Into<String>, stage_name: impl Into<String>) -> Self {
        Self {
            rest_api_id: rest_api_id.into(),
            stage_name: stage_name.into(),
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_export_type(mut self, export_type: impl Into<String>) -> Self {
        self.export_type = export_type.into();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Check that `rest_api_id`, `stage_name` and `export_type` are non-empty
    ///
    /// Values are taken as given; whitespace is left for the provider to reject.
    /// The region is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Configuration`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ResolverError> {
        if self.rest_api_id.is_empty() {
            return Err(ResolverError::configuration("rest_api_id needs to be defined"));
        }
        if self.stage_name.is_empty() {
            return Err(ResolverError::configuration("stage_name needs to be defined"));
        }
        if self.export_type.is_empty() {
            return Err(ResolverError::configuration("export_type needs to be defined"));
        }
        Ok(())
    }
}

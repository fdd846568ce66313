//! Configuration management using environment variables
//!
//! All settings come from the process environment (optionally seeded from a
//! `.env` file). See [`Config::from_env`] for the full list.

use crate::apigateway::{GatewayExportRequest, DEFAULT_EXPORT_TYPE, DEFAULT_REGION};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Default mount prefix of the documentation viewer
pub const DEFAULT_BASE_URL: &str = "/api-doc";

/// Stage header used when header detection is enabled without `APIGW_STAGE_HEADER`
pub const DEFAULT_STAGE_HEADER: &str = "x-gateway-stage";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Documentation viewer configuration
    pub viewer: ViewerConfig,

    /// Live API Gateway export, `None` when disabled
    pub gateway: Option<GatewayConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

/// Documentation viewer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// URL prefix the viewer is mounted at, without trailing `/`
    pub base_url: String,

    /// Page title; the viewer default is used when unset
    pub app_name: Option<String>,

    /// Remote API definition URL loaded by the browser
    pub api_url: Option<String>,

    /// JSON API definition read once at startup
    pub spec_file: Option<PathBuf>,

    /// Shared secret expected in the `pass` query parameter
    pub password: Option<String>,
}

/// API Gateway export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Named credential profile (default chain when unset)
    pub profile_name: Option<String>,

    pub region: String,

    pub export_type: String,

    /// Extra provider parameters, e.g. `extensions=integrations`
    pub parameters: HashMap<String, String>,

    /// Fixed REST API id
    pub rest_api_id: Option<String>,

    /// Fixed stage name
    pub stage_name: Option<String>,

    /// Request header carrying the REST API id; setting it enables header detection
    ///
    /// Clients can send any header they like, so the proxy in front of the
    /// service must overwrite or strip this header and [`Self::stage_header`].
    pub api_id_header: Option<String>,

    /// Request header carrying the stage name in header detection
    pub stage_header: String,
}

impl GatewayConfig {
    /// Build the per-request export template
    ///
    /// Identifiers are left empty; they are filled in for every request.
    pub fn export_template(&self) -> GatewayExportRequest {
        GatewayExportRequest {
            profile_name: self.profile_name.clone(),
            region: self.region.clone(),
            rest_api_id: String::new(),
            stage_name: String::new(),
            export_type: self.export_type.clone(),
            parameters: self.parameters.clone(),
        }
    }

    /// Whether both identifiers are configured statically
    pub fn has_fixed_deployment(&self) -> bool {
        self.rest_api_id.is_some() && self.stage_name.is_some()
    }

    /// Header names to read the identifiers from, when header detection is enabled
    pub fn deployment_headers(&self) -> Option<(&str, &str)> {
        self.api_id_header
            .as_deref()
            .map(|api_id| (api_id, self.stage_header.as_str()))
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// | variable | default |
    /// |---|---|
    /// | `SERVER_HOST` / `SERVER_PORT` | `0.0.0.0` / `8080` |
    /// | `SWAGGER_BASE_URL` | `/api-doc` |
    /// | `SWAGGER_APP_NAME`, `SWAGGER_API_URL`, `SWAGGER_SPEC_FILE`, `SWAGGER_PASSWORD` | unset |
    /// | `APIGW_ENABLED` | `false` |
    /// | `APIGW_PROFILE` | unset |
    /// | `APIGW_REGION` | `eu-central-1` |
    /// | `APIGW_EXPORT_TYPE` | `oas30` |
    /// | `APIGW_EXPORT_PARAMETERS` | empty (`key=value,key=value`) |
    /// | `APIGW_REST_API_ID` / `APIGW_STAGE_NAME` | unset |
    /// | `APIGW_API_ID_HEADER` | unset (header detection off) |
    /// | `APIGW_STAGE_HEADER` | `x-gateway-stage` |
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server = ServerConfig {
            host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|e| Error::config(format!("Invalid SERVER_PORT: {}", e)))?,
        };

        let viewer = ViewerConfig {
            base_url: normalize_base_url(
                &var("SWAGGER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ),
            app_name: var("SWAGGER_APP_NAME"),
            api_url: var("SWAGGER_API_URL"),
            spec_file: var("SWAGGER_SPEC_FILE").map(PathBuf::from),
            password: var("SWAGGER_PASSWORD"),
        };

        let gateway_enabled = var("APIGW_ENABLED")
            .map(|v| parse_bool("APIGW_ENABLED", &v))
            .transpose()?
            .unwrap_or(false);

        let gateway = if gateway_enabled {
            let gateway = GatewayConfig {
                profile_name: var("APIGW_PROFILE"),
                region: var("APIGW_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                export_type: var("APIGW_EXPORT_TYPE")
                    .unwrap_or_else(|| DEFAULT_EXPORT_TYPE.to_string()),
                parameters: var("APIGW_EXPORT_PARAMETERS")
                    .map(|v| parse_parameters(&v))
                    .transpose()?
                    .unwrap_or_default(),
                rest_api_id: var("APIGW_REST_API_ID"),
                stage_name: var("APIGW_STAGE_NAME"),
                api_id_header: var("APIGW_API_ID_HEADER"),
                stage_header: var("APIGW_STAGE_HEADER")
                    .unwrap_or_else(|| DEFAULT_STAGE_HEADER.to_string()),
            };

            tracing::info!(
                "API Gateway export enabled: region={}, export_type={}, fixed_deployment={}, header_detection={}",
                gateway.region,
                gateway.export_type,
                gateway.has_fixed_deployment(),
                gateway.deployment_headers().is_some()
            );

            Some(gateway)
        } else {
            None
        };

        Ok(Self {
            server,
            viewer,
            gateway,
        })
    }
}

/// Trim trailing separators; an all-separator prefix becomes empty (root mount)
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::config(format!("Invalid {}: {}", name, other))),
    }
}

/// Parse `key=value,key=value` into a parameter map
fn parse_parameters(raw: &str) -> Result<HashMap<String, String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(Error::config(format!(
                "Invalid APIGW_EXPORT_PARAMETERS entry '{}': expected key=value",
                pair
            ))),
        })
        .collect()
}

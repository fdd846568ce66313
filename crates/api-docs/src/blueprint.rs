//! Mountable documentation viewer
//!
//! [`ViewerBlueprint`] collects the viewer settings, validates them once, and
//! produces an actix-web [`Scope`] mounted at the configured prefix:
//!
//! | route | handler |
//! |---|---|
//! | `GET {base_url}`, `GET {base_url}/`, `GET {base_url}/index.html` | index page |
//! | `GET {base_url}/{file}` | vendored Swagger UI asset |
//!
//! # Usage
//!
//! ```ignore
//! use actix_web::App;
//! use api_docs::blueprint::ViewerBlueprint;
//!
//! let viewer = ViewerBlueprint::new("/api-doc")
//!     .api_url("https://petstore.swagger.io/v2/swagger.json")
//!     .app_name("Petstore")
//!     .build()?;
//!
//! let app = App::new().service(viewer.scope());
//! ```

use actix_web::{web, Scope};
use serde_json::{json, Map, Value};
use shared::{DefinitionResolver, Error, GatewayConfig, GatewayExportRequest, Result};
use std::sync::Arc;

use crate::handlers;
use crate::locator::{DeploymentLocator, FixedDeployment, HeaderDeployment};
use crate::models::Icon;

/// Page title used when none is configured
pub const DEFAULT_APP_NAME: &str = "Swagger UI";

/// Where live API definitions come from
#[derive(Clone)]
pub struct GatewaySource {
    /// Profile, region, export type and parameters; identifiers are filled per request
    pub template: GatewayExportRequest,
    pub resolver: DefinitionResolver,
    pub locator: Arc<dyn DeploymentLocator>,
}

impl GatewaySource {
    pub fn new(
        template: GatewayExportRequest,
        resolver: DefinitionResolver,
        locator: impl DeploymentLocator + 'static,
    ) -> Self {
        Self {
            template,
            resolver,
            locator: Arc::new(locator),
        }
    }

    /// Pick the deployment lookup from configuration
    ///
    /// Fixed identifiers win. Header detection is used only when a header
    /// name is configured explicitly.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when neither fixed identifiers nor a header name is set
    pub fn from_config(gateway: &GatewayConfig, resolver: DefinitionResolver) -> Result<Self> {
        let template = gateway.export_template();

        if let (Some(rest_api_id), Some(stage_name)) = (&gateway.rest_api_id, &gateway.stage_name)
        {
            return Ok(Self::new(
                template,
                resolver,
                FixedDeployment::new(rest_api_id.clone(), stage_name.clone()),
            ));
        }

        match gateway.deployment_headers() {
            Some((api_id_header, stage_header)) => {
                tracing::warn!(
                    api_id_header,
                    stage_header,
                    "Reading deployment from request headers; the proxy must overwrite or strip them"
                );
                Ok(Self::new(
                    template,
                    resolver,
                    HeaderDeployment::new(api_id_header, stage_header),
                ))
            }
            None => Err(Error::config(
                "API Gateway export needs APIGW_REST_API_ID and APIGW_STAGE_NAME, or APIGW_API_ID_HEADER for header detection",
            )),
        }
    }
}

impl std::fmt::Debug for GatewaySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySource")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// Builder for a documentation viewer
#[derive(Debug, Clone)]
pub struct ViewerBlueprint {
    base_url: String,
    api_url: Option<String>,
    config: Map<String, Value>,
    gateway: Option<GatewaySource>,
    oauth_config: Option<Value>,
    icons: Option<Vec<Icon>>,
    password: Option<String>,
}

impl ViewerBlueprint {
    /// Start a viewer mounted at `base_url`
    ///
    /// A trailing `/` is dropped; `""` mounts the viewer at the root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_url: None,
            config: Map::new(),
            gateway: None,
            oauth_config: None,
            icons: None,
            password: None,
        }
    }

    /// Remote API definition the browser loads itself
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Merge Swagger UI configuration overrides
    pub fn config(mut self, overrides: Map<String, Value>) -> Self {
        self.config.extend(overrides);
        self
    }

    /// Set a single Swagger UI configuration key
    pub fn config_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Embed a static API definition
    pub fn spec(self, spec: Value) -> Self {
        self.config_value("spec", spec)
    }

    pub fn app_name(self, app_name: impl Into<String>) -> Self {
        self.config_value("app_name", Value::String(app_name.into()))
    }

    /// Resolve the API definition from API Gateway on every index request
    pub fn gateway(mut self, gateway: GatewaySource) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// OAuth settings passed to `ui.initOAuth`
    pub fn oauth_config(mut self, oauth_config: Value) -> Self {
        self.oauth_config = Some(oauth_config);
        self
    }

    /// Replace the default favicons
    pub fn icons(mut self, icons: Vec<Icon>) -> Self {
        self.icons = Some(icons);
        self
    }

    /// Require `?pass=<password>` on the index page
    pub fn password(mut self, password: Option<String>) -> Self {
        self.password = password.filter(|p| !p.is_empty());
        self
    }

    /// Validate the settings and assemble the viewer
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if neither an API URL, a static spec, nor a
    ///   gateway source is configured
    /// - [`Error::Validation`] if `app_name` is not a string
    pub fn build(self) -> Result<Viewer> {
        if self.api_url.is_none() && !has_spec(&self.config) && self.gateway.is_none() {
            return Err(Error::validation(
                "All API definition sources are empty; configure an API URL, a spec, or a gateway",
            ));
        }

        let mut config = default_config();
        if let Some(api_url) = &self.api_url {
            config.insert("url".to_string(), Value::String(api_url.clone()));
        }
        config.extend(self.config);

        let app_name = match config.remove("app_name") {
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(Error::validation(format!(
                    "app_name must be a string, got {}",
                    other
                )))
            }
            None => DEFAULT_APP_NAME.to_string(),
        };

        tracing::debug!(
            base_url = %self.base_url,
            app_name = %app_name,
            static_spec = has_spec(&config),
            gateway = self.gateway.is_some(),
            "Built documentation viewer"
        );

        Ok(Viewer {
            state: Arc::new(ViewerState {
                base_url: self.base_url,
                app_name,
                config,
                icons: self.icons.unwrap_or_else(Icon::defaults),
                oauth_config: self.oauth_config,
                password: self.password,
                gateway: self.gateway,
            }),
        })
    }
}

/// Settings shared by every request to one viewer
#[derive(Debug)]
pub struct ViewerState {
    pub base_url: String,
    pub app_name: String,
    /// Swagger UI configuration, serialized into the page
    pub config: Map<String, Value>,
    pub icons: Vec<Icon>,
    pub oauth_config: Option<Value>,
    pub password: Option<String>,
    pub gateway: Option<GatewaySource>,
}

impl ViewerState {
    /// Whether a static API definition is configured
    pub fn has_static_spec(&self) -> bool {
        has_spec(&self.config)
    }
}

/// A validated viewer, ready to be mounted
#[derive(Debug, Clone)]
pub struct Viewer {
    state: Arc<ViewerState>,
}

impl Viewer {
    pub fn base_url(&self) -> &str {
        &self.state.base_url
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Routes of this viewer, mounted at its base URL
    pub fn scope(&self) -> Scope {
        web::scope(&self.state.base_url)
            .app_data(web::Data::from(self.state.clone()))
            .route("", web::get().to(handlers::index))
            .route("/", web::get().to(handlers::index))
            .route("/index.html", web::get().to(handlers::index))
            .route("/{file:.*}", web::get().to(handlers::static_asset))
    }
}

fn default_config() -> Map<String, Value> {
    let defaults = json!({
        "app_name": DEFAULT_APP_NAME,
        "dom_id": "#swagger-ui",
        "layout": "StandaloneLayout",
        "deepLinking": true,
    });

    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// A spec counts as configured unless missing, `null`, or `{}`
fn has_spec(config: &Map<String, Value>) -> bool {
    match config.get("spec") {
        None | Some(Value::Null) => false,
        Some(Value::Object(spec)) => !spec.is_empty(),
        Some(_) => true,
    }
}

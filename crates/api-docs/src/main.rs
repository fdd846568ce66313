//! API documentation server
//!
//! Serves the Swagger UI viewer configured from the environment.

use actix_web::{App, HttpServer};
use anyhow::Context;
use api_docs::{
    blueprint::{GatewaySource, Viewer, ViewerBlueprint},
    middleware::SecurityHeaders,
    routes,
};
use shared::{apigateway::aws::AwsClientFactory, Config, DefinitionResolver};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    shared::init_tracing();

    tracing::info!("Starting API documentation server...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    let viewer = build_viewer(&config)
        .await
        .context("Failed to configure documentation viewer")?;

    let server_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Documentation viewer listening on {} at '{}/'",
        server_addr,
        viewer.base_url()
    );

    // Start HTTP server
    HttpServer::new(move || {
        let viewer = viewer.clone();
        App::new()
            .wrap(SecurityHeaders::default())
            .wrap(TracingLogger::default())
            .configure(move |cfg| routes::configure(cfg, &viewer))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind to {}", server_addr))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}

async fn build_viewer(config: &Config) -> anyhow::Result<Viewer> {
    let mut blueprint =
        ViewerBlueprint::new(config.viewer.base_url.clone()).password(config.viewer.password.clone());

    if let Some(app_name) = &config.viewer.app_name {
        blueprint = blueprint.app_name(app_name.clone());
    }

    if let Some(api_url) = &config.viewer.api_url {
        blueprint = blueprint.api_url(api_url.clone());
    }

    if let Some(path) = &config.viewer.spec_file {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let spec: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid JSON API definition", path.display()))?;
        tracing::info!("Serving static API definition from {}", path.display());
        blueprint = blueprint.spec(spec);
    }

    if let Some(gateway) = &config.gateway {
        let resolver = DefinitionResolver::new(AwsClientFactory);
        blueprint = blueprint.gateway(GatewaySource::from_config(gateway, resolver)?);
    }

    Ok(blueprint.build()?)
}

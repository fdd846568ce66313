//! Documentation viewer endpoints

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Map, Value};
use shared::ResolverError;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::blueprint::ViewerState;
use crate::models::{ErrorResponse, PasswordError};
use crate::template::{render_index, IndexFields};

/// Index page
///
/// Builds the per-request viewer configuration (OAuth redirect URL, live
/// API definition), checks the viewer password, and renders the page.
pub async fn index(req: HttpRequest, state: web::Data<ViewerState>) -> HttpResponse {
    let pass = first_query_value(req.query_string(), "pass");
    if let Err(resp) = check_password(&state, pass.as_deref()) {
        return resp;
    }

    // Per-request copy; nothing resolved here outlives the response
    let mut config = state.config.clone();

    if !config.contains_key("oauth2RedirectUrl") {
        config.insert(
            "oauth2RedirectUrl".to_string(),
            Value::String(oauth2_redirect_url(&req, &state.base_url)),
        );
    }

    if !state.has_static_spec() {
        if let Some(gateway) = &state.gateway {
            let target = gateway.locator.locate(&req);
            let mut request = gateway.template.clone();
            request.rest_api_id = target.rest_api_id;
            request.stage_name = target.stage_name;

            let details = json!({
                "rest_api_id": request.rest_api_id,
                "stage_name": request.stage_name,
            });

            match gateway.resolver.resolve(request).await {
                Ok(spec) => {
                    config.insert("spec".to_string(), spec);
                }
                Err(e) => return resolution_failure(e, details),
            }
        }
    }

    render(&state, &config)
}

/// Vendored Swagger UI files (bundle, styles, favicons, OAuth redirect page)
pub async fn static_asset(path: web::Path<String>) -> HttpResponse {
    let file = path.into_inner();
    let swagger_config = Arc::new(utoipa_swagger_ui::Config::new(["openapi.json"]));

    match utoipa_swagger_ui::serve(&file, swagger_config) {
        Ok(Some(asset)) => HttpResponse::Ok()
            .content_type(asset.content_type)
            .body(asset.bytes.into_owned()),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("No viewer asset named '{}'", file),
        )),
        Err(e) => {
            tracing::error!(file = %file, error = %e, "Failed to serve viewer asset");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("internal_error", "Failed to serve viewer asset"))
        }
    }
}

/// Compare the `pass` query parameter with the configured password
///
/// Returns `Err(401)` on mismatch; always `Ok` when no password is set.
fn check_password(state: &ViewerState, supplied: Option<&str>) -> Result<(), HttpResponse> {
    let Some(expected) = state.password.as_deref() else {
        return Ok(());
    };

    let supplied = supplied.unwrap_or_default();
    if bool::from(expected.as_bytes().ct_eq(supplied.as_bytes())) {
        Ok(())
    } else {
        tracing::debug!(base_url = %state.base_url, "Rejected viewer request with wrong password");
        Err(HttpResponse::Unauthorized().json(PasswordError::incorrect()))
    }
}

/// First value of `name` in a query string; repeated keys are ignored after the first
///
/// A query string that cannot be decoded yields `None`.
fn first_query_value(query: &str, name: &str) -> Option<String> {
    web::Query::<Vec<(String, String)>>::from_query(query)
        .ok()?
        .into_inner()
        .into_iter()
        .find_map(|(key, value)| (key == name).then_some(value))
}

fn oauth2_redirect_url(req: &HttpRequest, base_url: &str) -> String {
    let info = req.connection_info();
    format!(
        "{}://{}{}/oauth2-redirect.html",
        info.scheme(),
        info.host(),
        base_url
    )
}

fn resolution_failure(err: ResolverError, details: Value) -> HttpResponse {
    match err {
        ResolverError::Configuration(msg) => {
            tracing::warn!(error = %msg, details = %details, "API definition request is incomplete");
            HttpResponse::BadRequest().json(ErrorResponse::with_details(
                "configuration_error",
                msg,
                details,
            ))
        }
        // Provider errors can carry account details; they stay in the log
        ResolverError::Resolution(msg) => {
            tracing::error!(error = %msg, details = %details, "Failed to resolve API definition");
            HttpResponse::BadGateway().json(ErrorResponse::with_details(
                "resolution_error",
                "Failed to resolve the API definition from API Gateway",
                details,
            ))
        }
    }
}

fn render(state: &ViewerState, config: &Map<String, Value>) -> HttpResponse {
    let fields = IndexFields {
        base_url: &state.base_url,
        app_name: &state.app_name,
        icons: &state.icons,
        config,
        oauth_config: state.oauth_config.as_ref(),
    };

    match render_index(&fields) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render viewer index");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("internal_error", "Failed to render viewer"))
        }
    }
}

//! Integration tests for the documentation viewer
//!
//! # Test Coverage
//!
//! - Index page with a remote API URL and with a static definition
//! - Password gate (401 / 200)
//! - Live gateway export: normalization, header detection, error mapping
//! - Vendored static assets
//! - Health endpoint
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p api-docs --test viewer_test
//! ```

mod common;

use actix_web::{http::StatusCode, test, App};
use api_docs::{
    routes, FixedDeployment, GatewaySource, HeaderDeployment, Viewer, ViewerBlueprint,
};
use common::{StubFactory, WIDGETS_EXPORT};
use shared::{DefinitionResolver, GatewayExportRequest};

const SWAGGER_URL: &str = "/api/docs";
const API_URL: &str = "http://petstore.swagger.io/v2/swagger.json";

fn petstore_spec() -> serde_json::Value {
    serde_json::from_str(include_str!("data/swagger.json")).unwrap()
}

fn gateway_viewer(factory: &StubFactory, source_headers: bool) -> Viewer {
    let template = GatewayExportRequest::default().with_parameter("extensions", "integrations");
    let resolver = DefinitionResolver::new(factory.clone());

    let source = if source_headers {
        GatewaySource::new(
            template,
            resolver,
            HeaderDeployment::new("x-gateway-api-id", "x-gateway-stage"),
        )
    } else {
        GatewaySource::new(template, resolver, FixedDeployment::new("abc123", "prod"))
    };

    ViewerBlueprint::new(SWAGGER_URL)
        .app_name("Gateway application")
        .gateway(source)
        .build()
        .unwrap()
}

async fn get_body(viewer: &Viewer, req: test::TestRequest) -> (StatusCode, String) {
    let app = test::init_service(App::new().configure(|cfg| routes::configure(cfg, viewer))).await;
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn test_with_api_url() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .api_url(API_URL)
        .app_name("Test application")
        .build()
        .unwrap();

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Test application"));
    assert!(body.contains(API_URL));
    assert!(body.contains("/api/docs/oauth2-redirect.html"));
}

#[actix_web::test]
async fn test_with_json() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .app_name("JSON Test application")
        .spec(petstore_spec())
        .build()
        .unwrap();

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/index.html")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("JSON Test application"));
    assert!(body.contains("Swagger Petstore"));
}

#[actix_web::test]
async fn test_configured_redirect_url_is_kept() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .api_url(API_URL)
        .config_value(
            "oauth2RedirectUrl",
            serde_json::json!("https://auth.example.com/callback"),
        )
        .build()
        .unwrap();

    let (_, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;

    assert!(body.contains("https://auth.example.com/callback"));
    assert!(!body.contains("oauth2-redirect.html"));
}

#[actix_web::test]
async fn test_password_gate() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .api_url(API_URL)
        .password(Some("s3cret".to_string()))
        .build()
        .unwrap();

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"error": "password incorrect"}));

    let (status, _) =
        get_body(&viewer, test::TestRequest::get().uri("/api/docs/?pass=wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) =
        get_body(&viewer, test::TestRequest::get().uri("/api/docs/?pass=s3cret")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(API_URL));

    let (status, _) = get_body(
        &viewer,
        test::TestRequest::get().uri("/api/docs/?pass=s3cret&pass=wrong"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_repeated_query_parameters_are_tolerated() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .api_url(API_URL)
        .build()
        .unwrap();

    let (status, body) =
        get_body(&viewer, test::TestRequest::get().uri("/api/docs/?pass=a&pass=b")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(API_URL));
}

#[actix_web::test]
async fn test_gateway_definition_is_normalized() {
    let factory = StubFactory::returning(WIDGETS_EXPORT);
    let viewer = gateway_viewer(&factory, false);

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gateway application"));
    assert!(body.contains("Widgets API"));
    assert!(body.contains(r#""default":"v1""#));
    assert!(body.contains(r#""/widgets""#));
    assert!(!body.contains(r#""/api-doc":"#));
    assert!(!body.contains("{proxy+}"));
    assert_eq!(factory.calls(), 1);

    let seen = factory.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].rest_api_id, "abc123");
    assert_eq!(seen[0].stage_name, "prod");
    assert_eq!(seen[0].parameters.get("extensions").unwrap(), "integrations");
}

#[actix_web::test]
async fn test_gateway_definition_is_resolved_per_request() {
    let factory = StubFactory::returning(WIDGETS_EXPORT);
    let viewer = gateway_viewer(&factory, false);
    let app = test::init_service(App::new().service(viewer.scope())).await;

    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/api/docs/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(factory.calls(), 2);
}

#[actix_web::test]
async fn test_gateway_ids_from_headers() {
    let factory = StubFactory::returning(WIDGETS_EXPORT);
    let viewer = gateway_viewer(&factory, true);

    let req = test::TestRequest::get()
        .uri("/api/docs/")
        .insert_header(("x-gateway-api-id", "xyz789"))
        .insert_header(("x-gateway-stage", "dev"));
    let (status, _) = get_body(&viewer, req).await;

    assert_eq!(status, StatusCode::OK);
    let seen = factory.seen();
    assert_eq!(seen[0].rest_api_id, "xyz789");
    assert_eq!(seen[0].stage_name, "dev");
}

#[actix_web::test]
async fn test_missing_deployment_headers_fail_before_export() {
    let factory = StubFactory::returning(WIDGETS_EXPORT);
    let viewer = gateway_viewer(&factory, true);

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("configuration_error"));
    assert_eq!(factory.calls(), 0);
}

#[actix_web::test]
async fn test_gateway_failure_is_bad_gateway() {
    let factory = StubFactory::failing("connection timed out");
    let viewer = gateway_viewer(&factory, false);

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("resolution_error"));
    assert!(body.contains("abc123"));
    assert!(!body.contains("connection timed out"));
}

#[actix_web::test]
async fn test_static_spec_wins_over_gateway() {
    let factory = StubFactory::returning(WIDGETS_EXPORT);
    let source = GatewaySource::new(
        GatewayExportRequest::default(),
        DefinitionResolver::new(factory.clone()),
        FixedDeployment::new("abc123", "prod"),
    );
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .spec(petstore_spec())
        .gateway(source)
        .build()
        .unwrap();

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/api/docs/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Swagger Petstore"));
    assert_eq!(factory.calls(), 0);
}

#[actix_web::test]
async fn test_static_assets() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .api_url(API_URL)
        .build()
        .unwrap();
    let app = test::init_service(App::new().service(viewer.scope())).await;

    let req = test::TestRequest::get()
        .uri("/api/docs/swagger-ui.css")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "text/css");

    let req = test::TestRequest::get()
        .uri("/api/docs/swagger-ui-bundle.js")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/docs/does-not-exist.js")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health() {
    let viewer = ViewerBlueprint::new(SWAGGER_URL)
        .api_url(API_URL)
        .build()
        .unwrap();

    let (status, body) = get_body(&viewer, test::TestRequest::get().uri("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
}

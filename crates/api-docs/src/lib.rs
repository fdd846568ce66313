//! API Documentation Viewer Library
//!
//! Mountable Swagger UI viewer for actix-web, able to show a static API
//! definition, a remote one, or one exported live from AWS API Gateway.
//! Exposed as a library for integration tests and for embedding the viewer
//! in other actix-web applications.

pub mod blueprint;
pub mod handlers;
pub mod locator;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod template;

pub use blueprint::{GatewaySource, Viewer, ViewerBlueprint};
pub use locator::{DeploymentLocator, DeploymentTarget, FixedDeployment, HeaderDeployment};

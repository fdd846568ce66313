//! Route configuration for the documentation service

use actix_web::web;

use crate::blueprint::Viewer;
use crate::handlers;

/// Configure the service routes: health check plus the mounted viewer
pub fn configure(cfg: &mut web::ServiceConfig, viewer: &Viewer) {
    cfg.route("/health", web::get().to(handlers::health_check));
    cfg.service(viewer.scope());
}

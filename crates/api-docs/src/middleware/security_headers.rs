//! Security Headers Middleware
//!
//! Adds response headers suited to serving the Swagger UI viewer:
//!
//! - **X-Content-Type-Options**: Prevents MIME type sniffing
//! - **X-Frame-Options**: Prevents clickjacking
//! - **Referrer-Policy**: Keeps the `pass` query parameter out of referrers
//! - **Content-Security-Policy**: Allows the inline bootstrap script the index page needs
//! - **Cache-Control**: `no-store` on HTML, since the index page embeds
//!   per-request API definitions
//!
//! # Usage
//!
//! ```ignore
//! use actix_web::App;
//! use api_docs::middleware::SecurityHeaders;
//!
//! let app = App::new()
//!     .wrap(SecurityHeaders::default())
//!     // ... viewer scope
//! ```
//!
//! # Environment Configuration
//!
//! - `VIEWER_FRAME_OPTIONS`: X-Frame-Options value (default: DENY)
//! - `VIEWER_CSP`: Content-Security-Policy override; `off` disables the header

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    env,
    future::{ready, Ready},
    rc::Rc,
};
use tracing::debug;

/// Policy allowing the viewer's inline script and styles plus fetching remote definitions
pub const VIEWER_CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; \
     img-src 'self' data: https:; \
     connect-src *";

/// Security headers configuration
#[derive(Debug, Clone)]
pub struct SecurityHeadersConfig {
    /// X-Frame-Options value (DENY or SAMEORIGIN)
    pub frame_options: String,
    /// Content-Security-Policy value
    pub content_security_policy: Option<String>,
    /// Referrer-Policy value
    pub referrer_policy: String,
    /// Mark HTML responses as not cacheable
    pub no_store_html: bool,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        let frame_options = env::var("VIEWER_FRAME_OPTIONS").unwrap_or_else(|_| "DENY".to_string());

        let content_security_policy = match env::var("VIEWER_CSP") {
            Ok(v) if v.eq_ignore_ascii_case("off") => None,
            Ok(v) if !v.trim().is_empty() => Some(v),
            _ => Some(VIEWER_CONTENT_SECURITY_POLICY.to_string()),
        };

        Self {
            frame_options,
            content_security_policy,
            referrer_policy: "no-referrer".to_string(),
            no_store_html: true,
        }
    }
}

/// Security headers middleware
pub struct SecurityHeaders {
    config: Rc<SecurityHeadersConfig>,
}

impl SecurityHeaders {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::new(SecurityHeadersConfig::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct SecurityHeadersMiddleware<S> {
    service: Rc<S>,
    config: Rc<SecurityHeadersConfig>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let mut res = service.call(req).await?;

            let is_html = res
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("text/html"));

            let headers = res.headers_mut();

            headers.insert(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            );

            if let Ok(value) = HeaderValue::try_from(config.frame_options.as_str()) {
                headers.insert(HeaderName::from_static("x-frame-options"), value);
            }

            if let Ok(value) = HeaderValue::try_from(config.referrer_policy.as_str()) {
                headers.insert(HeaderName::from_static("referrer-policy"), value);
            }

            if is_html {
                if let Some(csp) = &config.content_security_policy {
                    if let Ok(value) = HeaderValue::try_from(csp.as_str()) {
                        headers.insert(header::CONTENT_SECURITY_POLICY, value);
                    }
                }

                if config.no_store_html {
                    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
                    debug!("Marked viewer page as no-store");
                }
            }

            Ok(res)
        })
    }
}

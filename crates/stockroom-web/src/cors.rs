//! Cross-origin policy for the REST API.
//!
//! The event stream is exempt and always answers with a wildcard origin.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, request::Parts, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::debug;

use crate::config::{Environment, ServerConfig};

/// Preflight cache lifetime.
const MAX_AGE: Duration = Duration::from_secs(86_400);

/// Decides which browser origins may call the API.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    environment: Environment,
    exact: Vec<String>,
    suffixes: Vec<String>,
}

impl OriginPolicy {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            environment: config.environment,
            exact: config
                .allowed_origins
                .iter()
                .map(|o| o.trim_end_matches('/').to_string())
                .collect(),
            suffixes: config.origin_suffixes.clone(),
        }
    }

    /// Any origin is accepted outside production.
    pub fn allows(&self, origin: &str) -> bool {
        if self.environment != Environment::Production {
            return true;
        }
        let origin = origin.trim_end_matches('/');
        let allowed = self.exact.iter().any(|o| o == origin)
            || self.suffixes.iter().any(|s| origin.ends_with(s.as_str()));
        if !allowed {
            debug!(origin = %origin, "CORS blocked origin");
        }
        allowed
    }
}

/// Build the API's CORS layer.
pub fn api_cors(config: &ServerConfig) -> CorsLayer {
    let policy = Arc::new(OriginPolicy::from_config(config));

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
            origin.to_str().map(|o| policy.allows(o)).unwrap_or(false)
        }))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            header::CACHE_CONTROL,
            header::ORIGIN,
            header::X_CONTENT_TYPE_OPTIONS,
        ])
        .expose_headers([
            header::CONTENT_RANGE,
            HeaderName::from_static("x-content-range"),
        ])
        .max_age(MAX_AGE)
}

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, warn};

use crate::config::Configuration;

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

pub fn cors_layer(config: &Configuration) -> CorsLayer {
    // Credentials cannot be combined with a wildcard origin, so "allow all"
    // echoes the request origin back instead.
    let origin = if config.allow_all_origins {
        debug!("CORS allows every origin");
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        debug!("CORS allowed origins: {:?}", origins);
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers([header::ORIGIN, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

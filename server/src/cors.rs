//! Cross-origin policy: a fixed list of allowed origins, any method and
//! header from those origins, credentials allowed.

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// The local development front-end origins.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Build the CORS layer for `origins`.
///
/// Methods and headers are mirrored from the preflight request rather than
/// answered with `*`, which browsers refuse alongside credentials.
pub fn allow_list<I, S>(origins: I) -> Result<CorsLayer, InvalidHeaderValue>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let origins = origins
        .into_iter()
        .map(|origin| HeaderValue::from_str(origin.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer(origins))
}

pub fn default_layer() -> CorsLayer {
    layer(DEFAULT_ALLOWED_ORIGINS.map(HeaderValue::from_static).to_vec())
}

fn layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

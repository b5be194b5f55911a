use std::time::Duration;

use anyhow::{Result, bail};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::infrastructure::settings::Settings;

/// Браузер кэширует ответ на preflight.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

/// Разобранный `CORS_ORIGINS`.
#[derive(Debug, PartialEq, Eq)]
enum OriginPolicy {
    Any,
    List(Vec<HeaderValue>),
}

/// `*` допустим только один. Origin браузера это `scheme://host[:port]`
/// без пути, поэтому `http://localhost:8000/` отвергается сразу, а не
/// молча никогда не совпадает.
fn origin_policy(origins: &[String]) -> Result<OriginPolicy> {
    if origins.iter().any(|origin| origin == "*") {
        if origins.len() > 1 {
            bail!("CORS_ORIGINS: '*' cannot be combined with explicit origins");
        }
        return Ok(OriginPolicy::Any);
    }

    let mut values = Vec::with_capacity(origins.len());
    for origin in origins {
        let Some((scheme, authority)) = origin.split_once("://") else {
            bail!("CORS_ORIGINS: '{origin}' must start with http:// or https://");
        };
        if !matches!(scheme, "http" | "https") || authority.is_empty() {
            bail!("CORS_ORIGINS: '{origin}' must start with http:// or https://");
        }
        if authority.contains('/') {
            bail!("CORS_ORIGINS: '{origin}' must not contain a path or trailing slash");
        }
        values.push(HeaderValue::from_str(origin)?);
    }
    Ok(OriginPolicy::List(values))
}

pub(crate) fn build_cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let allow_origin = match origin_policy(&settings.cors_origins)? {
        OriginPolicy::Any => AllowOrigin::any(),
        OriginPolicy::List(values) => AllowOrigin::list(values),
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE))
}

pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    let cors = build_cors_layer(settings)?;
    Ok(router.layer(cors))
}

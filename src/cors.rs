use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Origins allowed to call the API: the configured salon base URL, any salon
/// subdomain under it, and local development hosts.
#[derive(Debug, Clone)]
pub struct SalonOrigins {
    base_url: String,
    base_host: Option<String>,
}

/// Host part of an origin or URL, without scheme, path or port.
fn host_of(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split('/').next().unwrap_or(rest);
    let host = authority.split(':').next().unwrap_or(authority);
    (!host.is_empty()).then_some(host)
}

impl SalonOrigins {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base_host = host_of(&base_url).map(str::to_ascii_lowercase);
        Self { base_url, base_host }
    }

    pub fn allows(&self, origin: &str) -> bool {
        if origin == self.base_url {
            return true;
        }
        let Some(host) = host_of(origin) else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        if host == "localhost" || host == "127.0.0.1" {
            return origin.starts_with("http://");
        }
        match &self.base_host {
            Some(base) => host
                .strip_suffix(base.as_str())
                .is_some_and(|sub| sub.len() > 1 && sub.ends_with('.')),
            None => false,
        }
    }
}

/// CORS for the server binary. Tests drive the router without it.
pub fn cors_layer(base_url: &str) -> CorsLayer {
    let origins = SalonOrigins::new(base_url);
    let allow = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        origin.to_str().is_ok_and(|o| origins.allows(o))
    });

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(allow)
}

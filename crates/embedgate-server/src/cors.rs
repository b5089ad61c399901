//! Cross-origin response headers.
//!
//! Header generation is independent of authorization: a rejected request
//! still gets correct CORS headers so the browser surfaces the real
//! error to the page. The allowlist is never consulted here.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Methods advertised to preflights.
pub const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Request headers advertised to preflights.
pub const ALLOWED_HEADERS: &str = "Authorization, Content-Type";

/// Apply cross-origin headers for the given request origin.
///
/// When an origin is present it is echoed as the sole allowed origin,
/// never a wildcard, and the response is marked origin-sensitive for
/// caches. Credentialed cross-origin reads are explicitly denied.
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<&str>) {
    if let Some(origin) = origin
        && let Ok(value) = HeaderValue::from_str(origin)
    {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("false"),
    );
}

/// Terminate a preflight exchange with a no-content success.
pub fn preflight_response(origin: Option<&str>) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors_headers(response.headers_mut(), origin);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_echoed_exactly() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, Some("https://a.example"));

        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://a.example"
        );
        assert_eq!(headers.get(header::VARY).unwrap(), "Origin");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "false"
        );
    }

    #[test]
    fn test_never_wildcard() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, Some("https://a.example"));
        assert_ne!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }

    #[test]
    fn test_no_origin_sets_no_allow_origin() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, None);
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        // Method/header advertisement is unconditional.
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            ALLOWED_METHODS
        );
    }

    #[test]
    fn test_idempotent() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, Some("https://a.example"));
        apply_cors_headers(&mut headers, Some("https://a.example"));
        assert_eq!(
            headers
                .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
    }

    #[test]
    fn test_preflight_is_no_content() {
        let response = preflight_response(Some("https://a.example"));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://a.example"
        );
    }
}

//! Security headers middleware.
//!
//! A fixed header-stamping filter applied to every response. HSTS is only
//! emitted when the request arrived over TLS (directly or via a
//! `x-forwarded-proto: https` proxy hop), since the header is meaningless on
//! plain HTTP.

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains; preload";

const CSP_POLICY: &str = "default-src 'self'; \
    script-src 'self'; \
    style-src 'self'; \
    img-src 'self' data:; \
    font-src 'self'; \
    connect-src 'self'; \
    frame-ancestors 'none'; \
    form-action 'self'; \
    base-uri 'self'; \
    object-src 'none'";

const PERMISSIONS_POLICY: &str =
    "geolocation=(), microphone=(), camera=(), payment=(), usb=()";

pub async fn apply_security_headers(request: Request, next: Next) -> Response {
    let https = is_https(&request);
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    let stamp = |headers: &mut axum::http::HeaderMap, name: &'static str, value: &'static str| {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    };

    stamp(headers, "x-content-type-options", "nosniff");
    stamp(headers, "x-frame-options", "DENY");
    stamp(headers, "x-xss-protection", "1; mode=block");
    stamp(headers, "referrer-policy", "strict-origin-when-cross-origin");
    stamp(headers, "content-security-policy", CSP_POLICY);
    stamp(headers, "permissions-policy", PERMISSIONS_POLICY);
    stamp(headers, "cross-origin-opener-policy", "same-origin");
    stamp(headers, "cross-origin-embedder-policy", "require-corp");
    stamp(headers, "cross-origin-resource-policy", "same-origin");

    if https {
        stamp(headers, "strict-transport-security", HSTS_VALUE);
    }

    response
}

fn is_https(request: &Request) -> bool {
    if request.uri().scheme_str() == Some("https") {
        return true;
    }
    request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(apply_security_headers))
    }

    #[tokio::test]
    async fn test_security_headers_are_stamped() {
        let response =
            app().oneshot(HttpRequest::get("/").body(Body::empty()).unwrap()).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
        assert!(headers.contains_key("content-security-policy"));
        assert!(headers.contains_key("permissions-policy"));
        assert_eq!(headers.get("cross-origin-opener-policy").unwrap(), "same-origin");
    }

    #[tokio::test]
    async fn test_hsts_absent_on_plain_http() {
        let response =
            app().oneshot(HttpRequest::get("/").body(Body::empty()).unwrap()).await.unwrap();
        assert!(!response.headers().contains_key("strict-transport-security"));
    }

    #[tokio::test]
    async fn test_hsts_present_behind_tls_proxy() {
        let request = HttpRequest::get("/")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get("strict-transport-security").unwrap(),
            HSTS_VALUE
        );
    }
}

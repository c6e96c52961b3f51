//! Security headers middleware.
//!
//! The cart page is plain server-rendered HTML with no scripts, so the policy
//! can stay fully locked down.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Content Security Policy for storefront pages.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; \
     style-src 'self'; \
     img-src 'self' https://cdn.shopify.com; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'";

/// Headers added to every response.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
    // Cart contents and notices are per-customer
    ("cache-control", "no-store, max-age=0"),
    ("cross-origin-opener-policy", "same-origin"),
    ("x-dns-prefetch-control", "off"),
];

/// Add security headers to all responses.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_are_lowercase() {
        // HeaderName::from_static panics on uppercase names
        for (name, _) in SECURITY_HEADERS {
            assert_eq!(*name, name.to_ascii_lowercase());
        }
    }
}

//! Request ID middleware.
//!
//! Every API call, GraphQL request and static page gets one ID. It fills the
//! `request_id` field that `routes::app` declares on its `http_request` span,
//! so the access log line and any `AppError` logged while handling the
//! request (a failed catalog write, a store falling back to its snapshot)
//! carry the same value. The ID is also a Sentry tag on errors captured for
//! 5xx responses and comes back in the `x-request-id` response header, which
//! lets a client reporting a failed order point at the matching log lines.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The ID forwarded by a proxy in front of the server, or a fresh UUID v4.
///
/// Blank or non-ASCII header values are replaced.
fn resolve(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Tag the request with its ID and echo the ID on the response.
///
/// Runs inside `TraceLayer`, so `Span::current()` is the `http_request`
/// span. Error responses are tagged too, since the header is added after
/// the handler's `AppError` has been turned into a response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve(request.headers());

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::db::RepositoryError;
    use crate::error::{AppError, StoreError};

    async fn failing_write() -> Result<(), AppError> {
        Err(StoreError::from(RepositoryError::DataCorruption("precio negativo".to_string())).into())
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route("/falla", get(failing_write))
            .layer(middleware::from_fn(request_id_middleware))
    }

    fn headers(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers
    }

    #[test]
    fn test_resolve_replaces_blank_ids() {
        assert_eq!(resolve(&headers(" cf-1234 ")), "cf-1234");
        assert!(Uuid::parse_str(&resolve(&headers("   "))).is_ok());
        assert!(Uuid::parse_str(&resolve(&HeaderMap::new())).is_ok());
    }

    #[tokio::test]
    async fn test_generates_id_when_absent() {
        let response = app()
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_keeps_upstream_id() {
        let response = app()
            .oneshot(
                HttpRequest::get("/")
                    .header(REQUEST_ID_HEADER, "cf-1234")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "cf-1234");
    }

    #[tokio::test]
    async fn test_error_responses_carry_the_id() {
        let response = app()
            .oneshot(
                HttpRequest::get("/falla")
                    .header(REQUEST_ID_HEADER, "pedido-roto")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "pedido-roto");
    }
}

//! Host guard as an axum middleware function.
//! Same semantics as `HostGuardLayer`, for `axum::middleware::from_fn_with_state`.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::guard::{Decision, HostGuard};

pub async fn host_guard_middleware(
    State(guard): State<HostGuard>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match guard.decide(&req) {
        Decision::Forward => next.run(req).await,
        Decision::Reject(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::guard::HostSource;

    fn test_router(guard: HostGuard) -> Router {
        Router::new()
            .route("/foo", get(|| async { "test" }))
            .layer(middleware::from_fn_with_state(guard, host_guard_middleware))
    }

    fn request(host: &str) -> Request<Body> {
        Request::builder()
            .uri("/foo")
            .header("Host", host)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_good_host() {
        let app = test_router(HostGuard::single("example.com").unwrap());

        let response = app.oneshot(request("example.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_host() {
        let app = test_router(HostGuard::single("example.com").unwrap());

        let response = app.oneshot(request("malicious.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_some_good_host() {
        let guard = HostGuard::new(404, ["example.com", "foo.com", "bar.com"]).unwrap();
        let app = test_router(guard);

        let response = app.oneshot(request("foo.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_some_bad_host() {
        let guard = HostGuard::new(404, ["example.com", "foo.com", "bar.com"]).unwrap();
        let app = test_router(guard);

        let response = app.oneshot(request("bar.org")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_host_header() {
        let app = test_router(HostGuard::single("example.com").unwrap());
        let req = Request::builder()
            .uri("http://example.com/foo")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_authority_fallback() {
        let guard = HostGuard::single("example.com")
            .unwrap()
            .with_host_source(HostSource::HeaderOrAuthority);
        let app = test_router(guard);
        let req = Request::builder()
            .uri("http://example.com/foo")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

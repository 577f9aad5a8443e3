use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::content::create_content;
use super::handlers::content::delete_content;
use super::handlers::content::list_content;
use super::handlers::content::update_content;
use super::handlers::share::get_share_status;
use super::handlers::share::get_shared_brain;
use super::handlers::share::update_share;
use super::handlers::signin::signin;
use super::handlers::signup::signup;
use super::middleware::authenticate as auth_middleware;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::content::ports::ContentServicePort;
use crate::domain::share::ports::ShareServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub share_service: Arc<dyn ShareServicePort>,
    pub content_service: Arc<dyn ContentServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    share_service: Arc<dyn ShareServicePort>,
    content_service: Arc<dyn ContentServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        share_service,
        content_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .route("/api/brain/:share_token", get(get_shared_brain));

    let protected_routes = Router::new()
        .route("/api/content", get(list_content).post(create_content))
        .route(
            "/api/content/:content_id",
            put(update_content).delete(delete_content),
        )
        .route("/api/brain/share", get(get_share_status).post(update_share))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Only the redacted path is logged: no headers, no query, no share token
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = redacted_path(request.uri().path()),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = redacted_path(request.uri().path()),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

const SHARED_BRAIN_PREFIX: &str = "/api/brain/";

/// Path as logged; a share token is a bearer capability and is replaced by
/// its route parameter.
fn redacted_path(path: &str) -> &str {
    match path.strip_prefix(SHARED_BRAIN_PREFIX) {
        Some("share") | None => path,
        Some(_) => "/api/brain/:share_token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_token_redacted_from_logged_path() {
        let request = Request::get("/api/brain/0123456789abcdef01234567?ref=mail")
            .body(Body::empty())
            .unwrap();

        let path = redacted_path(request.uri().path());
        assert_eq!(path, "/api/brain/:share_token");
        assert!(!path.contains("0123456789abcdef01234567"));
    }

    #[test]
    fn test_other_paths_logged_as_is() {
        assert_eq!(redacted_path("/api/brain/share"), "/api/brain/share");
        assert_eq!(redacted_path("/api/content"), "/api/content");
        assert_eq!(redacted_path("/api/auth/signin"), "/api/auth/signin");
    }
}

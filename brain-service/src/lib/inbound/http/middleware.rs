use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Guard for protected routes.
///
/// Resolves the `Authorization: Bearer <token>` header into an
/// [`Identity`](crate::domain::authentication::models::Identity) request
/// extension. Every rejection gets the same 401 body; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map(str::to_owned).map_err(|_| {
            tracing::warn!(reason = "authorization header is not visible ASCII", "Request rejected");
            unauthorized()
        })?),
        None => None,
    };

    let identity = state
        .auth_service
        .authenticate_request(authorization.as_deref())
        .await
        .map_err(|e| match e {
            AuthError::Rejected(failure) => {
                tracing::debug!(reason = %failure, uri = %req.uri(), "Request rejected");
                unauthorized()
            }
            other => ApiError::from(other).into_response(),
        })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("Unauthorized".to_string()).into_response()
}

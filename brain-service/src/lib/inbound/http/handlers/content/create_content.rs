use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ContentData;
use super::ContentRequest;
use crate::domain::authentication::models::Identity;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_content(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<ContentRequest>,
) -> Result<ApiSuccess<ContentData>, ApiError> {
    state
        .content_service
        .create_content(&identity.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref content| ApiSuccess::new(StatusCode::CREATED, content.into()))
}

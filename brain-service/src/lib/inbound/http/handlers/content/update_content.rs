use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ContentData;
use super::ContentRequest;
use crate::domain::authentication::models::Identity;
use crate::domain::content::errors::ContentError;
use crate::domain::content::models::ContentId;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_content(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(content_id): Path<String>,
    Json(body): Json<ContentRequest>,
) -> Result<ApiSuccess<ContentData>, ApiError> {
    let content_id = ContentId::from_string(&content_id).map_err(ContentError::from)?;

    state
        .content_service
        .update_content(&identity.user_id, &content_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref content| ApiSuccess::new(StatusCode::OK, content.into()))
}

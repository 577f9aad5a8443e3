use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::authentication::models::Identity;
use crate::domain::content::errors::ContentError;
use crate::domain::content::models::ContentId;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_content(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(content_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let content_id = ContentId::from_string(&content_id).map_err(ContentError::from)?;

    state
        .content_service
        .delete_content(&identity.user_id, &content_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

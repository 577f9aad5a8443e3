use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ContentListData;
use crate::domain::authentication::models::Identity;
use crate::domain::content::ports::ContentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_content(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<ContentListData>, ApiError> {
    state
        .content_service
        .list_content(&identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|contents| ApiSuccess::new(StatusCode::OK, contents.as_slice().into()))
}

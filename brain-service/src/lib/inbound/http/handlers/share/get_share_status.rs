use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ShareStatusData;
use crate::domain::authentication::models::Identity;
use crate::domain::share::ports::ShareServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_share_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<ShareStatusData>, ApiError> {
    state
        .share_service
        .share_status(&identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ShareStatusData;
use crate::domain::authentication::models::Identity;
use crate::domain::share::ports::ShareServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Turn the caller's share link on or off.
///
/// Turning it on while already on issues a new token and retires the old one.
pub async fn update_share(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<UpdateShareRequest>,
) -> Result<ApiSuccess<ShareStatusData>, ApiError> {
    let token = if body.share {
        Some(state.share_service.enable_sharing(&identity.user_id).await?)
    } else {
        state.share_service.disable_sharing(&identity.user_id).await?;
        None
    };

    Ok(ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateShareRequest {
    share: bool,
}

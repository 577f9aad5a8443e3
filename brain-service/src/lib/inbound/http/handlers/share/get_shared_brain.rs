use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::content::ports::ContentServicePort;
use crate::domain::share::ports::ShareServicePort;
use crate::inbound::http::handlers::content::ContentListData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Public read-only view of a shared collection. The token is the only credential.
pub async fn get_shared_brain(
    State(state): State<AppState>,
    Path(share_token): Path<String>,
) -> Result<ApiSuccess<ContentListData>, ApiError> {
    let owner = state.share_service.resolve_share(&share_token).await?;

    state
        .content_service
        .list_content(&owner)
        .await
        .map_err(ApiError::from)
        .map(|contents| ApiSuccess::new(StatusCode::OK, contents.as_slice().into()))
}

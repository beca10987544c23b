use axum::{extract::State, http::StatusCode};
use tracing::error;

use super::cleanup;
use crate::common::response::ApiError;
use crate::state::AppState;

/// Delete every downloaded file and generated artifact
#[utoipa::path(
    post,
    path = "/clean",
    responses(
        (status = 200, description = "Working directories removed"),
        (status = 404, description = "Method other than POST"),
        (status = 500, description = "A directory could not be removed", body = String)
    ),
    tag = "Artifacts"
)]
pub async fn clean(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let dirs = [state.config.files_dir.as_path(), state.config.output_dir.as_path()];
    cleanup::purge(&dirs).await.map_err(|e| {
        error!("Cleanup failed: {}", e);
        ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
    })?;
    Ok(StatusCode::OK)
}

use axum::Router;
use axum::routing::post;
use tower_http::services::ServeDir;

use crate::config::settings::AppConfig;
use crate::common::response::not_found;
use crate::state::AppState;

pub mod cleanup;
pub mod handler;

pub fn router() -> Router<AppState> {
    Router::new().route("/clean", post(handler::clean).fallback(not_found))
}

/// Playlists and segments, served straight from the output directory.
pub fn static_files(config: &AppConfig) -> ServeDir {
    ServeDir::new(&config.output_dir)
}

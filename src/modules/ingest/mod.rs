use axum::Router;
use axum::routing::post;
use crate::common::response::not_found;
use crate::state::AppState;

pub mod downloader;
pub mod error;
pub mod extractor;
pub mod handler;
pub mod identity;
pub mod model;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(handler::upload).fallback(not_found))
}

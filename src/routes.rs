use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::docs::ApiDoc;
use axum::Router;
use axum::http::{header, HeaderValue};
use crate::state::AppState;

use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub fn configure_routes(state: &AppState) -> Router<AppState> {
    // Players fetch playlists cross-origin, so every response is open.
    let allow_any_origin = SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes())
        .merge(crate::modules::ingest::router())
        .merge(crate::modules::artifacts::router())
        .fallback_service(crate::modules::artifacts::static_files(&state.config))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .layer(allow_any_origin)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
}

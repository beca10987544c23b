use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Plain-text error answer. Clients of this service read raw bodies, so
/// errors are not wrapped in JSON.
#[derive(Debug)]
pub struct ApiError(pub String, pub StatusCode);

impl ApiError {
    pub fn not_found() -> Self {
        Self("404 not found.".to_string(), StatusCode::NOT_FOUND)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, status) = (self.0, self.1);
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", message),
        )
            .into_response()
    }
}

/// Answer for a known path hit with the wrong method.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

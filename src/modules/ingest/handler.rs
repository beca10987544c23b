use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::{future, stream, StreamExt};
use tracing::{error, info, warn};

use super::error::IngestError;
use super::service::IngestService;
use crate::common::response::ApiError;
use crate::config::settings::PipelineMode;
use crate::state::AppState;

/// Submit a media URL for HLS segmentation
///
/// The body is scanned for the first absolute URL. The identity token is
/// written back right away; download and segmentation follow.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = String, content_type = "text/plain", description = "Any payload containing `url` and an absolute URL"),
    responses(
        (status = 200, description = "Identity token, or an inline `ERROR:` message", body = String),
        (status = 400, description = "Body could not be read"),
        (status = 404, description = "Method other than POST")
    ),
    tag = "Ingest"
)]
pub async fn upload(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(b) => b,
        Err(e) => {
            warn!("Error reading body: {}", e);
            return ApiError("can't read body".to_string(), StatusCode::BAD_REQUEST).into_response();
        }
    };

    let job = match IngestService::prepare(&state.config, &body) {
        Ok(job) => job,
        Err(e) => {
            warn!("Rejected upload: {}", e);
            return inline_error(&e);
        }
    };

    info!(identity = %job.token(), url = %job.source_url, "📦 Received upload");
    let token = Bytes::from(job.token().to_string());

    let mode = state.config.pipeline_mode;
    match mode {
        PipelineMode::Detached => {
            tokio::spawn(async move {
                IngestService::run_logged(&state, &job).await;
            });
            text_response(Body::from(token))
        }
        PipelineMode::Streamed => {
            // The token goes out first; the body only ends once the job is done.
            // The job runs on its own task so a client hanging up does not cancel it.
            let identity = job.token().to_string();
            let handle = tokio::spawn(async move {
                IngestService::run_logged(&state, &job).await;
            });
            let head = stream::once(future::ready(Ok::<_, Infallible>(token)));
            let tail = stream::once(async move {
                if let Err(e) = handle.await {
                    error!(identity = %identity, "❌ Job task aborted: {}", e);
                }
            })
            .filter_map(|()| future::ready(None::<Result<Bytes, Infallible>>));
            text_response(Body::from_stream(head.chain(tail)))
        }
    }
}

fn text_response(body: Body) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

fn inline_error(err: &IngestError) -> Response {
    let message = match err {
        IngestError::NoUrlFound => "ERROR: url can't be found".to_string(),
        other => format!("ERROR: {}", other),
    };
    text_response(Body::from(message))
}

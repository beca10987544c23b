#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Path as UrlPath;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use hls_ingest::config::settings::{AppConfig, PipelineMode};
use hls_ingest::state::AppState;

// Writes the output pattern's first segment and a one-entry playlist, the
// way the real transcoder lays them out.
const FAKE_TRANSCODER: &str = r#"#!/bin/sh
input=""
list=""
last=""
while [ $# -gt 0 ]; do
  case "$1" in
    -i) input="$2"; shift 2 ;;
    -segment_list) list="$2"; shift 2 ;;
    *) last="$1"; shift ;;
  esac
done
if [ ! -f "$input" ]; then
  echo "$input: No such file or directory" >&2
  exit 1
fi
segment=$(printf "$last" 0)
cp "$input" "$segment"
printf '#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXTINF:10.0,\n%s\n#EXT-X-ENDLIST\n' "$(basename "$segment")" > "$list"
"#;

const FAILING_TRANSCODER: &str = r#"#!/bin/sh
echo "Invalid data found when processing input" >&2
exit 1
"#;

struct Transcoders {
    _dir: TempDir,
    ok: PathBuf,
    failing: PathBuf,
}

// Scripts are written once, before any test gets a chance to spawn a child,
// so no child inherits an open write handle to them.
fn transcoders() -> &'static Transcoders {
    static SCRIPTS: OnceLock<Transcoders> = OnceLock::new();
    SCRIPTS.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let ok = write_script(dir.path(), "fake-ffmpeg", FAKE_TRANSCODER);
        let failing = write_script(dir.path(), "failing-ffmpeg", FAILING_TRANSCODER);
        Transcoders { _dir: dir, ok, failing }
    })
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn fake_transcoder() -> PathBuf {
    transcoders().ok.clone()
}

pub fn failing_transcoder() -> PathBuf {
    transcoders().failing.clone()
}

pub fn test_config(base: &TempDir) -> AppConfig {
    AppConfig {
        files_dir: base.path().join("files"),
        output_dir: base.path().join("output"),
        ffmpeg_bin: fake_transcoder(),
        ..AppConfig::default()
    }
}

pub async fn build_app(config: AppConfig) -> Router {
    let state = AppState::new(config).unwrap();
    hls_ingest::app::create_app(state).await
}

/// How long the origin stalls before answering paths under `slow/`.
pub const SLOW_ORIGIN_DELAY: Duration = Duration::from_millis(800);

/// Body served by the origin for `path`.
pub fn origin_payload(path: &str) -> Vec<u8> {
    format!("media bytes for {}", path).into_bytes()
}

async fn serve_media(UrlPath(path): UrlPath<String>) -> Response {
    if path.starts_with("slow/") {
        tokio::time::sleep(SLOW_ORIGIN_DELAY).await;
    }
    if path.starts_with("missing") {
        return (StatusCode::NOT_FOUND, "<html>not found</html>").into_response();
    }
    origin_payload(&path).into_response()
}

/// Starts a local origin server and returns its base URL.
pub async fn spawn_origin() -> String {
    let app = Router::new().route("/{*path}", axum::routing::get(serve_media));
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    // The extractor wants a dotted host, so use the numeric loopback form.
    format!("http://{}", addr)
}

/// Serves the app on a real loopback listener and returns its address.
pub async fn spawn_app(config: AppConfig) -> SocketAddr {
    let app = build_app(config).await;
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub async fn send(app: &Router, method: &str, uri: &str, body: impl Into<Body>) -> (StatusCode, Response) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    (response.status(), response)
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn upload(app: &Router, url: &str) -> (StatusCode, String) {
    let (status, response) = send(app, "POST", "/upload", format!(r#"{{"url":"{}"}}"#, url)).await;
    (status, body_text(response).await)
}

pub async fn wait_for(path: &Path, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    path.exists()
}

pub fn detached(mut config: AppConfig) -> AppConfig {
    config.pipeline_mode = PipelineMode::Detached;
    config
}

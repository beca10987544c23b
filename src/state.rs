use crate::config::settings::AppConfig;
use crate::modules::ingest::downloader::Downloader;
use crate::workers::segmenter::Segmenter;

/// Shared by every request. Holds configuration and stateless services only;
/// per-upload data travels in an `IngestJob`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub downloader: Downloader,
    pub segmenter: Segmenter,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hls-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            downloader: Downloader::new(client),
            segmenter: Segmenter::new(config.ffmpeg_bin.clone()),
            config,
        })
    }
}

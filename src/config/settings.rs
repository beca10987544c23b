use std::path::PathBuf;
use std::str::FromStr;

use crate::config::env::{self, EnvKey};

/// How the upload handler waits on the download + segmentation stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// The pipeline runs inside the response body; the connection stays open
    /// until segmentation finishes.
    #[default]
    Streamed,
    /// The pipeline runs on a spawned task and the response ends right after
    /// the identity is written.
    Detached,
}

impl FromStr for PipelineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streamed" => Ok(PipelineMode::Streamed),
            "detached" => Ok(PipelineMode::Detached),
            other => Err(format!(
                "invalid pipeline mode: {} (expected: streamed|detached)",
                other
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub files_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ffmpeg_bin: PathBuf,
    pub pipeline_mode: PipelineMode,
    pub strict_downloads: bool,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            files_dir: PathBuf::from("files"),
            output_dir: PathBuf::from("output"),
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            pipeline_mode: PipelineMode::Streamed,
            strict_downloads: false,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn new() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let pipeline_mode = match env::get(EnvKey::PipelineMode) {
            Ok(raw) => raw.parse::<PipelineMode>().map_err(anyhow::Error::msg)?,
            Err(_) => defaults.pipeline_mode,
        };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, defaults.server_port),
            files_dir: PathBuf::from(env::get_or(EnvKey::FilesDir, "files")),
            output_dir: PathBuf::from(env::get_or(EnvKey::OutputDir, "output")),
            ffmpeg_bin: PathBuf::from(env::get_or(EnvKey::FfmpegBin, "ffmpeg")),
            pipeline_mode,
            strict_downloads: env::get_parsed(EnvKey::StrictDownloads, defaults.strict_downloads),
            max_body_bytes: env::get_parsed(EnvKey::MaxBodyBytes, defaults.max_body_bytes),
        })
    }
}

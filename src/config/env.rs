use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    FilesDir,
    OutputDir,
    FfmpegBin,
    PipelineMode,
    StrictDownloads,
    MaxBodyBytes,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::FilesDir => "FILES_DIR",
            EnvKey::OutputDir => "OUTPUT_DIR",
            EnvKey::FfmpegBin => "FFMPEG_BIN",
            EnvKey::PipelineMode => "PIPELINE_MODE",
            EnvKey::StrictDownloads => "STRICT_DOWNLOADS",
            EnvKey::MaxBodyBytes => "MAX_BODY_BYTES",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

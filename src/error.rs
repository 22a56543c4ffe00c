//! Error types for payload-embed

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    #[error("Asset unreadable: {}: {reason}", .path.display())]
    AssetUnreadable { path: PathBuf, reason: String },

    #[error("Delimiter collision: payload contains \"{delimiter}\" at character {offset}")]
    DelimiterCollision { delimiter: String, offset: usize },

    #[error("Output write failed: {}: {reason}", .path.display())]
    OutputWriteFailed { path: PathBuf, reason: String },

    #[error("Output is stale: {}", .0.display())]
    OutputStale(PathBuf),

    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the minting pipeline

use nft_sdk::SdkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinterError {
    #[error("Failed to load page {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Failed to download image {url}: {reason}")]
    DownloadError { url: String, reason: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Chain error: {0}")]
    ChainError(#[from] SdkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MinterError {
    pub fn config(msg: impl Into<String>) -> Self {
        MinterError::ConfigError(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        MinterError::StorageError(msg.into())
    }
}

pub type MinterResult<T> = Result<T, MinterError>;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RichTextError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input exceeds {limit} bytes")]
    InputTooLarge { limit: usize },

    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

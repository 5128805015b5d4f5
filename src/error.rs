//! Error types for gallery network and file operations
//!
//! The `Display` output of each variant is what ends up in the UI, so the
//! messages are written for people rather than logs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    /// Server unreachable, connection reset, etc.
    #[error("Connection error: {0}")]
    Transport(String),

    /// Non-2xx reply
    #[error("HTTP error {status}{}", reason_suffix(.reason))]
    Status {
        status: u16,
        reason: Option<String>,
        body: String,
    },

    /// 2xx reply whose body could not be parsed
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image data: {0}")]
    Image(#[from] image::ImageError),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}

impl GalleryError {
    pub fn status(status: u16, reason: Option<&str>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

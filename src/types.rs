//! Common types and data structures

use serde::{Deserialize, Serialize};

/// One catalogued image as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Kept as sent; only used for display
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub source: String,
}

impl ImageRecord {
    /// The asset URL, if the server sent a usable one
    pub fn asset_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Body of the list endpoint
#[derive(Debug, Deserialize)]
pub struct ImageListResponse {
    #[serde(default)]
    pub results: Vec<ImageRecord>,
}

/// Tab selected in the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Gallery,
    Upload,
}

/// Payload for the upload endpoint
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub title: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline feedback shown above the upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

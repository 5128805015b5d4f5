//! Upload tab: holds the draft and submits it
//!
//! At most one submission is in flight per view. On failure the draft is left
//! untouched so the user can fix it and resubmit.

use crate::api::GalleryApi;
use crate::constants::MAX_TITLE_LEN;
use crate::error::Result;
use crate::types::{ImageUpload, StatusMessage};
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A file the user picked; bytes are read when the draft is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> std::io::Result<Self> {
        let size = std::fs::metadata(&path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self {
            path,
            file_name,
            size,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub title: String,
    pub file: Option<SelectedFile>,
}

pub enum DraftField {
    Title(String),
    File(Option<SelectedFile>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a title")]
    MissingTitle,

    #[error("Please select an image file")]
    MissingFile,

    #[error("Title must be at most {max} characters")]
    TitleTooLong { max: usize },
}

/// Checks run before any network call, in this order
pub fn validate(draft: &SubmissionDraft) -> std::result::Result<(), ValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if draft.file.is_none() {
        return Err(ValidationError::MissingFile);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(())
}

async fn send_upload(api: Arc<dyn GalleryApi>, title: String, file: SelectedFile) -> Result<()> {
    let bytes = tokio::fs::read(&file.path).await?;
    api.upload_image(ImageUpload {
        title,
        file_name: file.file_name,
        bytes,
    })
    .await
}

pub struct UploadView {
    api: Arc<dyn GalleryApi>,
    runtime: Handle,
    draft: SubmissionDraft,
    submitting: bool,
    last_message: Option<StatusMessage>,
    tx: mpsc::UnboundedSender<Result<()>>,
    rx: mpsc::UnboundedReceiver<Result<()>>,
}

impl UploadView {
    pub fn new(api: Arc<dyn GalleryApi>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            draft: SubmissionDraft::default(),
            submitting: false,
            last_message: None,
            tx,
            rx,
        }
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_message(&self) -> Option<&StatusMessage> {
        self.last_message.as_ref()
    }

    pub fn update_field(&mut self, field: DraftField) {
        match field {
            DraftField::Title(title) => self.draft.title = title,
            DraftField::File(file) => {
                if let Some(file) = &file {
                    debug!(path = %file.path.display(), size = file.size, "Image file selected");
                }
                self.draft.file = file;
            }
        }
    }

    pub fn file_pick_failed(&mut self, path: &std::path::Path, err: &std::io::Error) {
        warn!(path = %path.display(), error = %err, "Selected file is not readable");
        self.last_message = Some(StatusMessage::error(format!("Could not read file: {err}")));
    }

    /// Validate and send the draft. Returns whether a request was issued.
    pub fn submit(&mut self, ctx: &egui::Context) -> bool {
        if self.submitting {
            debug!("Submit ignored, upload already in flight");
            return false;
        }
        if let Err(e) = validate(&self.draft) {
            debug!(error = %e, "Draft failed validation");
            self.last_message = Some(StatusMessage::error(e.to_string()));
            return false;
        }
        let Some(file) = self.draft.file.clone() else {
            return false;
        };

        self.submitting = true;
        self.last_message = None;
        let title = self.draft.title.trim().to_string();
        info!(title = %title, file = %file.file_name, "Submitting image");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = send_upload(api, title, file).await;
            if tx.send(outcome).is_ok() {
                ctx.request_repaint();
            }
        });
        true
    }

    /// Apply a finished submission. `on_success` runs once per accepted upload.
    pub fn poll<F: FnOnce()>(&mut self, on_success: F) {
        let Ok(outcome) = self.rx.try_recv() else {
            return;
        };
        self.submitting = false;
        match outcome {
            Ok(()) => {
                info!("Image uploaded");
                self.last_message = Some(StatusMessage::success("Image uploaded successfully!"));
                self.draft = SubmissionDraft::default();
                on_success();
            }
            Err(e) => {
                warn!(error = %e, "Upload failed");
                self.last_message = Some(StatusMessage::error(format!("Upload failed: {e}")));
            }
        }
    }
}

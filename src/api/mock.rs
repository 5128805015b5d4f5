//! Scripted in-memory server for view tests
//!
//! By default behaves like a healthy server: listing returns `records`,
//! uploads append a new record. Individual calls can be scripted to fail or
//! to wait on a gate so tests control resolution order.

use super::GalleryApi;
use crate::error::{GalleryError, Result};
use crate::types::{ImageRecord, ImageUpload};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

struct Scripted<T> {
    result: Result<T>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct MockGalleryApi {
    records: Mutex<Vec<ImageRecord>>,
    assets: Mutex<HashMap<String, Vec<u8>>>,
    scripted_lists: Mutex<VecDeque<Scripted<Vec<ImageRecord>>>>,
    scripted_uploads: Mutex<VecDeque<Scripted<()>>>,
    uploads: Mutex<Vec<ImageUpload>>,
    list_calls: AtomicUsize,
    asset_calls: AtomicUsize,
}

pub fn record(id: i64, title: &str, image_url: Option<&str>) -> ImageRecord {
    ImageRecord {
        id,
        title: title.to_string(),
        image_url: image_url.map(str::to_string),
        created_at: "2024-05-01T10:00:00Z".to_string(),
        source: "Local".to_string(),
    }
}

impl MockGalleryApi {
    pub fn with_records(records: Vec<ImageRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn set_records(&self, records: Vec<ImageRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn add_asset(&self, url: &str, bytes: Vec<u8>) {
        self.assets.lock().unwrap().insert(url.to_string(), bytes);
    }

    /// Next `list_images` call returns `result` immediately
    pub fn script_list(&self, result: Result<Vec<ImageRecord>>) {
        self.scripted_lists
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate: None });
    }

    /// Next `list_images` call returns `result` once the returned sender fires
    pub fn script_list_gated(&self, result: Result<Vec<ImageRecord>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.scripted_lists.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(rx),
        });
        tx
    }

    pub fn script_upload(&self, result: Result<()>) {
        self.scripted_uploads
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate: None });
    }

    pub fn script_upload_gated(&self, result: Result<()>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.scripted_uploads.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(rx),
        });
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn asset_calls(&self) -> usize {
        self.asset_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

async fn resolve<T>(scripted: Scripted<T>) -> Result<T> {
    if let Some(gate) = scripted.gate {
        gate.await.ok();
    }
    scripted.result
}

#[async_trait]
impl GalleryApi for MockGalleryApi {
    async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let scripted = self.scripted_lists.lock().unwrap().pop_front();
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match scripted {
            Some(scripted) => resolve(scripted).await,
            None => Ok(self.records.lock().unwrap().clone()),
        }
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<()> {
        self.uploads.lock().unwrap().push(upload.clone());
        let scripted = self.scripted_uploads.lock().unwrap().pop_front();
        let result = match scripted {
            Some(scripted) => resolve(scripted).await,
            None => Ok(()),
        };
        if result.is_ok() {
            let mut records = self.records.lock().unwrap();
            let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            records.insert(0, record(id, &upload.title, None));
        }
        result
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        self.asset_calls.fetch_add(1, Ordering::SeqCst);
        self.assets
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| GalleryError::status(404, Some("Not Found"), ""))
    }
}

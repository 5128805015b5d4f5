//! Image asset loading for gallery cards
//!
//! Each URL is fetched and decoded off the UI thread, then uploaded as a
//! texture when the result is drained. A URL that fails for any reason (HTTP
//! error, connection error, undecodable bytes) is marked `Unavailable`; that
//! only affects the card showing it.

use crate::api::GalleryApi;
use crate::constants::MAX_CONCURRENT_ASSETS;
use crate::error::Result;
use eframe::egui;
use futures::StreamExt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Decoded images are shrunk to fit this box before becoming textures
const THUMBNAIL_MAX_SIZE: u32 = 640;

pub enum AssetState {
    Loading,
    Ready(egui::TextureHandle),
    Unavailable,
}

struct AssetResult {
    url: String,
    image: Result<egui::ColorImage>,
}

pub struct AssetCache {
    entries: HashMap<String, AssetState>,
    tx: mpsc::UnboundedSender<AssetResult>,
    rx: mpsc::UnboundedReceiver<AssetResult>,
}

impl Default for AssetCache {
    fn default() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            entries: HashMap::new(),
            tx,
            rx,
        }
    }
}

async fn load_asset(api: &dyn GalleryApi, url: &str) -> Result<egui::ColorImage> {
    let bytes = api.fetch_asset(url).await?;
    let mut img = image::load_from_memory(&bytes)?;
    if img.width() > THUMBNAIL_MAX_SIZE || img.height() > THUMBNAIL_MAX_SIZE {
        img = img.thumbnail(THUMBNAIL_MAX_SIZE, THUMBNAIL_MAX_SIZE);
    }
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw()))
}

impl AssetCache {
    pub fn state(&self, url: &str) -> Option<&AssetState> {
        self.entries.get(url)
    }

    #[cfg(test)]
    pub fn is_unavailable(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(AssetState::Unavailable))
    }

    /// Start loading every URL not already loading or loaded.
    pub fn request_all<I>(
        &mut self,
        urls: I,
        api: Arc<dyn GalleryApi>,
        runtime: &Handle,
        ctx: &egui::Context,
    ) where
        I: IntoIterator<Item = String>,
    {
        let mut pending = Vec::new();
        for url in urls {
            if !self.entries.contains_key(&url) {
                self.entries.insert(url.clone(), AssetState::Loading);
                pending.push(url);
            }
        }
        if pending.is_empty() {
            return;
        }

        debug!(count = pending.len(), "Loading image assets");
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            futures::stream::iter(pending)
                .for_each_concurrent(MAX_CONCURRENT_ASSETS, |url| {
                    let api = Arc::clone(&api);
                    let tx = tx.clone();
                    let ctx = ctx.clone();
                    async move {
                        let image = load_asset(api.as_ref(), &url).await;
                        // Receiver gone means the app is shutting down
                        if tx.send(AssetResult { url, image }).is_ok() {
                            ctx.request_repaint();
                        }
                    }
                })
                .await;
        });
    }

    /// Keep only entries for `urls`, minus failures so they are tried again.
    /// Called when a new collection replaces the old one.
    pub fn retain_only(&mut self, urls: &[String]) {
        let keep: HashSet<&str> = urls.iter().map(String::as_str).collect();
        self.entries.retain(|url, state| {
            keep.contains(url.as_str()) && !matches!(state, AssetState::Unavailable)
        });
    }

    #[cfg(test)]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Drain finished downloads. Returns how many landed.
    pub fn poll(&mut self, ctx: &egui::Context) -> usize {
        let mut landed = 0;
        while let Ok(result) = self.rx.try_recv() {
            // Evicted while in flight
            if !self.entries.contains_key(&result.url) {
                debug!(url = %result.url, "Dropping asset no longer in the gallery");
                continue;
            }
            let state = match result.image {
                Ok(image) => AssetState::Ready(ctx.load_texture(
                    result.url.as_str(),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    warn!(url = %result.url, error = %e, "Image asset unavailable");
                    AssetState::Unavailable
                }
            };
            self.entries.insert(result.url, state);
            landed += 1;
        }
        landed
    }
}

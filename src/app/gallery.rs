//! Gallery tab: fetches the collection and tracks its load state
//!
//! Every fetch carries a request token. Only the result whose token matches
//! the most recently issued one is applied, so an older request that resolves
//! late can never overwrite a newer one.

use super::thumbnails::{AssetCache, AssetState};
use crate::api::GalleryApi;
use crate::error::Result;
use crate::types::ImageRecord;
use eframe::egui;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<ImageRecord>),
    Failed(String),
}

/// What the gallery tab should draw this frame
pub enum GalleryContent<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Cards(Vec<Card<'a>>),
}

pub struct Card<'a> {
    pub record: &'a ImageRecord,
    pub image: CardImage,
}

pub enum CardImage {
    Loading,
    Ready(egui::TextureHandle),
    /// No URL, or the asset failed to load
    Placeholder,
}

struct FetchResult {
    token: u64,
    outcome: Result<Vec<ImageRecord>>,
}

pub struct GalleryView {
    api: Arc<dyn GalleryApi>,
    runtime: Handle,
    state: LoadState,
    observed_refresh: Option<u64>,
    latest_token: u64,
    stale_discarded: u64,
    assets: AssetCache,
    tx: mpsc::UnboundedSender<FetchResult>,
    rx: mpsc::UnboundedReceiver<FetchResult>,
}

impl GalleryView {
    pub fn new(api: Arc<dyn GalleryApi>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            state: LoadState::Loading,
            observed_refresh: None,
            latest_token: 0,
            stale_discarded: 0,
            assets: AssetCache::default(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[cfg(test)]
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    /// Fetch on first call and whenever the refresh counter changed since the last one
    pub fn sync(&mut self, refresh_counter: u64, ctx: &egui::Context) {
        if self.observed_refresh == Some(refresh_counter) {
            return;
        }
        debug!(
            previous = ?self.observed_refresh,
            current = refresh_counter,
            "Refresh signal changed"
        );
        self.observed_refresh = Some(refresh_counter);
        self.refresh(ctx);
    }

    pub fn refresh(&mut self, ctx: &egui::Context) {
        self.latest_token += 1;
        let token = self.latest_token;
        self.state = LoadState::Loading;
        info!(token, "Fetching gallery");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = api.list_images().await;
            if tx.send(FetchResult { token, outcome }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    pub fn retry(&mut self, ctx: &egui::Context) {
        info!("Retrying gallery fetch");
        self.refresh(ctx);
    }

    /// Apply finished fetches and asset downloads
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(FetchResult { token, outcome }) = self.rx.try_recv() {
            if token != self.latest_token {
                self.stale_discarded += 1;
                debug!(
                    token,
                    latest = self.latest_token,
                    discarded = self.stale_discarded,
                    "Discarding stale gallery response"
                );
                continue;
            }
            match outcome {
                Ok(records) => {
                    info!(count = records.len(), "Gallery loaded");
                    let urls: Vec<String> = records
                        .iter()
                        .filter_map(|r| r.asset_url().map(str::to_string))
                        .collect();
                    self.assets.retain_only(&urls);
                    self.assets
                        .request_all(urls, Arc::clone(&self.api), &self.runtime, ctx);
                    self.state = LoadState::Loaded(records);
                }
                Err(e) => {
                    warn!(error = %e, status = ?e.status_code(), "Gallery fetch failed");
                    self.state = LoadState::Failed(format!("Could not load images: {e}"));
                }
            }
        }
        self.assets.poll(ctx);
    }

    pub fn content(&self) -> GalleryContent<'_> {
        match &self.state {
            LoadState::Loading => GalleryContent::Loading,
            LoadState::Failed(message) => GalleryContent::Failed(message),
            LoadState::Loaded(records) if records.is_empty() => GalleryContent::Empty,
            LoadState::Loaded(records) => GalleryContent::Cards(
                records
                    .iter()
                    .map(|record| Card {
                        record,
                        image: self.card_image(record),
                    })
                    .collect(),
            ),
        }
    }

    fn card_image(&self, record: &ImageRecord) -> CardImage {
        let Some(url) = record.asset_url() else {
            return CardImage::Placeholder;
        };
        match self.assets.state(url) {
            Some(AssetState::Ready(texture)) => CardImage::Ready(texture.clone()),
            Some(AssetState::Unavailable) => CardImage::Placeholder,
            Some(AssetState::Loading) | None => CardImage::Loading,
        }
    }
}

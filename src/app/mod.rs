//! App module - composes the shell with the gallery and upload tabs

pub mod gallery;
pub mod shell;
pub mod thumbnails;
pub mod upload;
mod views;

#[cfg(test)]
pub(crate) mod test_support;

use crate::api::{Endpoints, GalleryApi, HttpGalleryApi};
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use gallery::GalleryView;
use shell::Shell;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use upload::UploadView;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) shell: Shell,
    pub(crate) gallery: GalleryView,
    pub(crate) upload: UploadView,
    pub(crate) endpoints: Endpoints,
    // Owns the worker threads behind the views' runtime handles
    #[allow(dead_code)]
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<Instant>,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let endpoints = settings.endpoints();
        info!(list = %endpoints.list, upload = %endpoints.upload, "Gallery endpoints");
        let api: Arc<dyn GalleryApi> = Arc::new(HttpGalleryApi::new(endpoints.clone()));

        Ok(Self::with_api(api, endpoints, runtime, settings, data_dir))
    }

    pub(crate) fn with_api(
        api: Arc<dyn GalleryApi>,
        endpoints: Endpoints,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        let handle = runtime.handle().clone();
        Self {
            shell: Shell::new(settings.last_view),
            gallery: GalleryView::new(Arc::clone(&api), handle.clone()),
            upload: UploadView::new(api, handle),
            endpoints,
            runtime,
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
            central_panel_rect: None,
            toast_message: None,
            toast_start: None,
        }
    }

    /// Per-frame wiring: upload success bumps the refresh signal, the gallery
    /// observes it and applies whatever finished since the last frame.
    pub fn sync_views(&mut self, ctx: &egui::Context) {
        let shell = &mut self.shell;
        let mut uploaded = false;
        self.upload.poll(|| {
            shell.on_submission_succeeded();
            uploaded = true;
        });
        if uploaded {
            self.show_toast("Image uploaded, refreshing gallery");
        }

        self.gallery.sync(self.shell.refresh_counter(), ctx);
        self.gallery.poll(ctx);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(Instant::now());
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            last_view: self.shell.active_view(),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{record, MockGalleryApi};
    use crate::app::gallery::LoadState;
    use crate::app::test_support::{png_bytes, wait_for};
    use crate::app::upload::{DraftField, SelectedFile};
    use crate::types::ActiveView;
    use std::io::Write;

    fn app_with(api: Arc<MockGalleryApi>, data_dir: PathBuf) -> App {
        App::with_api(
            api,
            Endpoints::from_base("http://127.0.0.1:8000"),
            tokio::runtime::Runtime::new().unwrap(),
            Settings::default(),
            data_dir,
        )
    }

    #[test]
    fn upload_success_refreshes_gallery_once() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockGalleryApi::with_records(vec![record(1, "First", None)]));
        let mut app = app_with(api.clone(), dir.path().to_path_buf());
        let ctx = egui::Context::default();

        app.sync_views(&ctx);
        assert!(wait_for(|| {
            app.sync_views(&ctx);
            matches!(app.gallery.state(), LoadState::Loaded(_))
        }));
        assert_eq!(api.list_calls(), 1);

        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&png_bytes(2, 2)).unwrap();
        app.shell.select_view(ActiveView::Upload);
        app.upload.update_field(DraftField::Title("Second".into()));
        app.upload.update_field(DraftField::File(Some(
            SelectedFile::from_path(file.path().to_path_buf()).unwrap(),
        )));
        assert!(app.upload.submit(&ctx));

        assert!(wait_for(|| {
            app.sync_views(&ctx);
            match app.gallery.state() {
                LoadState::Loaded(records) => records.len() == 2,
                _ => false,
            }
        }));
        assert_eq!(app.shell.refresh_counter(), 1);
        assert_eq!(api.list_calls(), 2);
        assert!(app.toast_message.is_some());

        // Steady state: no further fetches without another signal
        app.sync_views(&ctx);
        assert_eq!(api.list_calls(), 2);
    }

    #[test]
    fn switching_tabs_does_not_refetch() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockGalleryApi::default());
        let mut app = app_with(api.clone(), dir.path().to_path_buf());
        let ctx = egui::Context::default();

        assert!(wait_for(|| {
            app.sync_views(&ctx);
            matches!(app.gallery.state(), LoadState::Loaded(_))
        }));
        app.shell.select_view(ActiveView::Upload);
        app.sync_views(&ctx);
        app.shell.select_view(ActiveView::Gallery);
        app.sync_views(&ctx);
        assert_eq!(api.list_calls(), 1);
    }

    #[test]
    fn failed_image_open_is_shown_as_toast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(MockGalleryApi::default()), dir.path().to_path_buf());
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no browser");

        app.open_failed("http://127.0.0.1:8000/media/a.png", &err);

        assert_eq!(app.toast_message.as_deref(), Some("Could not open image: no browser"));
        assert!(app.toast_start.is_some());
    }

    #[test]
    fn save_settings_records_active_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(MockGalleryApi::default()), dir.path().to_path_buf());
        app.shell.select_view(ActiveView::Upload);
        app.window_size = Some(egui::vec2(900.0, 700.0));
        app.save_settings();

        let saved = Settings::load(dir.path());
        assert_eq!(saved.last_view, ActiveView::Upload);
        assert_eq!(saved.window_w, Some(900.0));
    }
}

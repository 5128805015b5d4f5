//! View rendering (header tabs, gallery grid, upload form, toast)

use super::gallery::GalleryContent;
use super::upload::{DraftField, SelectedFile};
use super::App;
use crate::constants::{IMAGE_EXTENSIONS, MAX_TITLE_LEN};
use crate::theme;
use crate::types::ActiveView;
use crate::ui::components::{gallery_card, status_banner};
use crate::utils::format_bytes;
use eframe::egui;
use egui_phosphor::regular as icons;
use tracing::{debug, warn};

impl App {
    // ========================================================================
    // HEADER
    // ========================================================================

    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{}  MiniGallery", icons::IMAGES))
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            );
            ui.add_space(theme::SPACING_XL);

            let active = self.shell.active_view();
            let tabs = [
                (ActiveView::Gallery, icons::SQUARES_FOUR, "Gallery"),
                (ActiveView::Upload, icons::UPLOAD_SIMPLE, "Upload"),
            ];
            for (view, icon, label) in tabs {
                if theme::tab_button(ui, icon, label, active == view).clicked() {
                    self.shell.select_view(view);
                }
                ui.add_space(theme::SPACING_SM);
            }
        });
    }

    // ========================================================================
    // GALLERY
    // ========================================================================

    pub(crate) fn render_gallery(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut retry = false;
        let mut open_url: Option<String> = None;

        match self.gallery.content() {
            GalleryContent::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.add(egui::Spinner::new().size(28.0).color(theme::ACCENT));
                    ui.add_space(theme::SPACING_MD);
                    ui.label(egui::RichText::new("Loading images…").color(theme::TEXT_MUTED));
                });
            }
            GalleryContent::Failed(message) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.label(
                        egui::RichText::new(icons::WARNING_CIRCLE)
                            .size(32.0)
                            .color(theme::STATUS_ERROR),
                    );
                    ui.add_space(theme::SPACING_MD);
                    ui.label(egui::RichText::new(message).color(theme::STATUS_ERROR));
                    ui.add_space(theme::SPACING_LG);
                    let button = theme::button(format!("{}  Retry", icons::ARROW_CLOCKWISE))
                        .min_size(egui::vec2(120.0, theme::BUTTON_HEIGHT_LARGE));
                    retry = ui.add(button).clicked();
                });
            }
            GalleryContent::Empty => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.label(
                        egui::RichText::new(icons::IMAGE)
                            .size(32.0)
                            .color(theme::TEXT_DIM),
                    );
                    ui.add_space(theme::SPACING_MD);
                    ui.label(
                        egui::RichText::new("No images in the gallery yet")
                            .size(theme::FONT_HEADING)
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.label(
                        egui::RichText::new("Use the Upload tab to add the first one.")
                            .color(theme::TEXT_DIM),
                    );
                });
            }
            GalleryContent::Cards(cards) => {
                ui.label(
                    egui::RichText::new(format!("{} images", cards.len()))
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_MD);

                let now = chrono::Utc::now();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let spacing = theme::SPACING_LG;
                        let avail = ui.available_width();
                        let per_card = theme::CARD_MIN_WIDTH + spacing;
                        let columns = (((avail + spacing) / per_card) as usize).max(1);
                        let card_width = (avail - spacing * (columns - 1) as f32) / columns as f32;

                        for row in cards.chunks(columns) {
                            ui.horizontal_top(|ui| {
                                ui.spacing_mut().item_spacing.x = spacing;
                                for card in row {
                                    if gallery_card(ui, card, card_width, now) {
                                        open_url = card.record.asset_url().map(str::to_string);
                                    }
                                }
                            });
                            ui.add_space(spacing);
                        }
                    });
            }
        }

        if retry {
            self.gallery.retry(ctx);
        }
        if let Some(url) = open_url {
            self.open_image(&url);
        }
    }

    fn open_image(&mut self, url: &str) {
        let url = self.endpoints.resolve_asset(url);
        debug!(url = %url, "Opening image");
        if let Err(e) = open::that(&url) {
            self.open_failed(&url, &e);
        }
    }

    pub(crate) fn open_failed(&mut self, url: &str, err: &std::io::Error) {
        warn!(url = %url, error = %err, "Failed to open image");
        self.show_toast(format!("Could not open image: {err}"));
    }

    // ========================================================================
    // UPLOAD
    // ========================================================================

    pub(crate) fn render_upload(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        self.render_upload_form(ui, ctx);
                    });
                });
            });
    }

    fn render_upload_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let submitting = self.upload.is_submitting();

        ui.label(
            egui::RichText::new("Upload an image")
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        );
        ui.label(
            egui::RichText::new(format!("Posts to {}", self.endpoints.upload))
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(theme::SPACING_LG);

        if let Some(message) = self.upload.last_message() {
            status_banner(ui, message);
            ui.add_space(theme::SPACING_LG);
        }

        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());

            // Title
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Title").color(theme::TEXT_SECONDARY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let count = self.upload.draft().title.trim().chars().count();
                    let color = if count > MAX_TITLE_LEN {
                        theme::STATUS_ERROR
                    } else {
                        theme::TEXT_DIM
                    };
                    ui.label(
                        egui::RichText::new(format!("{count}/{MAX_TITLE_LEN}"))
                            .size(theme::FONT_SMALL)
                            .color(color),
                    );
                });
            });
            let mut title = self.upload.draft().title.clone();
            let title_edit = egui::TextEdit::singleline(&mut title)
                .hint_text("Enter image title")
                .desired_width(f32::INFINITY);
            if ui.add_enabled(!submitting, title_edit).changed() {
                self.upload.update_field(DraftField::Title(title));
            }
            ui.add_space(theme::SPACING_LG);

            // File
            ui.label(egui::RichText::new("Image file").color(theme::TEXT_SECONDARY));
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                let choose = theme::button(format!("{}  Choose file…", icons::FOLDER_OPEN));
                if ui.add_enabled(!submitting, choose).clicked() {
                    self.pick_file();
                }

                match self.upload.draft().file.clone() {
                    Some(file) => {
                        ui.label(
                            egui::RichText::new(format!(
                                "{}  ({})",
                                file.file_name,
                                format_bytes(file.size)
                            ))
                            .color(theme::TEXT_PRIMARY),
                        );
                        let clear = egui::Button::new(icons::X).frame(false);
                        if ui
                            .add_enabled(!submitting, clear)
                            .on_hover_text("Clear selection")
                            .clicked()
                        {
                            self.upload.update_field(DraftField::File(None));
                        }
                    }
                    None => {
                        ui.label(egui::RichText::new("No file selected").color(theme::TEXT_DIM));
                    }
                }
            });
            ui.add_space(theme::SPACING_XL);

            let label = if submitting {
                format!("{}  Uploading…", icons::CIRCLE_NOTCH)
            } else {
                format!("{}  Upload", icons::UPLOAD_SIMPLE)
            };
            let submit = theme::button_accent(label, !submitting)
                .min_size(egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE));
            if ui.add_enabled(!submitting, submit).clicked() {
                self.upload.submit(ctx);
            }
        });
    }

    fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        match SelectedFile::from_path(path.clone()) {
            Ok(file) => self.upload.update_field(DraftField::File(Some(file))),
            Err(e) => self.upload.file_pick_failed(&path, &e),
        }
    }

    // ========================================================================
    // FOOTER & TOAST
    // ========================================================================

    pub(crate) fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{}  {}", icons::GLOBE, self.endpoints.list))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("v{}", crate::constants::APP_VERSION))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });
        });
    }

    /// Bottom-right of the central panel: 3s visible then fade, paused on hover
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect)
        else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        let alpha = if elapsed > visible_duration {
            ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(
                        0x1a,
                        0x1a,
                        0x1e,
                        (230.0 * alpha) as u8,
                    ))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(
                            theme::ACCENT.r(),
                            theme::ACCENT.g(),
                            theme::ACCENT.b(),
                            (100.0 * alpha) as u8,
                        ),
                    ))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        let text_alpha = (255.0 * alpha) as u8;
                        ui.label(egui::RichText::new(msg).color(
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, text_alpha),
                        ));
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

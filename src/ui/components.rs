//! Reusable UI components
//!
//! Standalone widgets used by the gallery and upload tabs.

use crate::app::gallery::{Card, CardImage};
use crate::theme;
use crate::types::{MessageKind, StatusMessage};
use chrono::{DateTime, NaiveDateTime, Utc};
use eframe::egui;

/// Human-readable age of a server timestamp.
///
/// Unparseable input is shown as sent; it has no bearing on ordering.
pub fn format_relative_time(raw: &str, now: DateTime<Utc>) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Unknown date".to_string();
    }
    let Some(created) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    let elapsed = now.signed_duration_since(created);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() <= 30 {
        plural(elapsed.num_days(), "day")
    } else {
        created.format("%d %b %Y").to_string()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Servers without time zone support send naive timestamps
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// UV rect that crops an image to fill `target` without stretching
pub fn cover_uv(image_size: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image_size.x <= 0.0 || image_size.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = image_size.x / image_size.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let u0 = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(u0, 0.0), egui::pos2(u0 + visible, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let v0 = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, v0), egui::pos2(1.0, v0 + visible))
    }
}

/// Static stand-in for an image that could not be shown
pub fn image_placeholder(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, theme::RADIUS_MEDIUM, theme::BG_SURFACE);
    painter.text(
        rect.center() - egui::vec2(0.0, 10.0),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::IMAGE,
        egui::FontId::proportional(28.0),
        theme::TEXT_DIM,
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_CENTER,
        "Image unavailable",
        egui::FontId::proportional(theme::FONT_BODY),
        theme::TEXT_MUTED,
    );
}

/// One gallery card. Returns true if the image was clicked.
pub fn gallery_card(ui: &mut egui::Ui, card: &Card<'_>, width: f32, now: DateTime<Utc>) -> bool {
    let record = card.record;
    let mut clicked = false;

    theme::card_frame().show(ui, |ui| {
        let inner_w = width - theme::SPACING_LG * 2.0;
        ui.set_width(inner_w);

        ui.add(
            egui::Label::new(
                egui::RichText::new(&record.title)
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            )
            .truncate(),
        );
        ui.add_space(theme::SPACING_SM);

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(inner_w, theme::CARD_IMAGE_HEIGHT),
            egui::Sense::click(),
        );
        if ui.is_rect_visible(rect) {
            match &card.image {
                CardImage::Ready(texture) => {
                    let uv = cover_uv(texture.size_vec2(), rect.size());
                    ui.painter()
                        .image(texture.id(), rect, uv, egui::Color32::WHITE);
                    if response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    clicked = response.clicked();
                }
                CardImage::Loading => {
                    ui.painter()
                        .rect_filled(rect, theme::RADIUS_MEDIUM, theme::BG_SURFACE);
                    ui.put(rect, egui::Spinner::new().color(theme::ACCENT));
                }
                CardImage::Placeholder => image_placeholder(ui.painter(), rect),
            }
        }
        ui.add_space(theme::SPACING_SM);

        ui.label(
            egui::RichText::new(format!(
                "{}  {}",
                egui_phosphor::regular::CALENDAR_BLANK,
                format_relative_time(&record.created_at, now)
            ))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_MUTED),
        );
        let source = if record.source.is_empty() {
            "Unknown"
        } else {
            record.source.as_str()
        };
        ui.label(
            egui::RichText::new(format!("{}  Source: {source}", egui_phosphor::regular::LINK))
            .size(theme::FONT_SMALL)
            .color(theme::ACCENT),
        );
    });

    clicked
}

/// Inline success/error message
pub fn status_banner(ui: &mut egui::Ui, message: &StatusMessage) {
    let (_, color) = theme::banner_colors(message.kind);
    let icon = match message.kind {
        MessageKind::Success => egui_phosphor::regular::CHECK_CIRCLE,
        MessageKind::Error => egui_phosphor::regular::WARNING_CIRCLE,
    };
    theme::banner_frame(message.kind).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(format!("{icon}  {}", message.text)).color(color));
    });
}

//! Renders one comment, with its author resolved through the user cache.

use chrono::{DateTime, Utc};
use eframe::egui;

use crate::formatters::format_time_ago;
use crate::models::{Comment, User};

pub fn show(ui: &mut egui::Ui, comment: &Comment, author: Option<&User>, now: DateTime<Utc>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            match author {
                Some(user) => ui.strong(&user.username),
                // Author lookup still in flight (or failed); the cache
                // will fill it in on a later frame.
                None => ui.weak("..."),
            };
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format_time_ago(comment.created_at, now));
            });
        });
        ui.label(&comment.content);
    });
}

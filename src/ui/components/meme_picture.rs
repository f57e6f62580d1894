//! Renders a meme picture with its caption overlays.
//!
//! Caption coordinates are pixels in a fixed 400x225 reference canvas and
//! get scaled with the picture, so a caption sits on the same spot at any
//! widget width. Used by both the feed cards and the creation editor
//! preview (the editor adds drag handling on top of the returned rect).

use eframe::egui;

use crate::models::CaptionText;

/// Reference canvas the caption coordinates live in.
pub const BASE_WIDTH: f32 = 400.0;
pub const BASE_HEIGHT: f32 = 225.0;

const MAX_DISPLAY_WIDTH: f32 = 450.0;

pub struct MemePicture<'a> {
    texture: Option<&'a egui::TextureHandle>,
    texts: &'a [CaptionText],
}

impl<'a> MemePicture<'a> {
    pub fn new(texture: Option<&'a egui::TextureHandle>, texts: &'a [CaptionText]) -> Self {
        Self { texture, texts }
    }

    /// Draws the picture (or a loading placeholder) and its captions.
    /// Returns the drawn rect and the canvas scale factor so callers can
    /// map screen positions back to caption coordinates.
    pub fn show(&self, ui: &mut egui::Ui) -> (egui::Rect, f32) {
        let width = ui.available_width().clamp(100.0, MAX_DISPLAY_WIDTH);
        let scale = width / BASE_WIDTH;
        let size = egui::vec2(width, BASE_HEIGHT * scale);
        let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());

        let painter = ui.painter_at(rect);
        match self.texture {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(rect, 4.0, egui::Color32::from_gray(40));
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "loading picture...",
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );
            }
        }

        for text in self.texts {
            let pos = caption_screen_pos(rect, scale, text);
            let font = egui::FontId::proportional(18.0 * scale);
            // Dark offset copy behind the white text keeps captions
            // readable on light pictures.
            painter.text(
                pos + egui::vec2(1.0, 1.0),
                egui::Align2::LEFT_TOP,
                &text.content,
                font.clone(),
                egui::Color32::BLACK,
            );
            painter.text(
                pos,
                egui::Align2::LEFT_TOP,
                &text.content,
                font,
                egui::Color32::WHITE,
            );
        }

        (rect, scale)
    }
}

/// Screen position of a caption inside the drawn rect.
pub fn caption_screen_pos(rect: egui::Rect, scale: f32, text: &CaptionText) -> egui::Pos2 {
    rect.min + egui::vec2(text.x as f32 * scale, text.y as f32 * scale)
}

//! Meme creation editor: pick a picture, write a description and place
//! draggable captions on a 400x225 canvas, then submit as multipart.

use eframe::egui;
use log::{debug, warn};
use rand::Rng;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::api::MemeApi;
use crate::error::ApiResult;
use crate::models::{CaptionText, NewMeme};
use crate::session::Session;
use crate::ui::components::meme_picture::{caption_screen_pos, MemePicture, BASE_HEIGHT, BASE_WIDTH};
use crate::ui::components::FilePicker;
use crate::ui::state::{handle_unauthorized, AppState, Screen};

pub enum CreateEvent {
    Submitted(ApiResult<()>),
}

pub struct PictureSelection {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub texture: egui::TextureHandle,
}

pub struct CreateState {
    pub picture: Option<PictureSelection>,
    pub description: String,
    pub captions: Vec<CaptionText>,
    pub pending: bool,
    pub error: Option<String>,
    runtime: Runtime,
    tx: UnboundedSender<CreateEvent>,
    rx: UnboundedReceiver<CreateEvent>,
}

impl Default for CreateState {
    fn default() -> Self {
        let (tx, rx) = unbounded_channel();
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self {
            picture: None,
            description: String::new(),
            captions: Vec::new(),
            pending: false,
            error: None,
            runtime,
            tx,
            rx,
        }
    }
}

impl CreateState {
    /// A meme needs a picture and a description, and only one submission
    /// can be out at a time.
    pub fn can_submit(&self) -> bool {
        self.picture.is_some() && !self.description.trim().is_empty() && !self.pending
    }

    /// Adds a caption at a random spot on the canvas. The editor only
    /// enables this once a picture is selected.
    pub fn add_caption(&mut self) {
        let mut rng = rand::rng();
        self.captions.push(CaptionText {
            content: format!("New caption {}", self.captions.len() + 1),
            x: rng.random_range(0..BASE_WIDTH as i32),
            y: rng.random_range(0..BASE_HEIGHT as i32),
        });
    }
}

pub struct CreateScreen;

impl CreateScreen {
    pub fn show(
        ctx: &egui::Context,
        app_state: &mut AppState,
        session: &mut Session,
        api: &MemeApi,
        state: &mut CreateState,
    ) {
        Self::poll_events(app_state, session, state);

        // A file dropped anywhere on the window selects the picture.
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next() {
            Self::select_dropped_file(ctx, state, file);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Create a meme");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Back to feed").clicked() {
                        app_state.current_screen = Screen::Feed;
                    }
                });
            });
            ui.separator();

            if let Some(message) = &state.error {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    Self::show_editor(ctx, ui, api, state);
                });
        });
    }

    fn show_editor(ctx: &egui::Context, ui: &mut egui::Ui, api: &MemeApi, state: &mut CreateState) {
        let current_name = state.picture.as_ref().map(|p| p.filename.clone());
        if let Some(path) = FilePicker::new("Picture:")
            .with_current(current_name.as_deref())
            .show(ui)
        {
            Self::select_file_from_path(ctx, state, &path);
        }
        ui.weak("You can also drop an image file onto the window.");
        ui.add_space(8.0);

        let rendered = state.picture.as_ref().map(|selection| {
            MemePicture::new(Some(&selection.texture), &state.captions).show(ui)
        });
        if let Some((rect, scale)) = rendered {
            Self::drag_captions(ui, state, rect, scale);
        }
        ui.add_space(8.0);

        ui.strong("Describe your meme");
        ui.add(
            egui::TextEdit::multiline(&mut state.description)
                .desired_rows(3)
                .desired_width(450.0)
                .hint_text("Type your description here..."),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.strong("Captions");
            if ui
                .add_enabled(state.picture.is_some(), egui::Button::new("Add a caption"))
                .clicked()
            {
                state.add_caption();
            }
        });
        Self::show_caption_list(ui, state);
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.can_submit(), egui::Button::new("Submit"))
                .clicked()
            {
                Self::submit(ctx, state, api);
            }
            if state.pending {
                ui.spinner();
            }
        });
    }

    fn show_caption_list(ui: &mut egui::Ui, state: &mut CreateState) {
        let mut remove: Option<usize> = None;
        for (index, caption) in state.captions.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut caption.content).desired_width(200.0),
                );
                ui.label("x:");
                ui.add(egui::DragValue::new(&mut caption.x).range(0..=BASE_WIDTH as i32));
                ui.label("y:");
                ui.add(egui::DragValue::new(&mut caption.y).range(0..=BASE_HEIGHT as i32));
                if ui.small_button("Delete").clicked() {
                    remove = Some(index);
                }
            });
        }
        if let Some(index) = remove {
            // Later captions keep their relative order.
            state.captions.remove(index);
        }
    }

    /// Lets each caption be dragged around the rendered picture. Drag
    /// deltas are in screen pixels and get mapped back to canvas
    /// coordinates through the render scale.
    fn drag_captions(ui: &mut egui::Ui, state: &mut CreateState, rect: egui::Rect, scale: f32) {
        for (index, caption) in state.captions.iter_mut().enumerate() {
            let pos = caption_screen_pos(rect, scale, caption);
            let handle = egui::Rect::from_min_size(
                pos,
                egui::vec2(
                    (caption.content.chars().count() as f32 * 10.0).max(30.0) * scale,
                    22.0 * scale,
                ),
            );
            let response = ui.interact(
                handle,
                ui.id().with(("caption-drag", index)),
                egui::Sense::drag(),
            );
            if response.dragged() {
                let delta = response.drag_delta() / scale;
                caption.x = (caption.x + delta.x.round() as i32).clamp(0, BASE_WIDTH as i32);
                caption.y = (caption.y + delta.y.round() as i32).clamp(0, BASE_HEIGHT as i32);
            }
        }
    }

    fn select_file_from_path(ctx: &egui::Context, state: &mut CreateState, path: &std::path::Path) {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "picture".to_string());
        match std::fs::read(path) {
            Ok(bytes) => Self::select_picture(ctx, state, filename, bytes),
            Err(e) => {
                warn!("Failed to read {path:?}: {e}");
                state.error = Some(format!("Could not read the file: {e}"));
            }
        }
    }

    fn select_dropped_file(ctx: &egui::Context, state: &mut CreateState, file: egui::DroppedFile) {
        if let Some(path) = &file.path {
            Self::select_file_from_path(ctx, state, path);
        } else if let Some(bytes) = &file.bytes {
            Self::select_picture(ctx, state, file.name.clone(), bytes.to_vec());
        }
    }

    fn select_picture(ctx: &egui::Context, state: &mut CreateState, filename: String, bytes: Vec<u8>) {
        match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                let texture =
                    ctx.load_texture("create-preview", color_image, egui::TextureOptions::LINEAR);
                debug!("Selected picture {filename} ({} bytes)", bytes.len());
                state.picture = Some(PictureSelection {
                    filename,
                    bytes,
                    texture,
                });
                state.error = None;
            }
            Err(e) => {
                warn!("Failed to decode {filename}: {e}");
                state.error = Some("That file does not look like an image.".to_string());
            }
        }
    }

    /// Sends the meme once. A failure keeps the form intact so the user
    /// can resubmit.
    fn submit(ctx: &egui::Context, state: &mut CreateState, api: &MemeApi) {
        let Some(selection) = &state.picture else {
            return;
        };
        let new_meme = NewMeme {
            picture: selection.bytes.clone(),
            picture_filename: selection.filename.clone(),
            description: state.description.trim().to_string(),
            texts: state.captions.clone(),
        };
        state.pending = true;
        state.error = None;

        let api = api.clone();
        let tx = state.tx.clone();
        let ctx = ctx.clone();
        state.runtime.spawn(async move {
            let result = api.create_meme(&new_meme).await;
            let _ = tx.send(CreateEvent::Submitted(result));
            ctx.request_repaint();
        });
    }

    fn poll_events(app_state: &mut AppState, session: &mut Session, state: &mut CreateState) {
        while let Ok(event) = state.rx.try_recv() {
            match event {
                CreateEvent::Submitted(Ok(())) => {
                    log::info!("Meme created");
                    *state = CreateState::default();
                    app_state.current_screen = Screen::Feed;
                }
                CreateEvent::Submitted(Err(e)) if e.is_unauthorized() => {
                    state.pending = false;
                    handle_unauthorized(app_state, session, Screen::Create);
                }
                CreateEvent::Submitted(Err(e)) => {
                    warn!("Failed to create meme: {e}");
                    state.pending = false;
                    state.error = Some(format!("Could not create your meme: {e}"));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;

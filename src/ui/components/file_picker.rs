use std::path::PathBuf;

use eframe::egui;

/// Browse-button file selector used by the meme editor to pick a picture
/// when drag-and-drop is not convenient.
pub struct FilePicker<'a> {
    label: &'a str,
    filter_name: &'a str,
    extensions: &'a [&'a str],
    current: Option<&'a str>,
}

impl<'a> FilePicker<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            filter_name: "Images",
            extensions: &["png", "jpg", "jpeg", "gif", "webp"],
            current: None,
        }
    }

    /// Name of the currently selected file, shown next to the button.
    pub fn with_current(mut self, current: Option<&'a str>) -> Self {
        self.current = current;
        self
    }

    /// Shows the widget. Returns the newly picked path, if any.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<PathBuf> {
        let mut picked = None;
        ui.horizontal(|ui| {
            ui.label(self.label);
            if ui.button("Browse").clicked() {
                picked = rfd::FileDialog::new()
                    .add_filter(self.filter_name, self.extensions)
                    .pick_file();
            }
            match self.current {
                Some(name) => ui.label(name),
                None => ui.weak("no file selected"),
            };
        });
        picked
    }
}

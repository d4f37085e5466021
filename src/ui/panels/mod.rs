mod library;
mod resynth;
mod tone;

pub use library::LibraryPanel;
pub use resynth::ResynthPanel;
pub use tone::TonePanel;

use egui::{Color32, Ui};

/// Last outcome shown under a panel's buttons
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    Info(String),
    Error(String),
}

impl Status {
    pub fn show(&self, ui: &mut Ui) {
        match self {
            Status::Idle => {}
            Status::Info(text) => {
                ui.label(text);
            }
            Status::Error(text) => {
                ui.colored_label(Color32::from_rgb(230, 80, 80), text);
            }
        }
    }
}

/// Text field plus a "Browse..." button opening a folder picker
pub(crate) fn folder_picker(ui: &mut Ui, label: &str, path: &mut std::path::PathBuf) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut text = path.display().to_string();
        if ui.text_edit_singleline(&mut text).changed() {
            *path = text.into();
        }
        if ui.button("Browse...").clicked() {
            let mut dialog = rfd::FileDialog::new();
            if path.is_dir() {
                dialog = dialog.set_directory(&*path);
            }
            if let Some(folder) = dialog.pick_folder() {
                *path = folder;
            }
        }
    });
}

use egui::Ui;
use std::path::PathBuf;
use std::thread;

use crate::core::oscillator::Waveform;
use crate::messaging::{JobMessage, MessageBus};
use crate::tools::{generate_library, LibraryRequest, LibrarySettings};

use super::{folder_picker, Status};

pub struct LibraryPanel {
    settings: LibrarySettings,
    selected: Vec<(Waveform, bool)>,
    fade_out: bool,
    echo: bool,
    output_dir: PathBuf,
    bus: MessageBus,
    progress: Option<(usize, usize)>,
    status: Status,
}

impl LibraryPanel {
    pub fn new(settings: LibrarySettings, output_dir: PathBuf) -> Self {
        Self {
            settings,
            selected: Waveform::ALL.iter().map(|&w| (w, w == Waveform::Sine)).collect(),
            fade_out: true,
            echo: false,
            output_dir,
            bus: MessageBus::new(),
            progress: None,
            status: Status::Idle,
        }
    }

    pub fn request(&self) -> LibraryRequest {
        LibraryRequest {
            waveforms: self.selected.iter().filter(|(_, on)| *on).map(|(w, _)| *w).collect(),
            fade_out: self.fade_out,
            echo: self.echo,
            output_dir: self.output_dir.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.progress.is_some()
    }

    fn process_messages(&mut self) {
        for msg in self.bus.drain(256) {
            match msg {
                JobMessage::Progress { done, total, .. } => self.progress = Some((done, total)),
                JobMessage::Finished(text) => {
                    self.progress = None;
                    self.status = Status::Info(text);
                }
                JobMessage::Failed(text) => {
                    self.progress = None;
                    self.status = Status::Error(text);
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        self.process_messages();

        ui.heading("Instrument Note Generator");
        ui.label("Select waveforms:");
        for (waveform, on) in &mut self.selected {
            ui.checkbox(on, waveform.name());
        }
        ui.checkbox(&mut self.fade_out, "Apply Fade-Out");
        ui.checkbox(&mut self.echo, "Apply Reverb");

        folder_picker(ui, "Output folder:", &mut self.output_dir);

        ui.add_enabled_ui(!self.is_running(), |ui| {
            if ui.button("Generate Notes").clicked() {
                self.start();
            }
        });

        if let Some((done, total)) = self.progress {
            ui.add(egui::ProgressBar::new(done as f32 / total.max(1) as f32).text(format!("{}/{}", done, total)));
        }
        self.status.show(ui);
    }

    fn start(&mut self) {
        let request = self.request();
        if request.waveforms.is_empty() {
            self.status = Status::Error(crate::core::error::SynthError::NoWaveformSelected.to_string());
            return;
        }

        let settings = self.settings.clone();
        let sender = self.bus.sender();
        self.progress = Some((0, 0));
        self.status = Status::Idle;

        thread::spawn(move || {
            let result = generate_library(&request, &settings, |p| {
                sender
                    .send(JobMessage::Progress {
                        done: p.done,
                        total: p.total,
                        label: p.path.display().to_string(),
                    })
                    .ok();
            });
            let msg = match result {
                Ok(report) => JobMessage::Finished(format!(
                    "Notes generated successfully: {} files in {}",
                    report.files_written,
                    report.output_dir.display()
                )),
                Err(e) => JobMessage::Failed(e.to_string()),
            };
            sender.send(msg).ok();
        });
    }
}

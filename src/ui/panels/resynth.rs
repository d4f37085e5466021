use egui::Ui;
use std::thread;

use crate::core::oscillator::Waveform;
use crate::messaging::{JobMessage, MessageBus};
use crate::tools::resynth::{self, ResynthConfig};
use crate::ui::components::{SignalKind, SignalPlot};
use crate::utils::audio_visualizer::waveform_cycle;

use super::{folder_picker, Status};

pub struct ResynthPanel {
    config: ResynthConfig,
    bus: MessageBus,
    progress: Option<(usize, usize, String)>,
    status: Status,
}

impl ResynthPanel {
    pub fn new(config: ResynthConfig) -> Self {
        Self {
            config,
            bus: MessageBus::new(),
            progress: None,
            status: Status::Idle,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        for msg in self.bus.drain(256) {
            match msg {
                JobMessage::Progress { done, total, label } => self.progress = Some((done, total, label)),
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

        ui.heading("Re-synthesize Recordings");
        folder_picker(ui, "Input folder:", &mut self.config.input_dir);
        folder_picker(ui, "Output folder:", &mut self.config.output_dir);

        egui::ComboBox::new("resynth_waveform", "Waveform")
            .selected_text(self.config.waveform.name())
            .show_ui(ui, |ui| {
                for waveform in Waveform::ALL {
                    ui.selectable_value(&mut self.config.waveform, waveform, waveform.name());
                }
            });
        SignalPlot::new(waveform_cycle(self.config.waveform, 128), SignalKind::Cycle)
            .height(60.0)
            .show(ui, "resynth_waveform_cycle");
        ui.add(egui::Slider::new(&mut self.config.fade_fraction, 0.0..=1.0).text("Fade-out fraction"));

        ui.add_enabled_ui(self.progress.is_none(), |ui| {
            if ui.button("Process Folder").clicked() {
                self.start();
            }
        });

        if let Some((done, total, label)) = &self.progress {
            ui.add(egui::ProgressBar::new(*done as f32 / (*total).max(1) as f32).text(label.as_str()));
        }
        self.status.show(ui);
    }

    fn start(&mut self) {
        let config = self.config.clone();
        let sender = self.bus.sender();
        self.progress = Some((0, 0, String::new()));
        self.status = Status::Idle;

        thread::spawn(move || {
            let result = resynth::run(&config, |index, total, path| {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                sender
                    .send(JobMessage::Progress { done: index, total, label: format!("Processing {}", name) })
                    .ok();
            });
            let msg = match result {
                Ok(report) => JobMessage::Finished(format!(
                    "Processed {} files, skipped {} into {}",
                    report.processed.len(),
                    report.skipped.len(),
                    config.output_dir.display()
                )),
                Err(e) => JobMessage::Failed(e.to_string()),
            };
            sender.send(msg).ok();
        });
    }
}

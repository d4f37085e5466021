use egui::Ui;

use crate::audio::{PlaybackEvent, PreviewPlayer};
use crate::core::analyzer::spectrum_display;
use crate::core::oscillator::{tone_table_notes, SharpStyle, Waveform};
use crate::core::synth::normalize::peak;
use crate::tools::{ToneGeneratorState, ToneSettings};
use crate::ui::components::{EnvelopeEditor, SignalKind, SignalPlot};
use crate::utils::audio_visualizer;
use crate::utils::helpers::{amplitude_to_db, format_frequency, format_time};

use super::{folder_picker, Status};

const PLOT_POINTS: usize = 600;
const SPECTRUM_POINTS: usize = 400;

/// Plots derived from one render, kept until the controls change
struct Rendered {
    state: ToneGeneratorState,
    waveform: Vec<[f32; 2]>,
    spectrum: Vec<[f32; 2]>,
    peak: f32,
}

pub struct TonePanel {
    state: ToneGeneratorState,
    settings: ToneSettings,
    note_names: Vec<String>,
    player: PreviewPlayer,
    rendered: Option<Rendered>,
    status: Status,
}

impl TonePanel {
    pub fn new(settings: ToneSettings, state: ToneGeneratorState) -> Self {
        Self {
            state,
            settings,
            note_names: tone_table_notes().iter().map(|n| n.name(SharpStyle::Sharp)).collect(),
            player: PreviewPlayer::new(),
            rendered: None,
            status: Status::Idle,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        match self.player.poll() {
            Some(PlaybackEvent::Error(e)) => self.status = Status::Error(format!("Playback failed: {}", e)),
            Some(PlaybackEvent::Finished) | None => {}
        }

        ui.heading("Tone Generator");

        ui.horizontal(|ui| {
            egui::ComboBox::new("tone_waveform", "Waveform")
                .selected_text(self.state.waveform.name())
                .show_ui(ui, |ui| {
                    for waveform in Waveform::ALL {
                        ui.selectable_value(&mut self.state.waveform, waveform, waveform.name());
                    }
                });

            egui::ComboBox::new("tone_note", "Note")
                .selected_text(self.state.note.as_str())
                .height(300.0)
                .show_ui(ui, |ui| {
                    for name in &self.note_names {
                        ui.selectable_value(&mut self.state.note, name.clone(), name);
                    }
                });

            if let Ok(freq) = self.state.frequency() {
                ui.label(format_frequency(freq));
            }
        });

        ui.checkbox(&mut self.state.echo_enabled, format!("Reverb ({})", self.settings.echo.name()));

        ui.collapsing("Envelope (ADSR)", |ui| {
            let width = ui.available_width().min(400.0);
            if let Some(envelope) = EnvelopeEditor::new(&self.state.envelope, self.settings.duration)
                .size(width, 80.0)
                .show(ui)
            {
                self.state.envelope = envelope;
            }
        });

        self.refresh_render();
        if let Some(rendered) = &self.rendered {
            ui.label(format!(
                "{} at {} Hz, peak {:.1} dB",
                format_time(self.settings.duration),
                self.settings.sample_rate,
                amplitude_to_db(rendered.peak)
            ));
            SignalPlot::new(rendered.waveform.clone(), SignalKind::Waveform)
                .height(140.0)
                .show(ui, "tone_waveform_plot");
            ui.collapsing("Spectrum", |ui| {
                SignalPlot::new(rendered.spectrum.clone(), SignalKind::Spectrum)
                    .height(120.0)
                    .show(ui, "tone_spectrum_plot");
            });
        }

        folder_picker(ui, "Output folder:", &mut self.state.output_dir);

        ui.horizontal(|ui| {
            if ui.button("▶ Preview").clicked() {
                self.preview();
            }
            if self.player.is_playing() && ui.button("⏹ Stop").clicked() {
                self.player.stop();
            }
            if ui.button("Generate WAV").clicked() {
                self.status = match self.state.generate_wav(&self.settings) {
                    Ok(path) => Status::Info(format!("Saved to {}", path.display())),
                    Err(e) => Status::Error(e.to_string()),
                };
            }
        });

        self.status.show(ui);
    }

    fn preview(&mut self) {
        let result = self
            .state
            .render(&self.settings)
            .map_err(anyhow::Error::from)
            .and_then(|samples| self.player.play(samples, self.settings.sample_rate));
        if let Err(e) = result {
            log::warn!("preview failed: {:#}", e);
            self.status = Status::Error(e.to_string());
        }
    }

    /// Re-render only when the controls change
    fn refresh_render(&mut self) {
        if self.rendered.as_ref().is_some_and(|r| r.state == self.state) {
            return;
        }
        let rate = self.settings.sample_rate;
        self.rendered = match self.state.render(&self.settings) {
            Ok(samples) => Some(Rendered {
                state: self.state.clone(),
                waveform: audio_visualizer::buffer_points(&samples, rate, PLOT_POINTS),
                spectrum: spectrum_display(&samples, rate, SPECTRUM_POINTS),
                peak: peak(&samples),
            }),
            Err(e) => {
                log::debug!("cannot render {}: {}", self.state.note, e);
                None
            }
        };
    }
}

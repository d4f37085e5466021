//! Bulk instrument library: every note from A0 to C8 for each chosen waveform

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::core::error::{Result, SynthError};
use crate::core::oscillator::{midi_note_to_freq, EnvelopePolicy, Note, SharpStyle, Waveform, LIBRARY_MIDI_RANGE};
use crate::core::synth::{write_wav, Echo, Normalization, SampleEncoding, ToneSpec, DEFAULT_SAMPLE_RATE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub sample_rate: u32,
    pub duration: f32,
    pub fade_fraction: f32,
    pub echo: Echo,
    pub first_midi: u8,
    pub last_midi: u8,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: 1.5,
            fade_fraction: 0.7,
            echo: Echo::LIBRARY_DEFAULT,
            first_midi: *LIBRARY_MIDI_RANGE.start(),
            last_midi: *LIBRARY_MIDI_RANGE.end(),
        }
    }
}

/// One run of the generator, as chosen in the UI
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryRequest {
    pub waveforms: Vec<Waveform>,
    pub fade_out: bool,
    pub echo: bool,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryProgress {
    pub done: usize,
    pub total: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryReport {
    pub files_written: usize,
    pub output_dir: PathBuf,
}

/// `{base}/{waveform}/{note}{octave}.wav`, sharps spelled with a 'b'
pub fn library_path(base: &Path, waveform: Waveform, note: Note) -> PathBuf {
    base.join(waveform.name())
        .join(format!("{}.wav", note.name(SharpStyle::FlatLetter)))
}

impl LibraryRequest {
    pub fn tone_spec(&self, settings: &LibrarySettings, waveform: Waveform, midi_note: u8) -> ToneSpec {
        let envelope = if self.fade_out {
            EnvelopePolicy::FadeOut(settings.fade_fraction)
        } else {
            EnvelopePolicy::None
        };
        ToneSpec::new(waveform, midi_note_to_freq(midi_note))
            .duration(settings.duration)
            .sample_rate(settings.sample_rate)
            .envelope(envelope)
            .echo(self.echo.then_some(settings.echo))
            .normalization(Normalization::Peak)
    }
}

/// Render and write the whole library, calling `on_progress` after each file.
pub fn generate_library(
    request: &LibraryRequest,
    settings: &LibrarySettings,
    mut on_progress: impl FnMut(&LibraryProgress),
) -> Result<LibraryReport> {
    if request.waveforms.is_empty() {
        return Err(SynthError::NoWaveformSelected);
    }

    for waveform in &request.waveforms {
        let folder = request.output_dir.join(waveform.name());
        fs::create_dir_all(&folder).map_err(|e| SynthError::io(&folder, e))?;
    }

    let notes = settings.first_midi..=settings.last_midi;
    let total = notes.clone().count() * request.waveforms.len();
    let mut done = 0;

    for midi_note in notes {
        let note = Note::from_midi(midi_note);
        for &waveform in &request.waveforms {
            let samples = request.tone_spec(settings, waveform, midi_note).render();
            let path = library_path(&request.output_dir, waveform, note);
            write_wav(&path, &samples, settings.sample_rate, SampleEncoding::Pcm16)?;

            done += 1;
            log::debug!("wrote {} ({}/{})", path.display(), done, total);
            on_progress(&LibraryProgress { done, total, path });
        }
    }

    log::info!("Notes generated successfully: {} files in {}", done, request.output_dir.display());
    Ok(LibraryReport {
        files_written: done,
        output_dir: request.output_dir.clone(),
    })
}

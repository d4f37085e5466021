//! Batch re-synthesis: replace each recording with a synthetic tone at its pitch

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::core::analyzer::estimate_pitch;
use crate::core::error::{Result, SynthError};
use crate::core::oscillator::{freq_to_midi_note, EnvelopePolicy, Note, Waveform};
use crate::core::synth::normalize::rms;
use crate::core::synth::{read_mono, write_wav, Normalization, SampleEncoding, ToneSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResynthSettings {
    pub waveform: Waveform,
    pub fade_fraction: f32,
}

impl Default for ResynthSettings {
    fn default() -> Self {
        Self {
            waveform: Waveform::Square,
            fade_fraction: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResynthConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub waveform: Waveform,
    pub fade_fraction: f32,
}

impl ResynthConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, settings: &ResynthSettings) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            waveform: settings.waveform,
            fade_fraction: settings.fade_fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResynthOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frequency: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResynthReport {
    pub processed: Vec<ResynthOutcome>,
    pub skipped: Vec<PathBuf>,
}

/// `.wav` files directly inside `dir` (extension matched case-insensitively), sorted by name.
pub fn list_wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SynthError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SynthError::io(dir, e))?.path();
        let is_wav = path
            .extension()
            .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case("wav"));
        if path.is_file() && is_wav {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Re-synthesize one file. Returns the estimated pitch, or `None` when the
/// input holds no samples and nothing was written.
///
/// A 0 Hz estimate (DC dominates the spectrum) writes a silent file of the
/// same length; a flat sawtooth or triangle would otherwise come out as a
/// constant offset.
pub fn resynthesize_file(input: &Path, output: &Path, waveform: Waveform, fade_fraction: f32) -> Result<Option<f32>> {
    let (original, sample_rate) = read_mono(input)?;
    let Some(frequency) = estimate_pitch(&original, sample_rate) else {
        return Ok(None);
    };

    let samples = if frequency > 0.0 {
        ToneSpec::new(waveform, frequency)
            .sample_rate(sample_rate)
            .envelope(EnvelopePolicy::FadeOut(fade_fraction))
            .normalization(Normalization::MatchRms(rms(&original)))
            .render_exact(original.len())
    } else {
        vec![0.0; original.len()]
    };

    write_wav(output, &samples, sample_rate, SampleEncoding::Pcm16)?;
    Ok(Some(frequency))
}

/// Process every WAV in the input folder; the first I/O error aborts the run.
pub fn run(config: &ResynthConfig, mut on_file: impl FnMut(usize, usize, &Path)) -> Result<ResynthReport> {
    let files = list_wav_files(&config.input_dir)?;
    fs::create_dir_all(&config.output_dir).map_err(|e| SynthError::io(&config.output_dir, e))?;

    let mut report = ResynthReport::default();
    for (index, input) in files.iter().enumerate() {
        on_file(index, files.len(), input);
        let Some(file_name) = input.file_name() else {
            continue;
        };
        let output = config.output_dir.join(file_name);

        match resynthesize_file(input, &output, config.waveform, config.fade_fraction)? {
            Some(frequency) => {
                if frequency <= 0.0 {
                    log::warn!("{}: strongest component is DC, output is silent", input.display());
                }
                log::info!(
                    "Processing {}: {:.1} Hz (~{})",
                    file_name.to_string_lossy(),
                    frequency,
                    Note::from_midi(freq_to_midi_note(frequency))
                );
                report.processed.push(ResynthOutcome {
                    input: input.clone(),
                    output,
                    frequency,
                });
            }
            None => {
                log::warn!("skipping {}: no samples", input.display());
                report.skipped.push(input.clone());
            }
        }
    }

    Ok(report)
}

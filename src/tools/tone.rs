//! Single-note tone generator: ADSR, optional feedback echo, float WAV output

use std::path::PathBuf;

use serde::{Serialize, Deserialize};

use crate::core::error::{Result, SynthError};
use crate::core::oscillator::{Envelope, EnvelopePolicy, Note, NoteConvention, SharpStyle, Waveform, TONE_OCTAVES};
use crate::core::synth::{write_wav, Echo, Normalization, SampleEncoding, ToneSpec, DEFAULT_SAMPLE_RATE};

/// Render settings shared by every tone the generator produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneSettings {
    pub sample_rate: u32,
    pub duration: f32,
    pub gain: f32,
    pub echo: Echo,
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: 2.0,
            gain: 0.5,
            echo: Echo::TONE_DEFAULT,
        }
    }
}

/// What the user has dialled in
#[derive(Debug, Clone, PartialEq)]
pub struct ToneGeneratorState {
    pub waveform: Waveform,
    pub note: String,
    pub echo_enabled: bool,
    pub envelope: Envelope,
    pub output_dir: PathBuf,
}

impl Default for ToneGeneratorState {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            note: "A4".to_string(),
            echo_enabled: false,
            envelope: Envelope::default(),
            output_dir: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl ToneGeneratorState {
    /// The selected note, limited to the octaves the generator offers
    pub fn note(&self) -> Result<Note> {
        let note: Note = self.note.parse()?;
        if !TONE_OCTAVES.contains(&note.octave) {
            return Err(SynthError::UnknownNote(self.note.clone()));
        }
        Ok(note)
    }

    /// Frequency of the selected note; the tone generator tunes C4 to 440 Hz.
    pub fn frequency(&self) -> Result<f32> {
        Ok(self.note()?.frequency(NoteConvention::ToneTable))
    }

    pub fn tone_spec(&self, settings: &ToneSettings) -> Result<ToneSpec> {
        Ok(ToneSpec::new(self.waveform, self.frequency()?)
            .duration(settings.duration)
            .sample_rate(settings.sample_rate)
            .envelope(EnvelopePolicy::Adsr(self.envelope))
            .echo(self.echo_enabled.then_some(settings.echo))
            .normalization(Normalization::Gain(settings.gain)))
    }

    pub fn render(&self, settings: &ToneSettings) -> Result<Vec<f32>> {
        Ok(self.tone_spec(settings)?.render())
    }

    /// `{output_dir}/{note}_{waveform}.wav`
    pub fn output_path(&self) -> Result<PathBuf> {
        let note = self.note()?.name(SharpStyle::Sharp);
        Ok(self.output_dir.join(format!("{}_{}.wav", note, self.waveform)))
    }

    /// Render and save the tone as 32-bit float, returning where it went
    pub fn generate_wav(&self, settings: &ToneSettings) -> Result<PathBuf> {
        let samples = self.render(settings)?;
        let path = self.output_path()?;
        write_wav(&path, &samples, settings.sample_rate, SampleEncoding::Float32)?;
        log::info!("Saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::synth::normalize::peak;

    #[test]
    fn default_state_renders_two_seconds_at_half_scale() {
        let state = ToneGeneratorState::default();
        let samples = state.render(&ToneSettings::default()).unwrap();
        assert_eq!(samples.len(), 88200);
        assert_eq!(samples[0], 0.0);
        assert!(peak(&samples) <= 0.5 + 1e-6);
        assert!(peak(&samples) > 0.3);
    }

    #[test]
    fn echo_toggle_selects_feedback_echo() {
        let mut state = ToneGeneratorState::default();
        let settings = ToneSettings::default();
        assert_eq!(state.tone_spec(&settings).unwrap().echo, None);
        state.echo_enabled = true;
        assert_eq!(state.tone_spec(&settings).unwrap().echo, Some(Echo::TONE_DEFAULT));
    }

    #[test]
    fn output_name_joins_note_and_waveform() {
        let state = ToneGeneratorState {
            waveform: Waveform::Saw,
            note: "C#3".to_string(),
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(state.output_path().unwrap(), PathBuf::from("out/C#3_sawtooth.wav"));
    }

    #[test]
    fn unknown_note_is_rejected() {
        let state = ToneGeneratorState {
            note: "X9".to_string(),
            ..Default::default()
        };
        assert!(matches!(state.render(&ToneSettings::default()), Err(SynthError::UnknownNote(_))));
    }

    #[test]
    fn octaves_outside_the_table_are_rejected() {
        for name in ["C8", "C9", "C127", "C-1"] {
            let state = ToneGeneratorState {
                note: name.to_string(),
                ..Default::default()
            };
            match state.frequency() {
                Err(SynthError::UnknownNote(note)) => assert_eq!(note, name),
                other => panic!("{} gave {:?}", name, other),
            }
        }
        for name in ["C0", "B7"] {
            let state = ToneGeneratorState {
                note: name.to_string(),
                ..Default::default()
            };
            assert!(state.frequency().unwrap().is_finite());
        }
    }

    #[test]
    fn generate_writes_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let state = ToneGeneratorState {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let settings = ToneSettings {
            duration: 0.25,
            ..Default::default()
        };
        let path = state.generate_wav(&settings).unwrap();
        assert_eq!(path, dir.path().join("A4_sine.wav"));

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
        assert_eq!(reader.spec().bits_per_sample, 32);
        assert_eq!(reader.len(), 11025);
    }
}

pub mod effects;
pub mod normalize;
pub mod samples;

pub use effects::Echo;
pub use normalize::Normalization;
pub use samples::{read_mono, write_wav, SampleEncoding};

use crate::core::oscillator::{generate_samples, sample_count, EnvelopePolicy, Waveform};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Everything needed to render one tone
///
/// Stages always run in the same order: oscillator, envelope, echo,
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub frequency: f32,
    pub duration: f32,
    pub sample_rate: u32,
    pub envelope: EnvelopePolicy,
    pub echo: Option<Echo>,
    pub normalization: Normalization,
}

impl ToneSpec {
    /// One second at 44.1 kHz, unshaped
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            waveform,
            frequency,
            duration: 1.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            envelope: EnvelopePolicy::None,
            echo: None,
            normalization: Normalization::None,
        }
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn envelope(mut self, envelope: EnvelopePolicy) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn echo(mut self, echo: Option<Echo>) -> Self {
        self.echo = echo;
        self
    }

    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn len(&self) -> usize {
        sample_count(self.duration, self.sample_rate)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> Vec<f32> {
        self.render_exact(self.len())
    }

    /// Render `num_samples` samples, ignoring `duration`.
    pub fn render_exact(&self, num_samples: usize) -> Vec<f32> {
        let mut samples = generate_samples(self.frequency, num_samples, self.sample_rate, self.waveform);
        self.shape(&mut samples);
        samples
    }

    /// Run the post-oscillator stages over an existing buffer
    pub fn shape(&self, samples: &mut [f32]) {
        self.envelope.apply(samples, self.sample_rate);
        if let Some(echo) = &self.echo {
            echo.apply(samples, self.sample_rate);
        }
        self.normalization.apply(samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oscillator::Envelope;
    use crate::core::synth::normalize::peak;

    #[test]
    fn render_length_follows_duration() {
        let spec = ToneSpec::new(Waveform::Square, 220.0)
            .duration(1.5)
            .envelope(EnvelopePolicy::FadeOut(0.7))
            .echo(Some(Echo::LIBRARY_DEFAULT))
            .normalization(Normalization::Peak);
        assert_eq!(spec.len(), 66150);
        assert_eq!(spec.render().len(), 66150);
        assert_eq!(spec.render_exact(1234).len(), 1234);
    }

    #[test]
    fn peak_normalized_render_reaches_unity() {
        for waveform in Waveform::ALL {
            let samples = ToneSpec::new(waveform, 440.0)
                .duration(0.5)
                .envelope(EnvelopePolicy::FadeOut(0.7))
                .echo(Some(Echo::LIBRARY_DEFAULT))
                .normalization(Normalization::Peak)
                .render();
            assert!((peak(&samples) - 1.0).abs() < 1e-6, "{} peak off", waveform);
        }
    }

    #[test]
    fn adsr_render_starts_silent_and_ends_silent() {
        let samples = ToneSpec::new(Waveform::Saw, 440.0)
            .duration(2.0)
            .envelope(EnvelopePolicy::Adsr(Envelope::default()))
            .normalization(Normalization::Gain(0.5))
            .render();
        assert_eq!(samples[0], 0.0);
        assert!(samples[samples.len() - 1].abs() < 1e-6);
        assert!(peak(&samples) <= 0.5 + 1e-6);
    }

    #[test]
    fn silence_stays_silent_through_all_stages() {
        let samples = ToneSpec::new(Waveform::Silence, 440.0)
            .envelope(EnvelopePolicy::Adsr(Envelope::default()))
            .echo(Some(Echo::TONE_DEFAULT))
            .normalization(Normalization::Peak)
            .render();
        assert_eq!(samples.len(), 44100);
        assert!(samples.iter().all(|&s| s == 0.0));
    }
}

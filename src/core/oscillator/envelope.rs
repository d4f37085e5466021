use serde::{Serialize, Deserialize};

/// Attack/decay/release in seconds, sustain as a level in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.2,
        }
    }
}

impl Envelope {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self { attack, decay, sustain, release }
    }

    /// Build the gain curve for a buffer of `len` samples.
    ///
    /// Attack ramps up from exactly 0 and decay falls to the sustain level.
    /// Sustain fills whatever is left. Release starts at the sustain level and
    /// ends at exactly 0. When the
    /// three ramps are longer than the buffer the sustain is dropped and the
    /// tail is cut; when they are shorter the curve is padded with silence.
    pub fn curve(&self, len: usize, sample_rate: u32) -> Vec<f32> {
        let attack_len = segment_len(self.attack, sample_rate);
        let decay_len = segment_len(self.decay, sample_rate);
        let release_len = segment_len(self.release, sample_rate);
        let sustain_len = len.saturating_sub(attack_len + decay_len + release_len);
        let sustain = self.sustain.clamp(0.0, 1.0);

        let mut curve = Vec::with_capacity(attack_len + decay_len + sustain_len + release_len);
        curve.extend((0..attack_len).map(|k| k as f32 / attack_len as f32));
        curve.extend((0..decay_len).map(|k| 1.0 + (sustain - 1.0) * (k as f32 / decay_len as f32)));
        curve.extend(std::iter::repeat(sustain).take(sustain_len));
        let release_span = release_len.saturating_sub(1).max(1) as f32;
        curve.extend((0..release_len).map(|k| {
            if k + 1 == release_len {
                0.0
            } else {
                sustain * (1.0 - k as f32 / release_span)
            }
        }));
        curve.resize(len, 0.0);
        curve
    }

    pub fn apply(&self, samples: &mut [f32], sample_rate: u32) {
        let curve = self.curve(samples.len(), sample_rate);
        for (sample, gain) in samples.iter_mut().zip(curve) {
            *sample *= gain;
        }
    }
}

fn segment_len(seconds: f32, sample_rate: u32) -> usize {
    (seconds.max(0.0) as f64 * sample_rate as f64).round() as usize
}

/// Gain curve holding full level, then ramping the last `fraction` of the buffer from 1 to 0.
pub fn fade_out_curve(len: usize, fraction: f32) -> Vec<f32> {
    let fade_len = ((len as f64 * fraction.clamp(0.0, 1.0) as f64).round() as usize).min(len);
    let hold_len = len - fade_len;

    let mut curve = vec![1.0; hold_len];
    curve.extend((0..fade_len).map(|k| {
        if fade_len > 1 {
            1.0 - k as f32 / (fade_len - 1) as f32
        } else {
            1.0
        }
    }));
    curve
}

pub fn apply_fade_out(samples: &mut [f32], fraction: f32) {
    let curve = fade_out_curve(samples.len(), fraction);
    for (sample, gain) in samples.iter_mut().zip(curve) {
        *sample *= gain;
    }
}

/// Amplitude shaping applied after the oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvelopePolicy {
    None,
    Adsr(Envelope),
    FadeOut(f32),
}

impl EnvelopePolicy {
    pub fn apply(&self, samples: &mut [f32], sample_rate: u32) {
        match self {
            EnvelopePolicy::None => {}
            EnvelopePolicy::Adsr(envelope) => envelope.apply(samples, sample_rate),
            EnvelopePolicy::FadeOut(fraction) => apply_fade_out(samples, *fraction),
        }
    }

    /// The gain curve this policy multiplies into a buffer of `len` samples
    pub fn curve(&self, len: usize, sample_rate: u32) -> Vec<f32> {
        match self {
            EnvelopePolicy::None => vec![1.0; len],
            EnvelopePolicy::Adsr(envelope) => envelope.curve(len, sample_rate),
            EnvelopePolicy::FadeOut(fraction) => fade_out_curve(len, *fraction),
        }
    }
}

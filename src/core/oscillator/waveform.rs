use serde::{Serialize, Deserialize};
use std::convert::Infallible;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

// Types of waveforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
    Silence, // Produced by any unrecognised waveform name
}

impl Waveform {
    /// Selectable shapes, in the order the tools list them
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Saw,
    ];

    /// Lower-case name, also used as the library sub-folder name
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Saw => "sawtooth",
            Waveform::Triangle => "triangle",
            Waveform::Silence => "silence",
        }
    }

    /// Permissive lookup: names that match no shape render as silence.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sine" => Waveform::Sine,
            "square" => Waveform::Square,
            "sawtooth" | "saw" => Waveform::Saw,
            "triangle" => Waveform::Triangle,
            "silence" => Waveform::Silence,
            other => {
                log::warn!("unknown waveform '{}', rendering silence", other);
                Waveform::Silence
            }
        }
    }

    /// Value of the shape at `cycles` = frequency × time.
    pub fn sample(&self, cycles: f64) -> f32 {
        let value = match self {
            Waveform::Sine => (TAU * cycles).sin(),
            Waveform::Square => {
                let s = (TAU * cycles).sin();
                if s > 0.0 {
                    1.0
                } else if s < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            Waveform::Saw => 2.0 * cycles.rem_euclid(1.0) - 1.0,
            Waveform::Triangle => 2.0 * (2.0 * cycles.rem_euclid(1.0) - 1.0).abs() - 1.0,
            Waveform::Silence => 0.0,
        };
        value as f32
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Waveform::from_name(s))
    }
}

impl From<String> for Waveform {
    fn from(name: String) -> Self {
        Waveform::from_name(&name)
    }
}

impl From<Waveform> for String {
    fn from(waveform: Waveform) -> Self {
        waveform.name().to_string()
    }
}

/// Number of samples covering `duration` seconds, rounded to the nearest sample.
pub fn sample_count(duration: f32, sample_rate: u32) -> usize {
    (duration.max(0.0) as f64 * sample_rate as f64).round() as usize
}

/// Generate `duration` seconds of `waveform` at `frequency` Hz.
pub fn generate_waveform(frequency: f32, duration: f32, sample_rate: u32, waveform: Waveform) -> Vec<f32> {
    generate_samples(frequency, sample_count(duration, sample_rate), sample_rate, waveform)
}

/// Generate exactly `num_samples` samples of `waveform`, sample `i` taken at `i / sample_rate`.
pub fn generate_samples(frequency: f32, num_samples: usize, sample_rate: u32, waveform: Waveform) -> Vec<f32> {
    if waveform == Waveform::Silence || sample_rate == 0 {
        return vec![0.0; num_samples];
    }

    let frequency = frequency as f64;
    let sample_rate = sample_rate as f64;
    (0..num_samples)
        .map(|i| waveform.sample(frequency * i as f64 / sample_rate))
        .collect()
}

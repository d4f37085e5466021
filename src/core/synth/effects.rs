use serde::{Serialize, Deserialize};

/// Fixed-delay echo, in one of two non-equivalent flavours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Echo {
    /// Each repeat feeds the next: an endless, decaying train (IIR comb)
    Feedback { decay: f32, delay: f32 },
    /// A single delayed copy of the dry signal
    SingleTap { decay: f32, delay: f32 },
}

impl Echo {
    /// 30% feedback every 20 ms, the tone generator's reverb
    pub const TONE_DEFAULT: Echo = Echo::Feedback { decay: 0.3, delay: 0.02 };
    /// One tap at 40% after 30 ms, the sample library's reverb
    pub const LIBRARY_DEFAULT: Echo = Echo::SingleTap { decay: 0.4, delay: 0.03 };

    pub fn name(&self) -> &'static str {
        match self {
            Echo::Feedback { .. } => "feedback echo",
            Echo::SingleTap { .. } => "single-tap echo",
        }
    }

    pub fn apply(&self, samples: &mut [f32], sample_rate: u32) {
        match *self {
            Echo::Feedback { decay, delay } => {
                apply_feedback_echo(samples, decay, delay_samples(delay, sample_rate))
            }
            Echo::SingleTap { decay, delay } => {
                apply_single_tap_echo(samples, decay, delay_samples(delay, sample_rate))
            }
        }
    }
}

/// Delay time in whole samples
pub fn delay_samples(delay: f32, sample_rate: u32) -> usize {
    (delay.max(0.0) as f64 * sample_rate as f64).round() as usize
}

/// `x[i] += decay * x[i - delay]`, reading the already echoed signal.
pub fn apply_feedback_echo(samples: &mut [f32], decay: f32, delay: usize) {
    if delay == 0 || delay >= samples.len() {
        return;
    }
    for i in delay..samples.len() {
        samples[i] += decay * samples[i - delay];
    }
}

/// `y[i] = x[i] + decay * x[i - delay]`, one repeat only.
pub fn apply_single_tap_echo(samples: &mut [f32], decay: f32, delay: usize) {
    if delay == 0 || delay >= samples.len() {
        return;
    }
    let dry = samples.to_vec();
    for (wet, &source) in samples[delay..].iter_mut().zip(&dry) {
        *wet += decay * source;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize) -> Vec<f32> {
        let mut samples = vec![0.0; len];
        samples[0] = 1.0;
        samples
    }

    #[test]
    fn feedback_produces_decaying_train() {
        let mut samples = impulse(40);
        apply_feedback_echo(&mut samples, 0.5, 10);
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[10], 0.5);
        assert_eq!(samples[20], 0.25);
        assert_eq!(samples[30], 0.125);
        assert_eq!(samples[5], 0.0);
    }

    #[test]
    fn single_tap_produces_one_repeat() {
        let mut samples = impulse(40);
        apply_single_tap_echo(&mut samples, 0.5, 10);
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[10], 0.5);
        assert_eq!(samples[20], 0.0);
        assert_eq!(samples[30], 0.0);
    }

    #[test]
    fn zero_decay_is_transparent() {
        let original: Vec<f32> = (0..500).map(|i| (i as f32 * 0.1).sin()).collect();
        for echo in [
            Echo::Feedback { decay: 0.0, delay: 0.02 },
            Echo::SingleTap { decay: 0.0, delay: 0.02 },
        ] {
            let mut samples = original.clone();
            echo.apply(&mut samples, 1000);
            assert_eq!(samples, original);
        }
    }

    #[test]
    fn echo_preserves_length_and_ignores_degenerate_delays() {
        let original = vec![0.25; 100];
        for delay in [0, 100, 250] {
            let mut samples = original.clone();
            apply_feedback_echo(&mut samples, 0.5, delay);
            apply_single_tap_echo(&mut samples, 0.5, delay);
            assert_eq!(samples, original);
        }

        let mut samples = original.clone();
        Echo::LIBRARY_DEFAULT.apply(&mut samples, 1000);
        assert_eq!(samples.len(), 100);
        assert_eq!(samples[29], 0.25);
        assert!((samples[30] - 0.35).abs() < 1e-6);
    }

    #[test]
    fn defaults_convert_to_samples() {
        assert_eq!(delay_samples(0.02, 44100), 882);
        assert_eq!(delay_samples(0.03, 44100), 1323);
    }

    #[test]
    fn echo_kind_is_tagged_in_json() {
        let json = serde_json::to_string(&Echo::TONE_DEFAULT).unwrap();
        assert!(json.contains("\"kind\":\"feedback\""));
        let parsed: Echo = serde_json::from_str(r#"{"kind":"single_tap","decay":0.4,"delay":0.03}"#).unwrap();
        assert_eq!(parsed, Echo::LIBRARY_DEFAULT);
    }
}

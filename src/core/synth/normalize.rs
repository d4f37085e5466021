/// Final level stage; each tool picks exactly one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    None,
    /// Fixed scale factor, e.g. 0.5 for half-scale headroom
    Gain(f32),
    /// Scale so the loudest sample sits at ±1.0
    Peak,
    /// Scale to this root-mean-square level
    MatchRms(f32),
}

impl Normalization {
    pub fn apply(&self, samples: &mut [f32]) {
        match *self {
            Normalization::None => {}
            Normalization::Gain(gain) => apply_gain(samples, gain),
            Normalization::Peak => normalize_peak(samples),
            Normalization::MatchRms(target) => match_rms(samples, target),
        }
    }
}

pub fn apply_gain(samples: &mut [f32], gain: f32) {
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

/// Largest absolute sample value
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |max, &sample| max.max(sample.abs()))
}

/// Root-mean-square level, 0 for an empty buffer
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Normalize a vector of audio samples to the range [-1.0, 1.0]
pub fn normalize_peak(samples: &mut [f32]) {
    let max_abs = peak(samples);
    if max_abs > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= max_abs;
        }
    }
}

/// Rescale to `target_rms`; silent buffers are left alone.
pub fn match_rms(samples: &mut [f32], target_rms: f32) {
    let current = rms(samples);
    if current > 0.0 {
        apply_gain(samples, target_rms / current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn peak_normalized_buffer_reaches_unity() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let scale: f32 = rng.random_range(0.01..10.0);
            let mut samples: Vec<f32> = (0..256).map(|_| rng.random_range(-1.0..1.0) * scale).collect();
            normalize_peak(&mut samples);
            assert!((peak(&samples) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn silence_survives_every_policy() {
        for policy in [
            Normalization::Gain(0.5),
            Normalization::Peak,
            Normalization::MatchRms(0.3),
        ] {
            let mut samples = vec![0.0; 64];
            policy.apply(&mut samples);
            assert!(samples.iter().all(|s| *s == 0.0 && !s.is_nan()));
        }
    }

    #[test]
    fn rms_matching_hits_target() {
        let mut samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.05).sin()).collect();
        match_rms(&mut samples, 0.25);
        assert!((rms(&samples) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn rms_of_constant_and_empty() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[0.5; 10]) - 0.5).abs() < 1e-7);
        assert!((rms(&[1.0, -1.0]) - 1.0).abs() < 1e-7);
    }

    #[test]
    fn gain_scales_every_sample() {
        let mut samples = vec![1.0, -0.5, 0.25];
        Normalization::Gain(0.5).apply(&mut samples);
        assert_eq!(samples, vec![0.5, -0.25, 0.125]);
    }
}

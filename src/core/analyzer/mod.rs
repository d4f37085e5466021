//! FFT helpers: magnitude spectrum and naive pitch estimation

use rustfft::{num_complex::Complex, FftPlanner};

/// Magnitudes of the non-negative frequency bins (`0..len/2`) of `samples`.
pub fn magnitude_spectrum(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(samples.len());
    let mut buffer: Vec<Complex<f32>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    buffer[..samples.len() / 2].iter().map(|c| c.norm()).collect()
}

/// Centre frequency of FFT bin `bin` for a transform of `len` samples
pub fn bin_frequency(bin: usize, len: usize, sample_rate: u32) -> f32 {
    (bin as f64 * sample_rate as f64 / len as f64) as f32
}

/// Estimate the fundamental as the strongest FFT bin.
///
/// No interpolation between bins and no harmonic weighting: when an
/// overtone is louder than the fundamental, the overtone is reported.
pub fn estimate_pitch(samples: &[f32], sample_rate: u32) -> Option<f32> {
    let spectrum = magnitude_spectrum(samples);
    let (peak_bin, _) = spectrum
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (bin, &magnitude)| match best {
            Some((_, best_mag)) if best_mag >= magnitude => best,
            _ => Some((bin, magnitude)),
        })?;
    Some(bin_frequency(peak_bin, samples.len(), sample_rate))
}

/// Spectrum as `[frequency_hz, magnitude]` points, reduced to at most `max_points`.
///
/// Each point keeps the loudest bin of the span it covers, magnitudes
/// scaled so the strongest bin is 1.0.
pub fn spectrum_display(samples: &[f32], sample_rate: u32, max_points: usize) -> Vec<[f32; 2]> {
    let spectrum = magnitude_spectrum(samples);
    if spectrum.is_empty() || max_points == 0 {
        return Vec::new();
    }

    let strongest = spectrum.iter().cloned().fold(0.0f32, f32::max);
    let scale = if strongest > 0.0 { 1.0 / strongest } else { 0.0 };
    let span = spectrum.len().div_ceil(max_points);

    spectrum
        .chunks(span)
        .enumerate()
        .map(|(i, chunk)| {
            let loudest = chunk.iter().cloned().fold(0.0f32, f32::max);
            [bin_frequency(i * span, samples.len(), sample_rate), loudest * scale]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oscillator::{generate_waveform, Waveform};

    #[test]
    fn finds_sine_pitch_on_exact_bin() {
        let wave = generate_waveform(440.0, 1.0, 44100, Waveform::Sine);
        assert_eq!(estimate_pitch(&wave, 44100), Some(440.0));
    }

    #[test]
    fn finds_square_fundamental() {
        let wave = generate_waveform(220.0, 1.0, 44100, Waveform::Square);
        assert_eq!(estimate_pitch(&wave, 44100), Some(220.0));
    }

    #[test]
    fn pitch_is_quantised_to_bin_width() {
        // 0.5 s gives 2 Hz bins
        let wave = generate_waveform(441.0, 0.5, 44100, Waveform::Sine);
        let pitch = estimate_pitch(&wave, 44100).unwrap();
        assert!((pitch - 441.0).abs() <= 2.0);
        assert_eq!(pitch % 2.0, 0.0);
    }

    #[test]
    fn loud_overtone_wins() {
        let fundamental = generate_waveform(100.0, 1.0, 8000, Waveform::Sine);
        let overtone = generate_waveform(300.0, 1.0, 8000, Waveform::Sine);
        let mixed: Vec<f32> = fundamental
            .iter()
            .zip(&overtone)
            .map(|(a, b)| 0.3 * a + b)
            .collect();
        assert_eq!(estimate_pitch(&mixed, 8000), Some(300.0));
    }

    #[test]
    fn empty_input_has_no_pitch() {
        assert_eq!(estimate_pitch(&[], 44100), None);
        assert!(magnitude_spectrum(&[]).is_empty());
    }

    #[test]
    fn spectrum_display_is_bounded_and_scaled() {
        let wave = generate_waveform(1000.0, 0.1, 44100, Waveform::Sine);
        let points = spectrum_display(&wave, 44100, 64);
        assert!(points.len() <= 64);
        let top = points.iter().map(|p| p[1]).fold(0.0f32, f32::max);
        assert!((top - 1.0).abs() < 1e-6);
        let loudest = points.iter().find(|p| p[1] == top).unwrap();
        assert!((loudest[0] - 1000.0).abs() < 1000.0);
    }
}

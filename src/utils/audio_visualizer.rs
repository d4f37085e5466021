// Audio Analysis / Visualization

use crate::core::oscillator::Waveform;

/// One cycle of `waveform` as `[phase, value]` points
pub fn waveform_cycle(waveform: Waveform, points: usize) -> Vec<[f32; 2]> {
    (0..points)
        .map(|i| {
            let phase = i as f32 / points as f32;
            [phase, waveform.sample(phase as f64)]
        })
        .collect()
}

/// Reduce a rendered buffer to at most `max_points` `[seconds, value]` points.
///
/// Each point is the sample of largest magnitude in its span, so short
/// peaks survive the reduction.
pub fn buffer_points(samples: &[f32], sample_rate: u32, max_points: usize) -> Vec<[f32; 2]> {
    if samples.is_empty() || max_points == 0 {
        return Vec::new();
    }
    let span = samples.len().div_ceil(max_points);
    let rate = sample_rate.max(1) as f32;

    samples
        .chunks(span)
        .enumerate()
        .map(|(i, chunk)| {
            let loudest = chunk
                .iter()
                .cloned()
                .fold(0.0f32, |acc, s| if s.abs() > acc.abs() { s } else { acc });
            [(i * span) as f32 / rate, loudest]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_covers_one_period() {
        let points = waveform_cycle(Waveform::Saw, 4);
        assert_eq!(points, vec![[0.0, -1.0], [0.25, -0.5], [0.5, 0.0], [0.75, 0.5]]);
    }

    #[test]
    fn buffer_is_reduced_keeping_peaks() {
        let mut samples = vec![0.1f32; 1000];
        samples[501] = -0.9;
        let points = buffer_points(&samples, 1000, 10);
        assert_eq!(points.len(), 10);
        assert_eq!(points[5], [0.5, -0.9]);
        assert_eq!(points[0][1], 0.1);
    }
}

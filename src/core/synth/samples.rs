use std::path::Path;

use crate::core::error::{Result, SynthError};

/// On-disk sample format for mono WAV output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    Float32,
    Pcm16,
}

impl SampleEncoding {
    fn spec(&self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            SampleEncoding::Float32 => (32, hound::SampleFormat::Float),
            SampleEncoding::Pcm16 => (16, hound::SampleFormat::Int),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Load a WAV file as mono samples in -1.0..=1.0 plus its sample rate.
///
/// Multi-channel frames are averaged into one channel.
pub fn read_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let reader = hound::WavReader::open(path).map_err(|e| SynthError::wav(path, e))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| SynthError::wav(path, e))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| SynthError::wav(path, e))?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}

/// Write mono samples, overwriting any existing file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32, encoding: SampleEncoding) -> Result<()> {
    let mut writer = hound::WavWriter::create(path, encoding.spec(sample_rate))
        .map_err(|e| SynthError::wav(path, e))?;

    match encoding {
        SampleEncoding::Float32 => {
            for &sample in samples {
                writer.write_sample(sample).map_err(|e| SynthError::wav(path, e))?;
            }
        }
        SampleEncoding::Pcm16 => {
            for &sample in samples {
                writer.write_sample(to_pcm16(sample)).map_err(|e| SynthError::wav(path, e))?;
            }
        }
    }

    writer.finalize().map_err(|e| SynthError::wav(path, e))
}

/// Clamp to [-1, 1] and scale to 16-bit PCM
pub fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcm16_conversion_clamps() {
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(1.0), i16::MAX);
        assert_eq!(to_pcm16(-1.0), -i16::MAX);
        assert_eq!(to_pcm16(2.5), i16::MAX);
        assert_eq!(to_pcm16(-7.0), -i16::MAX);
        assert!(to_pcm16(0.5) > 16000);
    }

    #[test]
    fn float_file_keeps_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let samples = vec![0.0, 0.25, -0.5, 1.0];
        write_wav(&path, &samples, 44100, SampleEncoding::Float32).unwrap();

        let (read, sample_rate) = read_mono(&path).unwrap();
        assert_eq!(sample_rate, 44100);
        assert_eq!(read, samples);
    }

    #[test]
    fn pcm_file_is_sixteen_bit_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm.wav");
        write_wav(&path, &[0.5, -0.5, 0.0], 22050, SampleEncoding::Pcm16).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(spec.sample_rate, 22050);

        let (read, _) = read_mono(&path).unwrap();
        assert!((read[0] - 0.5).abs() < 1e-3);
        assert!((read[1] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn stereo_input_is_averaged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for (left, right) in [(16384i16, 0i16), (-16384, -16384)] {
            writer.write_sample(left).unwrap();
            writer.write_sample(right).unwrap();
        }
        writer.finalize().unwrap();

        let (mono, sample_rate) = read_mono(&path).unwrap();
        assert_eq!(sample_rate, 8000);
        assert_eq!(mono, vec![0.25, -0.5]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_mono(Path::new("/definitely/not/here.wav")).unwrap_err();
        assert!(err.to_string().contains("here.wav"));
    }
}

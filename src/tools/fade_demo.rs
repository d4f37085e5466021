//! Fixed fade-out demonstration file

use std::path::Path;

use crate::core::error::Result;
use crate::core::oscillator::{EnvelopePolicy, Waveform};
use crate::core::synth::{write_wav, SampleEncoding, ToneSpec};

pub const DEFAULT_FILE_NAME: &str = "fade_out_test.wav";

/// 2 s of A4 with the last 75% faded to silence
pub fn fade_demo_spec() -> ToneSpec {
    ToneSpec::new(Waveform::Sine, 440.0)
        .duration(2.0)
        .envelope(EnvelopePolicy::FadeOut(0.75))
}

pub fn write_fade_demo(path: &Path) -> Result<()> {
    let spec = fade_demo_spec();
    write_wav(path, &spec.render(), spec.sample_rate, SampleEncoding::Pcm16)?;
    log::info!("Saved fade demo to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_quarter_is_untouched() {
        let samples = fade_demo_spec().render();
        assert_eq!(samples.len(), 88200);

        let plain = crate::core::oscillator::generate_waveform(440.0, 2.0, 44100, Waveform::Sine);
        assert_eq!(&samples[..22050], &plain[..22050]);
        assert_eq!(samples[88199], 0.0);
    }

    #[test]
    fn writes_pcm16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        write_fade_demo(&path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 16);
        assert_eq!(reader.spec().sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.len(), 88200);
    }
}

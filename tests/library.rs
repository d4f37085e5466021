use std::fs;

use tonesmith::tools::{generate_library, LibraryRequest, LibrarySettings};
use tonesmith::{SynthError, Waveform};

fn short_settings() -> LibrarySettings {
    LibrarySettings {
        duration: 0.05,
        ..Default::default()
    }
}

#[test]
fn writes_every_key_for_each_waveform() {
    let dir = tempfile::tempdir().unwrap();
    let request = LibraryRequest {
        waveforms: vec![Waveform::Sine, Waveform::Saw],
        fade_out: true,
        echo: true,
        output_dir: dir.path().to_path_buf(),
    };

    let mut calls = 0;
    let report = generate_library(&request, &short_settings(), |p| {
        calls += 1;
        assert_eq!(p.done, calls);
        assert_eq!(p.total, 176);
    })
    .unwrap();

    assert_eq!(report.files_written, 176);
    assert_eq!(calls, 176);
    for folder in ["sine", "sawtooth"] {
        let count = fs::read_dir(dir.path().join(folder)).unwrap().count();
        assert_eq!(count, 88, "{} folder", folder);
        for name in ["A0.wav", "Cb4.wav", "C8.wav"] {
            assert!(dir.path().join(folder).join(name).is_file(), "{}/{}", folder, name);
        }
    }
    assert!(!dir.path().join("square").exists());
}

#[test]
fn files_are_peak_normalized_pcm16() {
    let dir = tempfile::tempdir().unwrap();
    let request = LibraryRequest {
        waveforms: vec![Waveform::Square],
        fade_out: false,
        echo: false,
        output_dir: dir.path().to_path_buf(),
    };
    generate_library(&request, &short_settings(), |_| {}).unwrap();

    let mut reader = hound::WavReader::open(dir.path().join("square/A4.wav")).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 2205);
    assert_eq!(samples.iter().map(|s| s.unsigned_abs()).max(), Some(i16::MAX as u16));
}

#[test]
fn nothing_selected_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let request = LibraryRequest {
        waveforms: vec![],
        fade_out: true,
        echo: true,
        output_dir: dir.path().join("notes"),
    };
    let err = generate_library(&request, &short_settings(), |_| panic!("no progress expected")).unwrap_err();
    assert!(matches!(err, SynthError::NoWaveformSelected));
    assert!(!dir.path().join("notes").exists());
}

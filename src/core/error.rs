use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the synthesis tools
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("please select at least one waveform")]
    NoWaveformSelected,

    #[error("unknown note '{0}'")]
    UnknownNote(String),

    #[error("WAV error on {}: {source}", path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SynthError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SynthError::Io { path: path.into(), source }
    }

    pub fn wav(path: impl Into<PathBuf>, source: hound::Error) -> Self {
        SynthError::Wav { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;

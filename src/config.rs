use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::oscillator::Waveform;
use crate::tools::{LibraryRequest, LibrarySettings, ResynthConfig, ResynthSettings, ToneGeneratorState, ToneSettings};

/// Application settings, read from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tone: ToneSettings,
    pub library: LibrarySettings,
    pub resynth: ResynthSettings,
    pub tone_output_dir: Option<PathBuf>,
    pub library_output_dir: PathBuf,
    pub resynth_input_dir: PathBuf,
    pub resynth_output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tone: ToneSettings::default(),
            library: LibrarySettings::default(),
            resynth: ResynthSettings::default(),
            tone_output_dir: None,
            library_output_dir: PathBuf::from("notes"),
            resynth_input_dir: PathBuf::from("input"),
            resynth_output_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    /// `--config` path if given, else the user config file if it exists, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("could not open config file {}", path.display()))?;
        let config = serde_json::from_reader(file)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("tonesmith");
        path.push("config.json");
        Some(path)
    }

    pub fn resynth_config(&self) -> ResynthConfig {
        ResynthConfig::new(&self.resynth_input_dir, &self.resynth_output_dir, &self.resynth)
    }

    /// Starting state for the tone generator; output goes to the working directory unless configured
    pub fn tone_state(&self) -> ToneGeneratorState {
        let mut state = ToneGeneratorState::default();
        if let Some(dir) = &self.tone_output_dir {
            state.output_dir = dir.clone();
        }
        state
    }

    pub fn library_request(&self, waveforms: Vec<Waveform>, fade_out: bool, echo: bool) -> LibraryRequest {
        LibraryRequest {
            waveforms,
            fade_out,
            echo,
            output_dir: self.library_output_dir.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

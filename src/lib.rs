//! Tone, note-library and re-synthesis utilities built on a small offline
//! synthesis core.
//!
//! Everything under [`core`] and [`tools`] is pure and file-based; [`app`] and
//! [`ui`] are the egui front end over the same functions.

pub mod app;
pub mod audio;
pub mod config;
pub mod core;
pub mod messaging;
pub mod tools;
pub mod ui;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::error::{Result, SynthError};
pub use crate::core::oscillator::{Envelope, EnvelopePolicy, Note, Waveform};
pub use crate::core::synth::{Echo, Normalization, ToneSpec};

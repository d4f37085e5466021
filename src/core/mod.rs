pub mod analyzer;
pub mod error;
pub mod oscillator;
pub mod synth;

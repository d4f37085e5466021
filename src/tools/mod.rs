pub mod fade_demo;
pub mod library;
pub mod resynth;
pub mod tone;

pub use library::{generate_library, LibraryReport, LibraryRequest, LibrarySettings};
pub use resynth::{ResynthConfig, ResynthReport, ResynthSettings};
pub use tone::{ToneGeneratorState, ToneSettings};

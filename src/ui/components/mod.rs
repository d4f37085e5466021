mod signal_plot;
mod envelope_editor;

pub use signal_plot::{SignalKind, SignalPlot};
pub use envelope_editor::EnvelopeEditor;

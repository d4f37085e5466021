mod envelope;
mod note;
mod waveform;

// Re-export key types so they're accessible from core::oscillator
pub use self::envelope::{apply_fade_out, fade_out_curve, Envelope, EnvelopePolicy};
pub use self::note::{
    freq_to_midi_note, midi_note_to_freq, tone_table_notes, Note, NoteConvention, SharpStyle,
    LIBRARY_MIDI_RANGE, NOTE_NAMES, TONE_OCTAVES,
};
pub use self::waveform::{generate_samples, generate_waveform, sample_count, Waveform};

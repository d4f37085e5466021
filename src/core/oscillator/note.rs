use std::fmt;
use std::str::FromStr;

use crate::core::error::SynthError;

pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Lowest and highest MIDI notes of the sample library (A0..=C8)
pub const LIBRARY_MIDI_RANGE: std::ops::RangeInclusive<u8> = 21..=108;

/// Octaves offered by the tone generator
pub const TONE_OCTAVES: std::ops::RangeInclusive<i8> = 0..=7;

/// Which note is anchored to 440 Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteConvention {
    /// Equal temperament with A4 (MIDI 69) at 440 Hz
    Midi,
    /// The tone generator's table, where C4 sits at 440 Hz
    ToneTable,
}

/// How sharps are spelled in note names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharpStyle {
    /// "C#4"
    Sharp,
    /// "Cb4": the '#' swapped for a 'b', as the sample library files are named
    FlatLetter,
}

// A pitch class and octave, e.g. A4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    pub octave: i8,
    pub pitch_class: u8,
}

impl Note {
    pub fn new(pitch_class: u8, octave: i8) -> Self {
        Self {
            octave,
            pitch_class: pitch_class % 12,
        }
    }

    pub fn from_midi(midi_note: u8) -> Self {
        Self::new(midi_note % 12, (midi_note / 12) as i8 - 1)
    }

    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.pitch_class as i32
    }

    pub fn name(&self, style: SharpStyle) -> String {
        let letter = NOTE_NAMES[self.pitch_class as usize];
        let letter = match style {
            SharpStyle::Sharp => letter.to_string(),
            SharpStyle::FlatLetter => letter.replace('#', "b"),
        };
        format!("{}{}", letter, self.octave)
    }

    pub fn frequency(&self, convention: NoteConvention) -> f32 {
        let semitones_from_anchor = match convention {
            NoteConvention::Midi => self.midi() - 69,
            NoteConvention::ToneTable => self.pitch_class as i32 + (self.octave as i32 - 4) * 12,
        };
        440.0 * 2.0f32.powf(semitones_from_anchor as f32 / 12.0)
    }

    /// Parse names such as "A4", "c#3" or "F#-1"
    pub fn parse(name: &str) -> Option<Note> {
        let name = name.trim();
        let split = name.find(|c: char| c.is_ascii_digit() || c == '-')?;
        let (pitch, octave) = name.split_at(split);
        let octave: i8 = octave.parse().ok()?;

        let mut chars = pitch.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let sharp = match chars.as_str() {
            "" => false,
            "#" => true,
            _ => return None,
        };
        let natural = NOTE_NAMES.iter().position(|n| n.len() == 1 && n.starts_with(letter))?;
        if sharp && !NOTE_NAMES[(natural + 1) % 12].ends_with('#') {
            return None;
        }

        Some(Note::new((natural + sharp as usize) as u8, octave))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name(SharpStyle::Sharp))
    }
}

impl FromStr for Note {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::parse(s).ok_or_else(|| SynthError::UnknownNote(s.to_string()))
    }
}

/// Convert MIDI note number to frequency in Hz
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0f32.powf((note as f32 - 69.0) / 12.0)
}

/// Convert a frequency in Hz to the closest MIDI note number
pub fn freq_to_midi_note(freq: f32) -> u8 {
    if freq <= 0.0 {
        return 0;
    }
    let note = 69.0 + 12.0 * (freq / 440.0).log2();
    note.round().clamp(0.0, 127.0) as u8
}

/// Every note offered by the tone generator: octaves 0 to 7
pub fn tone_table_notes() -> Vec<Note> {
    TONE_OCTAVES
        .flat_map(|octave| (0..12).map(move |pitch_class| Note::new(pitch_class, octave)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midi_69_is_a4_at_440() {
        let note = Note::from_midi(69);
        assert_eq!(note.name(SharpStyle::Sharp), "A4");
        assert_eq!(note.frequency(NoteConvention::Midi), 440.0);
        assert_eq!(midi_note_to_freq(69), 440.0);
    }

    #[test]
    fn library_range_spans_a0_to_c8() {
        assert_eq!(Note::from_midi(*LIBRARY_MIDI_RANGE.start()).to_string(), "A0");
        assert_eq!(Note::from_midi(*LIBRARY_MIDI_RANGE.end()).to_string(), "C8");
        assert_eq!(LIBRARY_MIDI_RANGE.count(), 88);
    }

    #[test]
    fn flat_letter_style_swaps_sharp_sign() {
        assert_eq!(Note::from_midi(61).name(SharpStyle::FlatLetter), "Cb4");
        assert_eq!(Note::from_midi(61).name(SharpStyle::Sharp), "C#4");
        assert_eq!(Note::from_midi(60).name(SharpStyle::FlatLetter), "C4");
    }

    #[test]
    fn tone_table_anchors_c4() {
        let c4: Note = "C4".parse().unwrap();
        assert_eq!(c4.frequency(NoteConvention::ToneTable), 440.0);
        let a4: Note = "A4".parse().unwrap();
        let expected = 440.0 * 2.0f32.powf(9.0 / 12.0);
        assert!((a4.frequency(NoteConvention::ToneTable) - expected).abs() < 1e-3);
        let c5: Note = "C5".parse().unwrap();
        assert!((c5.frequency(NoteConvention::ToneTable) - 880.0).abs() < 1e-3);
    }

    #[test]
    fn parse_accepts_sharps_and_rejects_garbage() {
        assert_eq!(Note::parse("c#3"), Some(Note::new(1, 3)));
        assert_eq!(Note::parse("B-1"), Some(Note::new(11, -1)));
        assert_eq!(Note::parse("E#4"), None);
        assert_eq!(Note::parse("H2"), None);
        assert_eq!(Note::parse("A"), None);
        assert!(matches!("Q9".parse::<Note>(), Err(SynthError::UnknownNote(_))));
    }

    #[test]
    fn midi_round_trips() {
        for midi in 0..=127u8 {
            assert_eq!(Note::from_midi(midi).midi(), midi as i32);
        }
        assert_eq!(freq_to_midi_note(440.0), 69);
        assert_eq!(freq_to_midi_note(261.63), 60);
    }

    #[test]
    fn tone_table_lists_eight_octaves() {
        let notes = tone_table_notes();
        assert_eq!(notes.len(), 96);
        assert_eq!(notes[0].to_string(), "C0");
        assert_eq!(notes[95].to_string(), "B7");
    }
}

//! Audio trigger contract
//!
//! The simulation never synthesizes sound. It hands note numbers to a
//! [`NoteSink`] in the order the hits were discovered within a tick.

/// Receives one `play` per qualifying hit. Must not block.
pub trait NoteSink {
    fn play(&mut self, note: i32);
}

impl<F: FnMut(i32)> NoteSink for F {
    fn play(&mut self, note: i32) {
        self(note)
    }
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Note name for a note number, e.g. 60 → "C3", 61 → "C#3".
///
/// Octave numbering puts note 0 in octave -2.
pub fn note_name(note: i32, show_octave: bool) -> String {
    let name = NOTE_NAMES[note.rem_euclid(12) as usize];
    if show_octave {
        format!("{}{}", name, note.div_euclid(12) - 2)
    } else {
        name.to_string()
    }
}

/// Logs every trigger by note name
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl NoteSink for LogSink {
    fn play(&mut self, note: i32) {
        self.played += 1;
        log::debug!("play {} ({})", note_name(note, true), note);
    }
}

/// Collects triggered notes in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub notes: Vec<i32>,
}

impl NoteSink for RecordingSink {
    fn play(&mut self, note: i32) {
        self.notes.push(note);
    }
}

/// Discards every trigger
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl NoteSink for Silent {
    fn play(&mut self, _note: i32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(60, true), "C3");
        assert_eq!(note_name(61, true), "C#3");
        assert_eq!(note_name(69, true), "A3");
        assert_eq!(note_name(0, true), "C-2");
        assert_eq!(note_name(71, false), "B");
        assert_eq!(note_name(-1, true), "B-3");
    }

    #[test]
    fn test_closure_sink() {
        let mut heard = Vec::new();
        {
            let mut sink = |n: i32| heard.push(n);
            sink.play(60);
            sink.play(64);
        }
        assert_eq!(heard, vec![60, 64]);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::default();
        sink.play(1);
        sink.play(1);
        assert_eq!(sink.notes, vec![1, 1]);
    }
}

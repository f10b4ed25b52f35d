#![doc = r#"
Rusty representation of a Standard MIDI File, and the writer that produces one

[`serialize`] turns a [`SequenceDocument`](crate::prelude::SequenceDocument) into bytes,
[`write_file`] puts bytes on disk, and [`MidiFile::parse`] reads them back.
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder) and associated
/// chunk types.
pub mod builder;

mod format;
pub use format::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

mod writer;
pub use writer::*;

use crate::{
    file::builder::MidiFileBuilder,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};

#[doc = r#"
A parsed Standard MIDI File.

# Example
```rust
# use drumpack::prelude::*;
let pattern = generate_snare(2, 4);
let document = SequenceDocument::new(&SequenceConfig::default())
    .with_track(SequenceTrack::new("snare", pattern));
let bytes = serialize(&document).unwrap();

let file = MidiFile::parse(&bytes).unwrap();
assert_eq!(file.timing().ticks_per_quarter_note(), Some(480));
assert_eq!(file.tracks()[0].note_on_ticks(), [960, 2880]);
```
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile {
    timing: Timing,
    format: Format,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut builder = MidiFileBuilder::default();

        loop {
            let val = reader.read_chunk()?;

            if val.is_eof() {
                break;
            }
            builder
                .handle_chunk(val)
                .map_err(|k| ReaderError::new(reader.buffer_position(), k))?;
        }

        builder.build().map_err(|k| {
            ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::ParseError(k),
            )
        })
    }

    /// Returns header info
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Returns a track list
    pub fn tracks(&self) -> Vec<&Track> {
        match &self.format {
            Format::SequentiallyIndependent(t) => t.iter().collect(),
            Format::Simultaneous(s) => s.iter().collect(),
            Format::SingleMultiChannel(c) => vec![c],
        }
    }

    /// Returns the format type for the file.
    pub fn format_type(&self) -> FormatType {
        match &self.format {
            Format::SequentiallyIndependent(_) => FormatType::SequentiallyIndependent,
            Format::Simultaneous(_) => FormatType::Simultaneous,
            Format::SingleMultiChannel(_) => FormatType::SingleMultiChannel,
        }
    }

    /// The tempo of the file: the first tempo event of the first track that has one.
    pub fn tempo(&self) -> Option<crate::Tempo> {
        self.tracks().into_iter().find_map(Track::tempo)
    }
}

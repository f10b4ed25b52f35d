#![warn(missing_docs)]
#![doc = r#"
# drumpack

Drum pattern starter packs written as Standard MIDI Files.

The crate has three layers:

- [`pattern`] lays hits for each drum [`Voice`](pattern::Voice) on a beat grid.
- [`file`] serializes a [`SequenceDocument`] into format 1 MIDI bytes, writes
  them to disk atomically, and parses files back into a [`MidiFile`](file::MidiFile).
- [`pack`] writes one file per voice into every participant folder of a pack.

## Example
```rust
use drumpack::prelude::*;

let config = PatternConfig::default();
let document = SequenceDocument::new(&SequenceConfig::default())
    .with_track(SequenceTrack::new("kick", config.pattern_for(Voice::Kick)));

let bytes = serialize(&document).unwrap();
assert_eq!(&bytes[..4], b"MThd");

let file = MidiFile::parse(&bytes).unwrap();
assert_eq!(file.tempo().unwrap().micros_per_quarter_note(), 384_615);
assert_eq!(file.tracks()[0].name(), Some("kick"));
```
"#]

mod byte;
pub use byte::*;

mod error;
pub use error::*;

mod note;
pub use note::*;

mod tempo;
pub use tempo::*;

mod sequence;
pub use sequence::*;

pub mod file;
pub mod message;
pub mod pack;
pub mod pattern;
pub mod reader;

pub use file::Timing;
pub use message::Channel;
pub use pattern::{Event, Pattern};

#[doc = r#"
Common re-exports for working with drumpack
"#]
pub mod prelude {
    pub use crate::{
        byte::*, error::*, file::*, message::*, note::*, pack::*, pattern::*, sequence::*,
        tempo::*,
    };

    pub use crate::reader::{ReadResult, Reader, ReaderError, ReaderErrorKind};
}

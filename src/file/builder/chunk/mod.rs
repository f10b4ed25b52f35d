#![doc = r#"
Contains types for MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit length field and then the chunk data. The Standard MIDI File (SMF)
specification defines two chunk types, though files may contain additional proprietary chunks.

## [`RawHeaderChunk`]

The header chunk (identified by "MThd") must be the first chunk in a MIDI file. It holds:

- [`RawFormat`](crate::file::builder::RawFormat), which identifies how tracks should be played
  (single track, simultaneous tracks, or independent tracks) and the number of tracks in the file
- [`Timing`](crate::prelude::Timing), which defines how delta-ticks are to be
  interpreted - either as ticks per quarter note or in SMPTE time code format

The header chunk data is 6 bytes long. Longer headers are accepted and the extra bytes ignored.

## [`RawTrackChunk`]

Track chunks (identified by "MTrk") contain the delta-timed events. A drum pack
file has one per voice, each opening with its tempo and name and closing with
an end-of-track meta event.

## [`UnknownChunk`]

Any chunk with a type identifier other than "MThd" or "MTrk". These are skipped.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
...
[Track Chunk N: "MTrk"]
```
"#]

mod unknown_chunk;
pub use unknown_chunk::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

/// Chunk identifier of the header
pub const HEADER_ID: &[u8; 4] = b"MThd";

/// Chunk identifier of a track
pub const TRACK_ID: &[u8; 4] = b"MTrk";

/// Appends a chunk: identifier, big-endian length, then `data`.
pub(crate) fn write_chunk(out: &mut Vec<u8>, id: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(id);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
}

/// One chunk read from a file
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkEvent<'a> {
    /// An `MThd` chunk
    Header(RawHeaderChunk),
    /// An `MTrk` chunk, not yet decoded
    Track(RawTrackChunk<'a>),
    /// Anything else
    Unknown(UnknownChunk<'a>),
    /// No bytes left
    Eof,
}

impl ChunkEvent<'_> {
    /// True if the reader ran out of chunks
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

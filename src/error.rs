use std::{io, path::PathBuf};
use thiserror::Error;

#[doc = r#"
Errors produced while interpreting bytes as MIDI data.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A data byte had its leading bit set
    #[error("Invalid data byte {0:#04X}: the leading bit must be 0")]
    InvalidDataByte(u8),
    /// A status byte that no track event starts with
    #[error("Invalid status byte {0:#04X}")]
    InvalidStatusByte(u8),
    /// A channel outside of `0..=15`
    #[error("Invalid channel {0}")]
    InvalidChannel(u8),
    /// A data byte showed up with no running status in effect
    #[error("Data byte {0:#04X} without a running status")]
    MissingRunningStatus(u8),
    /// A variable length quantity longer than four bytes
    #[error("Variable length quantity is longer than four bytes")]
    VarLen,
    /// Tempo meta events always carry three bytes
    #[error("Tempo meta event has {0} bytes, expected 3")]
    TempoLength(usize),
    /// Chunk errors
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Header errors
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// File errors
    #[error("File: {0}")]
    File(#[from] FileError),
}

/// Errors about the layout of chunks in a file
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// More than one `MThd` chunk
    #[error("Found more than one header chunk")]
    DuplicateHeader,
    /// The `MThd` chunk is shorter than six bytes
    #[error("Header chunk is {0} bytes long, expected at least 6")]
    HeaderLength(u32),
    /// A format 0 file with several tracks
    #[error("Format 0 files contain exactly one track, found {0}")]
    MultipleTracksForSingleMultiChannel(usize),
}

/// Errors in the contents of the `MThd` chunk
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Only formats 0, 1 and 2 exist
    #[error("Unknown file format {0}")]
    InvalidFormat(u16),
    /// The SMPTE frame rate byte was not -24, -25, -29 or -30
    #[error("Invalid SMPTE frame rate {0}")]
    InvalidSmpteFps(i8),
}

/// Errors raised when a set of chunks cannot form a file
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileError {
    /// No `MThd` chunk was found
    #[error("The file has no header chunk")]
    NoHeader,
}

#[doc = r#"
Rejections raised before a [`SequenceDocument`](crate::prelude::SequenceDocument) is turned into bytes.

Nothing is written when one of these is returned.
"#]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A raw pitch value above 127
    #[error("pitch {0} is outside 0..=127")]
    Pitch(u8),
    /// A velocity of 0 or above 127
    #[error("velocity {0} is outside 1..=127")]
    Velocity(u8),
    /// An event placed before the start of the timeline
    #[error("track `{track}` event {index} starts at negative beat {beat}")]
    NegativeStart {
        /// Name of the offending track
        track: String,
        /// Position of the event in its pattern
        index: usize,
        /// The start beat
        beat: f64,
    },
    /// NaN or infinite start beat
    #[error("track `{track}` event {index} has a non-finite start beat")]
    NonFiniteStart {
        /// Name of the offending track
        track: String,
        /// Position of the event in its pattern
        index: usize,
    },
    /// Zero, negative, NaN or infinite duration
    #[error("track `{track}` event {index} has invalid duration {duration}")]
    InvalidDuration {
        /// Name of the offending track
        track: String,
        /// Position of the event in its pattern
        index: usize,
        /// The duration in beats
        duration: f64,
    },
    /// An event whose end lands past the largest encodable tick
    #[error("track `{track}` event {index} ends at beat {end_beat}, past the last encodable tick")]
    TickOverflow {
        /// Name of the offending track
        track: String,
        /// Position of the event in its pattern
        index: usize,
        /// The beat the note ends on
        end_beat: f64,
    },
    /// Tempo that is zero, negative or not finite
    #[error("tempo {0} BPM must be finite and positive")]
    Tempo(f64),
    /// Tempo whose microseconds per quarter note do not fit in 24 bits
    #[error("tempo {0} BPM cannot be stored in a tempo meta event")]
    TempoRange(f64),
    /// Resolution outside `1..=32767`
    #[error("{0} ticks per quarter note is outside 1..=32767")]
    TicksPerQuarterNote(u16),
    /// More tracks than a header can count
    #[error("{0} tracks exceed the 65535 a header can describe")]
    TooManyTracks(usize),
    /// A track name that does not fit in a meta event
    #[error("track name is {0} bytes long")]
    TrackNameLength(usize),
}

/// Failure to produce one output file
#[derive(Debug, Error)]
pub enum WriteError {
    /// The document was rejected before any bytes were written
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The filesystem refused the write
    #[error("{}: {source}", .path.display())]
    Io {
        /// Where the write was headed
        path: PathBuf,
        /// What went wrong
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True if the document never reached the filesystem
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

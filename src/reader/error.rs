use super::Reader;
use crate::{ChunkError, ParseError};
use thiserror::Error;

#[doc = r#"
Why reading a file stopped, and at which byte.

Positions inside a track chunk are relative to the start of that chunk's
data; everything else is relative to the start of the file.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("at byte {position}: {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// What went wrong while reading
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// The bytes are there but do not form valid MIDI
    #[error("{0}")]
    ParseError(#[from] ParseError),
    /// The input ended in the middle of a value or chunk
    #[error("unexpected end of input")]
    OutOfBounds,
    /// A builder was handed the end of the file as if it were a chunk
    #[error("end of file")]
    Eof,
}

impl ReaderErrorKind {
    pub(crate) const fn chunk(chunk_err: ChunkError) -> Self {
        Self::ParseError(ParseError::Chunk(chunk_err))
    }
}

impl ReaderError {
    /// Pair a kind with the byte it happened at
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// True when the input was truncated
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }

    /// What went wrong
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// The byte offset of the failure
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) const fn parse_error(position: usize, error: ParseError) -> Self {
        Self::new(position, ReaderErrorKind::ParseError(error))
    }

    pub(crate) const fn oob(position: usize) -> Self {
        Self::new(position, ReaderErrorKind::OutOfBounds)
    }
}

/// Result of every read operation
pub type ReadResult<T> = Result<T, ReaderError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<ParseError>) -> ReaderError {
    ReaderError::parse_error(reader.buffer_position(), v.into())
}

#[test]
fn display_names_the_position() {
    let err = ReaderError::oob(14);
    assert_eq!(err.to_string(), "at byte 14: unexpected end of input");
    assert_eq!(err.position(), 14);

    let err = ReaderError::new(3, ReaderErrorKind::chunk(ChunkError::DuplicateHeader));
    assert!(!err.is_out_of_bounds());
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::DuplicateHeader))
    ));
}

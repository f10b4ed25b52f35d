use super::{HEADER_ID, write_chunk};
use crate::{
    ChunkError, ParseError,
    file::{FormatType, Timing, builder::RawFormat},
};

/// The decoded contents of an `MThd` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeaderChunk {
    format: RawFormat,
    timing: Timing,
}

impl RawHeaderChunk {
    /// Create a header from its parts
    pub const fn new(format: RawFormat, timing: Timing) -> Self {
        Self { format, timing }
    }

    /// Decode the data of an `MThd` chunk (length field excluded)
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < 6 {
            return Err(ChunkError::HeaderLength(data.len() as u32).into());
        }
        let format = u16::from_be_bytes([data[0], data[1]]);
        let format = RawFormat::from_fields(format, [data[2], data[3]])?;
        let timing = Timing::from_bytes([data[4], data[5]])?;
        Ok(Self { format, timing })
    }

    /// Appends the whole chunk, identifier and length included
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        let mut data = [0u8; 6];
        data[0..2].copy_from_slice(&self.format_type().as_u16().to_be_bytes());
        data[2..4].copy_from_slice(&self.format.num_tracks().to_be_bytes());
        data[4..6].copy_from_slice(&self.timing.to_bytes());
        write_chunk(out, HEADER_ID, &data);
    }

    /// The format and declared track count
    pub fn format(&self) -> &RawFormat {
        &self.format
    }

    /// The format type
    pub const fn format_type(&self) -> FormatType {
        self.format.format_type()
    }

    /// How delta times are interpreted
    pub const fn timing(&self) -> Timing {
        self.timing
    }
}

#[test]
fn header_bytes() {
    let header = RawHeaderChunk::new(
        RawFormat::simultaneous(1),
        Timing::new_ticks_per_quarter_note(480).unwrap(),
    );
    let mut out = Vec::new();
    header.write(&mut out);
    assert_eq!(
        out,
        [
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, // id, length
            0, 1, // format 1
            0, 1, // one track
            0x01, 0xE0, // 480 ticks per quarter note
        ]
    );
    assert_eq!(RawHeaderChunk::parse(&out[8..]).unwrap(), header);
}

#[test]
fn short_header_is_rejected() {
    assert_eq!(
        RawHeaderChunk::parse(&[0, 1, 0, 1]),
        Err(ParseError::Chunk(ChunkError::HeaderLength(4)))
    );
}

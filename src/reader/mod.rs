#![doc = r#"
A cursor over the bytes of a Standard MIDI File

The [`Reader`] knows nothing about how a file is assembled; it hands out
chunks, integers and variable length quantities. See
[`MidiFile::parse`](crate::prelude::MidiFile::parse) for the full file.
"#]

mod error;
pub use error::*;

use crate::{
    ParseError,
    file::builder::chunk::{ChunkEvent, RawHeaderChunk, RawTrackChunk, UnknownChunk},
};

/// Reads big-endian values out of a byte slice, tracking its position.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Read from the start of `bytes`
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The offset of the next unread byte
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// True once every byte has been consumed
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Borrow the next `len` bytes and move past them
    pub fn read_exact(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ReaderError::oob(self.position))?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read a fixed number of bytes into an array
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Look at the next byte without consuming it
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.bytes
            .get(self.position)
            .copied()
            .ok_or(ReaderError::oob(self.position))
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a big-endian `u16`
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian `u32`
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read a variable length quantity of at most four bytes
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            let byte = self.read_u8()?;
            value = (value << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(inv_data(self, ParseError::VarLen))
    }

    /// Read the next chunk.
    ///
    /// Returns [`ChunkEvent::Eof`] once the input is exhausted.
    pub fn read_chunk(&mut self) -> ReadResult<ChunkEvent<'a>> {
        if self.is_at_end() {
            return Ok(ChunkEvent::Eof);
        }
        let id: [u8; 4] = self.read_exact_size()?;
        let len = self.read_u32()?;
        let start = self.buffer_position();
        let data = self.read_exact(len as usize)?;

        Ok(match &id {
            b"MThd" => ChunkEvent::Header(
                RawHeaderChunk::parse(data).map_err(|e| ReaderError::parse_error(start, e))?,
            ),
            b"MTrk" => ChunkEvent::Track(RawTrackChunk::new(data)),
            _ => ChunkEvent::Unknown(UnknownChunk::new(id, data)),
        })
    }
}

#[test]
fn reads_big_endian_integers() {
    let bytes = [0x00, 0x06, 0x00, 0x00, 0x01, 0xE0];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u16().unwrap(), 6);
    assert_eq!(reader.read_u32().unwrap(), 480);
    assert!(reader.is_at_end());
    assert!(reader.read_u8().unwrap_err().is_out_of_bounds());
}

#[test]
fn reads_varlen() {
    let bytes = [0x83, 0x60, 0xFF, 0xFF, 0xFF, 0x7F, 0x81, 0x80, 0x80, 0x80, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_varlen().unwrap(), 480);
    assert_eq!(reader.read_varlen().unwrap(), 0x0FFF_FFFF);
    let err = reader.read_varlen().unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::VarLen)
    );
}

#[test]
fn truncated_chunk_is_out_of_bounds() {
    let bytes = b"MTrk\x00\x00\x00\x10\x00\xFF";
    let mut reader = Reader::from_byte_slice(bytes);
    assert!(reader.read_chunk().unwrap_err().is_out_of_bounds());
}

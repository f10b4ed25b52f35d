mod smpte;
pub use smpte::*;

use crate::{HeaderError, ValidationError};

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format. See the [`RawHeaderChunk`](crate::file::builder::chunk::RawHeaderChunk) docs for more information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// Only 1-32767 fit in the fifteen bits the header leaves for it.
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Result<Self, ValidationError> {
        if tpqn == 0 || tpqn > 0x7FFF {
            return Err(ValidationError::TicksPerQuarterNote(tpqn));
        }
        Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: tpqn.to_be_bytes(),
        }))
    }

    /// Decode the division field of a header chunk
    pub(crate) const fn from_bytes(bytes: [u8; 2]) -> Result<Self, HeaderError> {
        match bytes[0] >> 7 {
            //this is ticks per quarter_note
            0 => Ok(Timing::TicksPerQuarterNote(TicksPerQuarterNote { inner: bytes })),
            _ => match SmpteHeader::new(bytes) {
                Ok(header) => Ok(Timing::Smpte(header)),
                Err(e) => Err(e),
            },
        }
    }

    /// The division field of a header chunk
    pub const fn to_bytes(&self) -> [u8; 2] {
        match self {
            Self::TicksPerQuarterNote(t) => t.inner,
            Self::Smpte(s) => [s.fps.as_division_byte() as u8, s.ticks_per_frame],
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}
impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }
}

#[test]
fn ticks_per_quarter_note_bounds() {
    let timing = Timing::new_ticks_per_quarter_note(480).unwrap();
    assert_eq!(timing.to_bytes(), [0x01, 0xE0]);
    assert_eq!(timing.ticks_per_quarter_note(), Some(480));

    assert_eq!(
        Timing::new_ticks_per_quarter_note(0),
        Err(ValidationError::TicksPerQuarterNote(0))
    );
    assert_eq!(
        Timing::new_ticks_per_quarter_note(0x8000),
        Err(ValidationError::TicksPerQuarterNote(0x8000))
    );
}

#[test]
fn decodes_smpte_division() {
    // -25 fps, 40 ticks per frame
    let timing = Timing::from_bytes([0xE7, 40]).unwrap();
    let Timing::Smpte(smpte) = timing else {
        panic!("expected smpte timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(timing.to_bytes(), [0xE7, 40]);
    assert_eq!(timing.ticks_per_quarter_note(), None);

    assert_eq!(
        Timing::from_bytes([0xE0, 40]),
        Err(HeaderError::InvalidSmpteFps(-32))
    );
}

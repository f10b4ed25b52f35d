#![doc = r#"
SMPTE frame rates for files timed in absolute time rather than beats.

Files written by this crate always use ticks per quarter note; SMPTE
headers are only recognized when reading.
"#]

use crate::HeaderError;

/// The possible FPS (Frames Per Second) for an SMPTE-timed MIDI file
///
/// The MIDI specification defines only four possible frame types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpteFps {
    /// 24 frames per second - Standard film rate
    TwentyFour,
    /// 25 frames per second - PAL/SECAM television standard
    TwentyFive,
    /// 29.97 frames per second (30000/1001) - NTSC color television drop-frame rate
    TwentyNine,
    /// 30 frames per second - NTSC black & white, some digital formats
    Thirty,
}

impl SmpteFps {
    /// Decode the negative frame rate stored in the high byte of the division
    pub const fn from_division_byte(byte: i8) -> Result<Self, HeaderError> {
        Ok(match byte {
            -24 => Self::TwentyFour,
            -25 => Self::TwentyFive,
            -29 => Self::TwentyNine,
            -30 => Self::Thirty,
            _ => return Err(HeaderError::InvalidSmpteFps(byte)),
        })
    }

    /// The byte stored in the header, as a signed value
    pub const fn as_division_byte(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    pub(crate) const fn new(bytes: [u8; 2]) -> Result<Self, HeaderError> {
        //Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30
        let fps = match SmpteFps::from_division_byte(bytes[0] as i8) {
            Ok(fps) => fps,
            Err(e) => return Err(e),
        };
        Ok(Self {
            fps,
            ticks_per_frame: bytes[1],
        })
    }

    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

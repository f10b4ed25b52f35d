use crate::{HeaderError, file::FormatType};

#[doc = r#"
The format and track count pair stored in a header chunk.

A format 0 file holds exactly one track, so its count is implied.
Formats 1 and 2 carry their count as two big-endian bytes.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFormat {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous([u8; 2]),
    /// Format 2
    SequentiallyIndependent([u8; 2]),
}
impl RawFormat {
    /// Create a [`RawFormat::SingleMultiChannel`]
    pub const fn single_multichannel() -> Self {
        Self::SingleMultiChannel
    }

    /// Create a [`RawFormat::Simultaneous`] for `num_tracks` tracks
    pub const fn simultaneous(num_tracks: u16) -> Self {
        Self::Simultaneous(num_tracks.to_be_bytes())
    }

    /// Create a [`RawFormat::SequentiallyIndependent`] for `num_tracks` tracks
    pub const fn sequentially_independent(num_tracks: u16) -> Self {
        Self::SequentiallyIndependent(num_tracks.to_be_bytes())
    }

    /// Decode the format and track count fields of a header
    pub(crate) const fn from_fields(format: u16, num_tracks: [u8; 2]) -> Result<Self, HeaderError> {
        match format {
            0 => Ok(Self::SingleMultiChannel),
            1 => Ok(Self::Simultaneous(num_tracks)),
            2 => Ok(Self::SequentiallyIndependent(num_tracks)),
            other => Err(HeaderError::InvalidFormat(other)),
        }
    }

    /// Returns the number of tracks identified by the format.
    ///
    /// [`RawFormat::SingleMultiChannel`] will always return 1.
    pub const fn num_tracks(&self) -> u16 {
        use RawFormat::*;
        match &self {
            SingleMultiChannel => 1,
            Simultaneous(num) | SequentiallyIndependent(num) => u16::from_be_bytes(*num),
        }
    }

    /// Returns the format type of the format.
    pub const fn format_type(&self) -> FormatType {
        use RawFormat::*;
        match self {
            SingleMultiChannel => FormatType::SingleMultiChannel,
            Simultaneous(_) => FormatType::Simultaneous,
            SequentiallyIndependent(_) => FormatType::SequentiallyIndependent,
        }
    }
}

#[test]
fn format_fields() {
    let format = RawFormat::from_fields(1, [0, 3]).unwrap();
    assert_eq!(format, RawFormat::simultaneous(3));
    assert_eq!(format.num_tracks(), 3);
    assert_eq!(format.format_type().as_u16(), 1);

    assert_eq!(RawFormat::from_fields(0, [0, 9]).unwrap().num_tracks(), 1);
    assert_eq!(
        RawFormat::from_fields(3, [0, 1]),
        Err(HeaderError::InvalidFormat(3))
    );
}

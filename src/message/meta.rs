use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{ParseError, Tempo};

/// The type byte following `0xFF` in a meta event
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaKind {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

#[doc = r#"
A meta event. These never leave the file; they describe it.

Only the events this crate writes get their own variant. Everything else
is kept as raw bytes in [`MetaMessage::Other`].
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaMessage {
    /// `FF 03`: the name of the track
    TrackName(String),
    /// `FF 01`: free text
    Text(String),
    /// `FF 51`: microseconds per quarter note
    Tempo(Tempo),
    /// `FF 2F`: must close every track chunk
    EndOfTrack,
    /// Any other meta event
    Other {
        /// The type byte
        kind: u8,
        /// The event payload
        data: Vec<u8>,
    },
}

impl MetaMessage {
    /// The type byte of this event
    pub fn kind(&self) -> u8 {
        match self {
            Self::TrackName(_) => MetaKind::TrackName.into(),
            Self::Text(_) => MetaKind::Text.into(),
            Self::Tempo(_) => MetaKind::Tempo.into(),
            Self::EndOfTrack => MetaKind::EndOfTrack.into(),
            Self::Other { kind, .. } => *kind,
        }
    }

    /// The payload written after the length
    pub fn data(&self) -> Vec<u8> {
        match self {
            Self::TrackName(s) | Self::Text(s) => s.as_bytes().to_vec(),
            Self::Tempo(t) => t.to_bytes().to_vec(),
            Self::EndOfTrack => Vec::new(),
            Self::Other { data, .. } => data.clone(),
        }
    }

    pub(crate) fn parse(kind: u8, data: &[u8]) -> Result<Self, ParseError> {
        Ok(match MetaKind::try_from(kind) {
            Ok(MetaKind::TrackName) => Self::TrackName(String::from_utf8_lossy(data).into_owned()),
            Ok(MetaKind::Text) => Self::Text(String::from_utf8_lossy(data).into_owned()),
            Ok(MetaKind::Tempo) => {
                let bytes: &[u8; 3] = data
                    .try_into()
                    .map_err(|_| ParseError::TempoLength(data.len()))?;
                Self::Tempo(Tempo::new_from_bytes(bytes))
            }
            Ok(MetaKind::EndOfTrack) => Self::EndOfTrack,
            _ => Self::Other {
                kind,
                data: data.to_vec(),
            },
        })
    }
}

#[test]
fn parses_tempo_payload() {
    let meta = MetaMessage::parse(0x51, &[0x07, 0xA1, 0x20]).unwrap();
    assert_eq!(meta, MetaMessage::Tempo(Tempo::DEFAULT));
    assert_eq!(
        MetaMessage::parse(0x51, &[0x07, 0xA1]),
        Err(ParseError::TempoLength(2))
    );
}

#[test]
fn keeps_unknown_meta_events() {
    let meta = MetaMessage::parse(0x58, &[4, 2, 24, 8]).unwrap();
    assert_eq!(meta.kind(), 0x58);
    assert_eq!(meta.data(), [4, 2, 24, 8]);
}

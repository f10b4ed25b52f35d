#![doc = r#"
Messages that live inside a track chunk

# Layout
Every track event is a variable-length delta time followed by one of:

```text
| 0x80..=0xEF | channel voice message, 1 or 2 data bytes |
| 0xFF        | meta event: type, length, data           |
| 0xF0, 0xF7  | system exclusive: length, data           |
```
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

use crate::{
    ParseError,
    reader::{ReadResult, Reader, inv_data},
};

/// Largest value a variable length quantity can hold (four bytes of seven bits)
pub const MAX_VARLEN: u32 = 0x0FFF_FFFF;

/// Writes a variable-length quantity, seven bits per byte, most significant first.
///
/// Values above [`MAX_VARLEN`] are truncated to their low 28 bits.
pub(crate) fn write_varlen(out: &mut Vec<u8>, value: u32) {
    let mut value = value & MAX_VARLEN;
    let mut bytes = [0u8; 4];
    let mut i = 3;
    bytes[i] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        i -= 1;
        bytes[i] = ((value & 0x7F) | 0x80) as u8;
        value >>= 7;
    }
    out.extend_from_slice(&bytes[i..]);
}

#[doc = r#"
Any event that can appear in a track chunk
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackMessage {
    /// A note or controller message
    ChannelVoice(ChannelVoiceMessage),
    /// A meta event
    Meta(MetaMessage),
    /// A system exclusive message: `F0` opens one, `F7` continues or escapes
    SysEx {
        /// `0xF0` or `0xF7`
        status: u8,
        /// The payload after the length
        data: Vec<u8>,
    },
}

impl TrackMessage {
    /// True for the `FF 2F` event closing a track
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self, Self::Meta(MetaMessage::EndOfTrack))
    }

    /// Appends the message, status byte included, to `out`.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        match self {
            Self::ChannelVoice(cv) => cv.write(out),
            Self::Meta(meta) => {
                let data = meta.data();
                out.push(0xFF);
                out.push(meta.kind());
                write_varlen(out, data.len() as u32);
                out.extend_from_slice(&data);
            }
            Self::SysEx { status, data } => {
                out.push(*status);
                write_varlen(out, data.len() as u32);
                out.extend_from_slice(data);
            }
        }
    }

    /// Reads one message, honoring and updating the running status.
    ///
    /// Meta and system exclusive events cancel running status.
    pub(crate) fn read(reader: &mut Reader<'_>, running_status: &mut Option<u8>) -> ReadResult<Self> {
        let first = reader.peek_u8()?;
        let status = if first & 0x80 != 0 {
            reader.read_u8()?
        } else {
            match running_status {
                Some(status) => *status,
                None => return Err(inv_data(reader, ParseError::MissingRunningStatus(first))),
            }
        };

        match status {
            0xFF => {
                *running_status = None;
                let kind = reader.read_u8()?;
                let len = reader.read_varlen()?;
                let data = reader.read_exact(len as usize)?;
                MetaMessage::parse(kind, data)
                    .map(Self::Meta)
                    .map_err(|e| inv_data(reader, e))
            }
            0xF0 | 0xF7 => {
                *running_status = None;
                let len = reader.read_varlen()?;
                let data = reader.read_exact(len as usize)?;
                Ok(Self::SysEx {
                    status,
                    data: data.to_vec(),
                })
            }
            0x80..=0xEF => {
                *running_status = Some(status);
                ChannelVoiceMessage::read(status, reader).map(Self::ChannelVoice)
            }
            other => Err(inv_data(reader, ParseError::InvalidStatusByte(other))),
        }
    }
}

impl From<ChannelVoiceMessage> for TrackMessage {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<MetaMessage> for TrackMessage {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}

#[doc = r#"
An event paired with the absolute tick it occurs on
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticked<T> {
    accumulated_ticks: u32,
    event: T,
}

impl<T> Ticked<T> {
    /// Pair `event` with an absolute tick
    pub const fn new(accumulated_ticks: u32, event: T) -> Self {
        Self {
            accumulated_ticks,
            event,
        }
    }

    /// Ticks since the start of the track
    pub const fn accumulated_ticks(&self) -> u32 {
        self.accumulated_ticks
    }

    /// The event
    pub const fn event(&self) -> &T {
        &self.event
    }

    /// Discard the timing
    pub fn into_event(self) -> T {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn varlen(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        write_varlen(&mut out, value);
        out
    }

    #[test]
    fn varlen_boundaries() {
        assert_eq!(varlen(0), [0x00]);
        assert_eq!(varlen(0x7F), [0x7F]);
        assert_eq!(varlen(0x80), [0x81, 0x00]);
        assert_eq!(varlen(480), [0x83, 0x60]);
        assert_eq!(varlen(0x3FFF), [0xFF, 0x7F]);
        assert_eq!(varlen(0x4000), [0x81, 0x80, 0x00]);
        assert_eq!(varlen(MAX_VARLEN), [0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn reads_running_status() {
        // note on, then a second note on sharing its status byte
        let bytes = [0x90, 60, 100, 62, 100];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut running = None;

        let first = TrackMessage::read(&mut reader, &mut running).unwrap();
        let second = TrackMessage::read(&mut reader, &mut running).unwrap();

        assert_eq!(running, Some(0x90));
        let TrackMessage::ChannelVoice(second) = second else {
            panic!("expected a channel voice message, got {second:?}");
        };
        assert!(matches!(first, TrackMessage::ChannelVoice(_)));
        assert_eq!(second.note().unwrap().byte(), 62);
    }

    #[test]
    fn data_byte_without_status_is_rejected() {
        let bytes = [60, 100];
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = TrackMessage::read(&mut reader, &mut None).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::MissingRunningStatus(60))
        ));
    }

    #[test]
    fn sysex_keeps_its_status_byte() {
        for bytes in [[0xF0, 0x02, 0x7E, 0xF7], [0xF7, 0x02, 0x43, 0x12]] {
            let mut reader = Reader::from_byte_slice(&bytes);
            let message = TrackMessage::read(&mut reader, &mut Some(0x90)).unwrap();
            assert_eq!(
                message,
                TrackMessage::SysEx {
                    status: bytes[0],
                    data: bytes[2..].to_vec(),
                }
            );

            let mut out = Vec::new();
            message.write(&mut out);
            assert_eq!(out, bytes);
        }
    }

    #[test]
    fn meta_round_trip() {
        let message = TrackMessage::Meta(MetaMessage::TrackName("kick".into()));
        let mut out = Vec::new();
        message.write(&mut out);
        assert_eq!(out, [0xFF, 0x03, 4, b'k', b'i', b'c', b'k']);

        let mut reader = Reader::from_byte_slice(&out);
        assert_eq!(TrackMessage::read(&mut reader, &mut None).unwrap(), message);
    }
}

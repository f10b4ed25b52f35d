#![doc = r#"
Contains the Channel Voice messages a drum track is made of

# Hierarchy
```text
                |-----------------------|
                | Channel Voice Message |
                |-----------------------|
                 /                     \
        |---------|                 |--------------|
        | Channel |                 | Voice Event  |
        |---------|                 |--------------|
```
"#]
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    DataByte, Note, ParseError, Velocity,
    reader::{ReadResult, Reader, inv_data},
};

#[doc = r#"
One of the sixteen MIDI channels. `Channel::One` is channel byte `0`.
"#]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    #[default]
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// Create a channel from its zero-based number
    pub fn from_number(number: u8) -> Result<Self, ParseError> {
        Self::try_from(number).map_err(|_| ParseError::InvalidChannel(number))
    }

    /// The low nibble of a status byte
    pub fn number(&self) -> u8 {
        (*self).into()
    }
}

/// The high nibble of a channel voice status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub(crate) enum VoiceStatus {
    NoteOff = 0x8,
    NoteOn = 0x9,
    Aftertouch = 0xA,
    ControlChange = 0xB,
    ProgramChange = 0xC,
    ChannelPressure = 0xD,
    PitchBend = 0xE,
}

/// The payload of a channel voice message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceEvent {
    /// Release a note
    NoteOff {
        /// The released note
        note: Note,
        /// Release velocity
        velocity: Velocity,
    },
    /// Strike a note
    NoteOn {
        /// The struck note
        note: Note,
        /// Strike velocity. Zero means note off.
        velocity: Velocity,
    },
    /// Polyphonic key pressure
    Aftertouch {
        /// The pressed note
        note: Note,
        /// Pressure amount
        pressure: DataByte,
    },
    /// Controller change
    ControlChange {
        /// Controller number
        controller: DataByte,
        /// New value
        value: DataByte,
    },
    /// Program (patch) change
    ProgramChange {
        /// The program
        program: DataByte,
    },
    /// Channel-wide pressure
    ChannelPressure {
        /// Pressure amount
        pressure: DataByte,
    },
    /// Pitch bend, 14 bits split over two data bytes
    PitchBend {
        /// Least significant 7 bits
        lsb: DataByte,
        /// Most significant 7 bits
        msb: DataByte,
    },
}

impl VoiceEvent {
    const fn status(&self) -> VoiceStatus {
        match self {
            Self::NoteOff { .. } => VoiceStatus::NoteOff,
            Self::NoteOn { .. } => VoiceStatus::NoteOn,
            Self::Aftertouch { .. } => VoiceStatus::Aftertouch,
            Self::ControlChange { .. } => VoiceStatus::ControlChange,
            Self::ProgramChange { .. } => VoiceStatus::ProgramChange,
            Self::ChannelPressure { .. } => VoiceStatus::ChannelPressure,
            Self::PitchBend { .. } => VoiceStatus::PitchBend,
        }
    }
}

#[doc = r#"
A channel voice message: a [`VoiceEvent`] addressed to a [`Channel`].
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// Strike `note` on `channel`
    pub const fn note_on(channel: Channel, note: Note, velocity: Velocity) -> Self {
        Self::new(channel, VoiceEvent::NoteOn { note, velocity })
    }

    /// Release `note` on `channel` with a release velocity of zero
    pub const fn note_off(channel: Channel, note: Note) -> Self {
        Self::new(
            channel,
            VoiceEvent::NoteOff {
                note,
                velocity: Velocity::new_unchecked(0),
            },
        )
    }

    /// The channel the message is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The voice event
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// True for a note on with a nonzero velocity
    pub const fn is_note_on(&self) -> bool {
        matches!(self.event, VoiceEvent::NoteOn { velocity, .. } if velocity.byte() > 0)
    }

    /// True for a note off, or a note on with zero velocity
    pub const fn is_note_off(&self) -> bool {
        match self.event {
            VoiceEvent::NoteOff { .. } => true,
            VoiceEvent::NoteOn { velocity, .. } => velocity.byte() == 0,
            _ => false,
        }
    }

    /// The note this message strikes or releases, if any
    pub const fn note(&self) -> Option<Note> {
        match self.event {
            VoiceEvent::NoteOff { note, .. }
            | VoiceEvent::NoteOn { note, .. }
            | VoiceEvent::Aftertouch { note, .. } => Some(note),
            _ => None,
        }
    }

    /// The status byte: event nibble, then channel nibble
    pub fn status_byte(&self) -> u8 {
        (u8::from(self.event.status()) << 4) | self.channel.number()
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        use VoiceEvent::*;
        out.push(self.status_byte());
        match self.event {
            NoteOff { note, velocity } | NoteOn { note, velocity } => {
                out.extend_from_slice(&[note.byte(), velocity.byte()])
            }
            Aftertouch { note, pressure } => out.extend_from_slice(&[note.byte(), pressure.0]),
            ControlChange { controller, value } => out.extend_from_slice(&[controller.0, value.0]),
            ProgramChange { program } => out.push(program.0),
            ChannelPressure { pressure } => out.push(pressure.0),
            PitchBend { lsb, msb } => out.extend_from_slice(&[lsb.0, msb.0]),
        }
    }

    /// Reads the data bytes following `status`, which has already been consumed.
    pub(crate) fn read(status: u8, reader: &mut Reader<'_>) -> ReadResult<Self> {
        let kind = VoiceStatus::try_from(status >> 4)
            .map_err(|_| inv_data(reader, ParseError::InvalidStatusByte(status)))?;
        let channel = Channel::from_number(status & 0x0F).map_err(|e| inv_data(reader, e))?;

        let event = match kind {
            VoiceStatus::NoteOff => VoiceEvent::NoteOff {
                note: Note::from(data_byte(reader)?),
                velocity: Velocity::from(data_byte(reader)?),
            },
            VoiceStatus::NoteOn => VoiceEvent::NoteOn {
                note: Note::from(data_byte(reader)?),
                velocity: Velocity::from(data_byte(reader)?),
            },
            VoiceStatus::Aftertouch => VoiceEvent::Aftertouch {
                note: Note::from(data_byte(reader)?),
                pressure: data_byte(reader)?,
            },
            VoiceStatus::ControlChange => VoiceEvent::ControlChange {
                controller: data_byte(reader)?,
                value: data_byte(reader)?,
            },
            VoiceStatus::ProgramChange => VoiceEvent::ProgramChange {
                program: data_byte(reader)?,
            },
            VoiceStatus::ChannelPressure => VoiceEvent::ChannelPressure {
                pressure: data_byte(reader)?,
            },
            VoiceStatus::PitchBend => VoiceEvent::PitchBend {
                lsb: data_byte(reader)?,
                msb: data_byte(reader)?,
            },
        };
        Ok(Self::new(channel, event))
    }
}

fn data_byte(reader: &mut Reader<'_>) -> ReadResult<DataByte> {
    let byte = reader.read_u8()?;
    DataByte::new(byte).map_err(|e| inv_data(reader, e))
}

#[test]
fn status_byte_packs_channel() {
    let msg = ChannelVoiceMessage::note_on(Channel::Ten, Note::MIDDLE_C, Velocity::MAX);
    assert_eq!(msg.status_byte(), 0x99);

    let mut out = Vec::new();
    ChannelVoiceMessage::note_off(Channel::One, Note::MIDDLE_C).write(&mut out);
    assert_eq!(out, [0x80, 60, 0]);
}

#[test]
fn zero_velocity_note_on_is_a_note_off() {
    let msg = ChannelVoiceMessage::note_on(Channel::One, Note::MIDDLE_C, Velocity::new_unchecked(0));
    assert!(msg.is_note_off());
    assert!(!msg.is_note_on());
}

#[test]
fn channel_numbers() {
    assert_eq!(Channel::from_number(9).unwrap(), Channel::Ten);
    assert_eq!(Channel::Sixteen.number(), 15);
    assert_eq!(Channel::from_number(16), Err(ParseError::InvalidChannel(16)));
}

use super::{TRACK_ID, write_chunk};
use crate::{
    message::{Ticked, TrackMessage, write_varlen},
    reader::{ReadResult, Reader},
};

/// The undecoded data of an `MTrk` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrackChunk<'a> {
    data: &'a [u8],
}

impl<'a> RawTrackChunk<'a> {
    /// Wrap the data of a track chunk
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Length of the chunk data in bytes
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the chunk carries no events at all
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode every event, accumulating delta times into absolute ticks.
    ///
    /// Decoding stops at the end-of-track event; anything after it is ignored.
    /// Positions in errors are relative to the start of the chunk data.
    pub fn events(&self) -> ReadResult<Vec<Ticked<TrackMessage>>> {
        let mut reader = Reader::from_byte_slice(self.data);
        let mut running_status = None;
        let mut ticks: u32 = 0;
        let mut events = Vec::new();

        while !reader.is_at_end() {
            let delta = reader.read_varlen()?;
            ticks = ticks.saturating_add(delta);
            let message = TrackMessage::read(&mut reader, &mut running_status)?;
            let end = message.is_end_of_track();
            events.push(Ticked::new(ticks, message));
            if end {
                break;
            }
        }
        Ok(events)
    }
}

/// Encodes events that are already in tick order as an `MTrk` chunk.
///
/// Delta times are taken between consecutive events. Running status is never used.
pub(crate) fn write_track_chunk(out: &mut Vec<u8>, events: &[Ticked<TrackMessage>]) {
    let mut data = Vec::with_capacity(events.len() * 4);
    let mut last_tick = 0;
    for event in events {
        let tick = event.accumulated_ticks();
        debug_assert!(tick >= last_tick, "events must be sorted by tick");
        write_varlen(&mut data, tick.saturating_sub(last_tick));
        event.event().write(&mut data);
        last_tick = tick;
    }
    write_chunk(out, TRACK_ID, &data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn note_on(tick: u32, key: u8) -> Ticked<TrackMessage> {
        Ticked::new(
            tick,
            ChannelVoiceMessage::note_on(
                Channel::One,
                Note::from_databyte(key).unwrap(),
                Velocity::new(100).unwrap(),
            )
            .into(),
        )
    }

    #[test]
    fn deltas_between_events() {
        let events = [
            note_on(0, 60),
            note_on(480, 60),
            note_on(480, 62),
            Ticked::new(600, TrackMessage::Meta(MetaMessage::EndOfTrack)),
        ];
        let mut out = Vec::new();
        write_track_chunk(&mut out, &events);

        assert_eq!(&out[..4], b"MTrk");
        assert_eq!(
            &out[8..],
            [
                0x00, 0x90, 60, 100, // at 0
                0x83, 0x60, 0x90, 60, 100, // +480
                0x00, 0x90, 62, 100, // +0
                0x78, 0xFF, 0x2F, 0x00, // +120
            ]
        );

        let decoded = RawTrackChunk::new(&out[8..]).events().unwrap();
        assert_eq!(decoded, events);
    }

    #[test]
    fn stops_at_end_of_track() {
        let data = [0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90, 60, 100];
        let events = RawTrackChunk::new(&data).events().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].event().is_end_of_track());
    }
}

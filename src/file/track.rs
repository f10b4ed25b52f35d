use std::collections::{HashMap, VecDeque};

use crate::prelude::*;

/// A note reconstructed from a note on and the note off that released it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteSpan {
    /// The pitch
    pub note: Note,
    /// Strike velocity
    pub velocity: Velocity,
    /// Tick of the note on
    pub on_tick: u32,
    /// Tick of the note off
    pub off_tick: u32,
}

#[doc = r#"
A decoded track chunk: every event with its absolute tick.
"#]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub(crate) events: Vec<Ticked<TrackMessage>>,
}

impl Track {
    /// Create a track from decoded events
    pub fn new(events: Vec<Ticked<TrackMessage>>) -> Self {
        Self { events }
    }

    /// All events, in file order
    pub fn events(&self) -> &[Ticked<TrackMessage>] {
        &self.events
    }

    /// The first track name meta event, if any
    pub fn name(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e.event() {
            TrackMessage::Meta(MetaMessage::TrackName(name)) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The first tempo meta event, if any
    pub fn tempo(&self) -> Option<Tempo> {
        self.events.iter().find_map(|e| match e.event() {
            TrackMessage::Meta(MetaMessage::Tempo(tempo)) => Some(*tempo),
            _ => None,
        })
    }

    /// Channel voice messages with their ticks
    pub fn channel_voice(&self) -> impl Iterator<Item = (u32, &ChannelVoiceMessage)> {
        self.events.iter().filter_map(|e| match e.event() {
            TrackMessage::ChannelVoice(cv) => Some((e.accumulated_ticks(), cv)),
            _ => None,
        })
    }

    /// Ticks of every note on, in file order
    pub fn note_on_ticks(&self) -> Vec<u32> {
        self.channel_voice()
            .filter(|(_, cv)| cv.is_note_on())
            .map(|(tick, _)| tick)
            .collect()
    }

    /// Pairs note ons with note offs.
    ///
    /// A note off releases the oldest sounding note of the same pitch on the same
    /// channel. Notes never released are left out. Spans are ordered by note on.
    pub fn notes(&self) -> Vec<NoteSpan> {
        let mut sounding: HashMap<(Channel, Note), VecDeque<usize>> = HashMap::new();
        let mut spans: Vec<Option<NoteSpan>> = Vec::new();
        let mut starts: Vec<(u32, Note, Velocity)> = Vec::new();

        for (tick, cv) in self.channel_voice() {
            let Some(note) = cv.note() else {
                continue;
            };
            if cv.is_note_on() {
                let VoiceEvent::NoteOn { velocity, .. } = *cv.event() else {
                    continue;
                };
                sounding
                    .entry((cv.channel(), note))
                    .or_default()
                    .push_back(starts.len());
                starts.push((tick, note, velocity));
                spans.push(None);
            } else if cv.is_note_off() {
                let Some(index) = sounding
                    .get_mut(&(cv.channel(), note))
                    .and_then(VecDeque::pop_front)
                else {
                    continue;
                };
                let (on_tick, note, velocity) = starts[index];
                spans[index] = Some(NoteSpan {
                    note,
                    velocity,
                    on_tick,
                    off_tick: tick,
                });
            }
        }
        spans.into_iter().flatten().collect()
    }
}

#[test]
fn pairs_overlapping_notes_oldest_first() {
    let c = Note::MIDDLE_C;
    let vel = Velocity::new(90).unwrap();
    let on = |tick| Ticked::new(tick, TrackMessage::from(ChannelVoiceMessage::note_on(Channel::One, c, vel)));
    let off = |tick| Ticked::new(tick, TrackMessage::from(ChannelVoiceMessage::note_off(Channel::One, c)));

    let track = Track::new(vec![on(0), on(10), off(20), off(30), on(40)]);
    let notes = track.notes();

    assert_eq!(notes.len(), 2);
    assert_eq!((notes[0].on_tick, notes[0].off_tick), (0, 20));
    assert_eq!((notes[1].on_tick, notes[1].off_tick), (10, 30));
    assert_eq!(track.note_on_ticks(), [0, 10, 40]);
    assert_eq!(track.name(), None);
}

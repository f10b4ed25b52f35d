#![doc = r#"
Drum patterns: timed note events for each [`Voice`]

A [`Pattern`] is an ordered list of [`Event`]s placed on a beat timeline.
[`PatternConfig`] describes the grid (bars, beats per bar, subdivision)
and how each hit sounds; [`PatternConfig::pattern_for`] builds the
pattern for one voice.

# Example
```rust
# use drumpack::prelude::*;
let config = PatternConfig::default();
let kick = config.pattern_for(Voice::Kick);

assert_eq!(kick.len(), 32);
assert_eq!(kick.events()[1].start_beat(), 3.);
assert_eq!(kick.events()[1].pitch(), Note::MIDDLE_C);
```
"#]

mod generate;
pub use generate::*;

mod voice;
pub use voice::*;

use crate::{Note, ValidationError, Velocity};

#[doc = r#"
A single drum hit.

Pitch and velocity are range checked by their types. A zero velocity,
start and duration are checked when the hit is serialized, so an out of
range event can be built and is rejected before any byte is written.
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pitch: Note,
    velocity: Velocity,
    start_beat: f64,
    duration_beats: f64,
}

impl Event {
    /// Create an event
    pub const fn new(pitch: Note, velocity: Velocity, start_beat: f64, duration_beats: f64) -> Self {
        Self {
            pitch,
            velocity,
            start_beat,
            duration_beats,
        }
    }

    /// Create an event from raw pitch and velocity bytes.
    ///
    /// Velocity must be `1..=127`: a note on with velocity 0 reads back as a note off.
    pub fn try_new(
        pitch: u8,
        velocity: u8,
        start_beat: f64,
        duration_beats: f64,
    ) -> Result<Self, ValidationError> {
        let pitch = Note::from_databyte(pitch).map_err(|_| ValidationError::Pitch(pitch))?;
        let velocity = match Velocity::new(velocity) {
            Ok(v) if v.byte() > 0 => v,
            _ => return Err(ValidationError::Velocity(velocity)),
        };
        Ok(Self::new(pitch, velocity, start_beat, duration_beats))
    }

    /// The struck note
    pub const fn pitch(&self) -> Note {
        self.pitch
    }

    /// The strike velocity
    pub const fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Beats from the start of the timeline
    pub const fn start_beat(&self) -> f64 {
        self.start_beat
    }

    /// Length in beats
    pub const fn duration_beats(&self) -> f64 {
        self.duration_beats
    }

    /// The beat the note is released on
    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration_beats
    }
}

/// Events in ascending start order. Ties are allowed; order is not enforced.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    events: Vec<Event>,
}

impl Pattern {
    /// Wrap a list of events
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True with no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Start beats, in pattern order
    pub fn start_beats(&self) -> impl Iterator<Item = f64> + '_ {
        self.events.iter().map(Event::start_beat)
    }
}

impl FromIterator<Event> for Pattern {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Event;
    type IntoIter = core::slice::Iter<'a, Event>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// How every hit of a voice sounds: pitch, velocity and length.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// The struck note
    pub pitch: Note,
    /// The strike velocity
    pub velocity: Velocity,
    /// Length of each hit in beats
    pub duration_beats: f64,
}

impl Stroke {
    /// A hit of this stroke at `start_beat`
    pub const fn at(&self, start_beat: f64) -> Event {
        Event::new(self.pitch, self.velocity, start_beat, self.duration_beats)
    }

    /// One hit per position
    pub fn pattern(&self, beats: impl IntoIterator<Item = f64>) -> Pattern {
        beats.into_iter().map(|beat| self.at(beat)).collect()
    }
}

impl Default for Stroke {
    /// Middle C at velocity 100, a sixteenth note long
    fn default() -> Self {
        Self {
            pitch: Note::MIDDLE_C,
            velocity: Velocity::default(),
            duration_beats: 0.25,
        }
    }
}

/// Which pitch each voice is written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchMode {
    /// Every voice on the same note. The host's instrument mapping tells them apart.
    Uniform(Note),
    /// Each voice on its General MIDI percussion key
    GeneralMidi,
}

impl PitchMode {
    /// The note `voice` is written with
    pub const fn note_for(&self, voice: Voice) -> Note {
        match self {
            Self::Uniform(note) => *note,
            Self::GeneralMidi => voice.gm_note(),
        }
    }
}

impl Default for PitchMode {
    fn default() -> Self {
        Self::Uniform(Note::MIDDLE_C)
    }
}

/// The grid patterns are laid on, and how hits sound.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternConfig {
    /// Length of every pattern in bars
    pub bars: u32,
    /// Beats (quarter notes) in a bar
    pub beats_per_bar: u32,
    /// Hi-hat steps per beat; 2 is an eighth note grid
    pub subdivision: u32,
    /// Velocity of every hit
    pub velocity: Velocity,
    /// Length of every hit in beats
    pub duration_beats: f64,
    /// Pitch assignment
    pub pitch: PitchMode,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            bars: 32,
            beats_per_bar: 4,
            subdivision: 2,
            velocity: Velocity::default(),
            duration_beats: 0.25,
            pitch: PitchMode::default(),
        }
    }
}

impl PatternConfig {
    /// The stroke `voice` is played with
    pub const fn stroke_for(&self, voice: Voice) -> Stroke {
        Stroke {
            pitch: self.pitch.note_for(voice),
            velocity: self.velocity,
            duration_beats: self.duration_beats,
        }
    }

    /// Build the pattern of one voice
    pub fn pattern_for(&self, voice: Voice) -> Pattern {
        let (bars, bpb) = (self.bars, self.beats_per_bar);
        let stroke = self.stroke_for(voice);
        match voice {
            Voice::HiHat => stroke.pattern(hihat_beats(bars, bpb, self.subdivision)),
            Voice::Snare => stroke.pattern(snare_beats(bars, bpb)),
            Voice::Kick => stroke.pattern(kick_beats(bars, bpb)),
            Voice::OpenHat => stroke.pattern(open_hat_beats(bars, bpb)),
            Voice::Cymbal => stroke.pattern(cymbal_beats(bars, bpb)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_checks_ranges() {
        assert_eq!(Event::try_new(128, 100, 0., 1.), Err(ValidationError::Pitch(128)));
        assert_eq!(Event::try_new(60, 200, 0., 1.), Err(ValidationError::Velocity(200)));
        assert_eq!(Event::try_new(60, 0, 0., 1.), Err(ValidationError::Velocity(0)));

        let event = Event::try_new(36, 127, 3., 0.5).unwrap();
        assert_eq!(event.pitch().byte(), 36);
        assert_eq!(event.end_beat(), 3.5);
    }

    #[test]
    fn default_pitch_is_shared() {
        let config = PatternConfig::default();
        for voice in Voice::EXTENDED {
            let pattern = config.pattern_for(voice);
            assert!(pattern.events().iter().all(|e| e.pitch() == Note::MIDDLE_C));
        }
    }

    #[test]
    fn general_midi_pitches() {
        let config = PatternConfig {
            pitch: PitchMode::GeneralMidi,
            ..PatternConfig::default()
        };
        let snare = config.pattern_for(Voice::Snare);
        assert!(snare.events().iter().all(|e| e.pitch().byte() == 38));
        assert_eq!(config.stroke_for(Voice::HiHat).pitch.byte(), 42);
    }

    #[test]
    fn config_shapes_every_hit() {
        let config = PatternConfig {
            bars: 2,
            velocity: Velocity::new(64).unwrap(),
            duration_beats: 0.5,
            ..PatternConfig::default()
        };
        let hihat = config.pattern_for(Voice::HiHat);
        assert_eq!(hihat.len(), 16);
        assert!(
            hihat
                .events()
                .iter()
                .all(|e| e.velocity().byte() == 64 && e.duration_beats() == 0.5)
        );
    }
}

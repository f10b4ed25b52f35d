#![doc = r#"
The document handed to the serializer: tempo, resolution and named tracks
"#]

use crate::{Channel, Pattern};

/// Tempo, resolution and channel shared by every track of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceConfig {
    /// Beats per minute
    pub tempo_bpm: f64,
    /// Resolution of the file, `1..=32767`
    pub ticks_per_quarter_note: u16,
    /// Channel every note is written on
    pub channel: Channel,
}

impl Default for SequenceConfig {
    /// 156 BPM, 480 ticks per quarter note, channel one
    fn default() -> Self {
        Self {
            tempo_bpm: 156.,
            ticks_per_quarter_note: 480,
            channel: Channel::One,
        }
    }
}

/// A pattern and the name its track chunk carries
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceTrack {
    name: String,
    pattern: Pattern,
}

impl SequenceTrack {
    /// Name a pattern
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// The track name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The events of the track
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

#[doc = r#"
Everything needed to produce one file.

Values are checked by [`serialize`](crate::prelude::serialize), not here.
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceDocument {
    tempo_bpm: f64,
    ticks_per_quarter_note: u16,
    channel: Channel,
    tracks: Vec<SequenceTrack>,
}

impl SequenceDocument {
    /// An empty document using `config`
    pub fn new(config: &SequenceConfig) -> Self {
        Self {
            tempo_bpm: config.tempo_bpm,
            ticks_per_quarter_note: config.ticks_per_quarter_note,
            channel: config.channel,
            tracks: Vec::new(),
        }
    }

    /// Append a track
    pub fn with_track(mut self, track: SequenceTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Append a track in place
    pub fn push_track(&mut self, track: SequenceTrack) {
        self.tracks.push(track);
    }

    /// Beats per minute
    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    /// Resolution
    pub fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// Channel notes are written on
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Tracks, in file order
    pub fn tracks(&self) -> &[SequenceTrack] {
        &self.tracks
    }
}

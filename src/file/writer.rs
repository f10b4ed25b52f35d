use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::builder::{
    RawFormat,
    chunk::{RawHeaderChunk, write_track_chunk},
};
use crate::{
    Channel, Event, SequenceDocument, SequenceTrack, Tempo, Timing, ValidationError, WriteError,
    message::{ChannelVoiceMessage, MAX_VARLEN, MetaMessage, Ticked, TrackMessage},
    tempo::round_half_up,
};

/// Converts a beat position to ticks, rounding half up.
///
/// `None` if the result does not fit in a delta time.
fn beat_to_tick(beat: f64, ticks_per_quarter_note: u16) -> Option<u32> {
    let ticks = round_half_up(beat * ticks_per_quarter_note as f64);
    (ticks <= MAX_VARLEN as f64).then_some(ticks as u32)
}

/// Checks one event and returns its note on and note off ticks.
fn event_ticks(
    track: &SequenceTrack,
    index: usize,
    event: &Event,
    tpqn: u16,
) -> Result<(u32, u32), ValidationError> {
    let start = event.start_beat();
    let duration = event.duration_beats();

    if event.velocity().byte() == 0 {
        return Err(ValidationError::Velocity(0));
    }

    if !start.is_finite() {
        return Err(ValidationError::NonFiniteStart {
            track: track.name().to_owned(),
            index,
        });
    }
    if start < 0. {
        return Err(ValidationError::NegativeStart {
            track: track.name().to_owned(),
            index,
            beat: start,
        });
    }
    if !duration.is_finite() || duration <= 0. {
        return Err(ValidationError::InvalidDuration {
            track: track.name().to_owned(),
            index,
            duration,
        });
    }

    let end_beat = event.end_beat();
    match (beat_to_tick(start, tpqn), beat_to_tick(end_beat, tpqn)) {
        (Some(on), Some(off)) => Ok((on, off)),
        _ => Err(ValidationError::TickOverflow {
            track: track.name().to_owned(),
            index,
            end_beat,
        }),
    }
}

/// Lays out one track: tempo, name, then every note on and off sorted by tick,
/// closed by an end-of-track event on the last tick.
fn track_events(
    track: &SequenceTrack,
    tempo: Tempo,
    channel: Channel,
    tpqn: u16,
) -> Result<Vec<Ticked<TrackMessage>>, ValidationError> {
    let name_len = track.name().len();
    if name_len > MAX_VARLEN as usize {
        return Err(ValidationError::TrackNameLength(name_len));
    }

    let mut notes = Vec::with_capacity(track.pattern().len() * 2);
    for (index, event) in track.pattern().events().iter().enumerate() {
        let (on, off) = event_ticks(track, index, event, tpqn)?;
        notes.push(Ticked::new(
            on,
            ChannelVoiceMessage::note_on(channel, event.pitch(), event.velocity()).into(),
        ));
        notes.push(Ticked::new(
            off,
            ChannelVoiceMessage::note_off(channel, event.pitch()).into(),
        ));
    }
    // stable: events on the same tick keep their pattern order
    notes.sort_by_key(Ticked::accumulated_ticks);

    let last_tick = notes.last().map_or(0, Ticked::accumulated_ticks);

    let mut events = Vec::with_capacity(notes.len() + 3);
    events.push(Ticked::new(0, MetaMessage::Tempo(tempo).into()));
    events.push(Ticked::new(
        0,
        MetaMessage::TrackName(track.name().to_owned()).into(),
    ));
    events.extend(notes);
    events.push(Ticked::new(last_tick, MetaMessage::EndOfTrack.into()));
    Ok(events)
}

#[doc = r#"
Turns a document into the bytes of a format 1 Standard MIDI File.

Every track is validated before any byte is produced. Note ons land on
`round(start × tpqn)` and note offs on `round((start + duration) × tpqn)`,
with halves rounded up.

# Errors
A [`ValidationError`] for a bad tempo, resolution, track name, or an event
with velocity 0, a negative or non-finite start, a non-positive duration,
or an end past the last encodable tick.
"#]
pub fn serialize(doc: &SequenceDocument) -> Result<Vec<u8>, ValidationError> {
    let tempo = Tempo::from_bpm(doc.tempo_bpm())?;
    let tpqn = doc.ticks_per_quarter_note();
    let timing = Timing::new_ticks_per_quarter_note(tpqn)?;
    let num_tracks = u16::try_from(doc.tracks().len())
        .map_err(|_| ValidationError::TooManyTracks(doc.tracks().len()))?;

    let tracks = doc
        .tracks()
        .iter()
        .map(|track| track_events(track, tempo, doc.channel(), tpqn))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = Vec::new();
    RawHeaderChunk::new(RawFormat::simultaneous(num_tracks), timing).write(&mut out);
    for events in &tracks {
        write_track_chunk(&mut out, events);
    }
    trace!(bytes = out.len(), tracks = tracks.len(), "serialized document");
    Ok(out)
}

#[doc = r#"
Writes `bytes` to `path`, replacing whatever is there.

The bytes go to a temporary file in the same directory, which is renamed
onto `path` once fully written. A failed write leaves `path` untouched and
removes the temporary file.

# Errors
[`WriteError::Io`] if the directory does not exist, is not writable, or
the rename fails.
"#]
pub fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), WriteError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| WriteError::io(path, e))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| WriteError::io(path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| WriteError::io(path, e))?;
    }
    file.persist(path)
        .map_err(|e| WriteError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Serializes `doc` and writes it to `path`.
///
/// Nothing is written if the document is rejected.
pub fn write_document(path: impl Into<PathBuf>, doc: &SequenceDocument) -> Result<(), WriteError> {
    let path = path.into();
    let bytes = serialize(doc)?;
    write_file(&path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    fn document(pattern: Pattern) -> SequenceDocument {
        SequenceDocument::new(&SequenceConfig::default())
            .with_track(SequenceTrack::new("kick", pattern))
    }

    fn hit(start: f64, duration: f64) -> Event {
        Event::new(Note::MIDDLE_C, Velocity::default(), start, duration)
    }

    #[test]
    fn single_note_file_bytes() {
        let bytes = serialize(&document(Pattern::new(vec![hit(0., 0.25)]))).unwrap();

        #[rustfmt::skip]
        let expected = [
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0x01, 0xE0,
            b'M', b'T', b'r', b'k', 0, 0, 0, 27,
            0x00, 0xFF, 0x51, 0x03, 0x05, 0xDE, 0x67, // tempo, 156 BPM
            0x00, 0xFF, 0x03, 0x04, b'k', b'i', b'c', b'k', // track name
            0x00, 0x90, 60, 100, // note on at 0
            0x78, 0x80, 60, 0, // note off at 120
            0x00, 0xFF, 0x2F, 0x00, // end of track
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn empty_pattern_still_has_meta_events() {
        let bytes = serialize(&document(Pattern::default())).unwrap();
        let file = MidiFile::parse(&bytes).unwrap();
        let track = file.tracks()[0];
        assert_eq!(track.events().len(), 3);
        assert_eq!(track.name(), Some("kick"));
        assert!(track.events()[2].event().is_end_of_track());
    }

    #[test]
    fn ticks_round_half_up() {
        assert_eq!(beat_to_tick(0.5 / 480., 480), Some(1));
        assert_eq!(beat_to_tick(0.49 / 480., 480), Some(0));
        assert_eq!(beat_to_tick(1. / 3., 480), Some(160));
        // 96 * 0.015625 = 1.5
        assert_eq!(beat_to_tick(0.015625, 96), Some(2));
        assert_eq!(beat_to_tick(1e12, 480), None);
    }

    #[test]
    fn negative_start_is_rejected() {
        let doc = document(Pattern::new(vec![hit(0., 1.), hit(-0.5, 1.)]));
        assert_eq!(
            serialize(&doc),
            Err(ValidationError::NegativeStart {
                track: "kick".into(),
                index: 1,
                beat: -0.5,
            })
        );
    }

    #[test]
    fn silent_hit_is_rejected() {
        let silent = Event::new(Note::MIDDLE_C, Velocity::new(0).unwrap(), 1., 0.5);
        let doc = document(Pattern::new(vec![hit(0., 0.5), silent]));
        assert_eq!(serialize(&doc), Err(ValidationError::Velocity(0)));
        assert_eq!(Event::try_new(60, 0, 1., 0.5), Err(ValidationError::Velocity(0)));

        let quiet = Event::try_new(60, 1, 1., 0.5).unwrap();
        let doc = document(Pattern::new(vec![quiet]));
        let file = MidiFile::parse(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(file.tracks()[0].note_on_ticks(), [480]);
        assert_eq!(file.tracks()[0].notes().len(), 1);
    }

    #[test]
    fn bad_durations_are_rejected() {
        for duration in [0., -1., f64::NAN, f64::INFINITY] {
            let doc = document(Pattern::new(vec![hit(1., duration)]));
            assert!(matches!(
                serialize(&doc),
                Err(ValidationError::InvalidDuration { index: 0, .. })
            ));
        }
        let doc = document(Pattern::new(vec![hit(f64::NAN, 1.)]));
        assert!(matches!(
            serialize(&doc),
            Err(ValidationError::NonFiniteStart { .. })
        ));
        let doc = document(Pattern::new(vec![hit(1e9, 1.)]));
        assert!(matches!(
            serialize(&doc),
            Err(ValidationError::TickOverflow { .. })
        ));
    }

    #[test]
    fn document_level_validation() {
        let config = SequenceConfig {
            tempo_bpm: 0.,
            ..SequenceConfig::default()
        };
        assert_eq!(
            serialize(&SequenceDocument::new(&config)),
            Err(ValidationError::Tempo(0.))
        );

        let config = SequenceConfig {
            ticks_per_quarter_note: 0,
            ..SequenceConfig::default()
        };
        assert_eq!(
            serialize(&SequenceDocument::new(&config)),
            Err(ValidationError::TicksPerQuarterNote(0))
        );
    }

    #[test]
    fn out_of_order_events_are_sorted() {
        let doc = document(Pattern::new(vec![hit(2., 0.5), hit(0., 0.5), hit(1., 0.5)]));
        let file = MidiFile::parse(&serialize(&doc).unwrap()).unwrap();
        let track = file.tracks()[0];

        assert_eq!(track.note_on_ticks(), [0, 480, 960]);
        let ticks: Vec<u32> = track.events().iter().map(Ticked::accumulated_ticks).collect();
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn touching_notes_release_before_retrigger() {
        let doc = document(Pattern::new(vec![hit(0., 1.), hit(1., 1.)]));
        let file = MidiFile::parse(&serialize(&doc).unwrap()).unwrap();
        let at_480: Vec<bool> = file.tracks()[0]
            .channel_voice()
            .filter(|(tick, _)| *tick == 480)
            .map(|(_, cv)| cv.is_note_on())
            .collect();
        assert_eq!(at_480, [false, true]);
    }

    #[test]
    fn channel_is_applied() {
        let config = SequenceConfig {
            channel: Channel::Ten,
            ..SequenceConfig::default()
        };
        let doc = SequenceDocument::new(&config)
            .with_track(SequenceTrack::new("snare", generate_snare(1, 4)));
        let file = MidiFile::parse(&serialize(&doc).unwrap()).unwrap();
        assert!(
            file.tracks()[0]
                .channel_voice()
                .all(|(_, cv)| cv.channel() == Channel::Ten)
        );
    }

    #[test]
    fn write_file_needs_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("kick.mid");
        let err = write_file(&path, b"MThd").unwrap_err();
        assert!(matches!(err, WriteError::Io { path: p, .. } if p == path));
        assert!(!path.exists());
    }

    #[test]
    fn write_file_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kick.mid");
        write_file(&path, b"first version").unwrap();
        write_file(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        // only the destination remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn rejected_document_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kick.mid");
        let doc = document(Pattern::new(vec![hit(-1., 1.)]));

        let err = write_document(&path, &doc).unwrap_err();
        assert!(err.is_validation());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

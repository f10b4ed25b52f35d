use drumpack::prelude::*;
use pretty_assertions::assert_eq;

fn parse_voice(config: &PatternConfig, sequence: &SequenceConfig, voice: Voice) -> MidiFile {
    let document = SequenceDocument::new(sequence)
        .with_track(SequenceTrack::new(voice.label(), config.pattern_for(voice)));
    MidiFile::parse(&serialize(&document).unwrap()).unwrap()
}

#[test]
fn thirty_two_bars_at_156() {
    let config = PatternConfig::default();
    let sequence = SequenceConfig::default();

    let hihat = parse_voice(&config, &sequence, Voice::HiHat);
    assert_eq!(hihat.format_type(), FormatType::Simultaneous);
    assert_eq!(hihat.tempo().unwrap().micros_per_quarter_note(), 384_615);
    let ticks = hihat.tracks()[0].note_on_ticks();
    assert_eq!(ticks.len(), 256);
    assert_eq!(ticks[..4], [0, 240, 480, 720]);
    assert_eq!(ticks.last(), Some(&(127 * 480 + 240)));

    let snare = parse_voice(&config, &sequence, Voice::Snare);
    let ticks = snare.tracks()[0].note_on_ticks();
    let expected: Vec<u32> = (0..32).map(|k| (k * 4 + 2) * 480).collect();
    assert_eq!(ticks, expected);

    let kick = parse_voice(&config, &sequence, Voice::Kick);
    let ticks = kick.tracks()[0].note_on_ticks();
    assert_eq!(ticks.len(), 32);
    assert_eq!(ticks[..4], [0, 3 * 480, 8 * 480, 11 * 480]);
}

#[test]
fn every_note_is_released_after_its_duration() {
    let config = PatternConfig::default();
    let file = parse_voice(&config, &SequenceConfig::default(), Voice::HiHat);
    let track = file.tracks()[0];

    let notes = track.notes();
    assert_eq!(notes.len(), 256);
    for span in &notes {
        assert_eq!(span.off_tick - span.on_tick, 120);
        assert_eq!(span.note, Note::MIDDLE_C);
        assert_eq!(span.velocity.byte(), 100);
    }

    let last = track.events().last().unwrap();
    assert!(last.event().is_end_of_track());
    assert_eq!(last.accumulated_ticks(), 127 * 480 + 240 + 120);
}

#[test]
fn multi_track_document() {
    let config = PatternConfig {
        bars: 4,
        pitch: PitchMode::GeneralMidi,
        ..PatternConfig::default()
    };
    let sequence = SequenceConfig {
        tempo_bpm: 120.,
        ticks_per_quarter_note: 96,
        channel: Channel::Ten,
    };

    let mut document = SequenceDocument::new(&sequence);
    for voice in Voice::EXTENDED {
        document.push_track(SequenceTrack::new(voice.label(), config.pattern_for(voice)));
    }
    let file = MidiFile::parse(&serialize(&document).unwrap()).unwrap();

    assert_eq!(file.timing().ticks_per_quarter_note(), Some(96));
    assert_eq!(file.tempo(), Some(Tempo::DEFAULT));

    let names: Vec<_> = file.tracks().iter().map(|t| t.name().unwrap().to_owned()).collect();
    assert_eq!(names, ["hihat", "snare", "kick", "openhat", "cymbal"]);

    for (track, voice) in file.tracks().into_iter().zip(Voice::EXTENDED) {
        assert_eq!(track.tempo(), Some(Tempo::DEFAULT));
        assert!(
            track
                .notes()
                .iter()
                .all(|n| n.note == voice.gm_note())
        );
        assert!(
            track
                .channel_voice()
                .all(|(_, cv)| cv.channel() == Channel::Ten)
        );
    }

    let open_hat = file.tracks()[3].note_on_ticks();
    assert_eq!(open_hat[..3], [240, 288, 336]);
}

#[test]
fn serialization_is_deterministic() {
    let config = PatternConfig::default();
    let make = || {
        SequenceDocument::new(&SequenceConfig::default())
            .with_track(SequenceTrack::new("kick", config.pattern_for(Voice::Kick)))
            .with_track(SequenceTrack::new("snare", config.pattern_for(Voice::Snare)))
    };
    assert_eq!(serialize(&make()).unwrap(), serialize(&make()).unwrap());
}

#[test]
fn tempo_survives_within_rounding() {
    for bpm in [60., 90.5, 156., 174.25, 300.] {
        let sequence = SequenceConfig {
            tempo_bpm: bpm,
            ..SequenceConfig::default()
        };
        let file = parse_voice(&PatternConfig::default(), &sequence, Voice::Snare);
        let read = file.tempo().unwrap().bpm();
        assert!((read - bpm).abs() < 0.01, "{bpm} came back as {read}");
    }
}

#[test]
fn written_file_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snare.mid");
    let document = SequenceDocument::new(&SequenceConfig::default())
        .with_track(SequenceTrack::new("snare", generate_snare(32, 4)));

    write_document(&path, &document).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, serialize(&document).unwrap());
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.tracks()[0].note_on_ticks().len(), 32);
}

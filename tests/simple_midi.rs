use drumpack::prelude::*;

/// Format 0, 96 ticks per quarter note, a chord over three channels
/// with running status on channel three.
#[rustfmt::skip]
const SIMPLE: &[u8] = &[
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 45,
    0x00, 0xFF, 0x03, 0x06, b's', b'i', b'm', b'p', b'l', b'e',
    0x00, 0x92, 48, 96,
    0x00, 60, 96,
    0x60, 0x91, 67, 64,
    0x60, 0x90, 76, 32,
    0x81, 0x40, 0x82, 48, 64,
    0x00, 60, 64,
    0x00, 0x81, 67, 64,
    0x00, 0x80, 76, 64,
    0x00, 0xFF, 0x2F, 0x00,
];

#[test]
fn test_parse() {
    let parsed = MidiFile::parse(SIMPLE).unwrap();

    assert_eq!(parsed.format_type(), FormatType::SingleMultiChannel);
    assert_eq!(parsed.timing().ticks_per_quarter_note(), Some(96));
    assert_eq!(parsed.tracks().len(), 1);
    assert_eq!(parsed.tempo(), None);

    let track = parsed.tracks()[0];
    assert_eq!(track.name(), Some("simple"));

    let mut events = track.events().iter().skip(1);

    use Channel::*;
    note_on(events.next().unwrap(), 0, Three, Key::C, 3, 96);
    note_on(events.next().unwrap(), 0, Three, Key::C, 4, 96);
    note_on(events.next().unwrap(), 96, Two, Key::G, 4, 64);
    note_on(events.next().unwrap(), 192, One, Key::E, 5, 32);
    note_off(events.next().unwrap(), 384, Three, Key::C, 3);
    note_off(events.next().unwrap(), 384, Three, Key::C, 4);
    note_off(events.next().unwrap(), 384, Two, Key::G, 4);
    note_off(events.next().unwrap(), 384, One, Key::E, 5);
    assert!(events.next().unwrap().event().is_end_of_track());
    assert!(events.next().is_none());
}

#[test]
fn test_note_spans() {
    let parsed = MidiFile::parse(SIMPLE).unwrap();
    let spans = parsed.tracks()[0].notes();

    let summary: Vec<(u8, u32, u32)> = spans
        .iter()
        .map(|s| (s.note.byte(), s.on_tick, s.off_tick))
        .collect();
    assert_eq!(
        summary,
        [(48, 0, 384), (60, 0, 384), (67, 96, 384), (76, 192, 384)]
    );
}

fn note_on(
    e: &Ticked<TrackMessage>,
    accumulated_ticks: u32,
    channel: Channel,
    note: Key,
    octave: i8,
    vel: u8,
) {
    assert_eq!(e.accumulated_ticks(), accumulated_ticks);
    let TrackMessage::ChannelVoice(cv) = e.event() else {
        panic!("expected a channel voice message, got {:?}", e.event());
    };

    assert_eq!(cv.channel(), channel);
    let VoiceEvent::NoteOn {
        note: key,
        velocity,
    } = cv.event()
    else {
        panic!("expected a note on, got {:?}", cv.event());
    };
    assert_eq!(key.key(), note);
    assert_eq!(key.octave().value(), octave);
    assert_eq!(velocity.byte(), vel);
}

fn note_off(
    e: &Ticked<TrackMessage>,
    accumulated_ticks: u32,
    channel: Channel,
    note: Key,
    octave: i8,
) {
    assert_eq!(e.accumulated_ticks(), accumulated_ticks);
    let TrackMessage::ChannelVoice(cv) = e.event() else {
        panic!("expected a channel voice message, got {:?}", e.event());
    };

    assert_eq!(cv.channel(), channel);
    assert!(cv.is_note_off());
    let key = cv.note().unwrap();
    assert_eq!(key.key(), note);
    assert_eq!(key.octave().value(), octave);
}

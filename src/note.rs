use core::fmt;

use crate::{DataByte, ParseError};

#[doc = r#"
Identifies the pitch of a note.

Notes are interpreted as a 7-bit number. Each value corresponds to some
[`Key`] and [`Octave`]: [`Note`] `0` is `C(-1)`, [`Note`] `60` is `C4`,
and [`Note`] `127` is `G9`.

Drum voices use the General MIDI percussion map, where the pitch picks
the instrument rather than a tone.

# Example
```rust
# use drumpack::prelude::*;
let note = Note::from_databyte(42).unwrap();

assert_eq!(note.key(), Key::FSharp);
assert_eq!(note.octave().value(), 2);
assert_eq!(note.to_string(), "F#:2");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(DataByte);

impl Note {
    /// Middle C, the pitch every voice shares unless configured otherwise.
    pub const MIDDLE_C: Self = Self(DataByte(60));

    /// Create a new note.
    ///
    /// Checks for correctness (leading 0 bit).
    pub fn from_databyte<B>(rep: B) -> Result<Self, ParseError>
    where
        B: TryInto<DataByte, Error = ParseError>,
    {
        rep.try_into().map(Self)
    }

    /// Creates a new note without checking for the validity of the byte
    pub const fn from_databyte_unchecked(byte: u8) -> Self {
        Self(DataByte::new_unchecked(byte))
    }

    /// Identifies the key of the note
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_data_byte(&self.0)
    }

    /// Identifies the octave of the note
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave::from_data_byte(&self.0)
    }

    /// Returns the underlying byte of the note
    pub const fn byte(&self) -> u8 {
        self.0.0
    }
}

impl From<DataByte> for Note {
    fn from(value: DataByte) -> Self {
        Self(value)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key(), self.octave())
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[doc = r#"
The pitch class of a [`Note`]
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    /// Identify the key from a note byte.
    #[inline]
    pub const fn from_data_byte(key: &DataByte) -> Self {
        use Key::*;
        match key.value() % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

#[doc = r#"
Identifies the octave of a [`Note`]. Values range from -1 to 9.
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Octave(i8);

impl Octave {
    /// Identify an octave from a note byte.
    pub const fn from_data_byte(key: &DataByte) -> Self {
        Self((key.value() / 12) as i8 - 1)
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[test]
fn middle_c_is_sixty() {
    assert_eq!(Note::MIDDLE_C.key(), Key::C);
    assert_eq!(Note::MIDDLE_C.octave().value(), 4);
    assert_eq!(Note::MIDDLE_C.to_string(), "C:4");
}

#[test]
fn gm_drum_notes() {
    let closed_hat = Note::from_databyte(42).unwrap();
    assert_eq!(closed_hat.to_string(), "F#:2");

    let kick = Note::from_databyte(36).unwrap();
    assert_eq!((kick.key(), kick.octave().value()), (Key::C, 2));
}

#[test]
fn key_and_octave_cover_every_note() {
    for byte in 0..128u8 {
        let note = Note::from_databyte(byte).unwrap();
        let rebuilt = (note.octave().value() + 1) as u8 * 12 + note.key() as u8;
        assert_eq!(rebuilt, byte);
    }
    assert_eq!(Note::from_databyte(0).unwrap().to_string(), "C:-1");
    assert_eq!(Note::from_databyte(127).unwrap().to_string(), "G:9");
    assert!(Note::from_databyte(128).is_err());
}

use core::fmt;

use crate::Note;

#[doc = r#"
A drum voice: what gets its own track and its own file in a pack.

# Example
```rust
# use drumpack::prelude::*;
assert_eq!(Voice::HiHat.file_name(), "hihat.mid");
assert_eq!(Voice::Kick.gm_note().byte(), 36);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Voice {
    /// Closed hi-hat on every subdivision step
    HiHat,
    /// Backbeat snare
    Snare,
    /// Kick on the first and fourth beat of every two-bar group
    Kick,
    /// Open hi-hat on the off-beats of the second half of each bar
    OpenHat,
    /// Crash cymbal every eight bars
    Cymbal,
}

impl Voice {
    /// The voices every pack contains
    pub const CORE: [Voice; 3] = [Voice::HiHat, Voice::Snare, Voice::Kick];

    /// The core voices plus open hi-hat and cymbal
    pub const EXTENDED: [Voice; 5] = [
        Voice::HiHat,
        Voice::Snare,
        Voice::Kick,
        Voice::OpenHat,
        Voice::Cymbal,
    ];

    /// Lowercase name, used as the track name and the file stem
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HiHat => "hihat",
            Self::Snare => "snare",
            Self::Kick => "kick",
            Self::OpenHat => "openhat",
            Self::Cymbal => "cymbal",
        }
    }

    /// Name of the file this voice is written to
    pub fn file_name(&self) -> String {
        format!("{}.mid", self.label())
    }

    /// The General MIDI percussion key for this voice
    pub const fn gm_note(&self) -> Note {
        let byte = match self {
            Self::HiHat => 42,
            Self::Snare => 38,
            Self::Kick => 36,
            Self::OpenHat => 46,
            Self::Cymbal => 49,
        };
        Note::from_databyte_unchecked(byte)
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

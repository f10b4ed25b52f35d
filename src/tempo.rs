use core::fmt;

use crate::ValidationError;

/// Microseconds in one minute
const MICROS_PER_MINUTE: f64 = 60_000_000.;

/// Largest value a tempo meta event can carry (24 bits)
const MAX_MICROS_PER_QUARTER_NOTE: u32 = 0x00FF_FFFF;

/// Rounds to the nearest integer, with halves going up.
///
/// Every beat-to-tick conversion in the crate goes through this.
#[inline]
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[doc = r#"
The payload of a tempo meta event: microseconds per quarter note.

# Example
```rust
# use drumpack::prelude::*;
let tempo = Tempo::from_bpm(156.).unwrap();
// 60_000_000 / 156 = 384615.38...
assert_eq!(tempo.micros_per_quarter_note(), 384_615);
assert_eq!(tempo.to_bytes(), [0x05, 0xDE, 0x67]);
```
"#]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// 120 BPM, what a file without a tempo event plays at
    pub const DEFAULT: Self = Self(500_000);

    /// Converts beats per minute with `60_000_000 / bpm`, rounding half up.
    pub fn from_bpm(bpm: f64) -> Result<Self, ValidationError> {
        if !bpm.is_finite() || bpm <= 0. {
            return Err(ValidationError::Tempo(bpm));
        }
        let micros = round_half_up(MICROS_PER_MINUTE / bpm);
        if !(1. ..=MAX_MICROS_PER_QUARTER_NOTE as f64).contains(&micros) {
            return Err(ValidationError::TempoRange(bpm));
        }
        Ok(Self(micros as u32))
    }

    /// Read the three big-endian bytes of a tempo meta event
    pub const fn new_from_bytes(bytes: &[u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// The three big-endian bytes of a tempo meta event
    pub const fn to_bytes(&self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Beats per minute, reconstructed from the stored microseconds
    pub fn bpm(&self) -> f64 {
        MICROS_PER_MINUTE / self.0 as f64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} BPM", self.bpm())
    }
}

#[test]
fn rounds_half_up() {
    assert_eq!(round_half_up(0.5), 1.);
    assert_eq!(round_half_up(1.49), 1.);
    assert_eq!(round_half_up(2.5), 3.);
    assert_eq!(round_half_up(0.), 0.);
}

#[test]
fn tempo_round_trips_through_bytes() {
    let tempo = Tempo::from_bpm(120.).unwrap();
    assert_eq!(tempo, Tempo::DEFAULT);
    assert_eq!(Tempo::new_from_bytes(&tempo.to_bytes()), tempo);
    assert_eq!(tempo.bpm(), 120.);
}

#[test]
fn rejects_unrepresentable_tempos() {
    assert_eq!(Tempo::from_bpm(0.), Err(ValidationError::Tempo(0.)));
    assert_eq!(Tempo::from_bpm(-10.), Err(ValidationError::Tempo(-10.)));
    assert!(matches!(
        Tempo::from_bpm(f64::NAN),
        Err(ValidationError::Tempo(_))
    ));
    // 60_000_000 / 3 does not fit in 24 bits
    assert_eq!(Tempo::from_bpm(3.), Err(ValidationError::TempoRange(3.)));
    // nor does anything that rounds to zero microseconds
    assert_eq!(
        Tempo::from_bpm(200_000_000.),
        Err(ValidationError::TempoRange(200_000_000.))
    );
}

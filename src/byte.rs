use crate::ParseError;

#[doc = r#"
A 7-bit value, the payload of every channel voice message.

# Example
```rust
# use drumpack::prelude::*;
let byte = DataByte::new(100).unwrap();
assert_eq!(byte.value(), 100);

assert!(DataByte::new(0x80).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 0x7F {
            return Err(ParseError::InvalidDataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Drops the leading bit instead of checking it
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// The underlying value, `0..=127`
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How hard a note is struck.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity(DataByte);

impl Velocity {
    /// The loudest velocity
    pub const MAX: Self = Self(DataByte(127));

    /// Create a velocity, failing if the byte is over 127
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        match DataByte::new(byte) {
            Ok(b) => Ok(Self(b)),
            Err(e) => Err(e),
        }
    }

    /// Create a velocity from a byte known to be valid
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(DataByte::new_unchecked(byte))
    }

    /// The raw velocity byte
    pub const fn byte(&self) -> u8 {
        self.0.0
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::new_unchecked(100)
    }
}

impl From<DataByte> for Velocity {
    fn from(value: DataByte) -> Self {
        Self(value)
    }
}

#[test]
fn data_byte_rejects_status_bytes() {
    assert_eq!(DataByte::new(0x7F).unwrap().value(), 127);
    assert_eq!(DataByte::new(0x90), Err(ParseError::InvalidDataByte(0x90)));
    assert_eq!(DataByte::new_unchecked(0xC5).value(), 0x45);
}

#[test]
fn velocity_defaults_to_hundred() {
    assert_eq!(Velocity::default().byte(), 100);
    assert!(Velocity::new(128).is_err());
}

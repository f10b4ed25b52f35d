use super::Track;

/// The three ways a Standard MIDI File can lay out its tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Format 0: one track carrying every channel
    SingleMultiChannel,
    /// Format 1: tracks that play at the same time
    Simultaneous,
    /// Format 2: tracks that are independent patterns
    SequentiallyIndependent,
}

impl FormatType {
    /// The value stored in the header chunk
    pub const fn as_u16(&self) -> u16 {
        match self {
            Self::SingleMultiChannel => 0,
            Self::Simultaneous => 1,
            Self::SequentiallyIndependent => 2,
        }
    }
}

/// The tracks of a parsed file, grouped by how they are meant to be played
#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    /// Format 0
    SingleMultiChannel(Track),
    /// Format 1
    Simultaneous(Vec<Track>),
    /// Format 2
    SequentiallyIndependent(Vec<Track>),
}

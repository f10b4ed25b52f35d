/// A chunk this crate has no use for, kept only so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChunk<'a> {
    id: [u8; 4],
    data: &'a [u8],
}

impl<'a> UnknownChunk<'a> {
    pub(crate) const fn new(id: [u8; 4], data: &'a [u8]) -> Self {
        Self { id, data }
    }

    /// The four identifier bytes, lossily decoded
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    /// Length of the chunk data
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the chunk carries no data
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

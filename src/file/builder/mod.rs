mod format;
pub use format::*;

pub mod chunk;

use super::MidiFile;
use crate::{
    ChunkError, FileError,
    file::{Format, FormatType, builder::chunk::ChunkEvent},
    reader::ReaderErrorKind,
};
use chunk::RawHeaderChunk;
use tracing::{debug, warn};

/// A builder used to create a new [`MidiFile`].
///
/// Chunks are fed in file order. Headers that arrive after tracks are accepted.
#[derive(Default, Debug)]
pub struct MidiFileBuilder {
    header: Option<RawHeaderChunk>,
    tracks: Vec<super::Track>,
    unknown_chunks: usize,
}

impl MidiFileBuilder {
    /// Handles a chunk of a midi file.
    pub fn handle_chunk(&mut self, chunk: ChunkEvent<'_>) -> Result<(), ReaderErrorKind> {
        use ChunkEvent::*;
        match chunk {
            Header(h) => {
                if self.header.is_some() {
                    return Err(ReaderErrorKind::chunk(ChunkError::DuplicateHeader));
                }
                self.header = Some(h);
                Ok(())
            }
            Track(t) => {
                let events = t.events().map_err(|e| e.kind)?;
                self.tracks.push(super::Track::new(events));
                Ok(())
            }
            Unknown(data) => {
                debug!(chunk = %data.name(), len = data.len(), "skipping unknown chunk");
                self.unknown_chunks += 1;
                Ok(())
            }
            Eof => Err(ReaderErrorKind::Eof),
        }
    }

    /// Number of chunks that were neither headers nor tracks
    pub fn unknown_chunks(&self) -> usize {
        self.unknown_chunks
    }

    /// Attempts to finish the midifile from the provided chunks.
    pub fn build(self) -> Result<MidiFile, crate::ParseError> {
        let Some(header) = self.header else {
            return Err(FileError::NoHeader.into());
        };

        let declared = header.format().num_tracks() as usize;
        if declared != self.tracks.len() {
            warn!(
                declared,
                found = self.tracks.len(),
                "header track count does not match the track chunks"
            );
        }

        let format = match header.format_type() {
            FormatType::SingleMultiChannel => {
                let count = self.tracks.len();
                let mut tracks = self.tracks.into_iter();
                match (tracks.next(), count) {
                    (Some(track), 1) => Format::SingleMultiChannel(track),
                    _ => {
                        return Err(ChunkError::MultipleTracksForSingleMultiChannel(count).into());
                    }
                }
            }
            FormatType::Simultaneous => Format::Simultaneous(self.tracks),
            FormatType::SequentiallyIndependent => Format::SequentiallyIndependent(self.tracks),
        };

        Ok(MidiFile {
            timing: header.timing(),
            format,
        })
    }
}

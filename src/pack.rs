#![doc = r#"
Writing a drum pack to disk

A pack is one root folder holding `participants` subfolders, each with one
file per [`Voice`]. Every voice is serialized once; the bytes are then
written into every subfolder, one worker thread per subfolder.

# Example
```rust,no_run
# use drumpack::prelude::*;
let config = PackConfig::new("/tmp", "drum_samples_demo");
let report = build_pack(&config).unwrap();

assert!(report.is_success());
assert_eq!(report.written.len(), 30);
```
"#]

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    thread,
};

use chrono::{DateTime, TimeZone};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    SequenceConfig, SequenceDocument, SequenceTrack, ValidationError, WriteError,
    file::{serialize, write_file},
    pattern::{PatternConfig, Voice},
};

/// Folder name used when none is given: `drum_samples_` and the date and time.
pub fn timestamp_folder_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format("drum_samples_%Y-%m-%d_%H-%M-%S").to_string()
}

/// The trimmed `input`, or a timestamp folder name when it is blank.
pub fn folder_name_or_timestamp<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    match input.trim() {
        "" => timestamp_folder_name(now),
        name => name.to_owned(),
    }
}

/// Where a pack goes and what it contains.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackConfig {
    /// Directory the pack folder is created in
    pub base_dir: PathBuf,
    /// Name of the pack folder
    pub folder_name: String,
    /// Number of participant subfolders
    pub participants: u32,
    /// Prefix of each subfolder name
    pub prefix: String,
    /// Voices written into every subfolder
    pub voices: Vec<Voice>,
    /// Grid and sound of the patterns
    pub pattern: PatternConfig,
    /// Tempo, resolution and channel of every file
    pub sequence: SequenceConfig,
}

impl PackConfig {
    /// Ten `bR` subfolders of the core voices, with default patterns and sequence.
    pub fn new(base_dir: impl Into<PathBuf>, folder_name: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            folder_name: folder_name.into(),
            participants: 10,
            prefix: "bR".to_owned(),
            voices: Voice::CORE.to_vec(),
            pattern: PatternConfig::default(),
            sequence: SequenceConfig::default(),
        }
    }

    /// Replace the voice list
    pub fn with_voices(mut self, voices: impl IntoIterator<Item = Voice>) -> Self {
        self.voices = voices.into_iter().collect();
        self
    }

    /// The pack folder
    pub fn root(&self) -> PathBuf {
        self.base_dir.join(&self.folder_name)
    }

    /// Subfolder `n`, counting from one: `<prefix> PARTICIPATION <n>`
    pub fn participant_dir(&self, n: u32) -> PathBuf {
        self.root().join(format!("{} PARTICIPATION {}", self.prefix, n))
    }

    /// The single-track document written for `voice`
    pub fn document_for(&self, voice: Voice) -> SequenceDocument {
        SequenceDocument::new(&self.sequence)
            .with_track(SequenceTrack::new(voice.label(), self.pattern.pattern_for(voice)))
    }
}

/// A file that could not be written
#[derive(Debug)]
pub struct PackFailure {
    /// The destination
    pub path: PathBuf,
    /// What went wrong
    pub error: WriteError,
}

impl fmt::Display for PackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            WriteError::Io { .. } => write!(f, "{}", self.error),
            WriteError::Validation(e) => write!(f, "{}: {e}", self.path.display()),
        }
    }
}

/// The outcome of [`build_pack`]. Both lists are sorted by path.
#[derive(Debug)]
pub struct PackReport {
    /// The pack folder
    pub root: PathBuf,
    /// Files written
    pub written: Vec<PathBuf>,
    /// Files that failed
    pub failures: Vec<PackFailure>,
}

impl PackReport {
    /// True when every file was written
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Failures that stop a pack before any file is attempted
#[derive(Debug, Error)]
pub enum PackError {
    /// The pack folder could not be created
    #[error("Could not create {}: {source}", .path.display())]
    CreateRoot {
        /// The pack folder
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },
}

type Rendered = (Voice, Result<Vec<u8>, ValidationError>);

fn write_participant(dir: &Path, rendered: &[Rendered]) -> Vec<Result<PathBuf, PackFailure>> {
    let dir_error = fs::create_dir_all(dir).err();

    rendered
        .iter()
        .map(|(voice, bytes)| {
            let path = dir.join(voice.file_name());
            let result = match (&dir_error, bytes) {
                (Some(e), _) => Err(WriteError::io(&path, io::Error::new(e.kind(), e.to_string()))),
                (None, Err(e)) => Err(WriteError::Validation(e.clone())),
                (None, Ok(bytes)) => write_file(&path, bytes),
            };
            match result {
                Ok(()) => Ok(path),
                Err(error) => {
                    warn!(path = %path.display(), %error, "failed to write file");
                    Err(PackFailure { path, error })
                }
            }
        })
        .collect()
}

#[doc = r#"
Creates the pack folder and writes every voice into every subfolder.

A file that fails is recorded in the report and the rest are still
written. Existing files are replaced.

# Errors
[`PackError::CreateRoot`] if the pack folder itself cannot be created.
"#]
pub fn build_pack(config: &PackConfig) -> Result<PackReport, PackError> {
    let root = config.root();
    fs::create_dir_all(&root).map_err(|source| PackError::CreateRoot {
        path: root.clone(),
        source,
    })?;
    info!(
        root = %root.display(),
        participants = config.participants,
        voices = config.voices.len(),
        "building pack"
    );

    let rendered: Vec<Rendered> = config
        .voices
        .iter()
        .map(|&voice| {
            debug!(%voice, note = %config.pattern.pitch.note_for(voice), "rendering voice");
            (voice, serialize(&config.document_for(voice)))
        })
        .collect();

    let results: Vec<Result<PathBuf, PackFailure>> = thread::scope(|s| {
        let handles: Vec<_> = (1..=config.participants)
            .map(|n| {
                let dir = config.participant_dir(n);
                let rendered = &rendered;
                s.spawn(move || write_participant(&dir, rendered))
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut written = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(path) => written.push(path),
            Err(failure) => failures.push(failure),
        }
    }
    written.sort();
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(written = written.len(), failed = failures.len(), "pack finished");
    Ok(PackReport {
        root,
        written,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn timestamp_names() {
        let now = Utc.with_ymd_and_hms(2025, 5, 12, 9, 4, 7).unwrap();
        assert_eq!(timestamp_folder_name(&now), "drum_samples_2025-05-12_09-04-07");
        assert_eq!(folder_name_or_timestamp("  \n", &now), "drum_samples_2025-05-12_09-04-07");
        assert_eq!(folder_name_or_timestamp(" my pack \n", &now), "my pack");
    }

    #[test]
    fn participant_dirs() {
        let config = PackConfig::new("/base", "pack");
        assert_eq!(config.root(), Path::new("/base/pack"));
        assert_eq!(
            config.participant_dir(10),
            Path::new("/base/pack/bR PARTICIPATION 10")
        );
    }

    #[test]
    fn writes_every_voice_in_every_folder() {
        let base = tempdir().unwrap();
        let config = PackConfig::new(base.path(), "pack");
        let report = build_pack(&config).unwrap();

        assert!(report.is_success());
        assert_eq!(report.written.len(), 30);
        for n in 1..=10 {
            let dir = config.participant_dir(n);
            for name in ["hihat.mid", "snare.mid", "kick.mid"] {
                assert!(dir.join(name).is_file());
            }
        }
        let mut sorted = report.written.clone();
        sorted.sort();
        assert_eq!(report.written, sorted);
    }

    #[test]
    fn extended_voices_add_files() {
        let base = tempdir().unwrap();
        let config = PackConfig {
            participants: 2,
            ..PackConfig::new(base.path(), "pack")
        }
        .with_voices(Voice::EXTENDED);
        let report = build_pack(&config).unwrap();

        assert_eq!(report.written.len(), 10);
        assert!(config.participant_dir(2).join("cymbal.mid").is_file());
    }

    #[test]
    fn rerun_gives_identical_files() {
        let base = tempdir().unwrap();
        let config = PackConfig::new(base.path(), "pack");
        let first = build_pack(&config).unwrap();
        let before: Vec<Vec<u8>> = first.written.iter().map(|p| fs::read(p).unwrap()).collect();

        let second = build_pack(&config).unwrap();
        let after: Vec<Vec<u8>> = second.written.iter().map(|p| fs::read(p).unwrap()).collect();

        assert_eq!(first.written, second.written);
        assert_eq!(before, after);
        // every folder holds the same bytes for a voice
        let kick = |n| fs::read(config.participant_dir(n).join("kick.mid")).unwrap();
        assert_eq!(kick(1), kick(7));
    }

    #[test]
    fn one_bad_file_does_not_stop_the_rest() {
        let base = tempdir().unwrap();
        let config = PackConfig::new(base.path(), "pack");
        let blocked = config.participant_dir(3).join("kick.mid");
        fs::create_dir_all(&blocked).unwrap();

        let report = build_pack(&config).unwrap();
        assert_eq!(report.written.len(), 29);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, blocked);
        assert!(!report.failures[0].error.is_validation());
    }

    #[test]
    fn unusable_subfolder_fails_its_files() {
        let base = tempdir().unwrap();
        let config = PackConfig::new(base.path(), "pack");
        fs::create_dir_all(config.root()).unwrap();
        fs::write(config.participant_dir(2), b"not a folder").unwrap();

        let report = build_pack(&config).unwrap();
        assert_eq!(report.written.len(), 27);
        assert_eq!(report.failures.len(), 3);
        assert!(
            report
                .failures
                .iter()
                .all(|f| f.path.starts_with(config.participant_dir(2)))
        );
    }

    #[test]
    fn rejected_pattern_is_reported_per_file() {
        let base = tempdir().unwrap();
        let mut config = PackConfig::new(base.path(), "pack");
        config.participants = 1;
        config.pattern.duration_beats = 0.;

        let report = build_pack(&config).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.failures.len(), 3);
        assert!(report.failures.iter().all(|f| f.error.is_validation()));
        assert!(!config.participant_dir(1).join("snare.mid").exists());
    }

    #[test]
    fn root_that_is_a_file_is_fatal() {
        let base = tempdir().unwrap();
        fs::write(base.path().join("pack"), b"").unwrap();
        let config = PackConfig::new(base.path(), "pack");

        assert!(matches!(build_pack(&config), Err(PackError::CreateRoot { .. })));
    }
}

//! Persistence of chat transcripts to timestamped `ChatHistory_*.json` files.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::core::message::{Snapshot, Turn};

/// Required filename prefix for chat history files. Files without it are
/// rejected before any read is attempted.
pub const HISTORY_PREFIX: &str = "ChatHistory_";

/// Errors that can occur when saving or loading chat history files.
#[derive(Debug)]
pub enum HistoryError {
    /// The filename does not follow the `ChatHistory_` convention.
    Validation { path: PathBuf },
    /// Failed to read the history file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The history file is not valid JSON or does not match the snapshot schema.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Failed to write the history file to disk.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Validation { path } => {
                write!(
                    f,
                    "{} is not a chat history file (expected a {}* filename)",
                    path.display(),
                    HISTORY_PREFIX
                )
            }
            HistoryError::Read { path, source } => {
                write!(f, "Failed to read chat history at {}: {}", path.display(), source)
            }
            HistoryError::Parse { path, source } => {
                write!(f, "Failed to parse chat history at {}: {}", path.display(), source)
            }
            HistoryError::Write { path, source } => {
                write!(f, "Failed to write chat history to {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Validation { .. } => None,
            HistoryError::Read { source, .. } => Some(source),
            HistoryError::Parse { source, .. } => Some(source),
            HistoryError::Write { source, .. } => Some(source),
        }
    }
}

/// Returns true if the path's filename follows the history file convention.
pub fn is_history_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(HISTORY_PREFIX))
        .unwrap_or(false)
}

/// Serializes transcripts to timestamped files in a history directory and
/// reads them back, validating the filename convention on load.
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the transcript as a snapshot named after `now` and return the
    /// path. The write goes through a temp file in the same directory so a
    /// failure never leaves a truncated history file behind.
    pub fn save(&self, turns: &[Turn], now: DateTime<Local>) -> Result<PathBuf, HistoryError> {
        let snapshot = Snapshot {
            messages: turns.to_vec(),
            saved_at: now,
        };
        let file_name = format!("{HISTORY_PREFIX}{}.json", now.format("%Y%m%d_%H%M%S"));
        let path = self.dir.join(file_name);

        let json = serde_json::to_string_pretty(&snapshot).map_err(|source| HistoryError::Write {
            path: path.clone(),
            source: std::io::Error::other(source),
        })?;

        fs::create_dir_all(&self.dir).map_err(|source| HistoryError::Write {
            path: path.clone(),
            source,
        })?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|source| HistoryError::Write {
            path: path.clone(),
            source,
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|source| HistoryError::Write {
                path: path.clone(),
                source,
            })?;
        tmp.persist(&path).map_err(|e| HistoryError::Write {
            path: path.clone(),
            source: e.error,
        })?;

        Ok(path)
    }

    /// Read a snapshot back. The filename prefix is checked before touching
    /// the filesystem.
    pub fn load(&self, path: &Path) -> Result<Snapshot, HistoryError> {
        if !is_history_file(path) {
            return Err(HistoryError::Validation {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path).map_err(|source| HistoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| HistoryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Enumerate history files in the store's directory, newest first. The
    /// timestamp encoding in the filename sorts lexicographically, so the
    /// name order is the save order.
    pub fn list(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && is_history_file(path)
                    && path.extension().and_then(|e| e.to_str()) == Some("json")
            })
            .collect();
        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample_turns() -> Vec<Turn> {
        vec![
            Turn::user("hello"),
            Turn::bot("hi, how are you?"),
            Turn::user("fine, thanks"),
        ]
    }

    #[test]
    fn save_then_load_round_trips_the_transcript() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path());
        let turns = sample_turns();

        let path = store.save(&turns, Local::now()).expect("save failed");
        let snapshot = store.load(&path).expect("load failed");

        assert_eq!(snapshot.messages.len(), turns.len());
        for (loaded, original) in snapshot.messages.iter().zip(&turns) {
            assert_eq!(loaded.content, original.content);
            assert_eq!(loaded.is_user, original.is_user);
            assert_eq!(loaded.timestamp, original.timestamp);
        }
    }

    #[test]
    fn saved_file_follows_the_naming_convention() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path());
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap();

        let path = store.save(&sample_turns(), now).expect("save failed");

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("ChatHistory_20240309_140530.json")
        );
        assert!(is_history_file(&path));
    }

    #[test]
    fn load_rejects_wrong_prefix_before_reading() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path());
        // The file does not exist; a Read error here would mean the
        // filesystem was touched before validation.
        let bogus = dir.path().join("notes.json");

        match store.load(&bogus) {
            Err(HistoryError::Validation { path }) => assert_eq!(path, bogus),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn load_reports_malformed_json_as_parse_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path());
        let path = dir.path().join("ChatHistory_20240101_000000.json");
        fs::write(&path, "{ not json").expect("write failed");

        assert!(matches!(store.load(&path), Err(HistoryError::Parse { .. })));
    }

    #[test]
    fn load_reports_missing_file_as_read_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path());
        let path = dir.path().join("ChatHistory_20240101_000000.json");

        assert!(matches!(store.load(&path), Err(HistoryError::Read { .. })));
    }

    #[test]
    fn list_filters_and_sorts_newest_first() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path());

        let older = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let newer = Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        store.save(&sample_turns(), older).expect("save failed");
        store.save(&sample_turns(), newer).expect("save failed");
        fs::write(dir.path().join("unrelated.json"), "{}").expect("write failed");

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(
            listed[0].file_name().and_then(|n| n.to_str()),
            Some("ChatHistory_20240601_090000.json")
        );
        assert_eq!(
            listed[1].file_name().and_then(|n| n.to_str()),
            Some("ChatHistory_20240101_090000.json")
        );
    }

    #[test]
    fn list_on_missing_directory_is_empty() {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = TranscriptStore::new(dir.path().join("does-not-exist"));
        assert!(store.list().is_empty());
    }
}

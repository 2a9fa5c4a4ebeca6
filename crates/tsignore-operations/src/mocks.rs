use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tsignore_core::LogEntry;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{SourceReader, SourceWriter};

#[derive(Default)]
pub struct MemorySourceIO {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<Vec<PathBuf>>,
    read_only: bool,
}

impl MemorySourceIO {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.files
            .lock()
            .expect("files lock")
            .insert(path.into(), text.to_string());
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("files lock").get(path).cloned()
    }

    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().expect("writes lock").clone()
    }
}

impl SourceReader for MemorySourceIO {
    fn read_source(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .expect("files lock")
            .get(path)
            .cloned()
            .ok_or_else(|| OperationError::SourceRead {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

impl SourceWriter for MemorySourceIO {
    fn write_source(&self, path: &Path, text: &str) -> Result<()> {
        if self.read_only {
            return Err(OperationError::SourceSave {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        self.files
            .lock()
            .expect("files lock")
            .insert(path.to_path_buf(), text.to_string());
        self.writes
            .lock()
            .expect("writes lock")
            .push(path.to_path_buf());
        Ok(())
    }
}

/// Collects log entries as `(title, message, extras)` triples.
#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(String, Option<String>, Option<String>)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(String, Option<String>, Option<String>)> {
        self.entries.lock().expect("log lock").clone()
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.entries().iter().any(|(t, _, _)| t == title)
    }
}

impl tsignore_core::VerboseLog for RecordingLog {
    fn log(&self, entry: &LogEntry<'_>) {
        self.entries.lock().expect("log lock").push((
            entry.title.to_string(),
            entry.message.map(ToString::to_string),
            entry.extras.map(ToString::to_string),
        ));
    }
}

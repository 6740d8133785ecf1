use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("File I/O error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed entry on line {line} of '{}': {content:?}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

/// One line of a success or failure log: `<slot_id> <identifier>`.
///
/// The line format is kept stable so a later run can read the logs back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogEntry {
    pub slot_id: usize,
    pub identifier: String,
}

impl LogEntry {
    pub fn new(slot_id: usize, identifier: impl Into<String>) -> Self {
        Self {
            slot_id,
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.slot_id, self.identifier)
    }
}

impl FromStr for LogEntry {
    type Err = ();

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (slot, identifier) = line.trim().split_once(char::is_whitespace).ok_or(())?;
        let slot_id = slot.parse().map_err(|_| ())?;
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(());
        }
        Ok(Self::new(slot_id, identifier))
    }
}

/// An append-only, line-oriented log file.
///
/// Entries are never rewritten or deduplicated; re-running a job appends a second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry, creating the file on first use. The file is opened and closed for
    /// every entry so that completed lines survive an interrupted batch.
    pub fn append(&self, entry: &LogEntry) -> Result<(), AuditError> {
        let io_err = |source| AuditError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{entry}").map_err(io_err)
    }

    /// Reads every entry back in file order. A missing file is an empty log.
    pub fn entries(&self) -> Result<Vec<LogEntry>, AuditError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AuditError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| AuditError::Io {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = line.parse().map_err(|_| AuditError::Parse {
                path: self.path.clone(),
                line: idx + 1,
                content: line.clone(),
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

//! Error types for eofrot-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the eofrot-io crate.
///
/// Covers file system failures, malformed JSON or CSV content, and EOF
/// files whose days or grids do not line up.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file or directory does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a file system error.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps a JSON (de)serialization error.
    #[error("json error in {}: {reason}", path.display())]
    Json {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps a CSV (de)serialization error.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when days are missing or out of order.
    #[error("expected DOY {expected} in {}, found {}", path.display(), found.map_or("nothing".to_string(), |d| d.to_string()))]
    DoyOrder {
        /// File or directory being read.
        path: PathBuf,
        /// Day-of-year expected at this position.
        expected: u16,
        /// Day-of-year found, if any.
        found: Option<u16>,
    },

    /// Returned when a directory holds no `eofNNN.txt` files.
    #[error("no EOF files (eofNNN.txt) in {}", path.display())]
    NoEofFiles {
        /// Directory that was searched.
        path: PathBuf,
    },

    /// Returned when a text file has no data rows.
    #[error("no grid points in {}", path.display())]
    EmptyFile {
        /// File that was read.
        path: PathBuf,
    },

    /// Returned when text rows do not form a latitude-major grid.
    #[error("rows of {} do not form a latitude-major grid", path.display())]
    InconsistentGrid {
        /// File that was read.
        path: PathBuf,
    },

    /// Returned when only one of `lat` and `long` is given for a day.
    #[error("DOY {doy} has only one of lat/long")]
    IncompleteGrid {
        /// Day-of-year of the record.
        doy: u16,
    },

    /// Returned when writing a text directory for a day without a grid.
    #[error("DOY {doy} has no spatial grid; the text format needs one")]
    MissingGrid {
        /// Day-of-year without a grid.
        doy: u16,
    },

    /// Returned when a format name is not recognised.
    #[error("unknown EOF format '{name}' (expected 'json' or 'text')")]
    UnknownFormat {
        /// Name given.
        name: String,
    },

    /// Wraps an error from the eofrot-eof crate.
    #[error("EOF data error: {reason}")]
    Eof {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<eofrot_eof::EofError> for IoError {
    fn from(e: eofrot_eof::EofError) -> Self {
        IoError::Eof {
            reason: e.to_string(),
        }
    }
}

impl From<eofrot_calendar::CalendarError> for IoError {
    fn from(e: eofrot_calendar::CalendarError) -> Self {
        IoError::Eof {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    pub(crate) fn io(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }

    pub(crate) fn csv(path: &std::path::Path, e: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = e.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return IoError::FileNotFound {
                    path: path.to_path_buf(),
                };
            }
        }
        IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }

    pub(crate) fn json(path: &std::path::Path, e: serde_json::Error) -> Self {
        IoError::Json {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

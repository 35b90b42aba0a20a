//! # eofrot-io
//!
//! Read and write day-of-year EOF sequences. Two layouts are supported:
//!
//! - **JSON**: one document `{ "no_leap": .., "days": [ { "doy": 1, "eof1":
//!   [..], "eof2": [..], "lat": [..], "long": [..], ... }, ... ] }`
//! - **Text directory**: one `eofNNN.txt` file per DOY with the header
//!   `Lat,Lon,EOF1,EOF2`, as written by common OMI tooling
//!
//! Both bridge into [`eofrot_eof::EofSequence`].

mod error;
mod json;
mod text;

pub use error::IoError;
pub use text::file_name as text_file_name;

use std::path::Path;
use std::str::FromStr;

use eofrot_eof::{EofData, EofSequence};

/// On-disk layout of an EOF sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EofFormat {
    /// A single JSON document.
    Json,
    /// A directory of `eofNNN.txt` files.
    TextDir,
}

impl EofFormat {
    /// Guesses the format of `path`: directories are text directories,
    /// anything else is JSON.
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            Self::TextDir
        } else {
            Self::Json
        }
    }
}

impl FromStr for EofFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::TextDir),
            _ => Err(IoError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// An EOF sequence as read from disk.
#[derive(Debug, Clone)]
pub struct LoadedEofs {
    /// The days, DOY 1 first.
    pub sequence: EofSequence,
    /// Calendar flag stored with the data, if the format records one.
    pub no_leap: Option<bool>,
}

/// Reads an EOF sequence, detecting the format when `format` is `None`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path, format-specific
/// errors for malformed content, and [`IoError::DoyOrder`] when days are
/// missing or out of order.
pub fn read_eofs(path: &Path, format: Option<EofFormat>) -> Result<LoadedEofs, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    match format.unwrap_or_else(|| EofFormat::detect(path)) {
        EofFormat::Json => json::read_json(path),
        EofFormat::TextDir => Ok(LoadedEofs {
            sequence: text::read_text_dir(path)?,
            no_leap: None,
        }),
    }
}

/// Writes an EOF sequence, detecting the format when `format` is `None`.
///
/// `no_leap` is recorded by the JSON format and ignored by the text format.
///
/// # Errors
///
/// Returns [`IoError::MissingGrid`] when writing a text directory for days
/// without a spatial grid, and I/O errors from the file system.
pub fn write_eofs(
    path: &Path,
    sequence: &EofSequence,
    format: Option<EofFormat>,
    no_leap: Option<bool>,
) -> Result<(), IoError> {
    match format.unwrap_or_else(|| EofFormat::detect(path)) {
        EofFormat::Json => json::write_json(path, sequence, no_leap),
        EofFormat::TextDir => text::write_text_dir(path, sequence),
    }
}

/// Reads a single reference EOF pair.
///
/// `path` may be a text directory or JSON document (DOY 1 is taken) or a
/// single `.txt` file in the text layout.
///
/// # Errors
///
/// Same as [`read_eofs`].
pub fn read_reference(path: &Path) -> Result<EofData, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        text::read_text_dir_first_day(path)
    } else if path.extension().is_some_and(|ext| ext == "txt") {
        text::read_text_file(path)
    } else {
        json::read_json_first_day(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!("json".parse::<EofFormat>().unwrap(), EofFormat::Json);
        assert_eq!("TEXT".parse::<EofFormat>().unwrap(), EofFormat::TextDir);
        assert!(matches!(
            "nc".parse::<EofFormat>(),
            Err(IoError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn detect_missing_path_is_json() {
        assert_eq!(
            EofFormat::detect(Path::new("/definitely/not/here.json")),
            EofFormat::Json
        );
    }
}

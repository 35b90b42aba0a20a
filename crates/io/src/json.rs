//! JSON documents holding a whole EOF sequence.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use eofrot_eof::{EofData, EofSequence, SpatialGrid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LoadedEofs;
use crate::error::IoError;

/// On-disk layout of a JSON EOF document.
#[derive(Debug, Serialize, Deserialize)]
struct EofDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    no_leap: Option<bool>,
    days: Vec<DayRecord>,
}

/// One day of a JSON EOF document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DayRecord {
    doy: u16,
    eof1: Vec<f64>,
    eof2: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lat: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    long: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explained_variances: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eigenvalues: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    no_observations: Option<usize>,
}

impl DayRecord {
    fn from_eofdata(doy: u16, data: &EofData) -> Self {
        Self {
            doy,
            eof1: data.eof1().to_vec(),
            eof2: data.eof2().to_vec(),
            lat: data.grid().map(|g| g.lat().to_vec()),
            long: data.grid().map(|g| g.long().to_vec()),
            explained_variances: data.explained_variances().map(<[f64]>::to_vec),
            eigenvalues: data.eigenvalues().map(<[f64]>::to_vec),
            no_observations: data.no_observations(),
        }
    }

    fn into_eofdata(self) -> Result<EofData, IoError> {
        let mut data = EofData::new(self.eof1, self.eof2)?;
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => data = data.with_grid(SpatialGrid::new(lat, long)?)?,
            (None, None) => {}
            _ => return Err(IoError::IncompleteGrid { doy: self.doy }),
        }
        if let Some(v) = self.explained_variances {
            data = data.with_explained_variances(v);
        }
        if let Some(v) = self.eigenvalues {
            data = data.with_eigenvalues(v);
        }
        if let Some(n) = self.no_observations {
            data = data.with_no_observations(n);
        }
        Ok(data)
    }
}

fn read_document(path: &Path) -> Result<EofDocument, IoError> {
    let file = File::open(path).map_err(|e| IoError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| IoError::json(path, e))
}

/// Converts records to EOF pairs, checking that DOYs run 1, 2, 3, ...
fn records_to_days(path: &Path, records: Vec<DayRecord>) -> Result<Vec<EofData>, IoError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let expected = u16::try_from(i + 1).unwrap_or(u16::MAX);
            if record.doy != expected {
                return Err(IoError::DoyOrder {
                    path: path.to_path_buf(),
                    expected,
                    found: Some(record.doy),
                });
            }
            record.into_eofdata()
        })
        .collect()
}

/// Reads a JSON EOF document.
pub(crate) fn read_json(path: &Path) -> Result<LoadedEofs, IoError> {
    let doc = read_document(path)?;
    let days = records_to_days(path, doc.days)?;
    let sequence = EofSequence::new(days)?;
    debug!(path = %path.display(), n_days = sequence.n_days(), "read JSON EOFs");
    Ok(LoadedEofs {
        sequence,
        no_leap: doc.no_leap,
    })
}

/// Reads DOY 1 of a JSON EOF document.
pub(crate) fn read_json_first_day(path: &Path) -> Result<EofData, IoError> {
    let doc = read_document(path)?;
    let first = doc.days.into_iter().next();
    match first {
        Some(record) if record.doy == 1 => record.into_eofdata(),
        other => Err(IoError::DoyOrder {
            path: path.to_path_buf(),
            expected: 1,
            found: other.map(|r| r.doy),
        }),
    }
}

/// Writes a sequence as a pretty-printed JSON document.
pub(crate) fn write_json(
    path: &Path,
    sequence: &EofSequence,
    no_leap: Option<bool>,
) -> Result<(), IoError> {
    let doc = EofDocument {
        no_leap,
        days: sequence
            .iter()
            .map(|(doy, day)| DayRecord::from_eofdata(doy.get(), day))
            .collect(),
    };
    let file = File::create(path).map_err(|e| IoError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc).map_err(|e| IoError::json(path, e))?;
    writer.flush().map_err(|e| IoError::io(path, e))?;
    debug!(path = %path.display(), n_days = sequence.n_days(), "wrote JSON EOFs");
    Ok(())
}

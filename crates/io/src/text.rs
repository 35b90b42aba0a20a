//! Directories of per-day comma-separated EOF files.
//!
//! Day `d` lives in `eofNNN.txt` with `NNN` the zero-padded DOY. Each file
//! has the header `Lat,Lon,EOF1,EOF2` and one row per grid point, all
//! longitudes of the first latitude first.

use std::fs;
use std::path::{Path, PathBuf};

use eofrot_calendar::Doy;
use eofrot_eof::{EofData, EofSequence, SpatialGrid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IoError;

#[derive(Debug, Serialize, Deserialize)]
struct GridRow {
    #[serde(rename = "Lat")]
    lat: f64,
    #[serde(rename = "Lon")]
    lon: f64,
    #[serde(rename = "EOF1")]
    eof1: f64,
    #[serde(rename = "EOF2")]
    eof2: f64,
}

/// File name for one day, e.g. `eof001.txt`.
pub fn file_name(doy: Doy) -> String {
    format!("eof{doy}.txt")
}

/// Parses `eofNNN.txt` into its DOY number.
fn parse_file_name(name: &str) -> Option<u16> {
    let digits = name.strip_prefix("eof")?.strip_suffix(".txt")?;
    if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Recovers the latitude and longitude axes from latitude-major rows.
fn grid_axes(rows: &[GridRow], path: &Path) -> Result<(Vec<f64>, Vec<f64>), IoError> {
    let inconsistent = || IoError::InconsistentGrid {
        path: path.to_path_buf(),
    };
    if rows.iter().any(|r| !r.lat.is_finite() || !r.lon.is_finite()) {
        return Err(inconsistent());
    }
    let Some(first_lat) = rows.first().map(|r| r.lat) else {
        return Err(inconsistent());
    };
    let long: Vec<f64> = rows
        .iter()
        .take_while(|r| r.lat == first_lat)
        .map(|r| r.lon)
        .collect();
    let n_long = long.len();
    if n_long == 0 || rows.len() % n_long != 0 {
        return Err(inconsistent());
    }
    let lat: Vec<f64> = rows.iter().step_by(n_long).map(|r| r.lat).collect();

    for (i, row) in rows.iter().enumerate() {
        if row.lat != lat[i / n_long] || row.lon != long[i % n_long] {
            return Err(inconsistent());
        }
    }
    Ok((lat, long))
}

/// Reads one `Lat,Lon,EOF1,EOF2` file.
pub(crate) fn read_text_file(path: &Path) -> Result<EofData, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))?;
    let rows: Vec<GridRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(|e| IoError::csv(path, e))?;
    if rows.is_empty() {
        return Err(IoError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let (lat, long) = grid_axes(&rows, path)?;
    let eof1 = rows.iter().map(|r| r.eof1).collect();
    let eof2 = rows.iter().map(|r| r.eof2).collect();
    Ok(EofData::new(eof1, eof2)?.with_grid(SpatialGrid::new(lat, long)?)?)
}

/// Lists the `eofNNN.txt` files of `dir`, checking the DOYs run 1, 2, 3, ...
fn list_day_files(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let mut found: Vec<(u16, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| IoError::io(dir, e))? {
        let entry = entry.map_err(|e| IoError::io(dir, e))?;
        let name = entry.file_name();
        if let Some(doy) = name.to_str().and_then(parse_file_name) {
            found.push((doy, entry.path()));
        }
    }
    if found.is_empty() {
        return Err(IoError::NoEofFiles {
            path: dir.to_path_buf(),
        });
    }
    found.sort_by_key(|(doy, _)| *doy);

    found
        .into_iter()
        .enumerate()
        .map(|(i, (doy, path))| {
            let expected = u16::try_from(i + 1).unwrap_or(u16::MAX);
            if doy == expected {
                Ok(path)
            } else {
                Err(IoError::DoyOrder {
                    path: dir.to_path_buf(),
                    expected,
                    found: Some(doy),
                })
            }
        })
        .collect()
}

/// Reads every `eofNNN.txt` file of a directory.
pub(crate) fn read_text_dir(dir: &Path) -> Result<EofSequence, IoError> {
    let files = list_day_files(dir)?;
    let days = files
        .iter()
        .map(|p| read_text_file(p))
        .collect::<Result<Vec<_>, _>>()?;
    let sequence = EofSequence::new(days)?;
    debug!(dir = %dir.display(), n_days = sequence.n_days(), "read text EOFs");
    Ok(sequence)
}

/// Reads DOY 1 of a text directory.
pub(crate) fn read_text_dir_first_day(dir: &Path) -> Result<EofData, IoError> {
    let path = dir.join(file_name(Doy::FIRST));
    read_text_file(&path)
}

/// Writes one day to `path`.
fn write_text_file(path: &Path, doy: Doy, data: &EofData) -> Result<(), IoError> {
    let grid = data.grid().ok_or(IoError::MissingGrid { doy: doy.get() })?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    for (((lat, lon), eof1), eof2) in grid.points().zip(data.eof1()).zip(data.eof2()) {
        writer
            .serialize(GridRow {
                lat,
                lon,
                eof1: *eof1,
                eof2: *eof2,
            })
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))
}

/// Writes a sequence as one `eofNNN.txt` file per day, creating `dir`.
pub(crate) fn write_text_dir(dir: &Path, sequence: &EofSequence) -> Result<(), IoError> {
    fs::create_dir_all(dir).map_err(|e| IoError::io(dir, e))?;
    for (doy, day) in sequence.iter() {
        write_text_file(&dir.join(file_name(doy)), doy, day)?;
    }
    debug!(dir = %dir.display(), n_days = sequence.n_days(), "wrote text EOFs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lat: f64, lon: f64) -> GridRow {
        GridRow {
            lat,
            lon,
            eof1: 0.0,
            eof2: 0.0,
        }
    }

    #[test]
    fn file_names() {
        assert_eq!(file_name(Doy::FIRST), "eof001.txt");
        assert_eq!(file_name(Doy::new(366).unwrap()), "eof366.txt");
        assert_eq!(parse_file_name("eof042.txt"), Some(42));
        assert_eq!(parse_file_name("eof42.txt"), None);
        assert_eq!(parse_file_name("eof042.csv"), None);
        assert_eq!(parse_file_name("pc042.txt"), None);
    }

    #[test]
    fn axes_from_latitude_major_rows() {
        let rows = [
            row(-5.0, 0.0),
            row(-5.0, 2.5),
            row(-5.0, 5.0),
            row(0.0, 0.0),
            row(0.0, 2.5),
            row(0.0, 5.0),
        ];
        let (lat, long) = grid_axes(&rows, Path::new("f")).unwrap();
        assert_eq!(lat, vec![-5.0, 0.0]);
        assert_eq!(long, vec![0.0, 2.5, 5.0]);
    }

    #[test]
    fn longitude_major_rows_rejected() {
        let rows = [
            row(-5.0, 0.0),
            row(0.0, 0.0),
            row(-5.0, 2.5),
            row(0.0, 2.5),
        ];
        assert!(matches!(
            grid_axes(&rows, Path::new("f")),
            Err(IoError::InconsistentGrid { .. })
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = [row(-5.0, 0.0), row(-5.0, 2.5), row(0.0, 0.0)];
        assert!(matches!(
            grid_axes(&rows, Path::new("f")),
            Err(IoError::InconsistentGrid { .. })
        ));
    }
}

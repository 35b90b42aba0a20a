//! Grid-point mean of EOFs over a window of days.

use eofrot_calendar::Doy;
use ndarray::Array2;

use crate::data::EofData;
use crate::error::EofError;
use crate::sequence::EofSequence;

/// Mean EOF1 and EOF2 at each grid point over the DOY window `[start, end)`.
///
/// When `end <= start` the window wraps past the last day of the sequence,
/// so a December to January window is expressed as, e.g., `(335, 32)`.
/// The result carries the spatial grid of DOY 1, if any; other metadata is
/// dropped because it does not apply to an average.
///
/// # Errors
///
/// Returns [`EofError::Calendar`] if either bound lies outside the sequence.
pub fn mean_eof(sequence: &EofSequence, start: Doy, end: Doy) -> Result<EofData, EofError> {
    let window = sequence.cycle().window(start, end)?;
    let mut sum = Array2::<f64>::zeros((sequence.n_points(), 2));
    for doy in &window {
        sum += &sequence.eofdata_for_doy(*doy)?.basis();
    }
    let mean = sum / window.len() as f64;

    let out = EofData::from_basis(mean)?;
    match sequence.days()[0].grid() {
        Some(grid) => out.with_grid(grid.clone()),
        None => Ok(out),
    }
}

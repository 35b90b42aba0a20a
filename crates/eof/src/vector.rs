//! Vector norms and angles between EOFs.

use ndarray::ArrayView1;

use crate::data::EofData;
use crate::error::EofError;

/// Euclidean (L2) norm of a vector.
pub fn norm(v: ArrayView1<'_, f64>) -> f64 {
    v.dot(&v).sqrt()
}

/// Angle between two vectors in radians, `arccos(a·b / (|a| |b|))`.
///
/// The cosine is clamped to `[-1, 1]` before `arccos` so rounding cannot
/// produce NaN for (anti)parallel vectors. Returns NaN if either vector has
/// zero length.
pub fn angle_between_vectors(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return f64::NAN;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos()
}

/// Angles between the EOF1 vectors and the EOF2 vectors of two pairs.
///
/// `reference` is usually the EOF pair of the previous day or of DOY 1.
///
/// # Errors
///
/// Returns [`EofError::GridMismatch`] if the pairs differ in vector length.
pub fn angle_between_eofs(reference: &EofData, target: &EofData) -> Result<(f64, f64), EofError> {
    if reference.n_points() != target.n_points() {
        return Err(EofError::GridMismatch {
            grid_points: reference.n_points(),
            vector_len: target.n_points(),
        });
    }
    Ok((
        angle_between_vectors(reference.eof1(), target.eof1()),
        angle_between_vectors(reference.eof2(), target.eof2()),
    ))
}

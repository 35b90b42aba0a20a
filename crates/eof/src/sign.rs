//! Correction of spontaneous EOF sign changes along the day-of-year axis.
//!
//! EOFs are only defined up to sign, so the EOF analysis of neighbouring
//! days can return patterns that are flipped relative to each other. Each
//! day's EOF1 and EOF2 are flipped independently whenever their inner
//! product with the already-corrected previous day is negative.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use tracing::debug;

use crate::data::EofData;
use crate::error::EofError;
use crate::sequence::EofSequence;

/// Result of [`correct_sign_changes`].
#[derive(Debug, Clone)]
pub struct SignCorrected {
    sequence: EofSequence,
    n_flips: usize,
}

impl SignCorrected {
    /// The sign-corrected sequence.
    pub fn sequence(&self) -> &EofSequence {
        &self.sequence
    }

    /// Consumes `self` and returns the sign-corrected sequence.
    pub fn into_sequence(self) -> EofSequence {
        self.sequence
    }

    /// Number of individual EOF vectors whose sign was flipped.
    pub fn n_flips(&self) -> usize {
        self.n_flips
    }
}

/// Returns `true` if `target` points away from `reference`.
///
/// A zero inner product keeps the sign.
pub fn needs_flip(reference: ArrayView1<'_, f64>, target: ArrayView1<'_, f64>) -> bool {
    reference.dot(&target) < 0.0
}

/// Flips `target` in place if it points away from `reference`.
///
/// Returns `true` if the sign was flipped.
pub fn align_vector(reference: ArrayView1<'_, f64>, mut target: ArrayViewMut1<'_, f64>) -> bool {
    if needs_flip(reference, target.view()) {
        target.mapv_inplace(|v| -v);
        true
    } else {
        false
    }
}

/// Aligns both columns of an `n x 2` basis with a reference basis.
///
/// Returns the number of flipped columns (0, 1, or 2).
pub fn align_basis(reference: ArrayView2<'_, f64>, target: &mut Array2<f64>) -> usize {
    let mut flips = 0;
    for c in 0..2 {
        if align_vector(reference.column(c), target.column_mut(c)) {
            flips += 1;
        }
    }
    flips
}

/// Returns a copy of `target` with EOF1 and EOF2 signs aligned to `reference`.
///
/// # Errors
///
/// Returns [`EofError::GridMismatch`] if the pairs differ in vector length.
pub fn align_pair(reference: &EofData, target: &EofData) -> Result<(EofData, usize), EofError> {
    if reference.n_points() != target.n_points() {
        return Err(EofError::GridMismatch {
            grid_points: reference.n_points(),
            vector_len: target.n_points(),
        });
    }
    let mut basis = target.basis().to_owned();
    let flips = align_basis(reference.basis(), &mut basis);
    Ok((target.with_basis(basis)?, flips))
}

/// Removes spontaneous sign changes from an EOF sequence.
///
/// DOY 1 is aligned to `doy1_reference` when given (for example a published
/// EOF pair, so that the whole series has a conventional sign) and kept as is
/// otherwise. Every following day is aligned to the corrected previous day.
///
/// # Errors
///
/// Returns [`EofError::GridMismatch`] if `doy1_reference` has a different
/// vector length than the sequence.
pub fn correct_sign_changes(
    sequence: &EofSequence,
    doy1_reference: Option<&EofData>,
) -> Result<SignCorrected, EofError> {
    let mut n_flips = 0;
    let mut corrected = Vec::with_capacity(sequence.n_days());

    let first = &sequence.days()[0];
    let first = match doy1_reference {
        Some(reference) => {
            let (aligned, flips) = align_pair(reference, first)?;
            n_flips += flips;
            aligned
        }
        None => first.clone(),
    };
    corrected.push(first);

    for day in &sequence.days()[1..] {
        let previous = &corrected[corrected.len() - 1];
        let (aligned, flips) = align_pair(previous, day)?;
        n_flips += flips;
        corrected.push(aligned);
    }

    debug!(n_days = corrected.len(), n_flips, "sign changes corrected");

    Ok(SignCorrected {
        sequence: EofSequence::new(corrected)?,
        n_flips,
    })
}

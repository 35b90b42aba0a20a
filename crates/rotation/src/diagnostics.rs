//! Day-to-day continuity diagnostics of an EOF sequence.

use eofrot_calendar::Doy;
use eofrot_eof::{EofSequence, angle_between_vectors, norm};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::RotationError;

/// Continuity between one day and the next (cyclically).
#[derive(Debug, Clone, Serialize)]
pub struct DayContinuity {
    pub doy: u16,
    pub next_doy: u16,
    pub eof1_inner_product: f64,
    pub eof2_inner_product: f64,
    /// Radians.
    pub eof1_angle: f64,
    /// Radians.
    pub eof2_angle: f64,
}

/// Continuity summary of a whole cycle, including the wrap from the last
/// day back to DOY 1.
#[derive(Debug, Clone, Serialize)]
pub struct ContinuityReport {
    pub n_days: usize,
    pub n_points: usize,
    /// Largest angle between adjacent days over both EOFs.
    pub max_angle: f64,
    /// Smallest inner product between adjacent days over both EOFs.
    pub min_inner_product: f64,
    /// Largest `|‖v‖ - 1|` over all vectors.
    pub max_norm_deviation: f64,
    pub days: Vec<DayContinuity>,
}

impl ContinuityReport {
    /// Computes the report. Days are evaluated in parallel.
    pub fn compute(sequence: &EofSequence) -> Self {
        let days = sequence.days();
        let k = days.len();

        let entries: Vec<DayContinuity> = (0..k)
            .into_par_iter()
            .map(|i| {
                let j = (i + 1) % k;
                let (a, b) = (&days[i], &days[j]);
                DayContinuity {
                    doy: i as u16 + 1,
                    next_doy: j as u16 + 1,
                    eof1_inner_product: a.eof1().dot(&b.eof1()),
                    eof2_inner_product: a.eof2().dot(&b.eof2()),
                    eof1_angle: angle_between_vectors(a.eof1(), b.eof1()),
                    eof2_angle: angle_between_vectors(a.eof2(), b.eof2()),
                }
            })
            .collect();

        let max_norm_deviation = days
            .par_iter()
            .map(|d| (norm(d.eof1()) - 1.0).abs().max((norm(d.eof2()) - 1.0).abs()))
            .reduce(|| 0.0, f64::max);

        let max_angle = entries
            .iter()
            .map(|e| e.eof1_angle.max(e.eof2_angle))
            .fold(0.0, f64::max);
        let min_inner_product = entries
            .iter()
            .map(|e| e.eof1_inner_product.min(e.eof2_inner_product))
            .fold(f64::INFINITY, f64::min);

        Self {
            n_days: k,
            n_points: sequence.n_points(),
            max_angle,
            min_inner_product,
            max_norm_deviation,
            days: entries,
        }
    }

    /// Returns the entry whose transition has the largest angle.
    pub fn worst_day(&self) -> Option<&DayContinuity> {
        self.days.iter().max_by(|a, b| {
            a.eof1_angle
                .max(a.eof2_angle)
                .total_cmp(&b.eof1_angle.max(b.eof2_angle))
        })
    }

    /// Returns `true` if every adjacent inner product is non-negative.
    pub fn is_sign_continuous(&self) -> bool {
        self.min_inner_product >= 0.0
    }
}

/// Serializes a report to pretty-printed JSON.
pub fn to_json(report: &ContinuityReport) -> Result<String, RotationError> {
    serde_json::to_string_pretty(report).map_err(|e| RotationError::Serialization {
        reason: e.to_string(),
    })
}

/// Largest absolute element-wise difference between two sequences.
///
/// # Errors
///
/// Returns [`RotationError::InvalidDayCount`] if the sequences differ in
/// length and [`RotationError::ShapeMismatch`] if their vectors do.
pub fn max_vector_change(a: &EofSequence, b: &EofSequence) -> Result<f64, RotationError> {
    if a.n_days() != b.n_days() {
        return Err(RotationError::InvalidDayCount {
            got: b.n_days(),
            expected: a.n_days(),
        });
    }
    if a.n_points() != b.n_points() {
        return Err(RotationError::ShapeMismatch {
            doy: Doy::FIRST.get(),
            expected: a.n_points(),
            got: b.n_points(),
        });
    }
    let change = a
        .days()
        .iter()
        .zip(b.days())
        .map(|(x, y)| (&x.basis() - &y.basis()).fold(0.0_f64, |m, v| m.max(v.abs())))
        .fold(0.0, f64::max);
    Ok(change)
}

//! Result type of the rotation pass.

use eofrot_eof::{EofData, EofSequence};

/// Output of [`post_process_rotation`](crate::post_process_rotation) and
/// [`rotate_cycle`](crate::rotate_cycle).
#[derive(Debug, Clone)]
pub struct RotationResult {
    /// Rotated sequence, same length and shape as the input.
    sequence: EofSequence,
    /// Closure angle `φ` (radians) of the sign-aligned input.
    closure_angle: f64,
    /// Per-day rotation increment `δ = -φ / K` (radians).
    delta: f64,
    /// Blend weight actually used.
    weight: f64,
    /// DOY 1 as reached again by one more step from the last day.
    wrapped_anchor: EofData,
    /// Angle (radians) left between the wrapped anchor and the output DOY 1.
    residual_angle: f64,
    /// Sign flips made while aligning the native input.
    n_sign_flips: usize,
}

impl RotationResult {
    /// Creates a new rotation result.
    pub fn new(
        sequence: EofSequence,
        closure_angle: f64,
        delta: f64,
        weight: f64,
        wrapped_anchor: EofData,
        residual_angle: f64,
        n_sign_flips: usize,
    ) -> Self {
        Self {
            sequence,
            closure_angle,
            delta,
            weight,
            wrapped_anchor,
            residual_angle,
            n_sign_flips,
        }
    }

    /// Returns the rotated sequence.
    pub fn sequence(&self) -> &EofSequence {
        &self.sequence
    }

    /// Consumes self and returns the rotated sequence.
    pub fn into_sequence(self) -> EofSequence {
        self.sequence
    }

    /// Returns the closure angle in radians.
    pub fn closure_angle(&self) -> f64 {
        self.closure_angle
    }

    /// Returns the per-day rotation increment in radians.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the projection weight used for blending.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns DOY 1 as carried once around the rotated cycle.
    ///
    /// Comparing it with the first day of [`sequence`](Self::sequence)
    /// shows how well the cycle closes.
    pub fn wrapped_anchor(&self) -> &EofData {
        &self.wrapped_anchor
    }

    /// Returns the signed in-plane angle between the wrapped anchor's EOF1
    /// and the output DOY 1 EOF1.
    ///
    /// Close to zero when the accumulated rotation cancels the closure
    /// angle.
    pub fn residual_angle(&self) -> f64 {
        self.residual_angle
    }

    /// Returns the number of sign flips applied to the native input.
    pub fn n_sign_flips(&self) -> usize {
        self.n_sign_flips
    }
}

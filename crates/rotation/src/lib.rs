//! Rotation postprocessing of day-of-year EOF bases.
//!
//! EOFs computed independently for each day-of-year jump around from one
//! day to the next: signs flip spontaneously and the leading pair slowly
//! rotates within its plane, leaving a gap between DOY 366 and DOY 1. This
//! crate carries each day's EOFs into the next day's subspace, blends them
//! with the native EOFs, and spreads a compensating in-plane rotation
//! evenly over the year so the cycle closes.
//!
//! # Pipeline
//!
//! 1. **Sign alignment**: optional, via [`eofrot_eof::correct_sign_changes`]
//! 2. **Closure angle**: dry run without rotation ([`closure_angle`])
//! 3. **Rotation pass**: rotate day `n` of the blended cycle by `(n - 1)·δ`
//!    with `δ = -φ / K`, renormalize
//!
//! # Quick Start
//!
//! ```
//! use eofrot_eof::{EofData, EofSequence};
//! use eofrot_rotation::{IdentityProjector, RotationConfig, rotate_cycle};
//!
//! let days = vec![
//!     EofData::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap(),
//!     EofData::new(vec![0.0, 1.0], vec![-1.0, 0.0]).unwrap(),
//!     EofData::new(vec![-1.0, 0.0], vec![0.0, -1.0]).unwrap(),
//! ];
//! let seq = EofSequence::new(days).unwrap();
//! let result = rotate_cycle(&seq, &IdentityProjector, &RotationConfig::new()).unwrap();
//! assert_eq!(result.sequence().n_days(), 3);
//! ```

mod config;
pub mod diagnostics;
mod error;
mod projector;
mod result;
mod rotate;

pub use config::{ProjectionWeight, RotationConfig};
pub use diagnostics::{ContinuityReport, DayContinuity, max_vector_change};
pub use error::RotationError;
pub use projector::{IdentityProjector, Projector, SubspaceProjector};
pub use result::RotationResult;
pub use rotate::{closure_angle, normalize_pair, rotation_matrix};

use eofrot_calendar::DayCycle;
use eofrot_eof::{EofSequence, correct_sign_changes};
use tracing::debug;

/// Rotates a full calendar year of EOF pairs.
///
/// Same as [`rotate_cycle`], after checking that the sequence has 365 days
/// (`no_leap`) or 366 days.
///
/// # Errors
///
/// Returns [`RotationError::InvalidDayCount`] if the day count does not
/// match the calendar, plus every error of [`rotate_cycle`].
#[tracing::instrument(skip_all, fields(n_days = sequence.n_days()))]
pub fn post_process_rotation<P: Projector + ?Sized>(
    sequence: &EofSequence,
    projector: &P,
    config: &RotationConfig,
) -> Result<RotationResult, RotationError> {
    config.validate()?;

    let expected = DayCycle::from_calendar(config.no_leap()).len();
    if sequence.n_days() != expected {
        return Err(RotationError::InvalidDayCount {
            got: sequence.n_days(),
            expected,
        });
    }

    rotate_cycle(sequence, projector, config)
}

/// Rotates any cyclic sequence of at least two days.
///
/// The first day is the anchor and is only renormalized. No calendar
/// check is made, so toy cycles and custom calendars are accepted.
///
/// # Errors
///
/// Returns [`RotationError::InvalidConfig`] for an invalid `config`,
/// [`RotationError::TooFewDays`] for a single day,
/// [`RotationError::ProjectorOutput`] if the projector returns a matrix of
/// the wrong shape, and [`RotationError::DegenerateBasis`] if a blended
/// vector collapses.
pub fn rotate_cycle<P: Projector + ?Sized>(
    sequence: &EofSequence,
    projector: &P,
    config: &RotationConfig,
) -> Result<RotationResult, RotationError> {
    config.validate()?;
    if sequence.n_days() < 2 {
        return Err(RotationError::TooFewDays {
            n_days: sequence.n_days(),
        });
    }

    let (native, n_sign_flips) = if config.align_signs() {
        let corrected = correct_sign_changes(sequence, config.doy1_reference())?;
        let n = corrected.n_flips();
        (corrected.into_sequence(), n)
    } else {
        (sequence.clone(), 0)
    };

    let weight = config.projection_weight().resolve(native.n_days());
    let rotated = rotate::rotate_days(&native, projector, weight, config.degeneracy_tol())?;

    debug!(
        n_days = native.n_days(),
        n_sign_flips,
        weight,
        closure_angle = rotated.closure_angle,
        delta = rotated.delta,
        residual_angle = rotated.residual_angle,
        "rotation pass complete"
    );

    Ok(RotationResult::new(
        EofSequence::new(rotated.days)?,
        rotated.closure_angle,
        rotated.delta,
        weight,
        rotated.wrapped_anchor,
        rotated.residual_angle,
        n_sign_flips,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eofrot_eof::EofData;

    fn constant_cycle(n_days: usize) -> EofSequence {
        let day = EofData::new(vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]).unwrap();
        EofSequence::new(vec![day; n_days]).unwrap()
    }

    #[test]
    fn day_count_must_match_calendar() {
        let seq = constant_cycle(365);
        let err = post_process_rotation(&seq, &SubspaceProjector, &RotationConfig::new())
            .unwrap_err();
        assert_eq!(
            err,
            RotationError::InvalidDayCount {
                got: 365,
                expected: 366
            }
        );

        let config = RotationConfig::new().with_no_leap(true);
        assert!(post_process_rotation(&seq, &SubspaceProjector, &config).is_ok());
    }

    #[test]
    fn single_day_rejected() {
        let err =
            rotate_cycle(&constant_cycle(1), &IdentityProjector, &RotationConfig::new()).unwrap_err();
        assert_eq!(err, RotationError::TooFewDays { n_days: 1 });
    }

    #[test]
    fn invalid_config_rejected_before_work() {
        let config = RotationConfig::new().with_projection_weight(ProjectionWeight::Fixed(2.0));
        let err = rotate_cycle(&constant_cycle(3), &IdentityProjector, &config).unwrap_err();
        assert!(matches!(err, RotationError::InvalidConfig { .. }));
    }

    #[test]
    fn constant_cycle_is_unchanged() {
        let seq = constant_cycle(4);
        let result = rotate_cycle(&seq, &SubspaceProjector, &RotationConfig::new()).unwrap();
        assert_eq!(result.closure_angle(), 0.0);
        assert_eq!(result.residual_angle(), 0.0);
        assert_eq!(result.n_sign_flips(), 0);
        assert!((result.weight() - 0.25).abs() < f64::EPSILON);
        assert!(max_vector_change(&seq, result.sequence()).unwrap() < 1e-15);
    }
}

//! Error types for the eofrot-rotation crate.

use eofrot_eof::EofError;

/// Error type for all fallible operations in the eofrot-rotation crate.
///
/// Any error aborts the whole pass: later days depend on the rotated
/// result of earlier days, so no day is ever skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RotationError {
    /// Returned when EOF vectors differ in length across days.
    #[error("shape mismatch at DOY {doy}: expected {expected} grid points, got {got}")]
    ShapeMismatch {
        /// Day-of-year of the offending EOF pair.
        doy: u16,
        /// Vector length of the sequence.
        expected: usize,
        /// Vector length found.
        got: usize,
    },

    /// Returned when a projector returns a matrix of the wrong shape.
    #[error("projector returned a {rows}x{cols} matrix for DOY {doy}, expected {expected_rows}x2")]
    ProjectorOutput {
        /// Day-of-year that was projected onto.
        doy: u16,
        /// Expected number of rows (grid points).
        expected_rows: usize,
        /// Rows returned.
        rows: usize,
        /// Columns returned.
        cols: usize,
    },

    /// Returned when the sequence length does not match the calendar.
    #[error("invalid day count: got {got} days, expected {expected}")]
    InvalidDayCount {
        /// Number of days supplied.
        got: usize,
        /// Number of days required by the `no_leap` setting.
        expected: usize,
    },

    /// Returned when a cycle is too short to rotate.
    #[error("rotation needs at least 2 days, got {n_days}")]
    TooFewDays {
        /// Number of days supplied.
        n_days: usize,
    },

    /// Returned when a vector is (numerically) zero before renormalization.
    #[error("degenerate basis at DOY {doy}: EOF{eof} has norm {norm:e}")]
    DegenerateBasis {
        /// Day-of-year being processed.
        doy: u16,
        /// Which EOF of the pair (1 or 2).
        eof: u8,
        /// Norm found before renormalization.
        norm: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps any other error from the eofrot-eof crate.
    #[error("EOF data error: {reason}")]
    Eof {
        /// Description of the underlying failure.
        reason: String,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },
}

impl From<EofError> for RotationError {
    fn from(e: EofError) -> Self {
        match e {
            EofError::ShapeMismatch {
                doy,
                expected,
                got,
            } => RotationError::ShapeMismatch {
                doy,
                expected,
                got,
            },
            other => RotationError::Eof {
                reason: other.to_string(),
            },
        }
    }
}

impl From<eofrot_calendar::CalendarError> for RotationError {
    fn from(e: eofrot_calendar::CalendarError) -> Self {
        RotationError::Eof {
            reason: e.to_string(),
        }
    }
}

//! Error types for the eofrot-eof crate.

/// Error type for all fallible operations in the eofrot-eof crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EofError {
    /// Returned when an EOF vector has no elements.
    #[error("EOF vectors are empty")]
    EmptyVector,

    /// Returned when EOF1 and EOF2 of one pair differ in length.
    #[error("EOF pair length mismatch: EOF1 has {eof1_len} elements, EOF2 has {eof2_len}")]
    LengthMismatch {
        /// Length of EOF1.
        eof1_len: usize,
        /// Length of EOF2.
        eof2_len: usize,
    },

    /// Returned when a basis matrix does not have exactly two columns.
    #[error("EOF basis must have 2 columns, got {got}")]
    BasisColumns {
        /// Number of columns supplied.
        got: usize,
    },

    /// Returned when an EOF vector contains NaN or infinite values.
    #[error("non-finite value in EOF{eof} at index {index}")]
    NonFinite {
        /// Which EOF of the pair (1 or 2).
        eof: u8,
        /// Index of the first offending grid point.
        index: usize,
    },

    /// Returned when a spatial grid has no latitudes or no longitudes.
    #[error("spatial grid is empty ({n_lat} latitudes, {n_long} longitudes)")]
    EmptyGrid {
        /// Number of latitudes.
        n_lat: usize,
        /// Number of longitudes.
        n_long: usize,
    },

    /// Returned when a grid does not match the EOF vector length.
    #[error("grid has {grid_points} points but EOF vectors have {vector_len}")]
    GridMismatch {
        /// Number of grid points (`n_lat * n_long`).
        grid_points: usize,
        /// Length of the EOF vectors.
        vector_len: usize,
    },

    /// Returned when an EOF sequence has no days.
    #[error("EOF sequence is empty")]
    EmptySequence,

    /// Returned when an EOF sequence has more days than a leap year.
    #[error("EOF sequence has {n_days} days (at most 366 allowed)")]
    TooManyDays {
        /// Number of days supplied.
        n_days: usize,
    },

    /// Returned when EOF vectors differ in length across days.
    #[error("shape mismatch at DOY {doy}: expected {expected} grid points, got {got}")]
    ShapeMismatch {
        /// Day-of-year of the offending EOF pair.
        doy: u16,
        /// Vector length of DOY 1.
        expected: usize,
        /// Vector length of the offending day.
        got: usize,
    },

    /// Returned when a requested day-of-year is not part of the sequence.
    #[error("DOY {doy} not in sequence of {n_days} days")]
    MissingDoy {
        /// Requested day-of-year.
        doy: u16,
        /// Number of days in the sequence.
        n_days: usize,
    },

    /// Wraps an error originating from the eofrot-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl From<eofrot_calendar::CalendarError> for EofError {
    fn from(e: eofrot_calendar::CalendarError) -> Self {
        EofError::Calendar {
            reason: e.to_string(),
        }
    }
}

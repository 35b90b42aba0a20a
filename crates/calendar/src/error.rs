//! Error types for the eofrot-calendar crate.

/// Error type for all fallible operations in the eofrot-calendar crate.
///
/// This enum covers validation failures for day-of-year values and cycle
/// lengths.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range.
    #[error("invalid day of year: {doy} (must be 1..={max})")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
        /// The largest day-of-year accepted in this context.
        max: u16,
    },

    /// Returned when a day cycle would be empty or longer than a leap year.
    #[error("invalid cycle length: {len} (must be 1..=366)")]
    InvalidCycleLength {
        /// The rejected cycle length.
        len: usize,
    },
}

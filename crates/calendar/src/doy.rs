//! Day-of-year newtype.

use std::fmt;

use crate::error::CalendarError;

/// Day-of-year (1..=366).
///
/// Whether a given day exists depends on the cycle it is used with; see
/// [`DayCycle`](crate::DayCycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(pub(crate) u16);

/// Largest representable day-of-year.
pub const MAX_DOY: u16 = 366;

impl Doy {
    /// January 1.
    pub const FIRST: Doy = Doy(1);

    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=MAX_DOY).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy, max: MAX_DOY });
        }
        Ok(Self(doy))
    }

    /// Creates a `Doy` from a 0-based index (0 = January 1).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `index + 1` exceeds 366.
    pub fn from_index(index: usize) -> Result<Self, CalendarError> {
        let doy = u16::try_from(index + 1).unwrap_or(u16::MAX);
        Self::new(doy)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Doy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl TryFrom<u16> for Doy {
    type Error = CalendarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

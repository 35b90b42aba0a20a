//! Ordered EOF pairs for every day of a cycle.

use eofrot_calendar::{DayCycle, Doy, MAX_DOY};

use crate::data::EofData;
use crate::error::EofError;

/// EOF pairs for DOY 1..=K, where K is the sequence length.
///
/// All days share the same vector length. Adjacency is cyclic: the day
/// after DOY K is DOY 1.
#[derive(Debug, Clone, PartialEq)]
pub struct EofSequence {
    days: Vec<EofData>,
}

impl EofSequence {
    /// Creates a sequence from per-day EOF pairs in DOY order.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::EmptySequence`] for an empty input,
    /// [`EofError::TooManyDays`] for more than 366 days, and
    /// [`EofError::ShapeMismatch`] if any day's vector length differs
    /// from DOY 1.
    pub fn new(days: Vec<EofData>) -> Result<Self, EofError> {
        let Some(first) = days.first() else {
            return Err(EofError::EmptySequence);
        };
        if days.len() > MAX_DOY as usize {
            return Err(EofError::TooManyDays { n_days: days.len() });
        }
        let expected = first.n_points();
        if let Some((i, bad)) = days
            .iter()
            .enumerate()
            .find(|(_, d)| d.n_points() != expected)
        {
            return Err(EofError::ShapeMismatch {
                doy: i as u16 + 1,
                expected,
                got: bad.n_points(),
            });
        }
        Ok(Self { days })
    }

    /// Number of days (K).
    pub fn n_days(&self) -> usize {
        self.days.len()
    }

    /// Vector length shared by all days.
    pub fn n_points(&self) -> usize {
        self.days[0].n_points()
    }

    /// The cyclic day range 1..=K covered by this sequence.
    pub fn cycle(&self) -> DayCycle {
        // Length was validated to 1..=366 in `new`.
        DayCycle::new(self.days.len()).unwrap_or_else(|_| DayCycle::from_calendar(false))
    }

    /// EOF pair for a given day-of-year.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::MissingDoy`] if `doy` exceeds the sequence length.
    pub fn eofdata_for_doy(&self, doy: Doy) -> Result<&EofData, EofError> {
        self.days.get(doy.index()).ok_or(EofError::MissingDoy {
            doy: doy.get(),
            n_days: self.days.len(),
        })
    }

    /// All days in DOY order.
    pub fn days(&self) -> &[EofData] {
        &self.days
    }

    /// Iterates over `(doy, eofs)` in DOY order.
    pub fn iter(&self) -> impl Iterator<Item = (Doy, &EofData)> {
        self.cycle().doys().zip(self.days.iter())
    }

    /// Consumes the sequence and returns the per-day pairs.
    pub fn into_days(self) -> Vec<EofData> {
        self.days
    }
}

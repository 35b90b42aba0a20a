//! Cyclic day-of-year arithmetic.
//!
//! A [`DayCycle`] of length `K` covers DOY 1..=K, and the day after `K`
//! is DOY 1 again.

use crate::doy::{Doy, MAX_DOY};
use crate::error::CalendarError;

/// A cyclic range of days-of-year, 1..=`len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCycle {
    len: u16,
}

impl DayCycle {
    /// Creates a cycle of `len` days.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidCycleLength`] if `len` is not in 1..=366.
    pub fn new(len: usize) -> Result<Self, CalendarError> {
        match u16::try_from(len) {
            Ok(l) if (1..=MAX_DOY).contains(&l) => Ok(Self { len: l }),
            _ => Err(CalendarError::InvalidCycleLength { len }),
        }
    }

    /// The calendar year cycle: 365 days when `no_leap` is set, 366 otherwise.
    pub fn from_calendar(no_leap: bool) -> Self {
        Self {
            len: if no_leap { 365 } else { MAX_DOY },
        }
    }

    /// Number of days in the cycle.
    pub fn len(self) -> usize {
        self.len as usize
    }

    /// Always `false`; a cycle holds at least one day.
    pub fn is_empty(self) -> bool {
        false
    }

    /// Returns `true` if `doy` lies inside the cycle.
    pub fn contains(self, doy: Doy) -> bool {
        doy.get() <= self.len
    }

    /// The last day of the cycle.
    pub fn last(self) -> Doy {
        Doy::new(self.len).unwrap_or(Doy::FIRST)
    }

    /// The day after `doy`, wrapping from the last day back to DOY 1.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is outside the cycle.
    pub fn next(self, doy: Doy) -> Result<Doy, CalendarError> {
        self.check(doy)?;
        if doy.get() == self.len {
            Ok(Doy::FIRST)
        } else {
            Doy::new(doy.get() + 1)
        }
    }

    /// Number of forward steps from `from` to `to` (0..len).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if either day is outside the cycle.
    pub fn distance(self, from: Doy, to: Doy) -> Result<usize, CalendarError> {
        self.check(from)?;
        self.check(to)?;
        let len = self.len();
        Ok((to.index() + len - from.index()) % len)
    }

    /// Iterates over every day of the cycle in order, starting at DOY 1.
    pub fn doys(self) -> impl Iterator<Item = Doy> {
        (1..=self.len).map(Doy)
    }

    /// Days in the half-open window `[start, end)`.
    ///
    /// When `end <= start` the window wraps past the last day, so
    /// `window(start, start)` covers the full cycle starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if either bound is outside the cycle.
    pub fn window(self, start: Doy, end: Doy) -> Result<Vec<Doy>, CalendarError> {
        let mut n = self.distance(start, end)?;
        if n == 0 {
            n = self.len();
        }
        let mut out = Vec::with_capacity(n);
        let mut current = start;
        for _ in 0..n {
            out.push(current);
            current = self.next(current)?;
        }
        Ok(out)
    }

    fn check(self, doy: Doy) -> Result<(), CalendarError> {
        if self.contains(doy) {
            Ok(())
        } else {
            Err(CalendarError::InvalidDoy {
                doy: doy.get(),
                max: self.len,
            })
        }
    }
}

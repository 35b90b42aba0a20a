//! # eofrot-calendar
//!
//! Day-of-year arithmetic for seasonally varying EOF bases.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     C["DayCycle (K days)"] -->|".next()"| A["Doy (1..=366)"]
//!     C -->|".window()"| D["Vec of Doy"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use eofrot_calendar::{DayCycle, Doy};
//!
//! let cycle = DayCycle::from_calendar(true); // 365 days
//! let last = cycle.last();
//! assert_eq!(cycle.next(last).unwrap(), Doy::FIRST);
//!
//! // December 1 to January 31 of a 365-day year.
//! let winter = cycle.window(Doy::new(335).unwrap(), Doy::new(32).unwrap()).unwrap();
//! assert_eq!(winter.len(), 62);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype |
//! | `cycle` | Cyclic day ranges with wrap-around |
//! | `error` | Error types |

mod cycle;
mod doy;
mod error;

pub use cycle::DayCycle;
pub use doy::{Doy, MAX_DOY};
pub use error::CalendarError;

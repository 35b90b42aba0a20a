//! Seasonally varying EOF bases indexed by day-of-year.
//!
//! An OMI-style EOF analysis produces one pair of leading EOFs per
//! day-of-year. This crate holds that data and the operations that act on
//! it without reference to any particular postprocessing scheme.
//!
//! # Types
//!
//! - [`EofData`]: EOF1/EOF2 of one day as an `n_points x 2` matrix, plus
//!   optional grid and analysis metadata
//! - [`EofSequence`]: EOF pairs for DOY 1..=K with cyclic adjacency
//! - [`SpatialGrid`]: latitude-major grid the vectors are defined on
//!
//! # Operations
//!
//! - [`correct_sign_changes`]: remove spontaneous sign flips between days
//! - [`angle_between_eofs`] / [`angle_between_vectors`]: closeness of patterns
//! - [`mean_eof`]: grid-point mean over a (possibly wrapping) DOY window
//!
//! # Quick Start
//!
//! ```
//! use eofrot_eof::{EofData, EofSequence, correct_sign_changes};
//!
//! let days = vec![
//!     EofData::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap(),
//!     EofData::new(vec![-1.0, 0.1], vec![0.1, 1.0]).unwrap(),
//! ];
//! let seq = EofSequence::new(days).unwrap();
//! let corrected = correct_sign_changes(&seq, None).unwrap();
//! assert_eq!(corrected.n_flips(), 1);
//! ```

mod data;
mod error;
mod grid;
mod mean;
mod sequence;
mod sign;
mod vector;

pub use data::EofData;
pub use error::EofError;
pub use grid::SpatialGrid;
pub use mean::mean_eof;
pub use sequence::EofSequence;
pub use sign::{
    SignCorrected, align_basis, align_pair, align_vector, correct_sign_changes, needs_flip,
};
pub use vector::{angle_between_eofs, angle_between_vectors, norm};

pub use eofrot_calendar::{DayCycle, Doy};

//! EOF pair for a single day-of-year.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::EofError;
use crate::grid::SpatialGrid;

/// The two leading EOFs of one day-of-year, plus optional metadata.
///
/// Vectors are stored as an `n_points x 2` matrix: column 0 is EOF1,
/// column 1 is EOF2. Metadata (grid, explained variances, eigenvalues,
/// number of observations) is carried along unchanged by all processing.
#[derive(Debug, Clone, PartialEq)]
pub struct EofData {
    basis: Array2<f64>,
    grid: Option<SpatialGrid>,
    explained_variances: Option<Vec<f64>>,
    eigenvalues: Option<Vec<f64>>,
    no_observations: Option<usize>,
}

impl EofData {
    /// Creates an EOF pair from its two vectors.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::LengthMismatch`] if the vectors differ in length,
    /// [`EofError::EmptyVector`] if they are empty, and
    /// [`EofError::NonFinite`] if any value is NaN or infinite.
    pub fn new(eof1: Vec<f64>, eof2: Vec<f64>) -> Result<Self, EofError> {
        if eof1.len() != eof2.len() {
            return Err(EofError::LengthMismatch {
                eof1_len: eof1.len(),
                eof2_len: eof2.len(),
            });
        }
        let mut basis = Array2::zeros((eof1.len(), 2));
        basis.column_mut(0).assign(&Array1::from(eof1));
        basis.column_mut(1).assign(&Array1::from(eof2));
        Self::from_basis(basis)
    }

    /// Creates an EOF pair from an `n_points x 2` basis matrix.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::BasisColumns`] if the matrix does not have two
    /// columns, otherwise the same errors as [`EofData::new`].
    pub fn from_basis(basis: Array2<f64>) -> Result<Self, EofError> {
        check_basis(&basis)?;
        Ok(Self {
            basis,
            grid: None,
            explained_variances: None,
            eigenvalues: None,
            no_observations: None,
        })
    }

    // --- Builder methods ---

    /// Attaches a spatial grid.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::GridMismatch`] if the grid size differs from the
    /// vector length.
    pub fn with_grid(mut self, grid: SpatialGrid) -> Result<Self, EofError> {
        if grid.n_points() != self.n_points() {
            return Err(EofError::GridMismatch {
                grid_points: grid.n_points(),
                vector_len: self.n_points(),
            });
        }
        self.grid = Some(grid);
        Ok(self)
    }

    /// Attaches explained variances of the EOF analysis.
    pub fn with_explained_variances(mut self, v: Vec<f64>) -> Self {
        self.explained_variances = Some(v);
        self
    }

    /// Attaches eigenvalues of the EOF analysis.
    pub fn with_eigenvalues(mut self, v: Vec<f64>) -> Self {
        self.eigenvalues = Some(v);
        self
    }

    /// Attaches the number of observations used for this day.
    pub fn with_no_observations(mut self, n: usize) -> Self {
        self.no_observations = Some(n);
        self
    }

    /// Returns a copy of this pair with new vectors and the same metadata.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::GridMismatch`] if `basis` has a different number
    /// of rows, otherwise the same errors as [`EofData::from_basis`].
    pub fn with_basis(&self, basis: Array2<f64>) -> Result<Self, EofError> {
        check_basis(&basis)?;
        if basis.nrows() != self.n_points() {
            return Err(EofError::GridMismatch {
                grid_points: self.n_points(),
                vector_len: basis.nrows(),
            });
        }
        Ok(Self {
            basis,
            grid: self.grid.clone(),
            explained_variances: self.explained_variances.clone(),
            eigenvalues: self.eigenvalues.clone(),
            no_observations: self.no_observations,
        })
    }

    // --- Accessors ---

    /// EOF1 vector.
    pub fn eof1(&self) -> ArrayView1<'_, f64> {
        self.basis.column(0)
    }

    /// EOF2 vector.
    pub fn eof2(&self) -> ArrayView1<'_, f64> {
        self.basis.column(1)
    }

    /// Both vectors as an `n_points x 2` matrix.
    pub fn basis(&self) -> ArrayView2<'_, f64> {
        self.basis.view()
    }

    /// Number of grid points (vector length).
    pub fn n_points(&self) -> usize {
        self.basis.nrows()
    }

    /// Spatial grid, if known.
    pub fn grid(&self) -> Option<&SpatialGrid> {
        self.grid.as_ref()
    }

    /// Explained variances, if known.
    pub fn explained_variances(&self) -> Option<&[f64]> {
        self.explained_variances.as_deref()
    }

    /// Eigenvalues, if known.
    pub fn eigenvalues(&self) -> Option<&[f64]> {
        self.eigenvalues.as_deref()
    }

    /// Number of observations, if known.
    pub fn no_observations(&self) -> Option<usize> {
        self.no_observations
    }
}

fn check_basis(basis: &Array2<f64>) -> Result<(), EofError> {
    if basis.ncols() != 2 {
        return Err(EofError::BasisColumns {
            got: basis.ncols(),
        });
    }
    if basis.nrows() == 0 {
        return Err(EofError::EmptyVector);
    }
    for (c, column) in basis.columns().into_iter().enumerate() {
        if let Some(index) = column.iter().position(|v| !v.is_finite()) {
            return Err(EofError::NonFinite {
                eof: c as u8 + 1,
                index,
            });
        }
    }
    Ok(())
}

//! Re-expressing one day's EOFs in another day's EOF subspace.
//!
//! The rotation pass never computes EOFs itself. Whatever produced the
//! per-day EOFs also decides how a pair of vectors is carried into the
//! subspace of the next day; that capability is injected through the
//! [`Projector`] trait.

use eofrot_calendar::Doy;
use eofrot_eof::EofData;
use ndarray::{Array2, ArrayView2, array};

/// Projects an `n x 2` pair of vectors into the EOF subspace of day `doy`.
pub trait Projector {
    /// Returns `vectors` expressed in the subspace of `target`, the native
    /// EOF pair of day `doy`. The result must be `n x 2`.
    fn project(&self, doy: Doy, target: &EofData, vectors: ArrayView2<'_, f64>) -> Array2<f64>;
}

/// Orthogonal projection onto the span of the target day's EOF pair,
/// `B (BᵀB)⁻¹ (Bᵀ A)` with `B` the target basis.
///
/// EOFs read from files are orthonormal only up to rounding, so the 2x2
/// Gram matrix is inverted rather than assumed to be the identity. The
/// `n x n` projection matrix is never formed. A target pair that spans
/// less than a plane projects everything to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubspaceProjector;

impl Projector for SubspaceProjector {
    fn project(&self, _doy: Doy, target: &EofData, vectors: ArrayView2<'_, f64>) -> Array2<f64> {
        let b = target.basis();
        let g = b.t().dot(&b);
        let det = g[[0, 0]] * g[[1, 1]] - g[[0, 1]] * g[[1, 0]];
        if !det.is_finite() || det <= f64::EPSILON * g[[0, 0]] * g[[1, 1]] {
            return Array2::zeros((b.nrows(), vectors.ncols()));
        }
        let g_inv = array![[g[[1, 1]], -g[[0, 1]]], [-g[[1, 0]], g[[0, 0]]]] / det;
        b.dot(&g_inv.dot(&b.t().dot(&vectors)))
    }
}

/// Returns the vectors unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjector;

impl Projector for IdentityProjector {
    fn project(&self, _doy: Doy, _target: &EofData, vectors: ArrayView2<'_, f64>) -> Array2<f64> {
        vectors.to_owned()
    }
}

impl<F> Projector for F
where
    F: Fn(Doy, &EofData, ArrayView2<'_, f64>) -> Array2<f64>,
{
    fn project(&self, doy: Doy, target: &EofData, vectors: ArrayView2<'_, f64>) -> Array2<f64> {
        self(doy, target, vectors)
    }
}

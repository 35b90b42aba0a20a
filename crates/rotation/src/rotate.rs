//! The sequential projection, blending, rotation, and renormalization pass.
//!
//! For day `n = 2..=K` the previous blended pair is projected into day `n`'s
//! subspace, sign-aligned, blended with the native day-`n` pair, and
//! renormalized. Carrying DOY 1 once around the cycle this way leaves it at
//! the closure angle `φ` from where it started. Day `n` of the output is the
//! blended pair rotated in its own plane by `(n - 1)·δ` with `δ = -φ / K`, so
//! the rotation grows linearly with the distance from the anchor and reaches
//! `-φ` exactly when the cycle wraps onto DOY 1.

use eofrot_calendar::Doy;
use eofrot_eof::{EofData, EofSequence, align_basis, norm};
use ndarray::{Array2, ArrayView2, array};

use crate::error::RotationError;
use crate::projector::Projector;

/// 2x2 rotation by `delta`, applied on the right of an `n x 2` basis.
///
/// `A · R(δ)` maps `(eof1, eof2)` to
/// `(cos δ·eof1 + sin δ·eof2, -sin δ·eof1 + cos δ·eof2)`.
pub fn rotation_matrix(delta: f64) -> Array2<f64> {
    let (s, c) = delta.sin_cos();
    array![[c, -s], [s, c]]
}

/// Rescales both columns of `basis` to unit L2 norm.
///
/// # Errors
///
/// Returns [`RotationError::DegenerateBasis`] if a column norm is not
/// finite or below `tol`.
pub fn normalize_pair(mut basis: Array2<f64>, doy: Doy, tol: f64) -> Result<Array2<f64>, RotationError> {
    for (c, mut column) in basis.columns_mut().into_iter().enumerate() {
        let n = norm(column.view());
        if !n.is_finite() || n < tol {
            return Err(RotationError::DegenerateBasis {
                doy: doy.get(),
                eof: c as u8 + 1,
                norm: n,
            });
        }
        column /= n;
    }
    Ok(basis)
}

/// One day of the pass, shared by the closure estimate and the final pass.
pub(crate) struct Stepper<'a, P: ?Sized> {
    pub(crate) projector: &'a P,
    pub(crate) weight: f64,
    pub(crate) tol: f64,
}

impl<P: Projector + ?Sized> Stepper<'_, P> {
    /// Carries `previous` into day `doy` and blends it with the native pair.
    pub(crate) fn step(
        &self,
        doy: Doy,
        native: &EofData,
        previous: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, RotationError> {
        let n = native.n_points();
        let mut projected = self.projector.project(doy, native, previous);
        if projected.dim() != (n, 2) {
            return Err(RotationError::ProjectorOutput {
                doy: doy.get(),
                expected_rows: n,
                rows: projected.nrows(),
                cols: projected.ncols(),
            });
        }
        align_basis(previous, &mut projected);

        let mut own = native.basis().to_owned();
        align_basis(previous, &mut own);

        let blended = own * (1.0 - self.weight) + projected * self.weight;
        normalize_pair(blended, doy, self.tol)
    }
}

/// Signed angle of `v` in the plane of `frame`, measured from column 0
/// towards column 1.
///
/// # Errors
///
/// Returns [`RotationError::DegenerateBasis`] if `v` has (almost) no
/// component in the plane.
pub(crate) fn in_plane_angle(
    frame: ArrayView2<'_, f64>,
    v: ndarray::ArrayView1<'_, f64>,
    doy: Doy,
    tol: f64,
) -> Result<f64, RotationError> {
    let c1 = frame.column(0).dot(&v);
    let c2 = frame.column(1).dot(&v);
    let r = c1.hypot(c2);
    if !r.is_finite() || r < tol {
        return Err(RotationError::DegenerateBasis {
            doy: doy.get(),
            eof: 1,
            norm: r,
        });
    }
    Ok(c2.atan2(c1))
}

/// Unrotated blended pairs for every day plus DOY 1 reached again from the
/// last day.
struct Carried {
    days: Vec<Array2<f64>>,
    wrapped: Array2<f64>,
}

fn carry_cycle<P: Projector + ?Sized>(
    sequence: &EofSequence,
    stepper: &Stepper<'_, P>,
) -> Result<Carried, RotationError> {
    let days = sequence.days();
    if days.len() < 2 {
        return Err(RotationError::TooFewDays { n_days: days.len() });
    }

    let mut carried = Vec::with_capacity(days.len());
    carried.push(normalize_pair(days[0].basis().to_owned(), Doy::FIRST, stepper.tol)?);
    for (i, native) in days.iter().enumerate().skip(1) {
        let doy = Doy::from_index(i)?;
        let next = stepper.step(doy, native, carried[i - 1].view())?;
        carried.push(next);
    }
    let wrapped = stepper.step(Doy::FIRST, &days[0], carried[days.len() - 1].view())?;

    Ok(Carried {
        days: carried,
        wrapped,
    })
}

impl Carried {
    fn closure_angle(&self, tol: f64) -> Result<f64, RotationError> {
        in_plane_angle(self.days[0].view(), self.wrapped.column(0), Doy::FIRST, tol)
    }
}

/// Closure angle `φ` of a cycle of native EOF pairs.
///
/// DOY 1 (renormalized) is carried through days 2..=K and once more onto
/// DOY 1 without any rotation; the signed angle between the returned EOF1
/// and the anchor's EOF1, within the anchor's plane, is `φ`.
///
/// # Errors
///
/// Returns [`RotationError::TooFewDays`] for fewer than two days and any
/// error of the individual steps.
pub fn closure_angle<P: Projector + ?Sized>(
    sequence: &EofSequence,
    projector: &P,
    weight: f64,
    tol: f64,
) -> Result<f64, RotationError> {
    let stepper = Stepper {
        projector,
        weight,
        tol,
    };
    carry_cycle(sequence, &stepper)?.closure_angle(tol)
}

/// Output of [`rotate_days`].
pub(crate) struct RotatedDays {
    pub(crate) days: Vec<EofData>,
    pub(crate) wrapped_anchor: EofData,
    pub(crate) closure_angle: f64,
    pub(crate) delta: f64,
    pub(crate) residual_angle: f64,
}

/// Runs the full pass over an already sign-aligned native sequence.
pub(crate) fn rotate_days<P: Projector + ?Sized>(
    sequence: &EofSequence,
    projector: &P,
    weight: f64,
    tol: f64,
) -> Result<RotatedDays, RotationError> {
    let stepper = Stepper {
        projector,
        weight,
        tol,
    };
    let carried = carry_cycle(sequence, &stepper)?;
    let phi = carried.closure_angle(tol)?;

    let natives = sequence.days();
    let k = natives.len();
    let delta = -phi / k as f64;

    let mut out = Vec::with_capacity(k);
    for (i, (native, basis)) in natives.iter().zip(carried.days).enumerate() {
        let doy = Doy::from_index(i)?;
        let rotated = normalize_pair(basis.dot(&rotation_matrix(i as f64 * delta)), doy, tol)?;
        out.push(native.with_basis(rotated)?);
    }

    let wrapped = normalize_pair(
        carried.wrapped.dot(&rotation_matrix(k as f64 * delta)),
        Doy::FIRST,
        tol,
    )?;
    let residual_angle = in_plane_angle(out[0].basis(), wrapped.column(0), Doy::FIRST, tol)?;
    let wrapped_anchor = natives[0].with_basis(wrapped)?;

    Ok(RotatedDays {
        days: out,
        wrapped_anchor,
        closure_angle: phi,
        delta,
        residual_angle,
    })
}

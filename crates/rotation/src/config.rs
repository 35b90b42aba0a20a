//! Configuration for the rotation pass.

use eofrot_eof::EofData;

use crate::error::RotationError;

/// Weight given to the projected previous-day EOFs when blending them with
/// the native EOFs of the current day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProjectionWeight {
    /// `1 / K` for a cycle of `K` days.
    #[default]
    PerDay,
    /// A fixed weight in `[0, 1]`. `1.0` carries the previous day forward
    /// by projection alone; `0.0` keeps the native EOFs.
    Fixed(f64),
}

impl ProjectionWeight {
    /// Resolves the weight for a cycle of `n_days` days.
    pub fn resolve(self, n_days: usize) -> f64 {
        match self {
            Self::PerDay => 1.0 / n_days.max(1) as f64,
            Self::Fixed(w) => w,
        }
    }
}

/// Configuration for [`post_process_rotation`](crate::post_process_rotation).
///
/// Passed explicitly to every entry point; there is no global state.
///
/// # Example
///
/// ```
/// use eofrot_rotation::{ProjectionWeight, RotationConfig};
///
/// let config = RotationConfig::new()
///     .with_no_leap(true)
///     .with_projection_weight(ProjectionWeight::Fixed(1.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct RotationConfig {
    no_leap: bool,
    projection_weight: ProjectionWeight,
    align_signs: bool,
    doy1_reference: Option<EofData>,
    degeneracy_tol: f64,
}

impl RotationConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `no_leap = false` (366 days), `projection_weight = PerDay`,
    /// `align_signs = true`, no DOY 1 reference, `degeneracy_tol = 1e-12`.
    pub fn new() -> Self {
        Self {
            no_leap: false,
            projection_weight: ProjectionWeight::PerDay,
            align_signs: true,
            doy1_reference: None,
            degeneracy_tol: 1e-12,
        }
    }

    // --- Builder methods ---

    /// Selects the 365-day (`true`) or 366-day (`false`) cycle.
    pub fn with_no_leap(mut self, b: bool) -> Self {
        self.no_leap = b;
        self
    }

    /// Sets the projection weight.
    pub fn with_projection_weight(mut self, w: ProjectionWeight) -> Self {
        self.projection_weight = w;
        self
    }

    /// Sets whether spontaneous sign changes are corrected before rotating.
    pub fn with_align_signs(mut self, b: bool) -> Self {
        self.align_signs = b;
        self
    }

    /// Sets a reference EOF pair that fixes the sign of DOY 1.
    pub fn with_doy1_reference(mut self, reference: EofData) -> Self {
        self.doy1_reference = Some(reference);
        self
    }

    /// Sets the smallest vector norm accepted before renormalization.
    pub fn with_degeneracy_tol(mut self, tol: f64) -> Self {
        self.degeneracy_tol = tol;
        self
    }

    // --- Accessors ---

    /// Returns whether the 365-day cycle is selected.
    pub fn no_leap(&self) -> bool {
        self.no_leap
    }

    /// Returns the projection weight.
    pub fn projection_weight(&self) -> ProjectionWeight {
        self.projection_weight
    }

    /// Returns whether sign changes are corrected before rotating.
    pub fn align_signs(&self) -> bool {
        self.align_signs
    }

    /// Returns the DOY 1 sign reference, if any.
    pub fn doy1_reference(&self) -> Option<&EofData> {
        self.doy1_reference.as_ref()
    }

    /// Returns the degeneracy tolerance.
    pub fn degeneracy_tol(&self) -> f64 {
        self.degeneracy_tol
    }

    /// Validates this configuration.
    ///
    /// Checks that a fixed projection weight is finite and in `[0, 1]` and
    /// that `degeneracy_tol` is finite and positive.
    pub fn validate(&self) -> Result<(), RotationError> {
        if let ProjectionWeight::Fixed(w) = self.projection_weight {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(RotationError::InvalidConfig {
                    reason: format!("projection_weight must be finite and in [0, 1], got {w}"),
                });
            }
        }

        if !self.degeneracy_tol.is_finite() || self.degeneracy_tol <= 0.0 {
            return Err(RotationError::InvalidConfig {
                reason: format!(
                    "degeneracy_tol must be finite and > 0, got {}",
                    self.degeneracy_tol
                ),
            });
        }

        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RotationConfig::new();
        assert!(!cfg.no_leap());
        assert_eq!(cfg.projection_weight(), ProjectionWeight::PerDay);
        assert!(cfg.align_signs());
        assert!(cfg.doy1_reference().is_none());
        assert!((cfg.degeneracy_tol() - 1e-12).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_chaining() {
        let reference = EofData::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap();
        let cfg = RotationConfig::new()
            .with_no_leap(true)
            .with_projection_weight(ProjectionWeight::Fixed(0.5))
            .with_align_signs(false)
            .with_doy1_reference(reference.clone())
            .with_degeneracy_tol(1e-9);

        assert!(cfg.no_leap());
        assert_eq!(cfg.projection_weight(), ProjectionWeight::Fixed(0.5));
        assert!(!cfg.align_signs());
        assert_eq!(cfg.doy1_reference(), Some(&reference));
        assert!((cfg.degeneracy_tol() - 1e-9).abs() < f64::EPSILON);
    }

    #[test]
    fn per_day_weight_resolves_to_inverse_length() {
        assert!((ProjectionWeight::PerDay.resolve(366) - 1.0 / 366.0).abs() < f64::EPSILON);
        assert!((ProjectionWeight::Fixed(0.25).resolve(366) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_ok() {
        assert!(RotationConfig::new().validate().is_ok());
        assert!(
            RotationConfig::new()
                .with_projection_weight(ProjectionWeight::Fixed(1.0))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn validate_bad_weight() {
        for w in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                RotationConfig::new()
                    .with_projection_weight(ProjectionWeight::Fixed(w))
                    .validate()
                    .is_err(),
                "weight {w} should be rejected"
            );
        }
    }

    #[test]
    fn validate_bad_tol() {
        assert!(RotationConfig::new().with_degeneracy_tol(0.0).validate().is_err());
        assert!(RotationConfig::new().with_degeneracy_tol(-1.0).validate().is_err());
        assert!(
            RotationConfig::new()
                .with_degeneracy_tol(f64::NAN)
                .validate()
                .is_err()
        );
    }
}

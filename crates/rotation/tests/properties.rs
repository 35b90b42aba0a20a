use std::f64::consts::{FRAC_PI_2, TAU};

use approx::assert_relative_eq;
use eofrot_calendar::Doy;
use eofrot_eof::{EofData, EofSequence, norm};
use eofrot_rotation::{
    ContinuityReport, IdentityProjector, ProjectionWeight, RotationConfig, RotationError,
    RotationResult, SubspaceProjector, max_vector_change, post_process_rotation, rotate_cycle,
};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const N_POINTS: usize = 24;

/// Orthonormal spatial patterns: first and second zonal harmonics.
fn patterns() -> [Vec<f64>; 3] {
    let scale = (2.0 / N_POINTS as f64).sqrt();
    let harmonic = |k: f64, phase: f64| -> Vec<f64> {
        (0..N_POINTS)
            .map(|j| scale * (k * TAU * j as f64 / N_POINTS as f64 + phase).cos())
            .collect()
    };
    [
        harmonic(1.0, 0.0),
        harmonic(1.0, -FRAC_PI_2),
        harmonic(2.0, 0.0),
    ]
}

fn embed(p: &[Vec<f64>; 3], c: [f64; 3]) -> Vec<f64> {
    (0..N_POINTS)
        .map(|j| c[0] * p[0][j] + c[1] * p[1][j] + c[2] * p[2][j])
        .collect()
}

/// A year of EOF pairs whose plane tilts around a cone of half-angle
/// `tilt` and whose in-plane orientation wobbles seasonally.
///
/// Carrying a pair around the cone by projection alone leaves it rotated
/// by `2π (1 - cos tilt)`. Signs of later days are flipped at random; the
/// number of flips is returned.
fn seasonal_cycle(n_days: usize, tilt: f64, seed: u64) -> (EofSequence, usize) {
    let p = patterns();
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1e-4).unwrap();
    let mut flips = 0;

    let days = (0..n_days)
        .map(|d| {
            let t = TAU * d as f64 / n_days as f64;
            let n = [tilt.sin() * t.cos(), tilt.sin() * t.sin(), tilt.cos()];
            // x axis projected into the plane, then completed by n × u.
            let u = [1.0 - n[0] * n[0], -n[0] * n[1], -n[0] * n[2]];
            let un = (u[0] * u[0] + u[1] * u[1] + u[2] * u[2]).sqrt();
            let u = [u[0] / un, u[1] / un, u[2] / un];
            let v = [
                n[1] * u[2] - n[2] * u[1],
                n[2] * u[0] - n[0] * u[2],
                n[0] * u[1] - n[1] * u[0],
            ];
            let psi = 0.2 * t.sin();
            let (s, c) = psi.sin_cos();
            let e1 = [0usize, 1, 2].map(|i| c * u[i] + s * v[i]);
            let e2 = [0usize, 1, 2].map(|i| -s * u[i] + c * v[i]);

            let mut eof1 = embed(&p, e1);
            let mut eof2 = embed(&p, e2);
            for x in eof1.iter_mut().chain(eof2.iter_mut()) {
                *x += noise.sample(&mut rng);
            }
            if d > 0 && rng.random_bool(0.2) {
                eof1.iter_mut().for_each(|x| *x = -*x);
                flips += 1;
            }
            if d > 0 && rng.random_bool(0.2) {
                eof2.iter_mut().for_each(|x| *x = -*x);
                flips += 1;
            }
            EofData::new(eof1, eof2).unwrap()
        })
        .collect();
    (EofSequence::new(days).unwrap(), flips)
}

fn cosine(a: &EofData, b: &EofData) -> f64 {
    a.eof1().dot(&b.eof1()) / (norm(a.eof1()) * norm(b.eof1()))
}

fn assert_unit_norms(seq: &EofSequence) {
    for (doy, day) in seq.iter() {
        assert_relative_eq!(norm(day.eof1()), 1.0, epsilon = 1e-10);
        assert_relative_eq!(norm(day.eof2()), 1.0, epsilon = 1e-10);
        assert!(day.eof1().iter().all(|x| x.is_finite()), "DOY {doy}");
    }
}

fn planar_angle(day: &EofData) -> f64 {
    day.eof1()[1].atan2(day.eof1()[0])
}

fn zero_projector(_doy: Doy, _target: &EofData, v: ArrayView2<'_, f64>) -> Array2<f64> {
    Array2::zeros(v.raw_dim())
}

// ---------------------------------------------------------------------------
// Full-year properties
// ---------------------------------------------------------------------------

#[test]
fn blended_year_is_unit_norm_and_continuous() {
    let (seq, flips) = seasonal_cycle(366, 0.3, 11);
    let result = post_process_rotation(&seq, &SubspaceProjector, &RotationConfig::new()).unwrap();

    assert_eq!(result.sequence().n_days(), 366);
    assert_eq!(result.sequence().n_points(), N_POINTS);
    assert_eq!(result.n_sign_flips(), flips);
    assert_unit_norms(result.sequence());

    let report = ContinuityReport::compute(result.sequence());
    assert!(report.is_sign_continuous(), "min inner product {}", report.min_inner_product);
    assert!(report.max_norm_deviation < 1e-10);
}

/// Asserts that the wrapped anchor lands on the output DOY 1 within its
/// plane, up to a small fraction of the closure angle.
fn assert_closes(result: &RotationResult) {
    let first = &result.sequence().days()[0];
    let wrapped = result.wrapped_anchor().eof1();
    let residual = first.eof2().dot(&wrapped).atan2(first.eof1().dot(&wrapped));
    assert_relative_eq!(residual, result.residual_angle(), epsilon = 1e-12);

    let phi = result.closure_angle();
    assert!(
        residual.abs() < 1e-3 * phi.abs() + 1e-9,
        "closure angle {phi}, residual {residual}"
    );
}

#[test]
fn blended_year_closes() {
    let (seq, _) = seasonal_cycle(366, 0.3, 12);
    let first = &seq.days()[0];
    for weight in [ProjectionWeight::PerDay, ProjectionWeight::Fixed(0.5)] {
        let config = RotationConfig::new().with_projection_weight(weight);
        let result = post_process_rotation(&seq, &SubspaceProjector, &config).unwrap();

        assert!(result.closure_angle() != 0.0);
        assert_closes(&result);
        assert!(cosine(result.wrapped_anchor(), first) > 0.99);
        assert!(cosine(&result.sequence().days()[0], first) > 1.0 - 1e-12);
    }
}

#[test]
fn transport_closure_is_cancelled() {
    let tilt: f64 = 0.3;
    let holonomy = TAU * (1.0 - tilt.cos());
    let (seq, _) = seasonal_cycle(365, tilt, 13);
    let config = RotationConfig::new()
        .with_no_leap(true)
        .with_projection_weight(ProjectionWeight::Fixed(1.0));
    let result = post_process_rotation(&seq, &SubspaceProjector, &config).unwrap();

    // Without the per-day rotation the wrapped pair would miss DOY 1 by
    // the cone holonomy, far more than the closure tolerance.
    assert!(holonomy.cos() < 0.99);
    assert_relative_eq!(result.closure_angle().abs(), holonomy, epsilon = 0.02);
    assert_relative_eq!(result.delta(), -result.closure_angle() / 365.0);

    assert!(cosine(result.wrapped_anchor(), &seq.days()[0]) > 0.99);
    assert_closes(&result);
    assert_unit_norms(result.sequence());
    assert!(ContinuityReport::compute(result.sequence()).is_sign_continuous());
}

#[test]
fn rerun_changes_little() {
    let (seq, _) = seasonal_cycle(366, 0.3, 14);
    let config = RotationConfig::new();
    let once = post_process_rotation(&seq, &SubspaceProjector, &config).unwrap();
    let twice = post_process_rotation(once.sequence(), &SubspaceProjector, &config).unwrap();
    assert_eq!(twice.n_sign_flips(), 0);
    assert!(max_vector_change(once.sequence(), twice.sequence()).unwrap() < 1e-3);
    assert_closes(&twice);
}

#[test]
fn rerun_of_transport_is_stable() {
    let (seq, _) = seasonal_cycle(366, 0.3, 15);
    let config = RotationConfig::new().with_projection_weight(ProjectionWeight::Fixed(1.0));
    let once = post_process_rotation(&seq, &SubspaceProjector, &config).unwrap();
    let twice = post_process_rotation(once.sequence(), &SubspaceProjector, &config).unwrap();
    assert!(max_vector_change(once.sequence(), twice.sequence()).unwrap() < 1e-6);
}

#[test]
fn doy1_reference_sets_convention() {
    let (seq, _) = seasonal_cycle(366, 0.3, 16);
    let first = &seq.days()[0];
    let flipped = EofData::new(
        first.eof1().iter().map(|x| -x).collect(),
        first.eof2().to_vec(),
    )
    .unwrap();
    let config = RotationConfig::new().with_doy1_reference(flipped);
    let result = post_process_rotation(&seq, &SubspaceProjector, &config).unwrap();
    assert!(cosine(&result.sequence().days()[0], first) < -0.99);
    assert!(ContinuityReport::compute(result.sequence()).is_sign_continuous());
}

// ---------------------------------------------------------------------------
// Toy cycle
// ---------------------------------------------------------------------------

fn toy() -> EofSequence {
    EofSequence::new(vec![
        EofData::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap(),
        EofData::new(vec![0.0, 1.0], vec![-1.0, 0.0]).unwrap(),
        EofData::new(vec![-1.0, 0.0], vec![0.0, -1.0]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn toy_cycle_blends_between_neighbours() {
    let result = rotate_cycle(&toy(), &IdentityProjector, &RotationConfig::new()).unwrap();
    let days = result.sequence().days();

    // DOY 1 is the anchor.
    assert_relative_eq!(planar_angle(&days[0]), 0.0);

    // DOY 2 lies strictly between DOY 1 (0) and its native EOF1 (π/2).
    let a2 = planar_angle(&days[1]);
    assert!(a2 > 0.0 && a2 < FRAC_PI_2, "DOY 2 at {a2}");

    // DOY 3's native EOF1 is aligned to +x, so DOY 3 lies between that
    // and DOY 2.
    let a3 = planar_angle(&days[2]);
    assert!(a3 > 0.0 && a3 < a2, "DOY 3 at {a3}, DOY 2 at {a2}");

    let report = ContinuityReport::compute(result.sequence());
    assert!(report.is_sign_continuous());
    assert_unit_norms(result.sequence());
}

#[test]
fn toy_cycle_keeps_pair_orthogonal() {
    let result = rotate_cycle(&toy(), &IdentityProjector, &RotationConfig::new()).unwrap();
    for day in result.sequence().days() {
        assert_relative_eq!(day.eof1().dot(&day.eof2()), 0.0, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn mismatched_lengths_are_shape_errors() {
    let err = EofSequence::new(vec![
        EofData::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap(),
        EofData::new(vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]).unwrap(),
    ])
    .map_err(RotationError::from)
    .unwrap_err();
    assert_eq!(
        err,
        RotationError::ShapeMismatch {
            doy: 2,
            expected: 2,
            got: 3
        }
    );
}

#[test]
fn short_year_is_rejected() {
    let (seq, _) = seasonal_cycle(364, 0.3, 17);
    let err = post_process_rotation(&seq, &SubspaceProjector, &RotationConfig::new()).unwrap_err();
    assert_eq!(
        err,
        RotationError::InvalidDayCount {
            got: 364,
            expected: 366
        }
    );
    let no_leap = RotationConfig::new().with_no_leap(true);
    let err = post_process_rotation(&seq, &SubspaceProjector, &no_leap).unwrap_err();
    assert_eq!(
        err,
        RotationError::InvalidDayCount {
            got: 364,
            expected: 365
        }
    );
}

#[test]
fn collapsing_projection_is_degenerate() {
    let config = RotationConfig::new().with_projection_weight(ProjectionWeight::Fixed(1.0));
    let err = rotate_cycle(&toy(), &zero_projector, &config).unwrap_err();
    assert!(matches!(
        err,
        RotationError::DegenerateBasis { doy: 2, eof: 1, .. }
    ));
}

use std::f64::consts::TAU;

use eofrot_eof::{
    DayCycle, Doy, EofData, EofSequence, angle_between_eofs, correct_sign_changes, mean_eof,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Travelling-wave EOF pair with phase `phase` on `n` equally spaced points.
fn wave_pair(n: usize, phase: f64) -> (Vec<f64>, Vec<f64>) {
    let scale = (2.0 / n as f64).sqrt();
    let eof1 = (0..n)
        .map(|j| scale * (TAU * j as f64 / n as f64 + phase).cos())
        .collect();
    let eof2 = (0..n)
        .map(|j| scale * (TAU * j as f64 / n as f64 + phase).sin())
        .collect();
    (eof1, eof2)
}

/// A smooth 365-day sequence whose signs are flipped at random.
fn flipped_sequence(seed: u64) -> (EofSequence, usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut flips = 0;
    let days = (0..365)
        .map(|d| {
            let phase = 0.4 * (TAU * d as f64 / 365.0).sin();
            let (mut e1, mut e2) = wave_pair(24, phase);
            if d > 0 && rng.random_bool(0.3) {
                e1.iter_mut().for_each(|v| *v = -*v);
                flips += 1;
            }
            if d > 0 && rng.random_bool(0.3) {
                e2.iter_mut().for_each(|v| *v = -*v);
                flips += 1;
            }
            EofData::new(e1, e2).unwrap()
        })
        .collect();
    (EofSequence::new(days).unwrap(), flips)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn corrected_series_is_sign_continuous() {
    let (seq, _) = flipped_sequence(7);
    let out = correct_sign_changes(&seq, None).unwrap();
    for pair in out.sequence().days().windows(2) {
        let (a1, a2) = angle_between_eofs(&pair[0], &pair[1]).unwrap();
        assert!(a1 < 0.1, "EOF1 jump of {a1} rad after correction");
        assert!(a2 < 0.1, "EOF2 jump of {a2} rad after correction");
    }
}

#[test]
fn every_injected_flip_is_undone() {
    // Each injected flip differs from its neighbours' sign, so the
    // correction has to touch a vector at every flip boundary.
    let (seq, injected) = flipped_sequence(11);
    let out = correct_sign_changes(&seq, None).unwrap();
    assert!(injected > 0);
    assert!(out.n_flips() > 0);
    let smooth = correct_sign_changes(out.sequence(), None).unwrap();
    assert_eq!(smooth.n_flips(), 0, "correction must be idempotent");
}

#[test]
fn mean_over_boundary_window() {
    let (seq, _) = flipped_sequence(3);
    let seq = correct_sign_changes(&seq, None).unwrap().into_sequence();
    let cycle: DayCycle = seq.cycle();
    let dec1 = Doy::new(335).unwrap();
    let feb1 = Doy::new(32).unwrap();
    assert_eq!(cycle.window(dec1, feb1).unwrap().len(), 62);

    let mean = mean_eof(&seq, dec1, feb1).unwrap();
    assert_eq!(mean.n_points(), seq.n_points());
    // Phase is close to zero around the year boundary, so the mean pattern
    // stays close to DOY 1.
    let day1 = seq.eofdata_for_doy(Doy::FIRST).unwrap();
    let (a1, a2) = angle_between_eofs(day1, &mean).unwrap();
    assert!(a1 < 0.2 && a2 < 0.2, "mean deviates by ({a1}, {a2})");
}

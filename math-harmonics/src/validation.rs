//! Reference implementations and accuracy/timing trials
//!
//! The references evaluate one point at a time from explicit power series
//! and share no recurrence code with the batch engines, so agreement
//! between the two is a meaningful check. Trials draw random inputs,
//! time both paths and report mean absolute errors, including analytic
//! derivatives against central finite differences.

use crate::error::Result;
use crate::special::{
    gegenbauer, gegenbauer_with_derivative, spherical_harmonics,
    spherical_harmonics_with_derivatives,
};
use crate::table::TriangularTable;
use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Finite difference step for harmonic derivatives
pub const HARMONIC_FD_STEP: f64 = 1e-6;

/// Finite difference step for Gegenbauer derivatives
pub const GEGENBAUER_FD_STEP: f64 = 1e-4;

/// Column header of [`HarmonicTrial::to_row`]
pub const HARMONIC_HEADER: &str =
    "# engine_s\treference_s\tmean_abs_err\td_azimuthal_err\td_polar_err\tn\tspeedup";

/// Column header of [`GegenbauerTrial::to_row`]
pub const GEGENBAUER_HEADER: &str = "# engine_s\treference_s\tmean_abs_err\td_err\tn\tspeedup";

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, j| acc * (n - j) as f64 / (j + 1) as f64)
}

fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, j| acc * j as f64)
}

/// Associated Legendre function from its explicit power series
///
/// ```text
/// P_l^m(x) = (-1)^m (1-x²)^{m/2} 2^{-l}
///            Σ_k (-1)^k C(l,k) C(2l-2k,l) (l-2k)!/(l-2k-m)! x^{l-2k-m}
/// ```
/// summed over k with l-2k >= m. Intended for small degrees only; the
/// alternating sum loses precision as l grows.
pub fn reference_associated_legendre(l: usize, m: usize, x: f64) -> f64 {
    if m > l {
        return 0.0;
    }

    let mut sum = 0.0;
    for k in 0..=(l - m) / 2 {
        let power = l - 2 * k;
        let falling: f64 = (0..m).map(|j| (power - j) as f64).product();
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign
            * binomial(l, k)
            * binomial(2 * l - 2 * k, l)
            * falling
            * x.powi((power - m) as i32);
    }

    let phase = if m % 2 == 0 { 1.0 } else { -1.0 };
    phase * (1.0 - x * x).powf(m as f64 / 2.0) * sum / 2f64.powi(l as i32)
}

/// Spherical harmonic Y_l^m(φ, θ) at a single point; zero for m > l
pub fn reference_spherical_harmonic(l: usize, m: usize, azimuthal: f64, polar: f64) -> Complex64 {
    if m > l {
        return Complex64::new(0.0, 0.0);
    }

    let ratio = factorial(l - m) / factorial(l + m);
    let norm = ((2 * l + 1) as f64 / (4.0 * PI) * ratio).sqrt();
    let p = reference_associated_legendre(l, m, polar.cos());
    Complex64::from_polar(norm * p, m as f64 * azimuthal)
}

/// Gegenbauer polynomial C_n^α(x) from its explicit sum
///
/// ```text
/// C_n^α(x) = Σ_{k=0}^{⌊n/2⌋} (-1)^k (α)_{n-k} / (k! (n-2k)!) (2x)^{n-2k}
/// ```
/// with the rising factorial (α)_j = α(α+1)...(α+j-1).
pub fn reference_gegenbauer(n: usize, alpha: f64, x: f64) -> f64 {
    let mut sum = 0.0;
    for k in 0..=n / 2 {
        let rising: f64 = (0..n - k).map(|j| alpha + j as f64).product();
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign * rising / (factorial(k) * factorial(n - 2 * k))
            * (2.0 * x).powi((n - 2 * k) as i32);
    }
    sum
}

/// Two-sided finite difference (f(x+h) - f(x-h)) / 2h
pub fn central_difference<T, F>(f: F, x: f64, h: f64) -> T
where
    F: Fn(f64) -> T,
    T: std::ops::Sub<Output = T> + std::ops::Div<f64, Output = T>,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Reference table of Y_l^m for every point of the batch
pub fn reference_harmonic_table(
    max_degree: usize,
    azimuthal: ArrayView1<f64>,
    polar: ArrayView1<f64>,
) -> TriangularTable<Complex64> {
    let mut table = TriangularTable::zeros(max_degree, azimuthal.len());
    for l in 0..=max_degree {
        for m in 0..=l {
            for ((y, &phi), &theta) in table
                .get_mut(m, l)
                .iter_mut()
                .zip(azimuthal.iter())
                .zip(polar.iter())
            {
                *y = reference_spherical_harmonic(l, m, phi, theta);
            }
        }
    }
    table
}

/// Mean of |a - b| over two batches; 0 for empty batches
pub fn mean_abs_error(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let total: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
    total / a.len() as f64
}

/// Mean of |a - b| over two complex batches; 0 for empty batches
pub fn mean_abs_error_complex(a: ArrayView1<Complex64>, b: ArrayView1<Complex64>) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let total: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).norm()).sum();
    total / a.len() as f64
}

/// Mean of |a - b| over every entry and point of two tables
pub fn mean_abs_error_table(
    a: &TriangularTable<Complex64>,
    b: &TriangularTable<Complex64>,
) -> f64 {
    let count = a.num_entries() * a.n_points();
    if count == 0 {
        return 0.0;
    }
    let total: f64 = a
        .as_array()
        .iter()
        .zip(b.as_array().iter())
        .map(|(x, y)| (x - y).norm())
        .sum();
    total / count as f64
}

fn speedup_ratio(reference: Duration, engine: Duration) -> f64 {
    if engine.is_zero() {
        return f64::NAN;
    }
    reference.as_secs_f64() / engine.as_secs_f64()
}

/// Timing and accuracy of one spherical harmonic trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicTrial {
    /// Batch size
    pub n_points: usize,
    /// Maximum degree of the value comparison
    pub max_degree: usize,
    /// Wall-clock time of the batch engine
    pub engine_time: Duration,
    /// Wall-clock time of the point-wise reference
    pub reference_time: Duration,
    /// Mean |Y - Y_ref| over all (m, l) and points
    pub mean_abs_error: f64,
    /// Mean error of ∂Y_1^1/∂φ against a finite difference
    pub d_azimuthal_error: f64,
    /// Mean error of ∂Y_1^1/∂θ against a finite difference
    pub d_polar_error: f64,
}

impl HarmonicTrial {
    /// Reference time over engine time, NaN when the engine time is zero
    pub fn speedup(&self) -> f64 {
        speedup_ratio(self.reference_time, self.engine_time)
    }

    /// Tab-separated row matching [`HARMONIC_HEADER`]
    pub fn to_row(&self) -> String {
        format!(
            "{:.2e}\t{:.2e}\t{:.2e}\t{:.2e}\t{:.2e}\t{}\t{:.2}",
            self.engine_time.as_secs_f64(),
            self.reference_time.as_secs_f64(),
            self.mean_abs_error,
            self.d_azimuthal_error,
            self.d_polar_error,
            self.n_points,
            self.speedup()
        )
    }
}

/// Compare the spherical harmonic engine against the reference
///
/// Angles are drawn as φ ~ U(0, 2π), θ ~ U(0, π). The derivative check
/// uses Y_1^1 only.
pub fn run_harmonic_trial<R: Rng>(
    rng: &mut R,
    n_points: usize,
    max_degree: usize,
) -> Result<HarmonicTrial> {
    let azimuthal = Array1::from_iter((0..n_points).map(|_| rng.random_range(0.0..2.0 * PI)));
    let polar = Array1::from_iter((0..n_points).map(|_| rng.random_range(0.0..PI)));

    let start = Instant::now();
    let values = spherical_harmonics(max_degree, azimuthal.view(), polar.view())?;
    let engine_time = start.elapsed();

    let start = Instant::now();
    let reference = reference_harmonic_table(max_degree, azimuthal.view(), polar.view());
    let reference_time = start.elapsed();

    let value_error = mean_abs_error_table(&values, &reference);

    let set = spherical_harmonics_with_derivatives(1, azimuthal.view(), polar.view())?;
    let fd_azimuthal = Array1::from_iter(azimuthal.iter().zip(polar.iter()).map(|(&phi, &theta)| {
        central_difference(
            |p| reference_spherical_harmonic(1, 1, p, theta),
            phi,
            HARMONIC_FD_STEP,
        )
    }));
    let fd_polar = Array1::from_iter(azimuthal.iter().zip(polar.iter()).map(|(&phi, &theta)| {
        central_difference(
            |t| reference_spherical_harmonic(1, 1, phi, t),
            theta,
            HARMONIC_FD_STEP,
        )
    }));

    let trial = HarmonicTrial {
        n_points,
        max_degree,
        engine_time,
        reference_time,
        mean_abs_error: value_error,
        d_azimuthal_error: mean_abs_error_complex(set.d_azimuthal.get(1, 1), fd_azimuthal.view()),
        d_polar_error: mean_abs_error_complex(set.d_polar.get(1, 1), fd_polar.view()),
    };
    log::debug!("harmonic trial: {:?}", trial);

    Ok(trial)
}

/// Timing and accuracy of one Gegenbauer trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GegenbauerTrial {
    /// Batch size
    pub n_points: usize,
    /// Maximum degree n
    pub max_degree: usize,
    /// Shape parameter α
    pub alpha: f64,
    /// Wall-clock time of the batch engine
    pub engine_time: Duration,
    /// Wall-clock time of the point-wise reference
    pub reference_time: Duration,
    /// Mean |C - C_ref| over all degrees and points
    pub mean_abs_error: f64,
    /// Mean error of dC_n/dx against a finite difference, highest degree
    pub derivative_error: f64,
}

impl GegenbauerTrial {
    /// Reference time over engine time, NaN when the engine time is zero
    pub fn speedup(&self) -> f64 {
        speedup_ratio(self.reference_time, self.engine_time)
    }

    /// Tab-separated row matching [`GEGENBAUER_HEADER`]
    pub fn to_row(&self) -> String {
        format!(
            "{:.2e}\t{:.2e}\t{:.2e}\t{:.2e}\t{}\t{:.2}",
            self.engine_time.as_secs_f64(),
            self.reference_time.as_secs_f64(),
            self.mean_abs_error,
            self.derivative_error,
            self.n_points,
            self.speedup()
        )
    }
}

/// Compare the Gegenbauer engine against the reference on x ~ U(-1, 1)
pub fn run_gegenbauer_trial<R: Rng>(
    rng: &mut R,
    n_points: usize,
    max_degree: usize,
    alpha: f64,
) -> GegenbauerTrial {
    let x = Array1::from_iter((0..n_points).map(|_| rng.random_range(-1.0..1.0)));

    let start = Instant::now();
    let values = gegenbauer(max_degree, alpha, x.view());
    let engine_time = start.elapsed();

    let start = Instant::now();
    let reference: Vec<Array1<f64>> = (0..=max_degree)
        .map(|n| x.mapv(|xi| reference_gegenbauer(n, alpha, xi)))
        .collect();
    let reference_time = start.elapsed();

    let value_error = values
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| mean_abs_error(a.view(), b.view()))
        .sum::<f64>()
        / values.len() as f64;

    let (_, derivatives) = gegenbauer_with_derivative(max_degree, alpha, x.view());
    let fd = x.mapv(|xi| {
        central_difference(
            |t| reference_gegenbauer(max_degree, alpha, t),
            xi,
            GEGENBAUER_FD_STEP,
        )
    });

    let trial = GegenbauerTrial {
        n_points,
        max_degree,
        alpha,
        engine_time,
        reference_time,
        mean_abs_error: value_error,
        derivative_error: mean_abs_error(derivatives[max_degree].view(), fd.view()),
    };
    log::debug!("Gegenbauer trial: {:?}", trial);

    trial
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_reference_legendre_closed_forms() {
        for &x in &[-0.6, 0.0, 0.3, 0.8] {
            let s: f64 = 1.0 - x * x;
            assert_abs_diff_eq!(reference_associated_legendre(0, 0, x), 1.0, epsilon = EPSILON);
            assert_abs_diff_eq!(reference_associated_legendre(1, 0, x), x, epsilon = EPSILON);
            assert_abs_diff_eq!(
                reference_associated_legendre(1, 1, x),
                -s.sqrt(),
                epsilon = EPSILON
            );
            assert_abs_diff_eq!(
                reference_associated_legendre(2, 2, x),
                3.0 * s,
                epsilon = EPSILON
            );
            assert_abs_diff_eq!(
                reference_associated_legendre(3, 2, x),
                15.0 * x * s,
                epsilon = EPSILON
            );
        }
        assert_eq!(reference_associated_legendre(1, 2, 0.5), 0.0);
    }

    #[test]
    fn test_reference_harmonic_order_above_degree_is_zero() {
        assert_eq!(
            reference_spherical_harmonic(1, 2, 0.4, 1.1),
            Complex64::new(0.0, 0.0)
        );
        assert_eq!(
            reference_spherical_harmonic(0, 3, 0.0, 0.0),
            Complex64::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_speedup_with_zero_engine_time() {
        let mut trial = GegenbauerTrial {
            n_points: 1,
            max_degree: 1,
            alpha: 2.0,
            engine_time: Duration::ZERO,
            reference_time: Duration::from_micros(3),
            mean_abs_error: 0.0,
            derivative_error: 0.0,
        };
        assert!(trial.speedup().is_nan());
        assert!(!trial.to_row().contains("inf"));

        trial.engine_time = Duration::from_micros(1);
        assert_abs_diff_eq!(trial.speedup(), 3.0, epsilon = 1e-9);

        let harmonic = HarmonicTrial {
            n_points: 1,
            max_degree: 0,
            engine_time: Duration::ZERO,
            reference_time: Duration::ZERO,
            mean_abs_error: 0.0,
            d_azimuthal_error: 0.0,
            d_polar_error: 0.0,
        };
        assert!(harmonic.speedup().is_nan());
    }

    #[test]
    fn test_reference_gegenbauer_closed_forms() {
        let alpha = 2.0;
        let x = 0.5;
        assert_abs_diff_eq!(reference_gegenbauer(0, alpha, x), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(reference_gegenbauer(1, alpha, x), 2.0, epsilon = EPSILON);
        // C_2 = 2α(α+1)x² - α
        assert_abs_diff_eq!(
            reference_gegenbauer(2, alpha, x),
            2.0 * alpha * (alpha + 1.0) * x * x - alpha,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_central_difference() {
        let d: f64 = central_difference(|x| x * x * x, 2.0, 1e-4);
        assert_abs_diff_eq!(d, 12.0, epsilon = 1e-6);

        let dz = central_difference(|p| Complex64::new(0.0, p).exp(), 0.3, 1e-6);
        assert_abs_diff_eq!(
            (dz - Complex64::new(0.0, 1.0) * Complex64::new(0.0, 0.3).exp()).norm(),
            0.0,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_mean_abs_error() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![1.5, 2.0, 2.0];
        assert_abs_diff_eq!(mean_abs_error(a.view(), b.view()), 0.5, epsilon = EPSILON);

        let empty = Array1::<f64>::zeros(0);
        assert_eq!(mean_abs_error(empty.view(), empty.view()), 0.0);
    }

    #[test]
    fn test_harmonic_trial_small_batch() {
        let mut rng = StdRng::seed_from_u64(7);
        let trial = run_harmonic_trial(&mut rng, 200, 4).unwrap();

        assert_eq!(trial.n_points, 200);
        assert!(trial.mean_abs_error < 1e-10);
        assert!(trial.d_azimuthal_error < 1e-4);
        assert!(trial.d_polar_error < 1e-4);
    }

    #[test]
    fn test_gegenbauer_trial_small_batch() {
        let mut rng = StdRng::seed_from_u64(11);
        let trial = run_gegenbauer_trial(&mut rng, 200, 5, 2.0);

        assert_eq!(trial.n_points, 200);
        assert!(trial.mean_abs_error < 1e-10);
        assert!(trial.derivative_error < 1e-4);
    }

    #[test]
    fn test_trial_rows_are_tab_separated() {
        let mut rng = StdRng::seed_from_u64(3);
        let trial = run_harmonic_trial(&mut rng, 10, 2).unwrap();
        let row = trial.to_row();
        assert_eq!(row.split('\t').count(), HARMONIC_HEADER.split('\t').count());
        assert_eq!(row.split('\t').nth(5), Some("10"));

        let trial = run_gegenbauer_trial(&mut rng, 10, 1, 2.0);
        let row = trial.to_row();
        assert_eq!(row.split('\t').count(), GEGENBAUER_HEADER.split('\t').count());
    }
}

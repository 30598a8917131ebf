//! Associated Legendre functions on batches of arguments
//!
//! Computes the full triangular table P_l^m(x), 0 <= m <= l <= L, in one
//! pass, together with the optional first derivative dP_l^m/dx. The
//! Condon-Shortley phase (-1)^m is included.

use super::domain::warn_on_domain;
use crate::table::TriangularTable;
use ndarray::{Array1, ArrayView1, Zip};

/// Compute all associated Legendre functions up to degree `max_degree`
///
/// The diagonal is seeded with
/// ```text
/// P_0^0(x) = 1
/// P_m^m(x) = -(2m-1) √(1-x²) P_{m-1}^{m-1}(x)
/// ```
/// and each order is then climbed in degree with
/// ```text
/// P_l^m(x) = (x (2l-1) P_{l-1}^m(x) - (l+m-1) P_{l-2}^m(x)) / (l-m)
/// ```
/// where P_{l-2}^m is zero for l = m+1.
///
/// Arguments are not clamped: values with |x| > 1 give NaN for m > 0.
///
/// # Arguments
/// * `max_degree` - Maximum degree L
/// * `x` - Batch of arguments, typically cos(θ)
///
/// # Example
/// ```
/// use math_audio_harmonics::associated_legendre_table;
/// use ndarray::array;
///
/// let x = array![0.0];
/// let p = associated_legendre_table(2, x.view());
/// assert_eq!(p.get(2, 2)[0], 3.0);
/// assert_eq!(p.get(0, 2)[0], -0.5);
/// ```
pub fn associated_legendre_table(max_degree: usize, x: ArrayView1<f64>) -> TriangularTable<f64> {
    log::debug!(
        "associated Legendre table: L = {}, {} points",
        max_degree,
        x.len()
    );
    warn_on_domain("associated_legendre_table", x, false);

    legendre_recurrence(max_degree, x)
}

/// Compute all associated Legendre functions and their derivatives
///
/// Values are produced as in [`associated_legendre_table`]; the
/// derivative table is then filled from the finished values:
/// ```text
/// dP_0^0/dx = 0
/// dP_m^m/dx = m x P_m^m / (x² - 1)
/// dP_l^m/dx = (l x P_l^m - (l-m) P_{l-1}^m) / (x² - 1)
/// ```
///
/// The denominator vanishes at x = ±1, where the derivatives are not
/// finite.
pub fn associated_legendre_table_with_derivative(
    max_degree: usize,
    x: ArrayView1<f64>,
) -> (TriangularTable<f64>, TriangularTable<f64>) {
    log::debug!(
        "associated Legendre table with derivative: L = {}, {} points",
        max_degree,
        x.len()
    );
    warn_on_domain("associated_legendre_table_with_derivative", x, true);

    let values = legendre_recurrence(max_degree, x);
    let derivatives = legendre_derivatives(&values, x);
    (values, derivatives)
}

fn legendre_recurrence(max_degree: usize, x: ArrayView1<f64>) -> TriangularTable<f64> {
    let n_points = x.len();
    let mut table = TriangularTable::zeros(max_degree, n_points);

    let sqrt_1_minus_x2 = x.mapv(|v| (1.0 - v * v).sqrt());

    // Diagonal P_m^m, carried from one order to the next
    let mut pmm = Array1::<f64>::ones(n_points);

    for m in 0..=max_degree {
        if m > 0 {
            let factor = -((2 * m - 1) as f64);
            Zip::from(&mut pmm)
                .and(&sqrt_1_minus_x2)
                .for_each(|p, &s| *p *= factor * s);
        }
        table.get_mut(m, m).assign(&pmm);

        // Sliding window: p_prev = P_{l-2}^m, p_curr = P_{l-1}^m
        let mut p_prev = Array1::<f64>::zeros(n_points);
        let mut p_curr = pmm.clone();

        for l in (m + 1)..=max_degree {
            let a = (2 * l - 1) as f64;
            let b = (l + m - 1) as f64;
            let c = (l - m) as f64;

            let p_next = Zip::from(x)
                .and(&p_curr)
                .and(&p_prev)
                .map_collect(|&xi, &p1, &p2| (xi * a * p1 - b * p2) / c);

            table.get_mut(m, l).assign(&p_next);
            p_prev = p_curr;
            p_curr = p_next;
        }
    }

    table
}

fn legendre_derivatives(values: &TriangularTable<f64>, x: ArrayView1<f64>) -> TriangularTable<f64> {
    let max_degree = values.max_degree();
    let mut derivatives = TriangularTable::zeros(max_degree, x.len());

    let x2_minus_1 = x.mapv(|v| v * v - 1.0);

    for m in 0..=max_degree {
        for l in m..=max_degree {
            // dP_0^0 = 0, already zero
            if l == 0 {
                continue;
            }

            let l_f64 = l as f64;
            let p = values.get(m, l);

            if l == m {
                let m_f64 = m as f64;
                Zip::from(derivatives.get_mut(m, l))
                    .and(x)
                    .and(p)
                    .and(&x2_minus_1)
                    .for_each(|d, &xi, &pi, &t| *d = m_f64 * xi * pi / t);
            } else {
                let p_lower = values.get(m, l - 1);
                let k = (l - m) as f64;
                Zip::from(derivatives.get_mut(m, l))
                    .and(x)
                    .and(p)
                    .and(p_lower)
                    .and(&x2_minus_1)
                    .for_each(|d, &xi, &pi, &pl, &t| *d = (l_f64 * xi * pi - k * pl) / t);
            }
        }
    }

    derivatives
}

/// Normalization of the orthonormal spherical harmonic Y_l^m
///
/// ```text
/// N_l^m = √((2l+1)/(4π) · (l-m)!/(l+m)!)
/// ```
///
/// The factorial ratio is accumulated in log space and only its square
/// root is exponentiated, so neither the factorials nor the ratio itself
/// leave the normal f64 range for large degrees.
///
/// # Panics
/// If `m > l`.
pub fn harmonic_normalization(l: usize, m: usize) -> f64 {
    use std::f64::consts::PI;

    assert!(m <= l, "Order m must be <= degree l");

    // (l-m)! / (l+m)! = 1 / ((l-m+1)(l-m+2)...(l+m))
    let mut log_ratio = 0.0;
    for k in (l - m + 1)..=(l + m) {
        log_ratio -= (k as f64).ln();
    }

    ((2 * l + 1) as f64 / (4.0 * PI)).sqrt() * (0.5 * log_ratio).exp()
}

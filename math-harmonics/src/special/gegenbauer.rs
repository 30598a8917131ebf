//! Gegenbauer (ultraspherical) polynomials C_n^α(x) on batches of arguments
//!
//! Special cases: α = 1/2 gives the Legendre polynomials, α = 1 the
//! Chebyshev polynomials of the second kind.

use super::domain::warn_on_domain;
use ndarray::{Array1, ArrayView1, Zip};

/// Compute C_i^α(x) for i = 0, 1, ..., max_degree
///
/// Uses the three-term recurrence:
/// ```text
/// C_0^α(x) = 1
/// C_1^α(x) = 2αx
/// i C_i^α(x) = 2(i+α-1) x C_{i-1}^α(x) - (i+2α-2) C_{i-2}^α(x)
/// ```
///
/// # Arguments
/// * `max_degree` - Maximum degree n
/// * `alpha` - Shape parameter α
/// * `x` - Batch of arguments
///
/// # Example
/// ```
/// use math_audio_harmonics::gegenbauer;
/// use ndarray::array;
///
/// let x = array![0.5];
/// let c = gegenbauer(1, 2.0, x.view());
/// assert_eq!(c[1][0], 2.0);
/// ```
pub fn gegenbauer(max_degree: usize, alpha: f64, x: ArrayView1<f64>) -> Vec<Array1<f64>> {
    log::debug!(
        "Gegenbauer sequence: n = {}, alpha = {}, {} points",
        max_degree,
        alpha,
        x.len()
    );
    warn_on_domain("gegenbauer", x, false);

    gegenbauer_recurrence(max_degree, alpha, x)
}

/// Compute C_i^α(x) and dC_i^α/dx for i = 0, 1, ..., max_degree
///
/// The derivative of every degree i >= 2 uses its own coefficients:
/// ```text
/// (1 - x²) dC_i^α/dx = -i x C_i^α(x) + (i+2α-1) C_{i-1}^α(x)
/// ```
/// with dC_0^α/dx = 0 and dC_1^α/dx = 2α. The prefactor 1/(1-x²) is
/// singular at x = ±1.
pub fn gegenbauer_with_derivative(
    max_degree: usize,
    alpha: f64,
    x: ArrayView1<f64>,
) -> (Vec<Array1<f64>>, Vec<Array1<f64>>) {
    log::debug!(
        "Gegenbauer sequence with derivative: n = {}, alpha = {}, {} points",
        max_degree,
        alpha,
        x.len()
    );
    warn_on_domain("gegenbauer_with_derivative", x, true);

    let values = gegenbauer_recurrence(max_degree, alpha, x);

    let inv_1_minus_x2 = x.mapv(|v| 1.0 / (1.0 - v * v));
    let mut derivatives = Vec::with_capacity(max_degree + 1);

    for i in 0..=max_degree {
        let d = match i {
            0 => Array1::zeros(x.len()),
            1 => Array1::from_elem(x.len(), 2.0 * alpha),
            _ => {
                let a = i as f64;
                let b = i as f64 + 2.0 * alpha - 1.0;
                Zip::from(&inv_1_minus_x2)
                    .and(x)
                    .and(&values[i])
                    .and(&values[i - 1])
                    .map_collect(|&f, &xi, &c, &c_lower| f * (-a * xi * c + b * c_lower))
            }
        };
        derivatives.push(d);
    }

    (values, derivatives)
}

fn gegenbauer_recurrence(max_degree: usize, alpha: f64, x: ArrayView1<f64>) -> Vec<Array1<f64>> {
    let mut result: Vec<Array1<f64>> = Vec::with_capacity(max_degree + 1);

    result.push(Array1::ones(x.len()));
    if max_degree == 0 {
        return result;
    }

    result.push(x.mapv(|xi| 2.0 * alpha * xi));

    for i in 2..=max_degree {
        let i_f64 = i as f64;
        let a = 2.0 * (i_f64 + alpha - 1.0);
        let b = i_f64 + 2.0 * alpha - 2.0;

        let next = Zip::from(x)
            .and(&result[i - 1])
            .and(&result[i - 2])
            .map_collect(|&xi, &c1, &c2| (1.0 / i_f64) * (a * xi * c1 - b * c2));
        result.push(next);
    }

    result
}

//! Complex orthonormal spherical harmonics on batches of angles
//!
//! ```text
//! Y_l^m(φ, θ) = N_l^m e^{imφ} P_l^m(cos θ)
//! N_l^m = √((2l+1)/(4π) · (l-m)!/(l+m)!)
//! ```
//!
//! with φ the azimuthal angle and θ the polar angle measured from the
//! z-axis. Only non-negative orders are produced.

use super::legendre::{
    associated_legendre_table, associated_legendre_table_with_derivative, harmonic_normalization,
};
use crate::error::{HarmonicsError, Result};
use crate::table::TriangularTable;
use ndarray::{Array1, ArrayView1, Zip};
use num_complex::Complex64;

/// Spherical harmonics with their angular derivatives
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalHarmonicSet {
    /// Y_l^m
    pub values: TriangularTable<Complex64>,
    /// ∂Y_l^m/∂φ
    pub d_azimuthal: TriangularTable<Complex64>,
    /// ∂Y_l^m/∂θ
    pub d_polar: TriangularTable<Complex64>,
}

/// Compute Y_l^m for all 0 <= m <= l <= `max_degree`
///
/// # Arguments
/// * `max_degree` - Maximum degree L
/// * `azimuthal` - Azimuthal angles φ (radians)
/// * `polar` - Polar angles θ (radians), same length as `azimuthal`
///
/// # Errors
/// [`HarmonicsError::LengthMismatch`] if the two batches differ in length.
///
/// # Example
/// ```
/// use math_audio_harmonics::spherical_harmonics;
/// use ndarray::array;
/// use std::f64::consts::PI;
///
/// let phi = array![0.3];
/// let theta = array![1.1];
/// let y = spherical_harmonics(2, phi.view(), theta.view()).unwrap();
/// assert!((y.get(0, 0)[0].re - 1.0 / (4.0 * PI).sqrt()).abs() < 1e-12);
/// ```
pub fn spherical_harmonics(
    max_degree: usize,
    azimuthal: ArrayView1<f64>,
    polar: ArrayView1<f64>,
) -> Result<TriangularTable<Complex64>> {
    check_lengths(azimuthal, polar)?;
    log::debug!(
        "spherical harmonics: L = {}, {} points",
        max_degree,
        azimuthal.len()
    );

    let cos_polar = polar.mapv(f64::cos);
    let legendre = associated_legendre_table(max_degree, cos_polar.view());
    let phases = azimuthal_phases(max_degree, azimuthal);

    Ok(assemble(&legendre, &phases, |_| 1.0))
}

/// Compute Y_l^m together with ∂Y/∂φ and ∂Y/∂θ
///
/// ```text
/// ∂Y_l^m/∂φ = i m Y_l^m
/// ∂Y_l^m/∂θ = N_l^m e^{imφ} dP_l^m/dx(cos θ) · (-sin θ)
/// ```
///
/// The polar derivative goes through dP/dx, which is singular at
/// θ = 0 and θ = π.
pub fn spherical_harmonics_with_derivatives(
    max_degree: usize,
    azimuthal: ArrayView1<f64>,
    polar: ArrayView1<f64>,
) -> Result<SphericalHarmonicSet> {
    check_lengths(azimuthal, polar)?;
    log::debug!(
        "spherical harmonics with derivatives: L = {}, {} points",
        max_degree,
        azimuthal.len()
    );

    let cos_polar = polar.mapv(f64::cos);
    let (legendre, d_legendre) =
        associated_legendre_table_with_derivative(max_degree, cos_polar.view());
    let phases = azimuthal_phases(max_degree, azimuthal);

    let values = assemble(&legendre, &phases, |_| 1.0);

    let mut d_azimuthal = TriangularTable::zeros(max_degree, azimuthal.len());
    for m in 0..=max_degree {
        let i_m = Complex64::new(0.0, m as f64);
        for l in m..=max_degree {
            Zip::from(d_azimuthal.get_mut(m, l))
                .and(values.get(m, l))
                .for_each(|d, &y| *d = i_m * y);
        }
    }

    let minus_sin_polar = polar.mapv(|theta| -theta.sin());
    let d_polar = assemble(&d_legendre, &phases, |i| minus_sin_polar[i]);

    Ok(SphericalHarmonicSet {
        values,
        d_azimuthal,
        d_polar,
    })
}

fn check_lengths(azimuthal: ArrayView1<f64>, polar: ArrayView1<f64>) -> Result<()> {
    if azimuthal.len() != polar.len() {
        return Err(HarmonicsError::LengthMismatch {
            azimuthal: azimuthal.len(),
            polar: polar.len(),
        });
    }
    Ok(())
}

/// e^{imφ} for m = 0..=L, computed once per order.
fn azimuthal_phases(max_degree: usize, azimuthal: ArrayView1<f64>) -> Vec<Array1<Complex64>> {
    (0..=max_degree)
        .map(|m| {
            let m_f64 = m as f64;
            azimuthal.mapv(|phi| Complex64::new(0.0, m_f64 * phi).exp())
        })
        .collect()
}

/// N_l^m · phase_m · table_l^m · scale(i), element-wise.
fn assemble<F>(
    table: &TriangularTable<f64>,
    phases: &[Array1<Complex64>],
    scale: F,
) -> TriangularTable<Complex64>
where
    F: Fn(usize) -> f64,
{
    let max_degree = table.max_degree();
    let mut out = TriangularTable::zeros(max_degree, table.n_points());

    for l in 0..=max_degree {
        for m in 0..=l {
            let norm = harmonic_normalization(l, m);
            for (i, ((y, &phase), &p)) in out
                .get_mut(m, l)
                .iter_mut()
                .zip(phases[m].iter())
                .zip(table.get(m, l).iter())
                .enumerate()
            {
                *y = phase * (norm * p * scale(i));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_y00_constant() {
        let phi = array![0.0, 1.0, 2.5, 5.9];
        let theta = array![0.1, 0.8, 1.6, 3.0];
        let y = spherical_harmonics(3, phi.view(), theta.view()).unwrap();

        for v in y.get(0, 0).iter() {
            assert_abs_diff_eq!(v.re, 1.0 / (4.0 * PI).sqrt(), epsilon = EPSILON);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_low_degree_closed_forms() {
        let phi = array![0.4, 2.2];
        let theta = array![0.7, 2.1];
        let y = spherical_harmonics(2, phi.view(), theta.view()).unwrap();

        for i in 0..2 {
            let (p, t) = (phi[i], theta[i]);
            // Y_1^0 = √(3/4π) cos θ
            let y10 = (3.0 / (4.0 * PI)).sqrt() * t.cos();
            assert_abs_diff_eq!(y.get(0, 1)[i].re, y10, epsilon = EPSILON);

            // Y_1^1 = -√(3/8π) sin θ e^{iφ}
            let y11 = Complex64::from_polar(-(3.0 / (8.0 * PI)).sqrt() * t.sin(), p);
            assert_abs_diff_eq!((y.get(1, 1)[i] - y11).norm(), 0.0, epsilon = EPSILON);

            // Y_2^2 = √(15/32π) sin² θ e^{2iφ}
            let y22 = Complex64::from_polar((15.0 / (32.0 * PI)).sqrt() * t.sin().powi(2), 2.0 * p);
            assert_abs_diff_eq!((y.get(2, 2)[i] - y22).norm(), 0.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_order_zero_is_real() {
        let phi = array![0.3, 4.0];
        let theta = array![0.5, 2.5];
        let y = spherical_harmonics(4, phi.view(), theta.view()).unwrap();

        for l in 0..=4 {
            assert!(y.get(0, l).iter().all(|v| v.im == 0.0));
        }
    }

    #[test]
    fn test_length_mismatch() {
        let phi = array![0.1, 0.2, 0.3];
        let theta = array![0.1, 0.2];

        let err = spherical_harmonics(2, phi.view(), theta.view()).unwrap_err();
        assert!(err.is_shape_error());

        let err = spherical_harmonics_with_derivatives(2, phi.view(), theta.view()).unwrap_err();
        assert!(matches!(
            err,
            HarmonicsError::LengthMismatch {
                azimuthal: 3,
                polar: 2
            }
        ));
    }

    #[test]
    fn test_derivatives_match_values() {
        let phi = array![0.9, 3.3];
        let theta = array![0.6, 1.9];
        let y = spherical_harmonics(4, phi.view(), theta.view()).unwrap();
        let set = spherical_harmonics_with_derivatives(4, phi.view(), theta.view()).unwrap();

        assert_eq!(y, set.values);
        for ((m, l), dy) in set.d_azimuthal.iter() {
            for (d, v) in dy.iter().zip(set.values.get(m, l).iter()) {
                assert_eq!(*d, Complex64::new(0.0, m as f64) * v);
            }
        }
    }

    #[test]
    fn test_polar_derivative_closed_form() {
        let phi = array![0.25];
        let theta = array![1.2];
        let set = spherical_harmonics_with_derivatives(1, phi.view(), theta.view()).unwrap();

        // ∂/∂θ Y_1^0 = -√(3/4π) sin θ
        let expected = -(3.0 / (4.0 * PI)).sqrt() * 1.2_f64.sin();
        assert_abs_diff_eq!(set.d_polar.get(0, 1)[0].re, expected, epsilon = EPSILON);

        // ∂/∂θ Y_1^1 = -√(3/8π) cos θ e^{iφ}
        let expected = Complex64::from_polar(-(3.0 / (8.0 * PI)).sqrt() * 1.2_f64.cos(), 0.25);
        assert_abs_diff_eq!(
            (set.d_polar.get(1, 1)[0] - expected).norm(),
            0.0,
            epsilon = 1e-11
        );
    }

    #[test]
    fn test_sectoral_magnitude_on_equator_high_degree() {
        // |Y_l^l(φ, π/2)| = √((2l+1)!/4π) / (2^l l!)
        let ln_factorial = |n: usize| -> f64 { (1..=n).map(|k| (k as f64).ln()).sum() };
        let phi = array![0.0];
        let theta = array![PI / 2.0];

        for l in [90usize, 100, 120] {
            let y = spherical_harmonics(l, phi.view(), theta.view()).unwrap();
            let ln_expected = 0.5 * (ln_factorial(2 * l + 1) - (4.0 * PI).ln())
                - l as f64 * 2f64.ln()
                - ln_factorial(l);
            let magnitude = y.get(l, l)[0].norm();
            assert!(magnitude > 0.0, "Y({l}, {l}) vanished");
            assert!(
                (magnitude - ln_expected.exp()).abs() < 1e-10 * ln_expected.exp(),
                "|Y({l}, {l})| = {magnitude} != {}",
                ln_expected.exp()
            );
        }
    }

    #[test]
    fn test_repeated_calls_identical() {
        let phi = array![0.1, 1.7, 4.4];
        let theta = array![0.2, 1.3, 2.9];
        let a = spherical_harmonics_with_derivatives(5, phi.view(), theta.view()).unwrap();
        let b = spherical_harmonics_with_derivatives(5, phi.view(), theta.view()).unwrap();
        assert_eq!(a, b);
    }
}

//! Cartesian to spherical coordinate conversion
//!
//! Produces the (radius, azimuthal, polar) triples consumed by
//! [`crate::spherical_harmonics`]:
//!
//! ```text
//! r = √(x² + y² + z²)
//! φ = atan2(y, x)        azimuthal angle in the xy-plane
//! θ = acos(z / r)        polar angle from the z-axis
//! ```

use crate::error::{HarmonicsError, Result};
use ndarray::{Array2, ArrayView2, Axis, Zip};

/// Convert an N×3 array of (x, y, z) rows into (r, φ, θ) rows
///
/// The polar angle is undefined at the origin (r = 0) and comes out as
/// NaN there.
///
/// # Errors
/// [`HarmonicsError::InvalidShape`] if `points` does not have 3 columns.
///
/// # Example
/// ```
/// use math_audio_harmonics::cartesian_to_spherical;
/// use ndarray::array;
/// use std::f64::consts::FRAC_PI_2;
///
/// let sph = cartesian_to_spherical(array![[0.0, 2.0, 0.0]].view()).unwrap();
/// assert!((sph[[0, 0]] - 2.0).abs() < 1e-12);
/// assert!((sph[[0, 1]] - FRAC_PI_2).abs() < 1e-12);
/// assert!((sph[[0, 2]] - FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn cartesian_to_spherical(points: ArrayView2<f64>) -> Result<Array2<f64>> {
    let (rows, cols) = points.dim();
    if cols != 3 {
        return Err(HarmonicsError::InvalidShape { rows, cols });
    }

    let mut out = Array2::zeros((rows, 3));
    Zip::from(out.axis_iter_mut(Axis(0)))
        .and(points.axis_iter(Axis(0)))
        .for_each(|mut sph, p| {
            let (x, y, z) = (p[0], p[1], p[2]);
            let r = (x * x + y * y + z * z).sqrt();
            sph[0] = r;
            sph[1] = y.atan2(x);
            sph[2] = (z / r).acos();
        });

    Ok(out)
}

//! Error types for special function evaluation.
//!
//! The engines themselves never fail on numerical grounds: inputs outside
//! [-1, 1] or at the poles propagate non-finite values (and are reported
//! through `log::warn!`). Errors are reserved for requests that cannot
//! produce a table of sensible shape.

use thiserror::Error;

/// Errors that can occur when setting up a special function evaluation.
#[derive(Debug, Error)]
pub enum HarmonicsError {
    /// Maximum degree is negative.
    #[error("invalid maximum degree: {degree} (must be >= 0)")]
    InvalidDegree {
        /// The rejected degree
        degree: i64,
    },

    /// Azimuthal and polar angle batches differ in length.
    #[error("angle batch length mismatch: azimuthal has {azimuthal} points, polar has {polar}")]
    LengthMismatch {
        /// Length of the azimuthal batch
        azimuthal: usize,
        /// Length of the polar batch
        polar: usize,
    },

    /// Coordinate array is not N×3.
    #[error("invalid coordinate array shape: {rows}x{cols} (expected Nx3)")]
    InvalidShape {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },
}

/// A specialized `Result` type for harmonic evaluation.
pub type Result<T> = std::result::Result<T, HarmonicsError>;

impl HarmonicsError {
    /// Returns `true` if this is a degree error.
    pub fn is_degree_error(&self) -> bool {
        matches!(self, HarmonicsError::InvalidDegree { .. })
    }

    /// Returns `true` if this is a batch length or array shape error.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            HarmonicsError::LengthMismatch { .. } | HarmonicsError::InvalidShape { .. }
        )
    }
}

/// Convert a signed maximum degree into a table degree.
///
/// Negative degrees cannot describe a triangular table and are rejected
/// eagerly.
///
/// # Example
/// ```
/// use math_audio_harmonics::checked_degree;
/// assert_eq!(checked_degree(6).unwrap(), 6);
/// assert!(checked_degree(-1).is_err());
/// ```
pub fn checked_degree(degree: i64) -> Result<usize> {
    usize::try_from(degree).map_err(|_| HarmonicsError::InvalidDegree { degree })
}

//! Batched special functions for spherical basis expansions
//!
//! This crate evaluates the recurrence-based special functions used in
//! physics and engineering basis expansions on whole batches of points.
//!
//! # Features
//!
//! - **Associated Legendre functions**: full triangular table Pₗᵐ(x),
//!   0 ≤ m ≤ l ≤ L, with optional dPₗᵐ/dx
//! - **Spherical harmonics**: complex orthonormal Yₗᵐ(φ, θ) with optional
//!   ∂/∂φ and ∂/∂θ
//! - **Gegenbauer polynomials**: Cₙ^α(x) with optional dCₙ^α/dx
//! - **Coordinates**: Cartesian to (r, φ, θ) conversion
//! - **Validation**: point-wise reference implementations and timing trials
//!
//! # Example
//!
//! ```rust
//! use math_audio_harmonics::{associated_legendre_table, gegenbauer, spherical_harmonics};
//! use ndarray::array;
//!
//! let x = array![0.0, 0.5];
//! let p = associated_legendre_table(2, x.view());
//! assert_eq!(p.get(1, 1)[0], -1.0);
//!
//! let phi = array![0.1, 0.2];
//! let theta = array![1.0, 2.0];
//! let y = spherical_harmonics(4, phi.view(), theta.view()).unwrap();
//! assert_eq!(y.num_entries(), 15);
//!
//! let c = gegenbauer(2, 1.0, x.view());
//! assert_eq!(c[2][0], -1.0);
//! ```

pub mod coordinates;
pub mod error;
pub mod special;
pub mod table;
pub mod validation;

// Re-export main types at crate root
pub use coordinates::cartesian_to_spherical;
pub use error::{HarmonicsError, Result, checked_degree};
pub use special::*;
pub use table::{TriangularTable, triangular_len};

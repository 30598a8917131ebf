//! Special functions for spherical basis expansions
//!
//! All functions evaluate on batches of arguments and return freshly
//! allocated tables:
//!
//! - Associated Legendre functions Pₗᵐ(x) and dPₗᵐ/dx
//! - Complex spherical harmonics Yₗᵐ(φ, θ) with ∂/∂φ and ∂/∂θ
//! - Gegenbauer polynomials Cₙ^α(x) and dCₙ^α/dx
//!
//! Orders and degrees are climbed in ascending order; every recurrence
//! keeps only the two previous rows as its working window.

mod domain;
mod gegenbauer;
mod legendre;
mod spherical_harmonics;

pub use gegenbauer::*;
pub use legendre::*;
pub use spherical_harmonics::*;

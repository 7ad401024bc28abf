//! Spectral mathematics of the structure factor.
//!
//! - [`kgrid`] - The fixed set of sampled wavevectors
//! - [`transform`] - Direct Fourier sums of a species' density
//! - [`correlation`] - Normalized self and cross products of two species

pub mod correlation;
pub mod kgrid;
pub mod transform;

//! # skfactor Core Library
//!
//! Partial structure factors S(k) for coarse-grained (MARTINI-style) lipid/water
//! trajectories. Each frame of a LAMMPS text dump is parsed, the density of two
//! particle species is Fourier transformed on a fixed grid of wavevectors, and the
//! self and cross correlation spectra are appended to plain-text output files.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Frame`), trajectory and
//!   spectrum I/O, and the spectral mathematics (`KGrid`, density transform,
//!   pairwise correlations).
//!
//! - **[`engine`]: Run Configuration.** The validated `AnalysisConfig`, the
//!   `OutputLayout` path strategy, error types and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into the
//!   frame-by-frame analysis loop.

pub mod core;
pub mod engine;
pub mod workflows;

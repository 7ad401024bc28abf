//! # Workflows Module
//!
//! High-level entry points that run a complete analysis from a trajectory file
//! to the appended spectra.
//!
//! - **Structure Factor Workflow** ([`structure_factor`]) - Frame-by-frame partial
//!   structure factors of two particle species

pub mod structure_factor;

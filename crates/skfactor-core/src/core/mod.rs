//! # Core Module
//!
//! Building blocks of the structure factor analysis.
//!
//! - **Data Model** ([`models`]) - Parsed trajectory frames with scaled coordinates
//! - **File I/O** ([`io`]) - LAMMPS dump reading and append-only spectrum output
//! - **Spectral Mathematics** ([`spectral`]) - Wavevector grid, direct Fourier sums
//!   of species densities and their normalized correlation products

pub mod io;
pub mod models;
pub mod spectral;

//! Input/output for trajectory frames and spectral results.
//!
//! Trajectories are read through the [`traits::TrajectoryFormat`] interface, with
//! the LAMMPS text dump as the supported format. Results are written as
//! space-separated plain-text records, always appended to existing files.

pub mod format;
pub mod lammpstrj;
pub mod spectrum;
pub mod traits;

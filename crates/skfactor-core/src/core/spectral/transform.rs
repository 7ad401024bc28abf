use super::kgrid::KGrid;
use crate::core::models::frame::{Frame, SpeciesLabel};
use nalgebra::Vector3;
use num_complex::Complex64;

/// Computes `Σ_q exp(-i q·k)` for every wavevector `k`.
///
/// This is a direct sum, `O(positions × wavevectors)`; no FFT or binning is used.
/// The result is the un-normalized Fourier transform of the density.
pub fn density_transform(positions: &[Vector3<f64>], wavevectors: &[Vector3<f64>]) -> Vec<Complex64> {
    wavevectors
        .iter()
        .map(|k| {
            positions
                .iter()
                .map(|q| {
                    let phase = q.dot(k);
                    Complex64::new(phase.cos(), -phase.sin())
                })
                .sum()
        })
        .collect()
}

/// The density transform of one species in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesDensity {
    count: usize,
    amplitudes: Vec<Complex64>,
}

impl SpeciesDensity {
    /// Transforms the given scaled positions on the base grid.
    ///
    /// A species without particles is not an error: every amplitude is set to
    /// `NaN`, which then propagates into every correlation involving it.
    pub fn compute(scaled_positions: &[Vector3<f64>], grid: &KGrid) -> Self {
        let amplitudes = if scaled_positions.is_empty() {
            vec![Complex64::new(f64::NAN, f64::NAN); grid.len()]
        } else {
            density_transform(scaled_positions, grid.base())
        };
        Self {
            count: scaled_positions.len(),
            amplitudes,
        }
    }

    pub fn from_frame(frame: &Frame, label: SpeciesLabel, grid: &KGrid) -> Self {
        Self::compute(&frame.scaled_positions_of(label), grid)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }
}

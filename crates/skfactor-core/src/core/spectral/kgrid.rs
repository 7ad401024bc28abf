use itertools::iproduct;
use nalgebra::Vector3;
use std::f64::consts::TAU;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum KGridError {
    #[error("The number of bins per axis must be positive")]
    ZeroBins,
    #[error("A grid of {bins}^3 points does not fit in memory")]
    TooLarge { bins: usize },
}

/// The wavevectors at which the structure factor is sampled.
///
/// Points are enumerated in row-major `(i, j, k)` order over `[0, bins)^3`, so the
/// first point is always the origin. Two parallel representations are kept:
///
/// - `base`: `2π·(i, j, k)`, independent of the cell. This is the representation
///   the density transform uses, with particles given in scaled coordinates.
/// - `scaled`: `(i/Lx, j/Ly, k/Lz)` in inverse length units, derived from the cell
///   the grid was built from. It is only persisted for reference.
///
/// The origin is the mean-density term and is intentionally kept.
#[derive(Debug, Clone, PartialEq)]
pub struct KGrid {
    bins: usize,
    base: Vec<Vector3<f64>>,
    scaled: Vec<Vector3<f64>>,
}

impl KGrid {
    pub fn new(cell: &Vector3<f64>, bins: usize) -> Result<Self, KGridError> {
        if bins == 0 {
            return Err(KGridError::ZeroBins);
        }
        let len = bins
            .checked_pow(3)
            .ok_or(KGridError::TooLarge { bins })?;

        let reciprocal = cell.map(|length| 1.0 / length);
        let mut base = Vec::with_capacity(len);
        let mut scaled = Vec::with_capacity(len);
        for (i, j, k) in iproduct!(0..bins, 0..bins, 0..bins) {
            let index = Vector3::new(i as f64, j as f64, k as f64);
            base.push(index * TAU);
            scaled.push(reciprocal.component_mul(&index));
        }

        Ok(Self { bins, base, scaled })
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn base(&self) -> &[Vector3<f64>] {
        &self.base
    }

    pub fn scaled(&self) -> &[Vector3<f64>] {
        &self.scaled
    }
}

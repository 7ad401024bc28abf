use nalgebra::Vector3;
use serde::Deserialize;

/// Integer particle type as it appears in the second column of a dump line.
pub type SpeciesLabel = i64;

/// Selects which particle labels make up species A and species B.
///
/// The defaults match the MARTINI membrane setup the analysis was written for:
/// label `1` for the SP5 beads and label `2` for water beads. Particles carrying
/// any other label are ignored by every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SpeciesPair {
    pub a: SpeciesLabel,
    pub b: SpeciesLabel,
}

impl Default for SpeciesPair {
    fn default() -> Self {
        Self { a: 1, b: 2 }
    }
}

/// One parsed trajectory snapshot.
///
/// The cell is orthorhombic and stored as its three edge lengths. Scaled
/// coordinates are the raw coordinates divided component-wise by the cell
/// lengths; they are not wrapped back into `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    cell: Vector3<f64>,
    species: Vec<SpeciesLabel>,
    positions: Vec<Vector3<f64>>,
    scaled_positions: Vec<Vector3<f64>>,
}

impl Frame {
    /// Builds a frame and derives its scaled coordinates.
    ///
    /// `species` and `positions` must have the same length.
    pub fn new(
        cell: Vector3<f64>,
        species: Vec<SpeciesLabel>,
        positions: Vec<Vector3<f64>>,
    ) -> Self {
        debug_assert_eq!(species.len(), positions.len());
        let scaled_positions = positions.iter().map(|p| p.component_div(&cell)).collect();
        Self {
            cell,
            species,
            positions,
            scaled_positions,
        }
    }

    pub fn cell(&self) -> &Vector3<f64> {
        &self.cell
    }

    pub fn volume(&self) -> f64 {
        self.cell.x * self.cell.y * self.cell.z
    }

    pub fn natoms(&self) -> usize {
        self.species.len()
    }

    pub fn species(&self) -> &[SpeciesLabel] {
        &self.species
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn scaled_positions(&self) -> &[Vector3<f64>] {
        &self.scaled_positions
    }

    /// Scaled coordinates of every particle carrying `label`, in file order.
    pub fn scaled_positions_of(&self, label: SpeciesLabel) -> Vec<Vector3<f64>> {
        self.species
            .iter()
            .zip(&self.scaled_positions)
            .filter(|(s, _)| **s == label)
            .map(|(_, q)| *q)
            .collect()
    }

    pub fn count_of(&self, label: SpeciesLabel) -> usize {
        self.species.iter().filter(|s| **s == label).count()
    }
}

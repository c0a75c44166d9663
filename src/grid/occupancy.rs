use crate::grid::grid_cell::*;
use bevy::utils::HashSet;

/// A structure already standing on the grid, as seen by the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacedStructure {
    pub cell: GridCell,
    pub buildable_radius: i32,
}

impl PlacedStructure {
    pub fn new(cell: GridCell, buildable_radius: i32) -> Self {
        Self { cell, buildable_radius }
    }
}

/// Read-only view of the structures currently placed. Implementors must
/// reflect additions immediately.
pub trait StructureSource {
    fn placed_structures(&self) -> impl Iterator<Item = PlacedStructure> + '_;
}

impl StructureSource for Vec<PlacedStructure> {
    fn placed_structures(&self) -> impl Iterator<Item = PlacedStructure> + '_ {
        self.iter().copied()
    }
}

pub struct OccupancyIndex;

impl OccupancyIndex {
    /// Anchor cells of every placed structure. Always recomputed from `source`.
    pub fn occupied_cells(source: &impl StructureSource) -> HashSet<GridCell> {
        source.placed_structures().map(|structure| structure.cell).collect()
    }
}

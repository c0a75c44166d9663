use crate::grid::{grid_area::*, grid_cell::*, occupancy::*, terrain::*};
use bevy::utils::HashSet;

/// Cells a new structure may currently be placed on.
#[derive(Clone, Debug, Default)]
pub struct BuildableAreaTracker {
    cells: HashSet<GridCell>,
}

impl BuildableAreaTracker {
    pub fn mark_buildable(&mut self, cell: GridCell) {
        self.cells.insert(cell);
    }

    /// Returns how many of `cells` were not buildable before.
    pub fn union_buildable(&mut self, cells: impl IntoIterator<Item = GridCell>) -> usize {
        cells.into_iter().filter(|cell| self.cells.insert(*cell)).count()
    }

    pub fn remove_occupied(&mut self, occupied: &HashSet<GridCell>) {
        self.cells.retain(|cell| !occupied.contains(cell));
    }

    /// Opens up the terrain-valid cells within the structure's radius, then
    /// drops every occupied cell. Returns the number of cells gained.
    pub fn on_structure_placed(
        &mut self,
        structure: &PlacedStructure,
        terrain: &TileLayerStack,
        occupied: &HashSet<GridCell>,
    ) -> usize {
        let area = GridArea::around(structure.cell, structure.buildable_radius);
        let before = self.cells.len();

        self.union_buildable(terrain.valid_cells_in(area));
        self.remove_occupied(occupied);

        self.cells.len().saturating_sub(before)
    }

    pub fn is_buildable(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> &HashSet<GridCell> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

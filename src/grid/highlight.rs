use crate::grid::{buildable::*, grid_area::*, grid_cell::*, terrain::*};
use bevy::utils::HashSet;

/// What to paint while a structure is being positioned. `confirmed` cells are
/// already buildable; `expanded` cells would become buildable if the structure
/// were placed at the hovered cell. The two sets never overlap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightPlan {
    pub confirmed: HashSet<GridCell>,
    pub expanded: HashSet<GridCell>,
}

impl HighlightPlan {
    pub fn confirmed_only(buildable: &BuildableAreaTracker) -> Self {
        Self {
            confirmed: buildable.cells().clone(),
            expanded: HashSet::default(),
        }
    }

    pub fn compute(
        hovered: GridCell,
        radius: i32,
        terrain: &TileLayerStack,
        buildable: &BuildableAreaTracker,
        occupied: &HashSet<GridCell>,
    ) -> Self {
        let valid = terrain.valid_cells_in(GridArea::around(hovered, radius));
        let expanded = valid
            .into_iter()
            .filter(|cell| !buildable.is_buildable(*cell) && !occupied.contains(cell))
            .collect();

        Self {
            confirmed: buildable.cells().clone(),
            expanded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.expanded.is_empty()
    }
}

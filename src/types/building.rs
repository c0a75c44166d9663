use crate::grid::{grid_cell::*, occupancy::*};
use bevy::{prelude::*, utils::HashMap};

#[derive(Component, Debug)]
pub struct Building {
    pub structure: PlacedStructure,
}

impl Building {
    pub fn new(structure: PlacedStructure) -> Self {
        Self { structure }
    }

    pub fn cell(&self) -> GridCell {
        self.structure.cell
    }
}

/// Every placed structure, keyed by its entity. Owned by the placement tool;
/// the grid only reads it through `StructureSource`.
#[derive(Resource, Debug, Default)]
pub struct StructureRegistry {
    structures: HashMap<Entity, PlacedStructure>,
}

impl StructureRegistry {
    pub fn insert(&mut self, entity: Entity, structure: PlacedStructure) {
        self.structures.insert(entity, structure);
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.structures.values().any(|structure| structure.cell == cell)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

impl StructureSource for StructureRegistry {
    fn placed_structures(&self) -> impl Iterator<Item = PlacedStructure> + '_ {
        self.structures.values().copied()
    }
}

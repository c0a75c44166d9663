use crate::grid::occupancy::PlacedStructure;
use bevy::prelude::*;

/// Sent once per placement, after the structure's entity has its final transform.
#[derive(Event, Debug, Clone, Copy)]
pub struct OnStructurePlaced {
    pub entity: Entity,
    pub structure: PlacedStructure,
}

impl OnStructurePlaced {
    pub fn new(entity: Entity, structure: PlacedStructure) -> Self {
        Self { entity, structure }
    }
}

use crate::{grid::grid_cell::GridCell, tools::toolbar::PlacementState};
use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct RequestBuilding {
    pub cell: GridCell,
    pub buildable_radius: i32,
}

impl RequestBuilding {
    pub fn new(cell: GridCell, buildable_radius: i32) -> Self {
        Self { cell, buildable_radius }
    }
}

#[derive(Event, Debug)]
pub struct ChangeToolRequest(pub PlacementState);

use bevy::prelude::*;

pub const DEFAULT_CELL_SIZE: f32 = 64.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub position: IVec2,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
        }
    }

    /// Cell containing `location`. Floors toward negative infinity so that
    /// `(-0.5, -0.5)` lands in `(-1, -1)` rather than `(0, 0)`.
    pub fn at(location: Vec2, cell_size: f32) -> Self {
        Self {
            position: (location / cell_size).floor().as_ivec2(),
        }
    }

    pub fn min_corner(&self, cell_size: f32) -> Vec2 {
        self.position.as_vec2() * cell_size
    }

    pub fn max_corner(&self, cell_size: f32) -> Vec2 {
        (self.position + IVec2::ONE).as_vec2() * cell_size
    }

    pub fn center(&self, cell_size: f32) -> Vec2 {
        (self.position.as_vec2() + Vec2::splat(0.5)) * cell_size
    }
}

impl From<[i32; 2]> for GridCell {
    fn from([x, y]: [i32; 2]) -> Self {
        GridCell::new(x, y)
    }
}

pub fn world_to_cell(world_position: Vec2, cell_size: f32) -> GridCell {
    GridCell::at(world_position, cell_size)
}

pub fn cell_to_world(cell: GridCell, cell_size: f32) -> Vec2 {
    cell.min_corner(cell_size)
}

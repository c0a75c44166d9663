use crate::grid::grid_cell::*;
use bevy::prelude::*;

/// Inclusive rectangle of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridArea {
    pub min: GridCell,
    pub max: GridCell,
}

impl GridArea {
    pub fn new(a: GridCell, b: GridCell) -> Self {
        Self {
            min: GridCell {
                position: a.position.min(b.position),
            },
            max: GridCell {
                position: a.position.max(b.position),
            },
        }
    }

    /// Square (Chebyshev) neighborhood of `radius` around `center`. A negative
    /// radius is clamped to zero, leaving just the center cell. Edges saturate
    /// at the bounds of `i32`.
    pub fn around(center: GridCell, radius: i32) -> Self {
        let radius = IVec2::splat(radius.max(0));
        Self {
            min: GridCell {
                position: center.position.saturating_sub(radius),
            },
            max: GridCell {
                position: center.position.saturating_add(radius),
            },
        }
    }

    pub fn cell_dimensions(&self) -> IVec2 {
        self.max.position.saturating_sub(self.min.position).saturating_add(IVec2::ONE)
    }

    /// Number of cells covered. Computed in 64 bits so that areas spanning the
    /// whole `i32` range do not overflow.
    pub fn len(&self) -> u64 {
        let width = (self.max.position.x as i64 - self.min.position.x as i64 + 1) as u64;
        let height = (self.max.position.y as i64 - self.min.position.y as i64 + 1) as u64;
        width.saturating_mul(height)
    }

    pub fn iter(&self) -> GridAreaIterator {
        GridAreaIterator {
            area: self,
            current: self.min,
            started: false,
        }
    }
}

pub struct GridAreaIterator<'a> {
    area: &'a GridArea,
    current: GridCell,
    started: bool,
}

impl<'a> Iterator for GridAreaIterator<'a> {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            Some(self.current)
        } else if self.current.position.x < self.area.max.position.x {
            self.current = GridCell::new(self.current.position.x + 1, self.current.position.y);
            Some(self.current)
        } else if self.current.position.y < self.area.max.position.y {
            self.current = GridCell::new(self.area.min.position.x, self.current.position.y + 1);
            Some(self.current)
        } else {
            None
        }
    }
}

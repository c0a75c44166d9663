pub mod buildable;
pub mod grid;
pub mod grid_area;
pub mod grid_cell;
pub mod grid_events;
pub mod highlight;
pub mod occupancy;
pub mod terrain;

pub mod graphics;
pub mod grid;
pub mod level;
pub mod schedule;
pub mod tools;
pub mod types;
pub mod ui;

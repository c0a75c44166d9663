pub mod camera;
pub mod highlight;
pub mod terrain;

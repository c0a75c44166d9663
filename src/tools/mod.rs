pub mod building_tool;
pub mod placement_events;
pub mod toolbar;

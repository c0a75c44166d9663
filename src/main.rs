use bevy::prelude::*;
use buildable_grid::{graphics, grid, level, schedule, tools, ui};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Buildable Grid".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(schedule::SchedulePlugin)
        .add_plugins(level::level::LevelPlugin)
        .add_plugins(grid::grid::GridPlugin)
        .add_plugins(graphics::camera::CameraPlugin)
        .add_plugins(graphics::terrain::TerrainPlugin)
        .add_plugins(graphics::highlight::HighlightPlugin)
        .add_plugins(tools::toolbar::ToolbarPlugin)
        .add_plugins(ui::egui::UiPlugin)
        .run();
}

use crate::{
    grid::{grid::*, grid_cell::*, terrain::*},
    level::level::GridSettings,
    schedule::UpdateStage,
    types::building::Building,
};
use bevy::{prelude::*, sprite::Anchor};

const TERRAIN_Z: f32 = 0.0;

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridOverlay>()
            .add_systems(PostStartup, spawn_terrain_tiles)
            .add_systems(
                Update,
                (toggle_grid_overlay.in_set(UpdateStage::UserInput), draw_grid_overlay.in_set(UpdateStage::Visualize)),
            );
    }
}

#[derive(Component, Debug)]
pub struct TerrainTileSprite;

#[derive(Resource, Debug, Default)]
pub struct GridOverlay {
    pub visible: bool,
}

fn terrain_color(layer_index: usize, layer_count: usize, tile: TerrainTile) -> Color {
    // Deeper layers get slightly brighter so overlapping surfaces stay readable.
    let depth = if layer_count > 1 {
        1.0 - layer_index as f32 / (layer_count - 1) as f32
    } else {
        0.0
    };

    if tile.buildable {
        Color::srgb(0.2 + 0.15 * depth, 0.45 + 0.1 * depth, 0.2)
    } else {
        Color::srgb(0.15, 0.25 + 0.1 * depth, 0.5 + 0.2 * depth)
    }
}

fn spawn_terrain_tiles(mut commands: Commands, grid: Res<Grid>, settings: Res<GridSettings>) {
    let terrain = grid.terrain();
    let layer_count = terrain.len();

    for cell in terrain.painted_cells() {
        let Some((layer_index, tile)) = terrain.resolve(cell) else {
            continue;
        };

        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: terrain_color(layer_index, layer_count, tile),
                    custom_size: Some(Vec2::splat(settings.cell_size)),
                    anchor: Anchor::BottomLeft,
                    ..default()
                },
                transform: Transform::from_translation(cell_to_world(cell, settings.cell_size).extend(TERRAIN_Z)),
                ..default()
            },
            TerrainTileSprite,
        ));
    }
}

fn toggle_grid_overlay(mut overlay: ResMut<GridOverlay>, keyboard: Res<ButtonInput<KeyCode>>) {
    if keyboard.just_pressed(KeyCode::KeyG) {
        overlay.visible = !overlay.visible;
    }
}

fn draw_grid_overlay(
    overlay: Res<GridOverlay>,
    grid: Res<Grid>,
    settings: Res<GridSettings>,
    building_query: Query<&Building>,
    mut gizmos: Gizmos,
) {
    if !overlay.visible {
        return;
    }

    let size = settings.cell_size;
    let line_color = Color::linear_rgba(0.0, 0.0, 0.0, 0.35);

    for cell in grid.terrain().painted_cells() {
        let min = cell.min_corner(size);
        let max = cell.max_corner(size);
        gizmos.line_2d(min, Vec2::new(max.x, min.y), line_color);
        gizmos.line_2d(min, Vec2::new(min.x, max.y), line_color);
    }

    for building in &building_query {
        gizmos.rect_2d(
            building.cell().center(size),
            0.0,
            Vec2::splat(size * 0.95),
            Color::linear_rgba(0.75, 0.0, 0.0, 1.0),
        );
    }
}

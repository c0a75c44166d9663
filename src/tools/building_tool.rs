use crate::{
    graphics::{camera::PlayerCameraController, highlight::HighlightState},
    grid::{grid::*, grid_cell::*, grid_events::*, occupancy::*},
    level::level::GridSettings,
    schedule::UpdateStage,
    tools::{placement_events::*, toolbar::PlacementState},
    types::building::*,
    ui::egui::MouseOver,
};
use bevy::{prelude::*, sprite::Anchor};
use rand::Rng;

const BUILDING_Z: f32 = 2.0;

pub struct BuildingToolPlugin;

impl Plugin for BuildingToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StructureRegistry>()
            .init_resource::<HighlightState>()
            .add_event::<RequestBuilding>()
            .add_systems(
                Update,
                (
                    (
                        update_hovered_cell.in_set(UpdateStage::UpdateView),
                        handle_tool_action
                            .in_set(UpdateStage::UserInput)
                            .run_if(in_state(MouseOver::World)),
                    )
                        .run_if(in_state(PlacementState::Hovering)),
                    spawn_requested_buildings.in_set(UpdateStage::Spawning),
                ),
            );
    }
}

fn update_hovered_cell(
    camera_query: Query<(&Camera, &GlobalTransform), With<PlayerCameraController>>,
    windows: Query<&Window>,
    grid: Res<Grid>,
    registry: Res<StructureRegistry>,
    settings: Res<GridSettings>,
    mut highlight: ResMut<HighlightState>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    let Ok(window) = windows.get_single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    let Some(point) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    let cell = world_to_cell(point, settings.cell_size);
    if highlight.hover(cell) {
        let plan = grid.plan_highlight(cell, settings.hover_radius, &*registry);
        log::debug!(
            "hovering {:?}: {} confirmed, {} expanded",
            cell.position,
            plan.confirmed.len(),
            plan.expanded.len()
        );
        highlight.set_plan(plan);
    }
}

fn handle_tool_action(
    mouse: Res<ButtonInput<MouseButton>>,
    grid: Res<Grid>,
    settings: Res<GridSettings>,
    highlight: Res<HighlightState>,
    mut building_event: EventWriter<RequestBuilding>,
    mut change_tool: EventWriter<ChangeToolRequest>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(cell) = highlight.hovered() else {
        return;
    };

    if grid.can_place_at(cell) {
        building_event.send(RequestBuilding::new(cell, settings.building_radius));
        change_tool.send(ChangeToolRequest(PlacementState::Idle));
    }
}

fn spawn_requested_buildings(
    mut commands: Commands,
    mut request_event: EventReader<RequestBuilding>,
    mut registry: ResMut<StructureRegistry>,
    settings: Res<GridSettings>,
    mut placed_event: EventWriter<OnStructurePlaced>,
) {
    for request in request_event.read() {
        if registry.is_occupied(request.cell) {
            log::warn!("cell {:?} is already occupied, ignoring placement", request.cell.position);
            continue;
        }

        let structure = PlacedStructure::new(request.cell, request.buildable_radius);
        let rgray = rand::thread_rng().gen_range(0.35..0.65);
        let margin = settings.cell_size * 0.1;
        let corner = cell_to_world(request.cell, settings.cell_size) + Vec2::splat(margin);

        let model = SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(rgray, rgray * 0.85, rgray * 0.7),
                custom_size: Some(Vec2::splat(settings.cell_size - 2.0 * margin)),
                anchor: Anchor::BottomLeft,
                ..default()
            },
            transform: Transform::from_translation(corner.extend(BUILDING_Z)),
            ..default()
        };

        let entity = commands.spawn((model, Building::new(structure))).id();
        registry.insert(entity, structure);
        placed_event.send(OnStructurePlaced::new(entity, structure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{grid_area::*, terrain::*};

    fn test_app() -> App {
        let mut base = TileLayer::new("base");
        base.fill_area(GridArea::around(GridCell::new(0, 0), 10), TerrainTile::BUILDABLE);

        let mut app = App::new();
        app.add_plugins(GridPlugin)
            .init_resource::<StructureRegistry>()
            .add_event::<RequestBuilding>()
            .insert_resource(Grid::new(TileLayerStack::from_hierarchy(base)))
            .add_systems(Update, spawn_requested_buildings.before(UpdateStage::UpdateGrid));
        app
    }

    #[test]
    fn test_request_spawns_registers_and_opens_area() {
        let mut app = test_app();
        app.world_mut().send_event(RequestBuilding::new(GridCell::new(1, 1), 1));
        app.update();

        let registry = app.world().resource::<StructureRegistry>();
        assert_eq!(registry.len(), 1);
        assert!(registry.is_occupied(GridCell::new(1, 1)));

        let mut buildings = app.world_mut().query::<(&Building, &Transform)>();
        let (building, transform) = buildings.single(app.world());
        assert_eq!(building.cell(), GridCell::new(1, 1));
        assert!(transform.translation.x > 64.0 && transform.translation.x < 128.0);

        let grid = app.world().resource::<Grid>();
        assert_eq!(grid.buildable().len(), 8);
        assert!(!grid.can_place_at(GridCell::new(1, 1)));
        assert!(grid.can_place_at(GridCell::new(2, 2)));
    }

    #[test]
    fn test_request_on_occupied_cell_is_ignored() {
        let mut app = test_app();
        app.world_mut().send_event(RequestBuilding::new(GridCell::new(0, 0), 2));
        app.update();
        app.world_mut().send_event(RequestBuilding::new(GridCell::new(0, 0), 5));
        app.update();

        assert_eq!(app.world().resource::<StructureRegistry>().len(), 1);
        assert_eq!(app.world().resource::<Grid>().buildable().len(), 24);
    }
}

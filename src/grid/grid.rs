use crate::{
    grid::{buildable::*, grid_cell::*, grid_events::*, highlight::*, occupancy::*, terrain::*},
    level::level::GridSettings,
    schedule::UpdateStage,
    types::building::StructureRegistry,
};
use bevy::prelude::*;

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Grid>()
            .init_resource::<GridSettings>()
            .add_event::<OnStructurePlaced>()
            .add_systems(
                Update,
                apply_placed_structures::<StructureRegistry>.in_set(UpdateStage::UpdateGrid),
            );
    }
}

/// Terrain plus the buildable area grown by placed structures. The only
/// writer is `apply_placed_structures`.
#[derive(Resource, Debug, Default)]
pub struct Grid {
    terrain: TileLayerStack,
    buildable: BuildableAreaTracker,
}

impl Grid {
    pub fn new(terrain: TileLayerStack) -> Self {
        Self {
            terrain,
            buildable: BuildableAreaTracker::default(),
        }
    }

    pub fn terrain(&self) -> &TileLayerStack {
        &self.terrain
    }

    pub fn buildable(&self) -> &BuildableAreaTracker {
        &self.buildable
    }

    pub fn is_tile_position_valid(&self, cell: GridCell) -> bool {
        self.terrain.is_buildable_terrain(cell)
    }

    pub fn is_tile_position_buildable(&self, cell: GridCell) -> bool {
        self.buildable.is_buildable(cell)
    }

    pub fn can_place_at(&self, cell: GridCell) -> bool {
        self.is_tile_position_valid(cell) && self.is_tile_position_buildable(cell)
    }

    pub fn on_structure_placed(&mut self, structure: &PlacedStructure, source: &impl StructureSource) -> usize {
        let occupied = OccupancyIndex::occupied_cells(source);
        self.buildable.on_structure_placed(structure, &self.terrain, &occupied)
    }

    pub fn buildable_plan(&self) -> HighlightPlan {
        HighlightPlan::confirmed_only(&self.buildable)
    }

    pub fn plan_highlight(&self, hovered: GridCell, radius: i32, source: &impl StructureSource) -> HighlightPlan {
        let occupied = OccupancyIndex::occupied_cells(source);
        HighlightPlan::compute(hovered, radius, &self.terrain, &self.buildable, &occupied)
    }
}

fn apply_placed_structures<S>(mut placed_event: EventReader<OnStructurePlaced>, mut grid: ResMut<Grid>, source: Res<S>)
where
    S: Resource + StructureSource,
{
    for event in placed_event.read() {
        let gained = grid.on_structure_placed(&event.structure, &*source);
        log::info!(
            "structure {:?} placed at {:?} (radius {}): {} cells opened, {} buildable in total",
            event.entity,
            event.structure.cell.position,
            event.structure.buildable_radius,
            gained,
            grid.buildable().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid_area::*;
    use bevy::utils::HashSet;

    fn open_grid(radius: i32) -> Grid {
        let mut base = TileLayer::new("base");
        base.fill_area(GridArea::around(GridCell::new(0, 0), radius), TerrainTile::BUILDABLE);
        Grid::new(TileLayerStack::from_hierarchy(base))
    }

    fn place(app: &mut App, cell: GridCell, radius: i32) {
        let structure = PlacedStructure::new(cell, radius);
        let entity = app.world_mut().spawn_empty().id();
        app.world_mut().resource_mut::<StructureRegistry>().insert(entity, structure);
        app.world_mut().send_event(OnStructurePlaced::new(entity, structure));
        app.update();
    }

    fn test_app(grid: Grid) -> App {
        let mut app = App::new();
        app.add_plugins(GridPlugin).init_resource::<StructureRegistry>().insert_resource(grid);
        app
    }

    #[test]
    fn test_valid_tiles_in_radius_matches_neighborhood() {
        let grid = open_grid(10);
        let tiles = grid.terrain().valid_cells_in(GridArea::around(GridCell::new(0, 0), 2));
        assert_eq!(tiles.len(), 25);
        assert!(tiles.iter().all(|cell| cell.position.abs().max_element() <= 2));
    }

    #[test]
    fn test_can_place_requires_valid_terrain() {
        let blocked = GridCell::new(1, 0);
        let mut water = TileLayer::new("water");
        water.set_tile(blocked, TerrainTile::BLOCKED);
        let mut base = TileLayer::new("base");
        base.fill_area(GridArea::around(GridCell::new(0, 0), 2), TerrainTile::BUILDABLE);
        base.add_child(water);

        let mut buildable = BuildableAreaTracker::default();
        buildable.mark_buildable(blocked);
        buildable.mark_buildable(GridCell::new(0, 1));
        let grid = Grid {
            terrain: TileLayerStack::from_hierarchy(base),
            buildable,
        };

        assert!(grid.is_tile_position_buildable(blocked));
        assert!(!grid.is_tile_position_valid(blocked));
        assert!(!grid.can_place_at(blocked));
        assert!(grid.can_place_at(GridCell::new(0, 1)));
        assert!(!grid.can_place_at(GridCell::new(0, 2)));
    }

    #[test]
    fn test_plan_uses_current_structures() {
        let mut grid = open_grid(10);
        let mut structures = vec![PlacedStructure::new(GridCell::new(0, 0), 1)];
        grid.on_structure_placed(&structures[0], &structures);

        let before = grid.plan_highlight(GridCell::new(1, 1), 1, &structures);
        assert_eq!(before.confirmed.len(), 8);
        assert_eq!(before.expanded.len(), 9 - 4);

        structures.push(PlacedStructure::new(GridCell::new(2, 2), 1));
        let after = grid.plan_highlight(GridCell::new(1, 1), 1, &structures);
        assert_eq!(after.expanded.len(), 9 - 4 - 1);
        assert!(!after.expanded.contains(&GridCell::new(2, 2)));
    }

    #[test]
    fn test_placement_event_updates_grid() {
        let mut app = test_app(open_grid(10));
        place(&mut app, GridCell::new(2, 2), 1);

        let grid = app.world().resource::<Grid>();
        let expected: HashSet<GridCell> = GridArea::around(GridCell::new(2, 2), 1)
            .iter()
            .filter(|cell| *cell != GridCell::new(2, 2))
            .collect();
        assert_eq!(grid.buildable().cells(), &expected);
        assert!(grid.is_tile_position_valid(GridCell::new(2, 2)));
        assert!(!grid.is_tile_position_buildable(GridCell::new(2, 2)));
        assert!(!grid.can_place_at(GridCell::new(2, 2)));
        assert!(grid.can_place_at(GridCell::new(3, 3)));
        assert!(!grid.can_place_at(GridCell::new(4, 4)));
    }

    #[test]
    fn test_buildable_and_occupied_stay_disjoint() {
        let mut app = test_app(open_grid(10));

        for (cell, radius) in [(GridCell::new(0, 0), 2), (GridCell::new(1, 1), 2), (GridCell::new(-2, 3), 1)] {
            place(&mut app, cell, radius);

            let registry = app.world().resource::<StructureRegistry>();
            let occupied = OccupancyIndex::occupied_cells(registry);
            let grid = app.world().resource::<Grid>();
            assert!(grid.buildable().cells().is_disjoint(&occupied));
        }
    }

    #[test]
    fn test_no_terrain_never_becomes_buildable() {
        let mut app = test_app(Grid::default());
        place(&mut app, GridCell::new(0, 0), 4);
        place(&mut app, GridCell::new(3, 3), 2);

        let grid = app.world().resource::<Grid>();
        assert!(grid.buildable().is_empty());
        assert!(!grid.is_tile_position_valid(GridCell::new(1, 1)));
        assert!(grid.buildable_plan().is_empty());
    }
}

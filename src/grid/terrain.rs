use crate::grid::{grid_area::*, grid_cell::*};
use bevy::utils::{HashMap, HashSet};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TerrainTile {
    pub buildable: bool,
}

impl TerrainTile {
    pub const BUILDABLE: TerrainTile = TerrainTile { buildable: true };
    pub const BLOCKED: TerrainTile = TerrainTile { buildable: false };
}

/// A named terrain surface. Layers nest; a child describes something more
/// specific than its parent (a river on top of grassland) and overrides it.
#[derive(Clone, Debug, Default)]
pub struct TileLayer {
    name: String,
    tiles: HashMap<GridCell, TerrainTile>,
    children: Vec<TileLayer>,
}

impl TileLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: HashMap::default(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_child(mut self, child: TileLayer) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: TileLayer) {
        self.children.push(child);
    }

    pub fn set_tile(&mut self, cell: GridCell, tile: TerrainTile) {
        self.tiles.insert(cell, tile);
    }

    pub fn fill_area(&mut self, area: GridArea, tile: TerrainTile) {
        for cell in area.iter() {
            self.tiles.insert(cell, tile);
        }
    }

    pub fn tile_at(&self, cell: GridCell) -> Option<TerrainTile> {
        self.tiles.get(&cell).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.tiles.keys().copied()
    }
}

/// Terrain layers flattened into lookup order: most specific first, the root
/// last. The first layer with a tile at a cell decides for that cell.
#[derive(Clone, Debug, Default)]
pub struct TileLayerStack {
    layers: Vec<TileLayer>,
}

impl TileLayerStack {
    pub fn from_hierarchy(root: TileLayer) -> Self {
        let mut layers = Vec::new();
        flatten_layer(root, &mut layers);
        Self { layers }
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the deciding layer and its tile, if any layer covers `cell`.
    pub fn resolve(&self, cell: GridCell) -> Option<(usize, TerrainTile)> {
        self.layers
            .iter()
            .enumerate()
            .find_map(|(index, layer)| layer.tile_at(cell).map(|tile| (index, tile)))
    }

    pub fn is_buildable_terrain(&self, cell: GridCell) -> bool {
        self.resolve(cell).is_some_and(|(_, tile)| tile.buildable)
    }

    /// Cells of `area` whose terrain allows building, in area iteration order.
    pub fn valid_cells_in(&self, area: GridArea) -> Vec<GridCell> {
        area.iter().filter(|cell| self.is_buildable_terrain(*cell)).collect()
    }

    /// Every cell covered by at least one layer.
    pub fn painted_cells(&self) -> HashSet<GridCell> {
        self.layers.iter().flat_map(|layer| layer.cells()).collect()
    }
}

// Later siblings sit on top of earlier ones, so children are visited last to
// first. A child's own subtree is flattened before the child itself.
fn flatten_layer(mut layer: TileLayer, output: &mut Vec<TileLayer>) {
    let children = std::mem::take(&mut layer.children);
    for child in children.into_iter().rev() {
        flatten_layer(child, output);
    }
    output.push(layer);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, area: GridArea, tile: TerrainTile) -> TileLayer {
        let mut layer = TileLayer::new(name);
        layer.fill_area(area, tile);
        layer
    }

    #[test]
    fn test_flatten_order_is_specific_first() {
        let root = TileLayer::new("base")
            .with_child(TileLayer::new("paths").with_child(TileLayer::new("bridges")))
            .with_child(TileLayer::new("water").with_child(TileLayer::new("rocks")).with_child(TileLayer::new("reeds")));

        let stack = TileLayerStack::from_hierarchy(root);
        assert_eq!(stack.layer_names(), vec!["reeds", "rocks", "water", "bridges", "paths", "base"]);
        assert_eq!(stack.len(), 6);
    }

    #[test]
    fn test_child_overrides_parent() {
        let cell = GridCell::new(2, 2);
        let mut water = TileLayer::new("water");
        water.set_tile(cell, TerrainTile::BLOCKED);
        let root = filled("base", GridArea::around(cell, 2), TerrainTile::BUILDABLE).with_child(water);

        let stack = TileLayerStack::from_hierarchy(root);
        assert!(!stack.is_buildable_terrain(cell));
        assert!(stack.is_buildable_terrain(GridCell::new(1, 1)));
        assert_eq!(stack.resolve(cell), Some((0, TerrainTile::BLOCKED)));
        assert_eq!(stack.resolve(GridCell::new(1, 1)), Some((1, TerrainTile::BUILDABLE)));
    }

    #[test]
    fn test_nested_child_can_reenable_building() {
        let cell = GridCell::new(0, 0);
        let mut bridge = TileLayer::new("bridge");
        bridge.set_tile(cell, TerrainTile::BUILDABLE);
        let mut water = TileLayer::new("water");
        water.set_tile(cell, TerrainTile::BLOCKED);
        water.set_tile(GridCell::new(1, 0), TerrainTile::BLOCKED);

        let root = filled("base", GridArea::around(cell, 1), TerrainTile::BUILDABLE).with_child(water.with_child(bridge));
        let stack = TileLayerStack::from_hierarchy(root);

        assert!(stack.is_buildable_terrain(cell));
        assert!(!stack.is_buildable_terrain(GridCell::new(1, 0)));
    }

    #[test]
    fn test_missing_terrain_is_not_buildable() {
        let stack = TileLayerStack::from_hierarchy(TileLayer::new("empty"));
        assert!(!stack.is_buildable_terrain(GridCell::new(0, 0)));
        assert!(!stack.is_buildable_terrain(GridCell::new(-1000, 1000)));
        assert!(stack.valid_cells_in(GridArea::around(GridCell::new(0, 0), 5)).is_empty());

        let default_stack = TileLayerStack::default();
        assert!(default_stack.is_empty());
        assert!(!default_stack.is_buildable_terrain(GridCell::new(0, 0)));
    }

    #[test]
    fn test_valid_cells_filters_by_terrain() {
        let mut root = filled("base", GridArea::around(GridCell::new(0, 0), 1), TerrainTile::BUILDABLE);
        root.set_tile(GridCell::new(1, 1), TerrainTile::BLOCKED);
        let stack = TileLayerStack::from_hierarchy(root);

        let valid = stack.valid_cells_in(GridArea::around(GridCell::new(0, 0), 2));
        assert_eq!(valid.len(), 8);
        assert!(!valid.contains(&GridCell::new(1, 1)));
        assert!(!valid.contains(&GridCell::new(2, 2)));
    }

    #[test]
    fn test_painted_cells_spans_all_layers() {
        let mut child = TileLayer::new("island");
        child.set_tile(GridCell::new(10, 10), TerrainTile::BUILDABLE);
        let mut root = TileLayer::new("base");
        root.add_child(child);
        root.set_tile(GridCell::new(0, 0), TerrainTile::BUILDABLE);

        let stack = TileLayerStack::from_hierarchy(root);
        let painted = stack.painted_cells();
        assert_eq!(painted.len(), 2);
        assert!(painted.contains(&GridCell::new(10, 10)));
    }
}

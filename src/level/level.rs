use crate::{
    grid::{grid::*, grid_area::*, grid_cell::*, terrain::*},
    tools::placement_events::RequestBuilding,
};
use bevy::{asset::io::file::FileAssetReader, prelude::*};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

const LEVEL_FILE: &str = "assets/levels/level.json";

/// Largest buildable or hover radius a level may ask for.
pub const MAX_RADIUS: i32 = 64;

/// Largest number of cells a single terrain rect may cover.
pub const MAX_RECT_CELLS: u64 = 1 << 20;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_level)
            .add_systems(PostStartup, place_starting_structures);
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub cell_size: f32,
    pub hover_radius: i32,
    pub building_radius: i32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            hover_radius: 3,
            building_radius: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileDescription {
    pub cell: [i32; 2],
    pub buildable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectDescription {
    pub min: [i32; 2],
    pub max: [i32; 2],
    pub buildable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDescription {
    pub name: String,
    #[serde(default)]
    pub rects: Vec<RectDescription>,
    #[serde(default)]
    pub tiles: Vec<TileDescription>,
    #[serde(default)]
    pub children: Vec<LayerDescription>,
}

impl LayerDescription {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rects: Vec::new(),
            tiles: Vec::new(),
            children: Vec::new(),
        }
    }

    fn with_rect(mut self, min: [i32; 2], max: [i32; 2], buildable: bool) -> Self {
        self.rects.push(RectDescription { min, max, buildable });
        self
    }

    fn with_child(mut self, child: LayerDescription) -> Self {
        self.children.push(child);
        self
    }

    /// Rects are painted first so single tiles can punch holes in them.
    pub fn to_layer(&self) -> TileLayer {
        let mut layer = TileLayer::new(self.name.as_str());

        for rect in &self.rects {
            let area = GridArea::new(rect.min.into(), rect.max.into());
            layer.fill_area(area, TerrainTile { buildable: rect.buildable });
        }

        for tile in &self.tiles {
            layer.set_tile(tile.cell.into(), TerrainTile { buildable: tile.buildable });
        }

        for child in &self.children {
            layer.add_child(child.to_layer());
        }

        layer
    }

    fn check_rects(&self) -> Result<(), LevelError> {
        for rect in &self.rects {
            let cells = GridArea::new(rect.min.into(), rect.max.into()).len();
            if cells > MAX_RECT_CELLS {
                return Err(LevelError::RectTooLarge {
                    layer: self.name.clone(),
                    cells,
                });
            }
        }

        self.children.iter().try_for_each(|child| child.check_rects())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureDescription {
    pub cell: [i32; 2],
    pub buildable_radius: Option<i32>,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub settings: GridSettings,
    pub terrain: LayerDescription,
    #[serde(default)]
    pub structures: Vec<StructureDescription>,
}

#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidCellSize(f32),
    RadiusTooLarge(i32),
    RectTooLarge { layer: String, cells: u64 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "could not read level file: {}", err),
            LevelError::Parse(err) => write!(f, "malformed level file: {}", err),
            LevelError::InvalidCellSize(size) => write!(f, "cell size must be positive and finite, got {}", size),
            LevelError::RadiusTooLarge(radius) => write!(f, "radius {} exceeds the limit of {}", radius, MAX_RADIUS),
            LevelError::RectTooLarge { layer, cells } => {
                write!(f, "rect in layer '{}' covers {} cells, limit is {}", layer, cells, MAX_RECT_CELLS)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            LevelError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(err: std::io::Error) -> Self {
        LevelError::Io(err)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Parse(err)
    }
}

impl Level {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let reader = BufReader::new(File::open(path)?);
        let level: Level = serde_json::from_reader(reader)?;
        level.validated()
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(text)?;
        level.validated()
    }

    fn validated(self) -> Result<Self, LevelError> {
        let cell_size = self.settings.cell_size;
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(LevelError::InvalidCellSize(cell_size));
        }

        let radii = [self.settings.hover_radius, self.settings.building_radius]
            .into_iter()
            .chain(self.structures.iter().filter_map(|structure| structure.buildable_radius));
        for radius in radii {
            if radius > MAX_RADIUS {
                return Err(LevelError::RadiusTooLarge(radius));
            }
        }

        self.terrain.check_rects()?;
        Ok(self)
    }

    /// A 32x32 meadow crossed by a river with a single bridge, plus a rock
    /// outcrop and one starting structure.
    pub fn default_level() -> Self {
        let bridge = LayerDescription::named("bridge").with_rect([14, 20], [16, 20], true);
        let river = LayerDescription::named("river")
            .with_rect([14, 0], [16, 31], false)
            .with_child(bridge);
        let rocks = LayerDescription::named("rocks").with_rect([22, 6], [25, 8], false);
        let terrain = LayerDescription::named("base")
            .with_rect([0, 0], [31, 31], true)
            .with_child(river)
            .with_child(rocks);

        Self {
            settings: GridSettings::default(),
            terrain,
            structures: vec![StructureDescription {
                cell: [6, 16],
                buildable_radius: None,
            }],
        }
    }

    pub fn terrain_stack(&self) -> TileLayerStack {
        TileLayerStack::from_hierarchy(self.terrain.to_layer())
    }

    pub fn starting_requests(&self) -> Vec<RequestBuilding> {
        self.structures
            .iter()
            .map(|structure| {
                RequestBuilding::new(
                    structure.cell.into(),
                    structure.buildable_radius.unwrap_or(self.settings.building_radius),
                )
            })
            .collect()
    }
}

/// The shipped level, resolved against the asset root rather than the
/// working directory.
pub fn level_path() -> PathBuf {
    FileAssetReader::get_base_path().join(LEVEL_FILE)
}

fn load_level(mut commands: Commands) {
    let level = Level::load(level_path()).unwrap_or_else(|err| {
        log::warn!("{}; falling back to the built-in level", err);
        Level::default_level()
    });

    let terrain = level.terrain_stack();
    log::info!("Found {} tile map layers in the level.", terrain.len());
    log::info!("Tile map layers, in lookup order: {}", terrain.layer_names().join(", "));

    commands.insert_resource(level.settings);
    commands.insert_resource(Grid::new(terrain));
    commands.insert_resource(level);
}

fn place_starting_structures(level: Res<Level>, mut building_event: EventWriter<RequestBuilding>) {
    for request in level.starting_requests() {
        building_event.send(request);
    }
}

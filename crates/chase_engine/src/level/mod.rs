//! Level construction
//!
//! Turns a [`LevelLayout`] into the runtime pieces the simulation queries:
//! static wall and floor bodies, the navigation grid, spawn positions and
//! coin cells. Everything built here is read-only afterwards.

pub mod layout;

pub use layout::{Glyph, LevelLayout, ParsedLayout, SpawnKind};

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::foundation::math::{Transform, Vec3};
use crate::navigation::{Cell, NavGrid};
use crate::physics::{
    CollisionLayers, ExtentError, MeshData, StaticBody, StaticBodyKey, StaticBodySet,
};

/// Level loading and validation errors
#[derive(Error, Debug)]
pub enum LevelError {
    /// The layout has no rows or an empty first row
    #[error("level layout is empty")]
    Empty,

    /// A row differs in width from the first row
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Row index
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of this row
        found: usize,
    },

    /// A character that is not part of the layout alphabet
    #[error("unknown glyph {glyph:?} at ({x}, {z})")]
    UnknownGlyph {
        /// The character
        glyph: char,
        /// Column
        x: usize,
        /// Row
        z: usize,
    },

    /// A required spawn marker is absent
    #[error("no {0:?} spawn in layout")]
    MissingSpawn(SpawnKind),

    /// A spawn marker appears twice
    #[error("{kind:?} spawn appears at {first:?} and {second:?}")]
    DuplicateSpawn {
        /// Which marker
        kind: SpawnKind,
        /// First occurrence
        first: Cell,
        /// Second occurrence
        second: Cell,
    },

    /// Cell size must be positive and finite
    #[error("invalid cell size {0}")]
    InvalidCellSize(f32),

    /// Level geometry had no usable extents
    #[error("level geometry error: {0}")]
    Geometry(#[from] ExtentError),

    /// The layout file could not be read
    #[error("level file error: {0}")]
    Config(#[from] ConfigError),
}

/// Built level
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    cell_size: f32,
    statics: StaticBodySet,
    walls: Vec<StaticBodyKey>,
    floor: StaticBodyKey,
    grid: NavGrid,
    player_spawn: Cell,
    agent_spawn: Cell,
    coins: Vec<Cell>,
}

impl Level {
    /// Load a layout file (TOML or RON) and build it
    pub fn load(path: &str) -> Result<Self, LevelError> {
        let layout = LevelLayout::load_from_file(path)?;
        Self::build(&layout)
    }

    /// Build a level from a layout
    pub fn build(layout: &LevelLayout) -> Result<Self, LevelError> {
        let parsed = layout.parse()?;
        let cs = layout.cell_size;
        let mut statics = StaticBodySet::new();

        let wall_layers = CollisionLayers::WALL | CollisionLayers::CAMERA_BLOCKER;
        let mut walls = Vec::new();
        for (z, first, last) in parsed.wall_runs() {
            let cells = (last - first + 1) as f32;
            let centre = Vec3::new((first + last) as f32 * 0.5 * cs, 0.0, z as f32 * cs);
            let mesh = MeshData::cuboid(Vec3::new(cells * cs, cs, cs));
            walls.push(statics.insert(StaticBody::from_mesh(Transform::from_position(centre), &mesh, wall_layers)?));
        }

        let (width, depth) = (parsed.width() as f32, parsed.depth() as f32);
        let floor_centre = Vec3::new((width - 1.0) * 0.5 * cs, -0.5 * cs, (depth - 1.0) * 0.5 * cs);
        let floor_mesh = MeshData::cuboid(Vec3::new(width * cs, cs, depth * cs));
        let floor = statics.insert(StaticBody::from_mesh(
            Transform::from_position(floor_centre),
            &floor_mesh,
            CollisionLayers::FLOOR | CollisionLayers::CAMERA_BLOCKER,
        )?);

        let blocked: Vec<Vec<bool>> = parsed
            .glyphs
            .iter()
            .map(|row| row.iter().map(|glyph| !glyph.is_walkable()).collect())
            .collect();
        let grid = NavGrid::from_blocked_rows(&blocked);

        log::info!(
            "Built level '{}': {}x{} cells, {} wall boxes, {} coins",
            layout.name, parsed.width(), parsed.depth(), walls.len(), parsed.coins.len()
        );

        Ok(Self {
            name: layout.name.clone(),
            cell_size: cs,
            statics,
            walls,
            floor,
            grid,
            player_spawn: parsed.player_spawn,
            agent_spawn: parsed.agent_spawn,
            coins: parsed.coins,
        })
    }

    /// Level name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World size of one cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Static collision geometry
    pub fn statics(&self) -> &StaticBodySet {
        &self.statics
    }

    /// Wall bodies
    pub fn walls(&self) -> &[StaticBodyKey] {
        &self.walls
    }

    /// Floor body
    pub fn floor(&self) -> StaticBodyKey {
        self.floor
    }

    /// Navigation grid
    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Player start cell
    pub fn player_spawn(&self) -> Cell {
        self.player_spawn
    }

    /// Agent start cell
    pub fn agent_spawn(&self) -> Cell {
        self.agent_spawn
    }

    /// Coin cells
    pub fn coin_cells(&self) -> &[Cell] {
        &self.coins
    }

    /// World position of a cell centre at height `y`
    pub fn cell_to_world(&self, cell: Cell, y: f32) -> Vec3 {
        cell.to_world(self.cell_size, y)
    }
}

//! Text level layouts
//!
//! A layout is a list of equal-width rows; row index is Z and column index
//! is X. Layouts are plain serde data so they load through the same
//! TOML/RON [`Config`] path as the game settings.

use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::navigation::Cell;
use super::LevelError;

/// What a layout character stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// `#` impassable wall
    Wall,
    /// `.` open floor
    Open,
    /// `P` open floor where the player starts
    PlayerSpawn,
    /// `A` open floor where the agent starts
    AgentSpawn,
    /// `o` open floor holding a coin
    Coin,
}

impl Glyph {
    /// Decode a layout character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Wall),
            '.' | ' ' => Some(Self::Open),
            'P' => Some(Self::PlayerSpawn),
            'A' => Some(Self::AgentSpawn),
            'o' => Some(Self::Coin),
            _ => None,
        }
    }

    /// Whether the glyph can be walked on
    pub fn is_walkable(self) -> bool {
        self != Self::Wall
    }
}

/// Which spawn marker a layout error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    /// `P`
    Player,
    /// `A`
    Agent,
}

/// Serialized level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Display name
    pub name: String,
    /// World size of one grid cell
    pub cell_size: f32,
    /// Layout rows, top row is z = 0
    pub rows: Vec<String>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            name: "Courtyard".to_string(),
            cell_size: 4.0,
            rows: [
                "###########",
                "#P..o....o#",
                "#.##.#.##.#",
                "#o.......o#",
                "#.##.#.##.#",
                "#o...A...o#",
                "###########",
            ]
            .iter()
            .map(|row| (*row).to_string())
            .collect(),
        }
    }
}

impl Config for LevelLayout {}

/// Layout decoded into glyphs with its markers located
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLayout {
    /// Glyphs by `[z][x]`
    pub glyphs: Vec<Vec<Glyph>>,
    /// Player start cell
    pub player_spawn: Cell,
    /// Agent start cell
    pub agent_spawn: Cell,
    /// Coin cells in reading order
    pub coins: Vec<Cell>,
}

impl ParsedLayout {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.glyphs.first().map_or(0, Vec::len)
    }

    /// Number of rows
    pub fn depth(&self) -> usize {
        self.glyphs.len()
    }

    /// Horizontal runs of wall cells as `(z, first_x, last_x)`
    pub fn wall_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for (z, row) in self.glyphs.iter().enumerate() {
            let mut run_start = None;
            for x in 0..=row.len() {
                let is_wall = row.get(x) == Some(&Glyph::Wall);
                match (run_start, is_wall) {
                    (None, true) => run_start = Some(x),
                    (Some(first), false) => {
                        runs.push((z, first, x - 1));
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }
        runs
    }
}

impl LevelLayout {
    /// Create a layout from rows
    pub fn new(name: impl Into<String>, cell_size: f32, rows: &[&str]) -> Self {
        Self {
            name: name.into(),
            cell_size,
            rows: rows.iter().map(|row| (*row).to_string()).collect(),
        }
    }

    /// Validate and decode the rows
    pub fn parse(&self) -> Result<ParsedLayout, LevelError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LevelError::InvalidCellSize(self.cell_size));
        }
        let width = self.rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(LevelError::Empty);
        }

        let mut glyphs = Vec::with_capacity(self.rows.len());
        let mut player = None;
        let mut agent = None;
        let mut coins = Vec::new();

        for (z, row) in self.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow { row: z, expected: width, found });
            }
            let mut decoded = Vec::with_capacity(width);
            for (x, c) in row.chars().enumerate() {
                let glyph = Glyph::from_char(c).ok_or(LevelError::UnknownGlyph { glyph: c, x, z })?;
                let cell = Cell::new(x as i32, z as i32);
                match glyph {
                    Glyph::PlayerSpawn => place_spawn(&mut player, SpawnKind::Player, cell)?,
                    Glyph::AgentSpawn => place_spawn(&mut agent, SpawnKind::Agent, cell)?,
                    Glyph::Coin => coins.push(cell),
                    Glyph::Wall | Glyph::Open => {}
                }
                decoded.push(glyph);
            }
            glyphs.push(decoded);
        }

        Ok(ParsedLayout {
            glyphs,
            player_spawn: player.ok_or(LevelError::MissingSpawn(SpawnKind::Player))?,
            agent_spawn: agent.ok_or(LevelError::MissingSpawn(SpawnKind::Agent))?,
            coins,
        })
    }
}

fn place_spawn(slot: &mut Option<Cell>, kind: SpawnKind, cell: Cell) -> Result<(), LevelError> {
    if let Some(first) = *slot {
        return Err(LevelError::DuplicateSpawn { kind, first, second: cell });
    }
    *slot = Some(cell);
    Ok(())
}

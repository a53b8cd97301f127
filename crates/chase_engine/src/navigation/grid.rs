//! Walkability grid over the level floor
//!
//! Cells are addressed by integer `(x, z)`; cell `(x, z)` covers the world
//! position `(x * cell_size, _, z * cell_size)`. Anything outside the grid
//! counts as blocked.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Column
    pub x: i32,
    /// Row
    pub z: i32,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing a world position, rounding to the nearest centre
    pub fn from_world(position: &Vec3, cell_size: f32) -> Self {
        Self {
            x: (position.x / cell_size).round() as i32,
            z: (position.z / cell_size).round() as i32,
        }
    }

    /// World position of the cell centre at height `y`
    pub fn to_world(self, cell_size: f32, y: f32) -> Vec3 {
        Vec3::new(self.x as f32 * cell_size, y, self.z as f32 * cell_size)
    }

    /// Cell offset by `(dx, dz)`
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }
}

/// Neighbourhood used when walking the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Connectivity {
    /// Orthogonal steps only
    #[default]
    Four,
    /// Orthogonal and diagonal steps; diagonals never cut blocked corners
    Eight,
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Content of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Cannot be entered
    Blocked,
    /// Can be entered at the given cost (at least 1)
    Walkable {
        /// Cost of entering this cell orthogonally
        cost: u32,
    },
}

/// Navigation grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGrid {
    width: usize,
    depth: usize,
    tiles: Vec<Tile>,
}

impl NavGrid {
    /// Create a fully walkable grid with unit costs
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            tiles: vec![Tile::Walkable { cost: 1 }; width * depth],
        }
    }

    /// Build a grid from rows of booleans (`true` = blocked), row index = z
    pub fn from_blocked_rows(rows: &[Vec<bool>]) -> Self {
        let depth = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(width, depth);
        for (z, row) in rows.iter().enumerate() {
            for x in 0..width {
                if row.get(x).copied().unwrap_or(true) {
                    grid.tiles[z * width + x] = Tile::Blocked;
                }
            }
        }
        grid
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = usize::try_from(cell.x).ok()?;
        let z = usize::try_from(cell.z).ok()?;
        (x < self.width && z < self.depth).then_some(z * self.width + x)
    }

    /// Whether the cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Tile at `cell`; outside the grid reads as blocked
    pub fn tile(&self, cell: Cell) -> Tile {
        self.index(cell).map_or(Tile::Blocked, |i| self.tiles[i])
    }

    /// Whether the cell can be entered
    pub fn is_walkable(&self, cell: Cell) -> bool {
        matches!(self.tile(cell), Tile::Walkable { .. })
    }

    /// Entry cost of a walkable cell
    pub fn cost(&self, cell: Cell) -> Option<u32> {
        match self.tile(cell) {
            Tile::Walkable { cost } => Some(cost),
            Tile::Blocked => None,
        }
    }

    /// Mark a cell blocked; returns `false` when outside the grid
    pub fn set_blocked(&mut self, cell: Cell) -> bool {
        self.set_tile(cell, Tile::Blocked)
    }

    /// Make a cell walkable with the given entry cost (clamped to at least 1)
    pub fn set_cost(&mut self, cell: Cell, cost: u32) -> bool {
        self.set_tile(cell, Tile::Walkable { cost: cost.max(1) })
    }

    fn set_tile(&mut self, cell: Cell, tile: Tile) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Walkable cells in the grid
    pub fn walkable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.depth).flat_map(move |z| {
            (0..self.width).filter_map(move |x| {
                let cell = Cell::new(x as i32, z as i32);
                self.is_walkable(cell).then_some(cell)
            })
        })
    }

    /// Walkable neighbours of `cell` with the cost of stepping into each
    ///
    /// Diagonal steps cost `sqrt(2)` times the entered cell's cost and are
    /// only offered when both orthogonal cells they pass are walkable.
    pub fn neighbours(&self, cell: Cell, connectivity: Connectivity) -> Vec<(Cell, f32)> {
        let mut out = Vec::with_capacity(8);
        for (dx, dz) in ORTHOGONAL {
            let next = cell.offset(dx, dz);
            if let Some(cost) = self.cost(next) {
                out.push((next, cost as f32));
            }
        }
        if connectivity == Connectivity::Eight {
            for (dx, dz) in DIAGONAL {
                let next = cell.offset(dx, dz);
                let clear = self.is_walkable(cell.offset(dx, 0)) && self.is_walkable(cell.offset(0, dz));
                if let (true, Some(cost)) = (clear, self.cost(next)) {
                    out.push((next, cost as f32 * std::f32::consts::SQRT_2));
                }
            }
        }
        out
    }

    /// Cost of a single step between adjacent cells, `None` if not allowed
    pub fn step_cost(&self, from: Cell, to: Cell, connectivity: Connectivity) -> Option<f32> {
        self.neighbours(from, connectivity)
            .into_iter()
            .find(|(cell, _)| *cell == to)
            .map(|(_, cost)| cost)
    }
}

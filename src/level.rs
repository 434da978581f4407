//! Level grid
//!
//! A level is a rectangular grid of cell codes, fixed once loaded. Cell (i, j)
//! covers world space `[i, i+1) x [j, j+1)`; spawns sit at cell centers.

use glam::Vec2;
use serde::Deserialize;

use crate::cell_of;
use crate::error::{Error, Result};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    PickupSpawn,
    AdversarySpawn,
}

impl Cell {
    /// Decode a level code; `None` for codes the game does not know
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Wall),
            2 => Some(Cell::PickupSpawn),
            3 => Some(Cell::AdversarySpawn),
            _ => None,
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

/// Serialized level form: raw codes plus optional start pose
#[derive(Debug, Clone, Deserialize)]
struct LevelData {
    rows: Vec<Vec<u8>>,
    #[serde(default)]
    start: Option<[f32; 2]>,
    #[serde(default)]
    heading: f32,
}

/// Immutable level grid
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Vec2,
    start_heading: f32,
}

/// Built-in 16x16 arena: 5 pickups, 3 adversaries
const ARENA: [[u8; 16]; 16] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 0, 0, 2, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 3, 0, 1],
    [1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 2, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 3, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 2, 0, 1, 0, 0, 0, 0, 0, 3, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 1, 1, 0, 0, 2, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

impl Level {
    /// Build a level from rows of cell codes.
    ///
    /// Unknown codes are read as `Empty` (with a warning) so a slightly
    /// malformed level still plays. Empty or ragged grids are rejected.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(Error::InvalidLevel("grid is empty".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut unknown = 0usize;
        for (j, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::InvalidLevel(format!(
                    "row {} has {} cells, expected {}",
                    j,
                    row.len(),
                    width
                )));
            }
            for &code in row {
                cells.push(Cell::from_code(code).unwrap_or_else(|| {
                    unknown += 1;
                    Cell::Empty
                }));
            }
        }
        if unknown > 0 {
            log::warn!("{} unrecognized cell code(s) treated as empty", unknown);
        }

        Ok(Self {
            width,
            height,
            cells,
            start: Vec2::new(1.5, 1.5),
            start_heading: 0.0,
        })
    }

    /// Parse a level from JSON: `{ "rows": [[1,1,..],..], "start": [x, y], "heading": a }`
    pub fn from_json(json: &str) -> Result<Self> {
        let data: LevelData = serde_json::from_str(json)?;
        let level = Self::from_rows(&data.rows)?;
        let start = data.start.map_or(level.start, |[x, y]| Vec2::new(x, y));
        Ok(level.with_start(start, data.heading))
    }

    /// The built-in arena
    pub fn arena() -> Self {
        Self {
            width: 16,
            height: 16,
            cells: ARENA
                .iter()
                .flatten()
                .map(|&c| Cell::from_code(c).unwrap_or_default())
                .collect(),
            start: Vec2::new(1.5, 1.5),
            start_heading: 0.0,
        }
    }

    /// Override where the viewpoint spawns
    pub fn with_start(mut self, pos: Vec2, heading: f32) -> Self {
        self.start = pos;
        self.start_heading = heading;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn start_heading(&self) -> f32 {
        self.start_heading
    }

    /// Cell at grid index, `None` outside the map
    #[inline]
    pub fn cell(&self, i: i32, j: i32) -> Option<Cell> {
        if i < 0 || j < 0 || i as usize >= self.width || j as usize >= self.height {
            return None;
        }
        Some(self.cells[j as usize * self.width + i as usize])
    }

    /// Cell containing a world position, `None` outside the map
    #[inline]
    pub fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        let (i, j) = cell_of(pos);
        self.cell(i, j)
    }

    /// Whether a world position is blocked; outside the map counts as wall
    #[inline]
    pub fn is_blocked(&self, pos: Vec2) -> bool {
        self.cell_at(pos).is_none_or(Cell::is_wall)
    }

    /// Clamp a position into the map so drift never escapes the grid
    pub fn clamp_position(&self, pos: Vec2) -> Vec2 {
        let max = Vec2::new(self.width as f32, self.height as f32) - Vec2::splat(1e-3);
        pos.clamp(Vec2::ZERO, max)
    }

    /// Spawn cells in row-major order, as (kind, cell-center position)
    pub fn spawns(&self) -> impl Iterator<Item = (Cell, Vec2)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, &cell)| {
            matches!(cell, Cell::PickupSpawn | Cell::AdversarySpawn).then(|| {
                let i = idx % self.width;
                let j = idx / self.width;
                (cell, Vec2::new(i as f32 + 0.5, j as f32 + 0.5))
            })
        })
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

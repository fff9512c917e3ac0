use macroquad::math::Rect;
use serde::{Deserialize, Serialize};

/// A grid cell as (column, row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Pixel rectangle covered by this cell for a given cell size.
    pub fn to_rect(self, cell_size: f32) -> Rect {
        Rect::new(self.x as f32 * cell_size, self.y as f32 * cell_size, cell_size, cell_size)
    }
}

/// Playfield dimensions in cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Grid that partitions a `width` x `height` pixel surface into square cells.
    pub fn from_surface(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            cols: (width / cell_size) as i32,
            rows: (height / cell_size) as i32,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Bring an out-of-range cell back in on the opposite side, per axis.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(self.cols),
            y: cell.y.rem_euclid(self.rows),
        }
    }

    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.cols / 2, self.rows / 2)
    }

    pub(crate) fn index_of(&self, cell: Cell) -> usize {
        cell.y as usize * self.cols as usize + cell.x as usize
    }

    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((index % cols) as i32, (index / cols) as i32)
    }
}

/// Heading of the snake. `Idle` is the "not yet moving" state a fresh game
/// starts in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this heading; rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Idle => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 0) => Some(Direction::Idle),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_moving(self) -> bool {
        self != Direction::Idle
    }
}

/// What happens when the head crosses the grid edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallMode {
    #[default]
    Deadly,
    Wrap,
}

impl WallMode {
    pub fn label(self) -> &'static str {
        match self {
            WallMode::Deadly => "deadly",
            WallMode::Wrap => "wrap",
        }
    }
}

/// Why a session ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// The snake covers every cell, so no apple can be placed. Counts as a win.
    BoardFilled,
}

impl EndReason {
    pub fn is_win(self) -> bool {
        self == EndReason::BoardFilled
    }
}

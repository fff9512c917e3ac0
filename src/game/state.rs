use std::collections::VecDeque;

use super::apple::place_apple;
use super::types::{Cell, Direction, Grid, WallMode};
use crate::error::GameError;

/// Everything a running session knows about the board.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    /// Body segments, head at the front.
    pub snake: VecDeque<Cell>,
    pub direction: Direction,
    /// `None` only once the board is full.
    pub apple: Option<Cell>,
    pub score: u32,
    pub apples_eaten: u32,
    pub wall_mode: WallMode,
    pub auto_speed: bool,
    pub tick_interval_ms: u32,
    pub active: bool,
}

impl GameState {
    /// Fresh session: a one-cell snake in the middle of the grid, standing
    /// still, with an apple already placed.
    pub fn new(grid: Grid, wall_mode: WallMode, tick_interval_ms: u32, auto_speed: bool) -> Result<Self, GameError> {
        let snake = VecDeque::from([grid.center()]);
        let apple = place_apple(&snake, grid)?;
        Ok(Self::with_snake(grid, snake, apple, wall_mode, tick_interval_ms, auto_speed))
    }

    /// Session with an explicit body and apple. The body must be non-empty
    /// and the apple must lie off it.
    pub fn with_snake(
        grid: Grid,
        snake: impl Into<VecDeque<Cell>>,
        apple: Cell,
        wall_mode: WallMode,
        tick_interval_ms: u32,
        auto_speed: bool,
    ) -> Self {
        let snake = snake.into();
        debug_assert!(!snake.is_empty(), "snake needs at least one segment");
        debug_assert!(!snake.contains(&apple), "apple placed on the snake");
        Self {
            grid,
            snake,
            direction: Direction::Idle,
            apple: Some(apple),
            score: 0,
            apples_eaten: 0,
            wall_mode,
            auto_speed,
            tick_interval_ms,
            active: true,
        }
    }

    pub fn head(&self) -> Cell {
        // The body never shrinks below one segment.
        self.snake[0]
    }

    /// Segment right behind the head, if the snake is longer than one cell.
    pub fn neck(&self) -> Option<Cell> {
        self.snake.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Cell the head would enter moving in `direction`, wrapped in wrap mode.
    /// In deadly mode the cell may lie outside the grid.
    pub fn next_head(&self, direction: Direction) -> Cell {
        let candidate = self.head().offset(direction);
        match self.wall_mode {
            WallMode::Deadly => candidate,
            WallMode::Wrap => self.grid.wrap(candidate),
        }
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }
}

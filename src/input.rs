//! Turning directional presses into the heading used by the next tick.

use tracing::debug;

use crate::game::{Direction, GameState};

/// Holds the most recent accepted direction until the next tick consumes it.
///
/// Keyboard and on-screen buttons both end up in [`InputRouter::request_direction`].
/// There is no queue of turns: a later request overwrites an earlier one.
#[derive(Debug, Default, Clone)]
pub struct InputRouter {
    pending: Option<Direction>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a new heading given as a unit vector. Returns whether it was
    /// accepted.
    ///
    /// A request is dropped when it is not a unit vector, or when the snake
    /// has a neck and the head would move straight into it. In wrap mode the
    /// neck may sit on the opposite edge of the board.
    pub fn request_direction(&mut self, state: &GameState, dx: i32, dy: i32) -> bool {
        let Some(direction) = Direction::from_delta(dx, dy) else {
            debug!(dx, dy, "ignoring non-unit direction");
            return false;
        };
        self.request(state, direction)
    }

    pub fn request(&mut self, state: &GameState, direction: Direction) -> bool {
        if let Some(neck) = state.neck() {
            if state.next_head(direction) == neck {
                debug!(?direction, "reversal into neck rejected");
                return false;
            }
        }
        self.pending = Some(direction);
        true
    }

    /// Apply the pending heading, if any, to the state. Called once per tick
    /// right before stepping.
    pub fn apply(&mut self, state: &mut GameState) {
        if let Some(direction) = self.pending.take() {
            state.direction = direction;
        }
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

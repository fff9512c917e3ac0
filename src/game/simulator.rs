use tracing::debug;

use super::apple::place_apple;
use super::state::GameState;
use super::types::{Cell, EndReason};

/// Shortest tick interval auto-speed may reach.
pub const MIN_TICK_INTERVAL_MS: u32 = 50;
/// Interval reduction applied by auto-speed.
pub const SPEED_STEP_MS: u32 = 20;
/// Auto-speed kicks in every this many apples.
pub const APPLES_PER_SPEED_STEP: u32 = 2;

/// Which cells count as "self" when checking the new head.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The whole body as it was before the move, tail included. A snake of
    /// two or more segments cannot follow its own tail into the cell that is
    /// about to be vacated.
    #[default]
    PreMoveBody,
    /// The tail cell is ignored when the snake is not growing this tick.
    VacatingTail,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// The snake advanced by one cell.
    pub moved: bool,
    /// An apple was eaten on this tick.
    pub ate_apple: bool,
    pub score: u32,
    pub apple: Option<Cell>,
    pub head: Cell,
    pub end: Option<EndReason>,
}

impl StepResult {
    fn from_state(state: &GameState) -> Self {
        Self {
            moved: false,
            ate_apple: false,
            score: state.score,
            apple: state.apple,
            head: state.head(),
            end: None,
        }
    }

    pub fn ended(&self) -> bool {
        self.end.is_some()
    }
}

/// Advance the session by one tick using the default collision policy.
pub fn step(state: &mut GameState) -> StepResult {
    step_with_policy(state, CollisionPolicy::default())
}

/// Advance the session by one tick.
///
/// The move either commits completely or not at all: a collision leaves the
/// body, apple and score exactly as they were and only clears `active`.
pub fn step_with_policy(state: &mut GameState, policy: CollisionPolicy) -> StepResult {
    let mut result = StepResult::from_state(state);
    if !state.active || !state.direction.is_moving() {
        return result;
    }

    let head = state.next_head(state.direction);
    if !state.grid.contains(head) {
        return terminate(state, result, EndReason::Wall);
    }

    let eating = state.apple == Some(head);

    let checked = match policy {
        CollisionPolicy::PreMoveBody => state.snake.len(),
        CollisionPolicy::VacatingTail if !eating => state.snake.len() - 1,
        CollisionPolicy::VacatingTail => state.snake.len(),
    };
    if state.snake.iter().take(checked).any(|&segment| segment == head) {
        return terminate(state, result, EndReason::SelfCollision);
    }

    state.snake.push_front(head);
    result.moved = true;
    result.head = head;

    if eating {
        state.score += 1;
        state.apples_eaten += 1;
        result.ate_apple = true;
        result.score = state.score;
        debug!(score = state.score, x = head.x, y = head.y, "apple eaten");

        apply_auto_speed(state);

        match place_apple(&state.snake, state.grid) {
            Ok(apple) => {
                state.apple = Some(apple);
                result.apple = Some(apple);
            }
            Err(err) => {
                debug!(%err, "no room for another apple");
                state.apple = None;
                result.apple = None;
                return terminate(state, result, EndReason::BoardFilled);
            }
        }
    } else {
        state.snake.pop_back();
    }

    result
}

fn terminate(state: &mut GameState, mut result: StepResult, reason: EndReason) -> StepResult {
    state.active = false;
    result.end = Some(reason);
    debug!(?reason, score = state.score, "session ended");
    result
}

/// Shorten the tick interval after every second apple while auto-speed is on.
fn apply_auto_speed(state: &mut GameState) {
    if !state.auto_speed || state.apples_eaten % APPLES_PER_SPEED_STEP != 0 {
        return;
    }
    let next = state.tick_interval_ms.saturating_sub(SPEED_STEP_MS).max(MIN_TICK_INTERVAL_MS);
    if next != state.tick_interval_ms {
        debug!(from = state.tick_interval_ms, to = next, "tick interval shortened");
        state.tick_interval_ms = next;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::game::types::{Direction, Grid, WallMode};

    fn cells(points: &[(i32, i32)]) -> VecDeque<Cell> {
        points.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    fn state(points: &[(i32, i32)], apple: (i32, i32), direction: Direction) -> GameState {
        let mut state = GameState::with_snake(
            Grid::new(20, 20),
            cells(points),
            Cell::new(apple.0, apple.1),
            WallMode::Deadly,
            150,
            false,
        );
        state.direction = direction;
        state
    }

    #[test]
    fn idle_direction_is_a_no_op() {
        let mut s = state(&[(10, 10)], (0, 0), Direction::Idle);
        let before = s.clone();
        let result = step(&mut s);
        assert!(!result.moved);
        assert!(!result.ended());
        assert_eq!(s, before);
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut s = state(&[(5, 5), (4, 5), (3, 5)], (0, 0), Direction::Down);
        let result = step(&mut s);
        assert!(result.moved);
        assert!(!result.ate_apple);
        assert_eq!(s.snake, cells(&[(5, 6), (5, 5), (4, 5)]));
    }

    #[test]
    fn eating_grows_and_relocates_apple() {
        let mut s = state(&[(5, 5), (4, 5), (3, 5)], (6, 5), Direction::Right);
        let result = step(&mut s);
        assert!(result.ate_apple);
        assert_eq!(s.snake, cells(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
        assert_eq!(s.score, 1);
        assert_eq!(s.apples_eaten, 1);
        let apple = s.apple.unwrap();
        assert!(!s.occupies(apple));
        assert_eq!(result.apple, Some(apple));
    }

    #[test]
    fn deadly_wall_ends_without_committing() {
        let mut s = state(&[(19, 10), (18, 10)], (0, 0), Direction::Right);
        s.score = 4;
        let before = s.snake.clone();
        let result = step(&mut s);
        assert_eq!(result.end, Some(EndReason::Wall));
        assert!(!s.active);
        assert_eq!(s.score, 4);
        assert_eq!(s.snake, before);
    }

    #[test]
    fn wrap_mode_reenters_on_the_far_side() {
        let mut s = state(&[(0, 3)], (10, 10), Direction::Left);
        s.wall_mode = WallMode::Wrap;
        step(&mut s);
        assert_eq!(s.head(), Cell::new(19, 3));

        let mut s = state(&[(4, 19)], (10, 10), Direction::Down);
        s.wall_mode = WallMode::Wrap;
        step(&mut s);
        assert_eq!(s.head(), Cell::new(4, 0));
    }

    #[test]
    fn moving_into_own_body_ends_session() {
        // Head at (5,5) turning down into (5,6), which is mid-body.
        let mut s = state(&[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)], (0, 0), Direction::Down);
        let result = step(&mut s);
        assert_eq!(result.end, Some(EndReason::SelfCollision));
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn pre_move_body_blocks_the_vacating_tail() {
        // A 2x2 loop: the head's next cell is the current tail.
        let body = [(5, 5), (5, 6), (6, 6), (6, 5)];
        let mut s = state(&body, (0, 0), Direction::Right);
        let result = step(&mut s);
        assert_eq!(result.end, Some(EndReason::SelfCollision));

        let mut s = state(&body, (0, 0), Direction::Right);
        let result = step_with_policy(&mut s, CollisionPolicy::VacatingTail);
        assert!(result.moved);
        assert_eq!(s.snake, cells(&[(6, 5), (5, 5), (5, 6), (6, 6)]));
    }

    #[test]
    fn auto_speed_triggers_on_every_second_apple() {
        let mut s = state(&[(5, 5)], (6, 5), Direction::Right);
        s.auto_speed = true;
        step(&mut s);
        assert_eq!(s.tick_interval_ms, 150);

        s.apple = Some(Cell::new(7, 5));
        step(&mut s);
        assert_eq!(s.apples_eaten, 2);
        assert_eq!(s.tick_interval_ms, 130);
    }

    #[test]
    fn auto_speed_is_floored() {
        let mut s = state(&[(5, 5)], (6, 5), Direction::Right);
        s.auto_speed = true;
        s.tick_interval_ms = 60;
        s.apples_eaten = 1;
        step(&mut s);
        assert_eq!(s.tick_interval_ms, MIN_TICK_INTERVAL_MS);
    }

    #[test]
    fn auto_speed_off_leaves_interval() {
        let mut s = state(&[(5, 5)], (6, 5), Direction::Right);
        s.apples_eaten = 1;
        step(&mut s);
        assert_eq!(s.tick_interval_ms, 150);
    }

    #[test]
    fn filling_the_board_is_a_win() {
        let mut s = GameState::with_snake(
            Grid::new(2, 1),
            cells(&[(0, 0)]),
            Cell::new(1, 0),
            WallMode::Deadly,
            150,
            false,
        );
        s.direction = Direction::Right;
        let result = step(&mut s);
        assert_eq!(result.end, Some(EndReason::BoardFilled));
        assert!(result.ate_apple);
        assert_eq!(s.score, 1);
        assert_eq!(s.apple, None);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn inactive_state_does_not_move() {
        let mut s = state(&[(5, 5)], (0, 0), Direction::Right);
        s.active = false;
        let result = step(&mut s);
        assert!(!result.moved);
        assert_eq!(s.head(), Cell::new(5, 5));
    }
}

use std::collections::VecDeque;

use super::types::{Cell, Grid};
use crate::error::GameError;

/// Random draws tried before falling back to a scan of the free cells.
const MAX_RANDOM_DRAWS: usize = 64;

/// Pick a uniformly random cell that no snake segment occupies.
pub fn place_apple(snake: &VecDeque<Cell>, grid: Grid) -> Result<Cell, GameError> {
    place_apple_with(snake, grid, |upper| macroquad::rand::gen_range(0, upper))
}

/// Same as [`place_apple`], drawing indices from `pick`, which must return a
/// value in `0..upper`.
///
/// A handful of rejection-sampled draws cover the common sparse board. After
/// that the free cells are enumerated and one is chosen by index, so a nearly
/// full board still resolves in one pass and a full one reports
/// [`GameError::GameFull`] instead of spinning.
pub fn place_apple_with(
    snake: &VecDeque<Cell>,
    grid: Grid,
    mut pick: impl FnMut(usize) -> usize,
) -> Result<Cell, GameError> {
    let cells = grid.cell_count();
    let mut occupied = vec![false; cells];
    let mut taken = 0;
    for &segment in snake {
        if grid.contains(segment) {
            let idx = grid.index_of(segment);
            if !occupied[idx] {
                occupied[idx] = true;
                taken += 1;
            }
        }
    }

    let free = cells - taken;
    if free == 0 {
        return Err(GameError::GameFull);
    }

    for _ in 0..MAX_RANDOM_DRAWS {
        let idx = pick(cells) % cells;
        if !occupied[idx] {
            return Ok(grid.cell_at(idx));
        }
    }

    let nth = pick(free) % free;
    occupied
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .nth(nth)
        .map(|(idx, _)| grid.cell_at(idx))
        .ok_or(GameError::GameFull)
}

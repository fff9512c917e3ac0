//! Owner of a play session: state, tick timing, input and high score.
//!
//! All mutation happens on the caller's thread. Input handlers only store a
//! pending direction; [`GameController::update`] is the one place that steps
//! the simulation and then draws the committed result.

use macroquad::color::Color;
use tracing::info;

use crate::error::GameError;
use crate::game::{EndReason, GameState, Grid, StepResult, step};
use crate::input::InputRouter;
use crate::render::{self, Surface};
use crate::scheduler::Scheduler;
use crate::score_store::{HighScore, ScoreStore};
use crate::settings::GameSettings;

/// Summary handed to the UI when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub reason: EndReason,
    pub high_score: u32,
}

impl GameOver {
    pub fn message(&self) -> String {
        if self.reason.is_win() {
            format!("You filled the board! Score: {}", self.score)
        } else {
            format!("Game Over! Score: {}", self.score)
        }
    }
}

/// What a call to [`GameController::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No tick was due (or nothing is running); nothing was drawn.
    Waiting,
    /// One tick ran and the surface was redrawn.
    Stepped,
    /// The tick ended the session; the final board was drawn.
    Ended(GameOver),
}

struct Session {
    state: GameState,
    snake_color: Color,
}

pub struct GameController<S: ScoreStore> {
    grid: Grid,
    session: Option<Session>,
    scheduler: Scheduler,
    input: InputRouter,
    high_score: HighScore<S>,
}

impl<S: ScoreStore> GameController<S> {
    pub fn new(grid: Grid, store: S) -> Self {
        Self {
            grid,
            session: None,
            scheduler: Scheduler::new(),
            input: InputRouter::new(),
            high_score: HighScore::new(store),
        }
    }

    /// Discard any previous session and begin a new one at `now_ms`.
    pub fn start(&mut self, settings: GameSettings, now_ms: f64) -> Result<(), GameError> {
        self.stop();
        let settings = settings.validated();
        let state = GameState::new(self.grid, settings.wall_mode, settings.tick_interval_ms, settings.auto_speed)?;
        info!(
            color = settings.snake_color.label(),
            wall_mode = settings.wall_mode.label(),
            interval_ms = settings.tick_interval_ms,
            auto_speed = settings.auto_speed,
            "game started"
        );
        self.session = Some(Session { state, snake_color: settings.snake_color.color() });
        self.scheduler.start(now_ms);
        Ok(())
    }

    /// Halt ticking and drop the session. Does nothing when already stopped.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.input.clear();
        self.session = None;
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn score(&self) -> u32 {
        self.state().map_or(0, |s| s.score)
    }

    pub fn high_score_store(&self) -> &S {
        self.high_score.store()
    }

    /// Forward a directional press. Ignored when no session is running.
    pub fn request_direction(&mut self, dx: i32, dy: i32) -> bool {
        match &self.session {
            Some(session) if self.scheduler.is_running() => self.input.request_direction(&session.state, dx, dy),
            _ => false,
        }
    }

    /// Call once per frame. Runs at most one tick when it is due and draws
    /// the state after it.
    pub fn update(&mut self, now_ms: f64, surface: &mut impl Surface) -> Tick {
        let Some(session) = self.session.as_mut() else {
            return Tick::Waiting;
        };
        if !self.scheduler.poll(now_ms, session.state.tick_interval_ms) {
            return Tick::Waiting;
        }

        self.input.apply(&mut session.state);
        let result = step(&mut session.state);
        render::draw(&session.state, session.snake_color, surface);

        if result.ate_apple {
            self.high_score.record(result.score);
        }
        match self.finish_if_ended(result) {
            Some(over) => Tick::Ended(over),
            None => Tick::Stepped,
        }
    }

    /// Draw the current state without stepping.
    pub fn redraw(&self, surface: &mut impl Surface) {
        if let Some(session) = &self.session {
            render::draw(&session.state, session.snake_color, surface);
        }
    }

    fn finish_if_ended(&mut self, result: StepResult) -> Option<GameOver> {
        let reason = result.end?;
        self.scheduler.stop();
        self.input.clear();
        // The state stays around so the final board can still be drawn.
        let over = GameOver { score: result.score, reason, high_score: self.high_score.best() };
        if over.reason.is_win() {
            info!(score = over.score, "board filled");
        } else {
            info!(score = over.score, ?reason, "game over");
        }
        Some(over)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, WallMode};
    use crate::render::tests::RecordingSurface;
    use crate::score_store::MemoryStore;

    fn controller() -> GameController<MemoryStore> {
        GameController::new(Grid::new(20, 20), MemoryStore::new())
    }

    fn settings(interval: u32) -> GameSettings {
        GameSettings { tick_interval_ms: interval, ..GameSettings::default() }
    }

    #[test]
    fn idle_snake_is_redrawn_every_tick() {
        let mut ctl = controller();
        ctl.start(settings(100), 0.0).unwrap();
        let mut surface = RecordingSurface::default();

        assert_eq!(ctl.update(50.0, &mut surface), Tick::Waiting);
        assert!(surface.fills.is_empty());

        assert_eq!(ctl.update(100.0, &mut surface), Tick::Stepped);
        assert!(!surface.fills.is_empty());
        assert_eq!(ctl.state().unwrap().head(), Cell::new(10, 10));
    }

    #[test]
    fn pending_direction_is_consumed_on_tick() {
        let mut ctl = controller();
        ctl.start(settings(100), 0.0).unwrap();
        let mut surface = RecordingSurface::default();
        assert!(ctl.request_direction(1, 0));
        assert_eq!(ctl.update(100.0, &mut surface), Tick::Stepped);

        let state = ctl.state().unwrap();
        assert_eq!(state.direction, Direction::Right);
        let expected = if state.score == 1 { 2 } else { 1 };
        assert_eq!(state.len(), expected);
        assert_eq!(state.head(), Cell::new(11, 10));
    }

    #[test]
    fn wall_hit_stops_and_reports() {
        let mut ctl = controller();
        ctl.start(settings(100), 0.0).unwrap();
        let mut surface = RecordingSurface::default();
        ctl.request_direction(0, -1);

        let mut over = None;
        let mut now = 0.0;
        for _ in 0..40 {
            now += 100.0;
            if let Tick::Ended(o) = ctl.update(now, &mut surface) {
                over = Some(o);
                break;
            }
        }
        let over = over.expect("snake should reach the top wall");
        assert_eq!(over.reason, EndReason::Wall);
        assert!(!ctl.is_running());
        assert_eq!(ctl.update(now + 1_000.0, &mut surface), Tick::Waiting);
        assert!(!ctl.request_direction(1, 0));
    }

    #[test]
    fn stop_twice_is_fine() {
        let mut ctl = controller();
        ctl.stop();
        ctl.start(settings(100), 0.0).unwrap();
        ctl.stop();
        ctl.stop();
        assert!(!ctl.is_running());
        assert!(ctl.state().is_none());
    }

    #[test]
    fn eating_updates_high_score() {
        let mut ctl = controller();
        ctl.start(settings(100), 0.0).unwrap();
        if let Some(session) = ctl.session.as_mut() {
            session.state.apple = Some(Cell::new(11, 10));
        }
        ctl.request_direction(1, 0);
        ctl.update(100.0, &mut RecordingSurface::default());
        assert_eq!(ctl.score(), 1);
        assert_eq!(ctl.high_score(), 1);
        assert_eq!(ctl.high_score_store().load(), 1);
    }

    #[test]
    fn wrap_session_runs_past_the_edge() {
        let mut ctl = controller();
        let settings = GameSettings { wall_mode: WallMode::Wrap, tick_interval_ms: 50, ..GameSettings::default() };
        ctl.start(settings, 0.0).unwrap();
        ctl.request_direction(-1, 0);
        let mut surface = RecordingSurface::default();
        let mut now = 0.0;
        for _ in 0..25 {
            now += 50.0;
            assert_eq!(ctl.update(now, &mut surface), Tick::Stepped);
        }
        assert!(ctl.is_running());
    }
}

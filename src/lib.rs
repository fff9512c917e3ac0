//! Snake on a 2D canvas.
//!
//! The library holds everything that does not need a window: the grid
//! simulation, direction input, the tick scheduler, drawing onto an abstract
//! surface and the high score store. The binary wires these to macroquad.

pub mod controller;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod scheduler;
pub mod score_store;
pub mod settings;

pub use controller::{GameController, GameOver, Tick};
pub use error::{GameError, StoreError};
pub use game::{Cell, Direction, EndReason, GameState, Grid, StepResult, WallMode};
pub use settings::GameSettings;

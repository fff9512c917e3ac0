//! Grid simulation: state, apple placement and the per-tick step.
//!
//! Nothing in here draws or reads input; the controller feeds it directions
//! and hands the resulting state to a renderer.

pub mod apple;
pub mod simulator;
pub mod state;
pub mod types;

pub use apple::{place_apple, place_apple_with};
pub use simulator::{CollisionPolicy, StepResult, step, step_with_policy};
pub use state::GameState;
pub use types::{Cell, Direction, EndReason, Grid, WallMode};

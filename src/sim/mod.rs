//! Deterministic simulation module
//!
//! Ball physics and pin collisions. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (spawn lanes come from the deck's sequence)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_pin_collision, ball_wall_collision, reflect_velocity};
pub use state::{Ball, BallState, Pin, PinHit, PinKind, SimEvent};
pub use tick::{StepOutcome, spawn_position, step_ball};

//! Game managers
//!
//! Each manager owns one slice of game state. The round manager drives the
//! others through the traits below; concrete managers are injected when it is
//! constructed, so tests can substitute recording doubles.

pub mod balls;
pub mod flow;
pub mod pins;
pub mod player;
pub mod round;
pub mod score;

pub use balls::BallSpawner;
pub use flow::{FlowStep, StageFlow};
pub use pins::PinBoard;
pub use player::{ActiveStatus, Player, PlayerSlot};
pub use round::{RoundManager, RoundState};
pub use score::ScoreManager;

use crate::deck::SpawnSequence;

/// Owns the current player entity
pub trait PlayerManager {
    /// The player, if one has been spawned
    fn current(&self) -> Option<&Player>;
    /// Prepare the player for a new round
    fn reset_player(&mut self);
}

/// Owns the pins on the board
pub trait PinManager {
    /// Stand every pin back up at full hp
    fn reset_all_pins(&mut self);
}

/// Owns ball spawning and ball lifecycle
pub trait BallManager {
    /// Drop live balls and any pending sequence
    fn reset_for_new_round(&mut self);
    /// Take ownership of the balls to spawn this round
    fn prepare_spawn_sequence(&mut self, sequence: SpawnSequence);
    /// Begin releasing balls from the prepared sequence
    fn start_spawning(&mut self);
}

/// Drives stage and round progression
pub trait FlowManager {
    /// The active round has ended (all of its balls are gone)
    fn on_round_finished(&mut self);
}

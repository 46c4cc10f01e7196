//! Pinfall - a stage-and-round ball drop game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, pin collisions)
//! - `deck`: The player's ball deck and per-round spawn sequences
//! - `managers`: Player, pin, ball, score, flow and round managers
//! - `session`: Application context that owns the managers and runs the loop
//! - `settings`: Data-driven tuning, board and stage definitions
//! - `highscores`: Persisted leaderboard of finished runs

pub mod deck;
pub mod error;
pub mod highscores;
pub mod managers;
pub mod session;
pub mod settings;
pub mod sim;
pub mod stage;
pub mod status;

pub use deck::{BallDeck, BallKind, BallSpec, SpawnSequence};
pub use error::{HighScoreError, RoundError, SettingsError};
pub use highscores::HighScores;
pub use session::{GameSession, RunSummary, SessionPhase};
pub use settings::Settings;
pub use stage::{PinLayout, Stage, StageId};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions (origin at bottom-left, y up)
    pub const BOARD_WIDTH: f32 = 360.0;
    pub const BOARD_HEIGHT: f32 = 640.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 480.0;
    /// Maximum ball speed
    pub const BALL_MAX_SPEED: f32 = 900.0;
    /// Balls older than this are drained so a round always ends (20 s)
    pub const MAX_BALL_AGE_TICKS: u32 = 20 * 120;

    /// Pin defaults
    pub const PIN_RADIUS: f32 = 6.0;
    /// Extra outward speed a bumper adds on contact
    pub const BUMPER_KICK: f32 = 160.0;

    /// Ticks between two spawned balls (0.375 s)
    pub const SPAWN_INTERVAL_TICKS: u32 = 45;

    /// Largest pin grid a stage may ask for
    pub const MAX_LAYOUT_DIM: u32 = 64;
}

/// Mix a base seed with two discriminators into a new seed (splitmix64).
///
/// Used to derive independent per-round streams from a single run seed.
#[inline]
pub fn derive_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z = base
        .wrapping_add(a.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(b.wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

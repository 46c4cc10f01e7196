//! Round lifecycle
//!
//! Starting a round resets the player, the pins and the balls in that order,
//! builds a spawn sequence from the player's deck and starts spawning. When
//! the ball manager reports that every ball is gone, the flow manager is told
//! once per round.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{BallManager, FlowManager, PinManager, PlayerManager};
use crate::derive_seed;
use crate::error::RoundError;
use crate::stage::StageId;

/// Which round is being played
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// None until the first round starts
    pub stage: Option<StageId>,
    pub round_index: u32,
    /// True from round start until the finish notification
    pub active: bool,
}

pub struct RoundManager<P, N, B, F> {
    player: P,
    pins: N,
    balls: B,
    flow: F,
    /// Run seed; rounds derive their RNG from it when present
    session_seed: Option<u64>,
    state: RoundState,
}

impl<P, N, B, F> RoundManager<P, N, B, F>
where
    P: PlayerManager,
    N: PinManager,
    B: BallManager,
    F: FlowManager,
{
    pub fn new(player: P, pins: N, balls: B, flow: F) -> Self {
        Self {
            player,
            pins,
            balls,
            flow,
            session_seed: None,
            state: RoundState::default(),
        }
    }

    /// Derive each round's RNG from `seed` instead of fresh entropy
    pub fn with_session_seed(mut self, seed: u64) -> Self {
        self.session_seed = Some(seed);
        self
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Set up and start a round.
    ///
    /// Fails without touching any manager or the round state when no player
    /// is present.
    pub fn start_round(&mut self, stage: StageId, round_index: u32) -> Result<(), RoundError> {
        if self.player.current().is_none() {
            log::error!(
                "Cannot start round {} of stage {}: no player",
                round_index + 1,
                stage
            );
            return Err(RoundError::MissingPlayer { stage, round_index });
        }

        self.state = RoundState {
            stage: Some(stage),
            round_index,
            active: true,
        };

        self.player.reset_player();
        self.pins.reset_all_pins();
        self.balls.reset_for_new_round();

        let mut rng = self.round_rng(stage, round_index);
        let sequence = match self.player.current() {
            Some(player) => player.deck.build_spawn_sequence(&mut rng),
            None => {
                // reset_player removed the player
                self.state.active = false;
                log::error!("Player vanished while starting round {}", round_index + 1);
                return Err(RoundError::MissingPlayer { stage, round_index });
            }
        };
        if sequence.is_empty() {
            log::warn!("Player deck is empty; round {} will end at once", round_index + 1);
        }

        log::info!(
            "Round {} of stage {} started with {} balls",
            round_index + 1,
            stage,
            sequence.len()
        );
        self.balls.prepare_spawn_sequence(sequence);
        self.balls.start_spawning();
        Ok(())
    }

    /// Signal that the last ball of the round is gone.
    ///
    /// Forwards to the flow manager only for an active round; returns whether
    /// it did. Repeated calls within a round are no-ops.
    pub fn notify_all_balls_destroyed(&mut self) -> bool {
        if !self.state.active {
            log::debug!("All-balls-destroyed ignored: no active round");
            return false;
        }
        self.state.active = false;
        log::info!("Round {} finished", self.state.round_index + 1);
        self.flow.on_round_finished();
        true
    }

    fn round_rng(&self, stage: StageId, round_index: u32) -> Pcg32 {
        match self.session_seed {
            Some(seed) => {
                let round_seed = derive_seed(seed, u64::from(stage.0), u64::from(round_index));
                log::debug!("Round RNG derived from session seed: {}", round_seed);
                Pcg32::seed_from_u64(round_seed)
            }
            None => {
                log::debug!("No session seed; using a fresh round RNG");
                Pcg32::from_rng(&mut rand::rng())
            }
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn pins(&self) -> &N {
        &self.pins
    }

    pub fn balls(&self) -> &B {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut B {
        &mut self.balls
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut F {
        &mut self.flow
    }

    /// Balls and pins together, for stepping the simulation
    pub fn balls_and_pins_mut(&mut self) -> (&mut B, &mut N) {
        (&mut self.balls, &mut self.pins)
    }

    pub fn pins_mut(&mut self) -> &mut N {
        &mut self.pins
    }
}

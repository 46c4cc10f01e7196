//! Game session
//!
//! The application context: owns every manager for the lifetime of a run,
//! runs the fixed-timestep loop and applies stage progression and rewards.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::deck::{BallDeck, BallKind};
use crate::derive_seed;
use crate::error::{RoundError, SettingsError};
use crate::managers::{
    BallSpawner, FlowStep, PinBoard, Player, PlayerManager, PlayerSlot, RoundManager,
    ScoreManager, StageFlow,
};
use crate::settings::Settings;
use crate::sim::SimEvent;
use crate::stage::StageId;
use crate::status::{self, StatusId};

/// Round manager wired with the concrete managers
pub type SessionRounds = RoundManager<PlayerSlot, PinBoard, BallSpawner, StageFlow>;

/// Where the run is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, first round not started
    Ready,
    /// A round is in play
    InRound,
    /// Every stage cleared
    Victory,
    /// A stage target was missed
    GameOver,
}

/// Stage clear reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    ExtraBall(BallKind),
    Status(StatusId),
}

/// Ball kinds offered as rewards
const REWARD_BALLS: [BallKind; 3] = [BallKind::Heavy, BallKind::Bouncy, BallKind::Golden];

/// Stream discriminator for the reward RNG (round RNGs use stage ids)
const REWARD_STREAM: u64 = u64::MAX;

/// Result of a finished (or abandoned) run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub score: u64,
    pub stages_cleared: u32,
    pub rounds_played: u32,
    pub pins_knocked: u32,
    pub best_combo: u32,
    pub victory: bool,
    /// False when the tick limit stopped the run early
    pub completed: bool,
    pub ticks: u64,
    pub rewards: Vec<Reward>,
}

pub struct GameSession {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    rounds: SessionRounds,
    score: ScoreManager,
    phase: SessionPhase,
    accumulator: f32,
    time_ticks: u64,
    stages_cleared: u32,
    rewards: Vec<Reward>,
}

impl GameSession {
    /// Create a session, spawn the player and load the first stage
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut player = PlayerSlot::new();
        player.spawn(Player::new(
            settings.player_name.clone(),
            BallDeck::new(settings.starting_deck.iter().copied()),
        ));

        let mut pins = PinBoard::new();
        pins.load_layout(&settings.stages[0].layout, &settings.board);

        let flow = StageFlow::new(settings.stages.clone());
        let rounds =
            RoundManager::new(player, pins, BallSpawner::new(), flow).with_session_seed(seed);

        log::info!("Session created with seed {}", seed);
        Ok(Self {
            rng: Pcg32::seed_from_u64(derive_seed(seed, REWARD_STREAM, 0)),
            settings,
            seed,
            rounds,
            score: ScoreManager::new(),
            phase: SessionPhase::Ready,
            accumulator: 0.0,
            time_ticks: 0,
            stages_cleared: 0,
            rewards: Vec::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Victory | SessionPhase::GameOver)
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn rounds(&self) -> &SessionRounds {
        &self.rounds
    }

    pub fn rounds_mut(&mut self) -> &mut SessionRounds {
        &mut self.rounds
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Start the round the flow manager points at
    pub fn begin_round(&mut self) -> Result<(), RoundError> {
        let flow = self.rounds.flow();
        let (stage, round_index) = (flow.current_stage(), flow.round_index());
        self.score.begin_round();
        self.rounds.start_round(stage, round_index)?;
        self.phase = SessionPhase::InRound;
        Ok(())
    }

    /// Remove every ball of the current round without scoring drains
    ///
    /// The round then ends on the next step like any other.
    pub fn drain_all(&mut self) -> usize {
        if self.phase != SessionPhase::InRound {
            return 0;
        }
        let removed = self.rounds.balls_mut().drain_all();
        log::info!("Drained {} balls by hand", removed);
        removed
    }

    /// Advance by a frame's worth of time using fixed substeps
    pub fn update(&mut self, frame_dt: f32) -> Result<(), RoundError> {
        let dt = frame_dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step()?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(())
    }

    /// Advance the simulation by one fixed step
    pub fn step(&mut self) -> Result<(), RoundError> {
        if self.phase != SessionPhase::InRound {
            return Ok(());
        }
        self.time_ticks += 1;

        let status_pct = self
            .rounds
            .player()
            .current()
            .map(|p| p.score_multiplier_pct())
            .unwrap_or(100);

        let events = {
            let (balls, pins) = self.rounds.balls_and_pins_mut();
            balls.tick(pins, &self.settings.physics, &self.settings.board, SIM_DT)
        };

        for event in events {
            match event {
                SimEvent::PinHit(hit) => {
                    let multiplier = hit.ball_multiplier_pct * status_pct / 100;
                    self.score.record_hit(hit.points, multiplier, hit.knocked);
                }
                SimEvent::BallDrained { .. } => self.score.record_drain(),
                SimEvent::BallSpawned { .. } => {}
                SimEvent::AllBallsDestroyed => {
                    if self.rounds.notify_all_balls_destroyed() {
                        self.advance()?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Act on the flow decision after a round has finished
    fn advance(&mut self) -> Result<(), RoundError> {
        log::info!(
            "Round scored {} (stage {}, total {})",
            self.score.round_score(),
            self.score.stage_score(),
            self.score.total()
        );

        let step = self.rounds.flow_mut().resolve(self.score.stage_score());
        match step {
            FlowStep::Pending => {
                log::warn!("Round finished but flow had nothing to resolve");
            }
            FlowStep::NextRound { .. } => self.begin_round()?,
            FlowStep::StageCleared { next_stage, .. } => {
                self.stages_cleared += 1;
                self.grant_reward();
                self.enter_stage(next_stage);
                self.begin_round()?;
            }
            FlowStep::Victory => {
                self.stages_cleared += 1;
                log::info!("Victory! Final score {}", self.score.total());
                self.phase = SessionPhase::Victory;
            }
            FlowStep::GameOver => {
                log::info!("Game over. Final score {}", self.score.total());
                self.phase = SessionPhase::GameOver;
            }
        }
        Ok(())
    }

    fn enter_stage(&mut self, stage: StageId) {
        self.score.begin_stage();
        let Some(layout) = self.rounds.flow().stage(stage).map(|s| s.layout.clone()) else {
            log::error!("Stage {} is not defined", stage);
            return;
        };
        self.rounds
            .pins_mut()
            .load_layout(&layout, &self.settings.board);
        if let Some(def) = self.rounds.flow().stage(stage) {
            log::info!("Entering stage {} ({})", stage, def.name);
        }
    }

    /// Roll a stage reward and give it to the player
    fn grant_reward(&mut self) {
        let reward = if self.rng.random_bool(0.5) {
            let kind = REWARD_BALLS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or_default();
            Reward::ExtraBall(kind)
        } else {
            let id = status::STATUS_TABLE
                .choose(&mut self.rng)
                .map(|e| e.id)
                .unwrap_or(status::STEADY_AIM);
            Reward::Status(id)
        };

        let Some(player) = self.rounds.player_mut().current_mut() else {
            log::warn!("No player to receive {:?}", reward);
            return;
        };
        match reward {
            Reward::ExtraBall(kind) => {
                player.deck.add(kind);
                log::info!("Reward: extra {} ball", kind.as_str());
            }
            Reward::Status(id) => {
                player.grant_status(id);
                log::info!("Reward: {}", status::name_of(id));
            }
        }
        self.rewards.push(reward);
    }

    /// Play until the run ends or `max_ticks` steps have run
    pub fn run(&mut self, max_ticks: u64) -> Result<RunSummary, RoundError> {
        if self.phase == SessionPhase::Ready {
            self.begin_round()?;
        }
        while !self.is_finished() && self.time_ticks < max_ticks {
            self.step()?;
        }
        if !self.is_finished() {
            log::warn!("Run stopped at the {} tick limit", max_ticks);
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            score: self.score.total(),
            stages_cleared: self.stages_cleared,
            rounds_played: self.rounds.flow().rounds_finished(),
            pins_knocked: self.score.pins_knocked(),
            best_combo: self.score.best_combo(),
            victory: self.phase == SessionPhase::Victory,
            completed: self.is_finished(),
            ticks: self.time_ticks,
            rewards: self.rewards.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{PinLayout, Stage};

    fn one_stage(target_score: u64, rounds: u32) -> Settings {
        Settings {
            stages: vec![Stage {
                name: "Test".to_string(),
                rounds,
                target_score,
                layout: PinLayout {
                    rows: 4,
                    cols: 5,
                    bumper_every: 0,
                    gold_row: None,
                },
            }],
            starting_deck: vec![BallKind::Standard; 2],
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_is_ready() {
        let session = GameSession::new(Settings::default(), 1).unwrap();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.rounds().player().current().is_some());
        assert!(!session.rounds().pins().is_empty());
        assert!(!session.rounds().is_active());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            stages: Vec::new(),
            ..Default::default()
        };
        assert!(GameSession::new(settings, 1).is_err());

        let mut narrow = Settings::default();
        narrow.board.width = 15.0;
        narrow.starting_deck = vec![BallKind::Heavy];
        assert!(matches!(
            GameSession::new(narrow, 1),
            Err(SettingsError::BoardTooNarrow { .. })
        ));
    }

    #[test]
    fn test_step_before_begin_does_nothing() {
        let mut session = GameSession::new(Settings::default(), 1).unwrap();
        session.step().unwrap();
        assert_eq!(session.time_ticks(), 0);
    }

    #[test]
    fn test_zero_target_stage_is_victory() {
        let mut session = GameSession::new(one_stage(0, 2), 5).unwrap();
        let summary = session.run(100_000).unwrap();
        assert!(summary.victory);
        assert!(summary.completed);
        assert_eq!(summary.rounds_played, 2);
        assert_eq!(summary.stages_cleared, 1);
    }

    #[test]
    fn test_unreachable_target_is_game_over() {
        let mut session = GameSession::new(one_stage(u64::MAX, 1), 5).unwrap();
        let summary = session.run(100_000).unwrap();
        assert!(!summary.victory);
        assert!(summary.completed);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(summary.rounds_played, 1);
    }

    #[test]
    fn test_tick_limit_stops_early() {
        let mut session = GameSession::new(Settings::default(), 5).unwrap();
        let summary = session.run(10).unwrap();
        assert!(!summary.completed);
        assert_eq!(summary.ticks, 10);
        assert_eq!(session.phase(), SessionPhase::InRound);
    }

    #[test]
    fn test_update_runs_fixed_substeps() {
        let mut session = GameSession::new(Settings::default(), 5).unwrap();
        session.begin_round().unwrap();
        // Long frames are capped
        session.update(1.0).unwrap();
        assert_eq!(session.time_ticks(), u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_stage_clear_grants_reward() {
        let mut settings = one_stage(0, 1);
        let second = settings.stages[0].clone();
        settings.stages.push(second);

        let mut session = GameSession::new(settings, 11).unwrap();
        let summary = session.run(100_000).unwrap();
        assert!(summary.victory);
        assert_eq!(summary.stages_cleared, 2);
        // Only the first clear leads to another stage
        assert_eq!(summary.rewards.len(), 1);
    }

    #[test]
    fn test_drain_all_ends_round_once() {
        let mut session = GameSession::new(one_stage(0, 2), 5).unwrap();
        assert_eq!(session.drain_all(), 0);

        session.begin_round().unwrap();
        session.step().unwrap();
        assert_eq!(session.rounds().balls().balls().len(), 1);

        assert_eq!(session.drain_all(), 1);
        session.step().unwrap();
        // Round 0 ended and round 1 started in its place
        assert_eq!(session.rounds().flow().rounds_finished(), 1);
        assert_eq!(session.rounds().flow().round_index(), 1);
        assert!(session.rounds().is_active());
        assert_eq!(session.score().pins_knocked(), 0);

        for _ in 0..5 {
            session.step().unwrap();
        }
        assert_eq!(session.rounds().flow().rounds_finished(), 1);
    }

    #[test]
    fn test_drain_all_on_last_round_finishes_run() {
        let mut session = GameSession::new(one_stage(0, 1), 5).unwrap();
        session.begin_round().unwrap();
        session.step().unwrap();
        session.drain_all();
        session.step().unwrap();
        assert_eq!(session.phase(), SessionPhase::Victory);

        assert_eq!(session.drain_all(), 0);
        session.step().unwrap();
        assert_eq!(session.summary().rounds_played, 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameSession::new(Settings::default(), 2024).unwrap();
        let mut b = GameSession::new(Settings::default(), 2024).unwrap();
        assert_eq!(a.run(200_000).unwrap(), b.run(200_000).unwrap());
    }
}

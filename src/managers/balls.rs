//! Ball spawning and lifecycle
//!
//! Releases the round's spawn sequence one ball at a time, steps live balls
//! through the pin field and reports when the last one is gone.

use super::BallManager;
use super::pins::PinBoard;
use crate::deck::SpawnSequence;
use crate::settings::{BoardSettings, PhysicsSettings};
use crate::sim::{Ball, SimEvent, spawn_position, step_ball};

#[derive(Debug, Clone, Default)]
pub struct BallSpawner {
    /// Balls not yet released
    queue: SpawnSequence,
    /// Live balls (sorted by id for determinism)
    balls: Vec<Ball>,
    spawning: bool,
    /// Ticks until the next release
    cooldown_ticks: u32,
    /// Set once AllBallsDestroyed has been emitted for the current round
    reported_empty: bool,
    next_id: u32,
}

impl BallSpawner {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Balls still waiting to be released
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Remove a live ball without waiting for it to drain
    ///
    /// Returns false if no ball has that id.
    pub fn destroy_ball(&mut self, id: u32) -> bool {
        let before = self.balls.len();
        self.balls.retain(|b| b.id != id);
        self.balls.len() != before
    }

    /// Remove every live ball and drop the rest of the sequence
    ///
    /// The next tick reports AllBallsDestroyed if spawning had started.
    /// Returns how many live balls were removed.
    pub fn drain_all(&mut self) -> usize {
        let removed = self.balls.len();
        self.balls.clear();
        self.queue = SpawnSequence::default();
        removed
    }

    /// Advance spawning and every live ball by one fixed step
    pub fn tick(
        &mut self,
        pins: &mut PinBoard,
        physics: &PhysicsSettings,
        board: &BoardSettings,
        dt: f32,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if !self.spawning {
            return events;
        }

        // Release the next ball
        self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
        if self.cooldown_ticks == 0 {
            if let Some(spec) = self.queue.pop_next() {
                let id = self.next_entity_id();
                let ball = Ball::from_spec(id, &spec, spawn_position(&spec, board));
                log::debug!("Spawned {} ball {} at x={:.1}", spec.kind.as_str(), id, ball.pos.x);
                events.push(SimEvent::BallSpawned {
                    ball_id: id,
                    kind: spec.kind,
                });
                self.balls.push(ball);
                self.cooldown_ticks = physics.spawn_interval_ticks;
            }
        }

        for ball in &mut self.balls {
            let outcome = step_ball(ball, pins.pins_mut(), physics, board, dt);
            events.extend(outcome.hits.into_iter().map(SimEvent::PinHit));
            if outcome.drained {
                events.push(SimEvent::BallDrained { ball_id: ball.id });
            }
        }
        self.balls.retain(|b| b.is_falling());

        if self.queue.is_empty() && self.balls.is_empty() && !self.reported_empty {
            self.reported_empty = true;
            events.push(SimEvent::AllBallsDestroyed);
        }

        events
    }
}

impl BallManager for BallSpawner {
    fn reset_for_new_round(&mut self) {
        self.balls.clear();
        self.queue = SpawnSequence::default();
        self.spawning = false;
        self.cooldown_ticks = 0;
        self.reported_empty = false;
    }

    fn prepare_spawn_sequence(&mut self, sequence: SpawnSequence) {
        log::debug!("Prepared spawn sequence of {} balls", sequence.len());
        self.queue = sequence;
    }

    fn start_spawning(&mut self) {
        self.spawning = true;
        self.cooldown_ticks = 0;
    }
}

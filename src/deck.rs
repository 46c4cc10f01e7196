//! Ball deck and spawn sequences
//!
//! The deck is the multiset of balls the player owns. Each round it is
//! shuffled into a spawn sequence that the ball manager consumes in order.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_RADIUS;

/// Ball types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BallKind {
    #[default]
    Standard,
    /// Larger, falls faster, hits for double damage
    Heavy,
    /// Smaller, keeps most of its speed on contact
    Bouncy,
    /// Scores double
    Golden,
}

impl BallKind {
    pub const ALL: [BallKind; 4] = [
        BallKind::Standard,
        BallKind::Heavy,
        BallKind::Bouncy,
        BallKind::Golden,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BallKind::Standard => "Standard",
            BallKind::Heavy => "Heavy",
            BallKind::Bouncy => "Bouncy",
            BallKind::Golden => "Golden",
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            BallKind::Standard | BallKind::Golden => BALL_RADIUS,
            BallKind::Heavy => BALL_RADIUS * 1.25,
            BallKind::Bouncy => BALL_RADIUS * 0.9,
        }
    }

    /// Radius of the largest kind
    pub fn max_radius() -> f32 {
        Self::ALL.iter().map(|k| k.radius()).fold(0.0, f32::max)
    }

    /// Multiplier on board gravity
    pub fn gravity_scale(&self) -> f32 {
        match self {
            BallKind::Heavy => 1.4,
            BallKind::Bouncy => 0.85,
            _ => 1.0,
        }
    }

    /// Fraction of speed kept when bouncing off a pin
    pub fn restitution(&self) -> f32 {
        match self {
            BallKind::Heavy => 0.35,
            BallKind::Bouncy => 0.85,
            _ => 0.55,
        }
    }

    /// Damage dealt to a pin per contact
    pub fn damage(&self) -> u8 {
        match self {
            BallKind::Heavy => 2,
            _ => 1,
        }
    }

    /// Score multiplier in percent
    pub fn score_multiplier_pct(&self) -> u32 {
        match self {
            BallKind::Golden => 200,
            _ => 100,
        }
    }
}

/// Descriptor for one ball in a spawn sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    pub kind: BallKind,
    /// Horizontal spawn position as a fraction of board width, in [0, 1)
    pub spawn_lane: f32,
}

/// Spawn lanes stay away from the walls
const LANE_MIN: f32 = 0.08;
const LANE_MAX: f32 = 0.92;

/// Ordered balls to introduce during one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnSequence {
    specs: VecDeque<BallSpec>,
}

impl SpawnSequence {
    pub fn new(specs: impl IntoIterator<Item = BallSpec>) -> Self {
        Self {
            specs: specs.into_iter().collect(),
        }
    }

    /// Take the next ball to spawn
    pub fn pop_next(&mut self) -> Option<BallSpec> {
        self.specs.pop_front()
    }

    pub fn peek(&self) -> Option<&BallSpec> {
        self.specs.front()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BallSpec> {
        self.specs.iter()
    }
}

/// The player's ball collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BallDeck {
    balls: Vec<BallKind>,
}

impl BallDeck {
    pub fn new(balls: impl IntoIterator<Item = BallKind>) -> Self {
        Self {
            balls: balls.into_iter().collect(),
        }
    }

    /// Add a ball (stage rewards)
    pub fn add(&mut self, kind: BallKind) {
        self.balls.push(kind);
    }

    /// Remove one ball of the given kind; false if the deck has none
    pub fn remove(&mut self, kind: BallKind) -> bool {
        match self.balls.iter().position(|k| *k == kind) {
            Some(i) => {
                self.balls.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn count(&self, kind: BallKind) -> usize {
        self.balls.iter().filter(|k| **k == kind).count()
    }

    /// Shuffle the deck into a spawn sequence.
    ///
    /// The sequence is a permutation of the deck; every ball also draws its
    /// spawn lane from `rng`, so the same seed yields the same sequence.
    pub fn build_spawn_sequence<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSequence {
        let mut order = self.balls.clone();
        order.shuffle(rng);
        SpawnSequence::new(order.into_iter().map(|kind| BallSpec {
            kind,
            spawn_lane: rng.random_range(LANE_MIN..LANE_MAX),
        }))
    }
}

//! Simulation entities
//!
//! Balls and pins, plus the events a simulation step produces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::deck::{BallKind, BallSpec};

/// Ball state - in play or drained off the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Ball is falling through the pin field
    Falling,
    /// Ball left the board (or timed out) and awaits removal
    Drained,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub kind: BallKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
    /// Pin contacts so far
    pub hits: u32,
    /// Ticks since spawn
    pub age_ticks: u32,
}

impl Ball {
    /// Create a ball from its spawn descriptor at the given position
    pub fn from_spec(id: u32, spec: &BallSpec, pos: Vec2) -> Self {
        Self {
            id,
            kind: spec.kind,
            pos,
            vel: Vec2::ZERO,
            radius: spec.kind.radius(),
            state: BallState::Falling,
            hits: 0,
            age_ticks: 0,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.state == BallState::Falling
    }
}

/// Pin types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinKind {
    #[default]
    Standard,
    /// Kicks the ball away, takes three hits
    Bumper,
    /// High value, takes two hits
    Gold,
}

impl PinKind {
    pub fn max_hp(&self) -> u8 {
        match self {
            PinKind::Standard => 1,
            PinKind::Bumper => 3,
            PinKind::Gold => 2,
        }
    }

    /// Points per contact
    pub fn hit_points(&self) -> u64 {
        match self {
            PinKind::Standard => 10,
            PinKind::Bumper => 5,
            PinKind::Gold => 40,
        }
    }

    /// Extra points when the pin goes down
    pub fn knock_bonus(&self) -> u64 {
        match self {
            PinKind::Standard => 0,
            PinKind::Bumper => 25,
            PinKind::Gold => 100,
        }
    }
}

/// A pin entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub id: u32,
    pub kind: PinKind,
    pub pos: Vec2,
    pub radius: f32,
    pub hp: u8,
}

impl Pin {
    pub fn new(id: u32, kind: PinKind, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            radius,
            hp: kind.max_hp(),
        }
    }

    pub fn is_standing(&self) -> bool {
        self.hp > 0
    }

    /// Stand the pin back up at full hp
    pub fn restore(&mut self) {
        self.hp = self.kind.max_hp();
    }

    /// Apply damage; returns true if this knocked the pin down
    pub fn damage(&mut self, amount: u8) -> bool {
        if self.hp == 0 {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }
}

/// A ball striking a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinHit {
    pub pin_id: u32,
    pub ball_id: u32,
    pub pin_kind: PinKind,
    /// Unmultiplied points for this contact (includes knock bonus)
    pub points: u64,
    /// Ball score multiplier in percent
    pub ball_multiplier_pct: u32,
    pub knocked: bool,
}

/// Events emitted by the ball manager during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    BallSpawned { ball_id: u32, kind: BallKind },
    PinHit(PinHit),
    BallDrained { ball_id: u32 },
    /// Spawning finished and the last ball is gone
    AllBallsDestroyed,
}

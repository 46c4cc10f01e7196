//! Game settings and tuning
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::deck::BallKind;
use crate::error::SettingsError;
use crate::stage::Stage;

/// Ball physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Speed cap (pixels/s)
    pub max_speed: f32,
    /// Extra speed added by bumper pins
    pub bumper_kick: f32,
    /// Ticks between spawned balls
    pub spawn_interval_ticks: u32,
    /// Balls older than this drain automatically
    pub max_ball_age_ticks: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_speed: BALL_MAX_SPEED,
            bumper_kick: BUMPER_KICK,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            max_ball_age_ticks: MAX_BALL_AGE_TICKS,
        }
    }
}

/// Board geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub width: f32,
    pub height: f32,
    pub pin_radius: f32,
    /// Empty band above the top pin row (balls spawn here)
    pub margin_top: f32,
    /// Empty band below the bottom pin row
    pub margin_bottom: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            pin_radius: PIN_RADIUS,
            margin_top: 80.0,
            margin_bottom: 60.0,
        }
    }
}

impl BoardSettings {
    /// Height at which new balls appear
    pub fn spawn_height(&self) -> f32 {
        self.height - self.margin_top / 2.0
    }
}

/// Complete game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player_name: String,
    pub physics: PhysicsSettings,
    pub board: BoardSettings,
    pub stages: Vec<Stage>,
    pub starting_deck: Vec<BallKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            physics: PhysicsSettings::default(),
            board: BoardSettings::default(),
            stages: Stage::default_run(),
            starting_deck: vec![
                BallKind::Standard,
                BallKind::Standard,
                BallKind::Standard,
                BallKind::Standard,
                BallKind::Heavy,
                BallKind::Bouncy,
            ],
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} stages)",
            path.display(),
            settings.stages.len()
        );
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.stages.is_empty() {
            return Err(SettingsError::NoStages);
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.rounds == 0 {
                return Err(SettingsError::NoRounds {
                    stage: i,
                    name: stage.name.clone(),
                });
            }
            if stage.layout.rows == 0 || stage.layout.cols == 0 {
                return Err(SettingsError::EmptyLayout {
                    stage: i,
                    name: stage.name.clone(),
                });
            }
            if stage.layout.rows > MAX_LAYOUT_DIM || stage.layout.cols > MAX_LAYOUT_DIM {
                return Err(SettingsError::LayoutTooLarge {
                    stage: i,
                    name: stage.name.clone(),
                    max: MAX_LAYOUT_DIM,
                });
            }
        }
        if self.starting_deck.is_empty() {
            return Err(SettingsError::EmptyDeck);
        }

        let positive = [
            ("board.width", self.board.width),
            ("board.height", self.board.height),
            ("board.pin_radius", self.board.pin_radius),
            ("physics.gravity", self.physics.gravity),
            ("physics.max_speed", self.physics.max_speed),
        ];
        for (field, value) in positive {
            // Written so NaN fails too
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if self.physics.max_ball_age_ticks == 0 {
            return Err(SettingsError::NonPositive {
                field: "physics.max_ball_age_ticks",
                value: 0.0,
            });
        }

        // Every ball must fit between the side walls
        let needed = 2.0 * BallKind::max_radius();
        if self.board.width <= needed {
            return Err(SettingsError::BoardTooNarrow {
                width: self.board.width,
                needed,
            });
        }
        let margins = self.board.margin_top + self.board.margin_bottom;
        if !(self.board.margin_top >= 0.0 && self.board.margin_bottom >= 0.0)
            || margins >= self.board.height
        {
            return Err(SettingsError::MarginsTooLarge {
                margins,
                height: self.board.height,
            });
        }
        Ok(())
    }
}

//! Stage definitions
//!
//! A stage is a fixed number of rounds played on one pin layout. The run
//! advances to the next stage when the stage score reaches its target.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a stage (its index in the run's stage list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(pub u32);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// Pin grid for a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinLayout {
    pub rows: u32,
    pub cols: u32,
    /// Every n-th pin is a bumper (0 = no bumpers)
    #[serde(default)]
    pub bumper_every: u32,
    /// Row index whose pins are gold
    #[serde(default)]
    pub gold_row: Option<u32>,
}

impl Default for PinLayout {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 9,
            bumper_every: 0,
            gold_row: None,
        }
    }
}

/// A stage definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    /// Rounds played before the stage is scored
    pub rounds: u32,
    /// Stage score required to advance
    pub target_score: u64,
    #[serde(default)]
    pub layout: PinLayout,
}

impl Stage {
    /// The default three-stage run
    pub fn default_run() -> Vec<Stage> {
        vec![
            Stage {
                name: "Meadow".to_string(),
                rounds: 2,
                target_score: 300,
                layout: PinLayout {
                    rows: 7,
                    cols: 8,
                    bumper_every: 0,
                    gold_row: None,
                },
            },
            Stage {
                name: "Quarry".to_string(),
                rounds: 3,
                target_score: 700,
                layout: PinLayout {
                    rows: 9,
                    cols: 9,
                    bumper_every: 7,
                    gold_row: Some(4),
                },
            },
            Stage {
                name: "Summit".to_string(),
                rounds: 3,
                target_score: 1200,
                layout: PinLayout {
                    rows: 11,
                    cols: 10,
                    bumper_every: 5,
                    gold_row: Some(2),
                },
            },
        ]
    }
}

//! Stage and round progression

use super::FlowManager;
use crate::stage::{Stage, StageId};

/// What the run does after a round has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// No round has finished since the last resolve
    Pending,
    /// Play the next round of the same stage
    NextRound { stage: StageId, round_index: u32 },
    /// Stage target reached; continue on the next stage
    StageCleared { cleared: StageId, next_stage: StageId },
    /// Last stage cleared
    Victory,
    /// Stage target missed
    GameOver,
}

/// Walks the run's stage list
#[derive(Debug, Clone)]
pub struct StageFlow {
    stages: Vec<Stage>,
    stage_index: usize,
    round_index: u32,
    round_finished: bool,
    rounds_finished: u32,
    finished: bool,
}

impl StageFlow {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            stage_index: 0,
            round_index: 0,
            round_finished: false,
            rounds_finished: 0,
            finished: false,
        }
    }

    pub fn current_stage(&self) -> StageId {
        StageId(self.stage_index as u32)
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.get(id.0 as usize)
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    /// Rounds finished over the whole run
    pub fn rounds_finished(&self) -> u32 {
        self.rounds_finished
    }

    /// True once the run has reached victory or game over
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Decide what follows the finished round and advance the cursor
    pub fn resolve(&mut self, stage_score: u64) -> FlowStep {
        if !self.round_finished || self.finished {
            return FlowStep::Pending;
        }
        self.round_finished = false;

        let Some(stage) = self.stages.get(self.stage_index) else {
            self.finished = true;
            return FlowStep::GameOver;
        };

        if self.round_index + 1 < stage.rounds {
            self.round_index += 1;
            return FlowStep::NextRound {
                stage: self.current_stage(),
                round_index: self.round_index,
            };
        }

        if stage_score < stage.target_score {
            log::info!(
                "Stage {} failed: {} of {} points",
                stage.name,
                stage_score,
                stage.target_score
            );
            self.finished = true;
            return FlowStep::GameOver;
        }

        log::info!("Stage {} cleared with {} points", stage.name, stage_score);
        let cleared = self.current_stage();
        if self.stage_index + 1 >= self.stages.len() {
            self.finished = true;
            return FlowStep::Victory;
        }
        self.stage_index += 1;
        self.round_index = 0;
        FlowStep::StageCleared {
            cleared,
            next_stage: self.current_stage(),
        }
    }
}

impl FlowManager for StageFlow {
    fn on_round_finished(&mut self) {
        self.round_finished = true;
        self.rounds_finished += 1;
    }
}

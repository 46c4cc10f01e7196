//! Score keeping for rounds, stages and the whole run

use serde::{Deserialize, Serialize};

/// Combo steps that add bonus (each step is +10%)
const MAX_COMBO_STEPS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreManager {
    round: u64,
    stage: u64,
    total: u64,
    combo: u32,
    best_combo: u32,
    pins_knocked: u32,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting a new stage
    pub fn begin_stage(&mut self) {
        self.stage = 0;
    }

    /// Start counting a new round
    pub fn begin_round(&mut self) {
        self.round = 0;
        self.combo = 0;
    }

    /// Score a pin hit and return the points awarded
    ///
    /// `multiplier_pct` combines ball and status multipliers. Every hit since
    /// the last drain adds 10% on top, up to +100%.
    pub fn record_hit(&mut self, points: u64, multiplier_pct: u32, knocked: bool) -> u64 {
        let base = points * u64::from(multiplier_pct) / 100;
        let bonus = base * u64::from(self.combo).min(MAX_COMBO_STEPS) / 10;
        let awarded = base + bonus;

        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        if knocked {
            self.pins_knocked += 1;
        }
        self.round += awarded;
        self.stage += awarded;
        self.total += awarded;
        awarded
    }

    /// A ball left the board; the combo breaks
    pub fn record_drain(&mut self) {
        self.combo = 0;
    }

    pub fn round_score(&self) -> u64 {
        self.round
    }

    pub fn stage_score(&self) -> u64 {
        self.stage
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn pins_knocked(&self) -> u32 {
        self.pins_knocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_bonus_grows_and_breaks() {
        let mut score = ScoreManager::new();
        assert_eq!(score.record_hit(10, 100, true), 10);
        assert_eq!(score.record_hit(10, 100, true), 11);
        assert_eq!(score.record_hit(10, 100, false), 12);
        score.record_drain();
        assert_eq!(score.record_hit(10, 100, true), 10);
        assert_eq!(score.best_combo(), 3);
        assert_eq!(score.pins_knocked(), 3);
        assert_eq!(score.total(), 43);
    }

    #[test]
    fn test_combo_bonus_caps() {
        let mut score = ScoreManager::new();
        let mut last = 0;
        for _ in 0..20 {
            last = score.record_hit(10, 100, false);
        }
        assert_eq!(last, 20);
    }

    #[test]
    fn test_multiplier_applies() {
        let mut score = ScoreManager::new();
        assert_eq!(score.record_hit(40, 250, false), 100);
    }

    #[test]
    fn test_round_and_stage_windows() {
        let mut score = ScoreManager::new();
        score.record_hit(10, 100, false);
        score.begin_round();
        score.record_hit(10, 100, false);
        assert_eq!(score.round_score(), 10);
        assert_eq!(score.stage_score(), 20);

        score.begin_stage();
        score.begin_round();
        assert_eq!(score.stage_score(), 0);
        assert_eq!(score.round_score(), 0);
        assert_eq!(score.total(), 20);
    }
}

//! Player entity and the slot that owns it

use serde::{Deserialize, Serialize};

use super::PlayerManager;
use crate::deck::BallDeck;
use crate::status::{self, StatusId};

/// A status held by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub id: StatusId,
    /// Rounds left to apply, counted down at each round reset (None = permanent)
    pub rounds_left: Option<u32>,
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub deck: BallDeck,
    pub statuses: Vec<ActiveStatus>,
    pub rounds_played: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, deck: BallDeck) -> Self {
        Self {
            name: name.into(),
            deck,
            statuses: Vec::new(),
            rounds_played: 0,
        }
    }

    /// Grant a status from the status table.
    ///
    /// Granting a status the player already holds refreshes its duration.
    /// Returns false for ids that are not in the table.
    pub fn grant_status(&mut self, id: StatusId) -> bool {
        let Some(entry) = status::lookup(id) else {
            log::warn!("Cannot grant unknown status {}", id);
            return false;
        };
        let granted = ActiveStatus {
            id,
            rounds_left: entry.duration_rounds,
        };
        match self.statuses.iter_mut().find(|s| s.id == id) {
            Some(existing) => *existing = granted,
            None => self.statuses.push(granted),
        }
        true
    }

    pub fn has_status(&self, id: StatusId) -> bool {
        self.statuses.iter().any(|s| s.id == id)
    }

    /// Score multiplier (percent) from all held statuses
    pub fn score_multiplier_pct(&self) -> u32 {
        status::score_multiplier_pct(self.statuses.iter().map(|s| s.id))
    }

    /// Count down timed statuses; ones with nothing left expire
    fn tick_statuses(&mut self) {
        self.statuses.retain_mut(|s| match s.rounds_left {
            None => true,
            Some(0) => {
                log::debug!("Status {} expired", status::name_of(s.id));
                false
            }
            Some(n) => {
                s.rounds_left = Some(n - 1);
                true
            }
        });
    }
}

/// Holds at most one player
#[derive(Debug, Clone, Default)]
pub struct PlayerSlot {
    player: Option<Player>,
}

impl PlayerSlot {
    pub fn new() -> Self {
        Self { player: None }
    }

    pub fn with_player(player: Player) -> Self {
        Self {
            player: Some(player),
        }
    }

    /// Put a player in the slot, replacing any previous one
    pub fn spawn(&mut self, player: Player) {
        log::info!("Player {} joined with {} balls", player.name, player.deck.len());
        self.player = Some(player);
    }

    /// Remove the player
    pub fn despawn(&mut self) -> Option<Player> {
        self.player.take()
    }

    pub fn current_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }
}

impl PlayerManager for PlayerSlot {
    fn current(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    fn reset_player(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.tick_statuses();
            player.rounds_played += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::BallKind;
    use crate::status::{GOLD_RUSH, PIN_SENSE, STEADY_AIM};

    fn player() -> Player {
        Player::new("Ada", BallDeck::new([BallKind::Standard; 3]))
    }

    #[test]
    fn test_timed_status_applies_for_its_duration() {
        let mut slot = PlayerSlot::with_player(player());
        slot.current_mut().unwrap().grant_status(PIN_SENSE);

        // Two rounds with the status, gone at the third reset
        slot.reset_player();
        assert!(slot.current().unwrap().has_status(PIN_SENSE));
        slot.reset_player();
        assert!(slot.current().unwrap().has_status(PIN_SENSE));
        slot.reset_player();
        assert!(!slot.current().unwrap().has_status(PIN_SENSE));
        assert_eq!(slot.current().unwrap().rounds_played, 3);
    }

    #[test]
    fn test_permanent_status_survives_resets() {
        let mut slot = PlayerSlot::with_player(player());
        slot.current_mut().unwrap().grant_status(STEADY_AIM);
        for _ in 0..10 {
            slot.reset_player();
        }
        assert!(slot.current().unwrap().has_status(STEADY_AIM));
    }

    #[test]
    fn test_regrant_refreshes_instead_of_stacking() {
        let mut p = player();
        assert!(p.grant_status(GOLD_RUSH));
        p.tick_statuses();
        assert!(p.grant_status(GOLD_RUSH));
        assert_eq!(p.statuses.len(), 1);
        assert_eq!(p.statuses[0].rounds_left, Some(1));
        assert_eq!(p.score_multiplier_pct(), 150);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut p = player();
        assert!(!p.grant_status(999));
        assert!(p.statuses.is_empty());
    }

    #[test]
    fn test_empty_slot() {
        let mut slot = PlayerSlot::new();
        assert!(slot.current().is_none());
        // Resetting with no player is harmless
        slot.reset_player();
        slot.spawn(player());
        assert!(slot.current().is_some());
        assert!(slot.despawn().is_some());
        assert!(slot.current().is_none());
    }
}

//! Player status effects
//!
//! A static lookup table keyed by status id. Statuses are granted as stage
//! rewards and add a percentage bonus to every pin hit.

/// Status identifier
pub type StatusId = u16;

/// One row of the status table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub id: StatusId,
    pub name: &'static str,
    pub description: &'static str,
    /// Added to the score multiplier (percent)
    pub score_bonus_pct: u32,
    /// Rounds the status lasts once granted (None = rest of the run)
    pub duration_rounds: Option<u32>,
}

pub const STEADY_AIM: StatusId = 1;
pub const PIN_SENSE: StatusId = 2;
pub const GOLD_RUSH: StatusId = 3;
pub const FOCUS: StatusId = 4;

pub static STATUS_TABLE: &[StatusEntry] = &[
    StatusEntry {
        id: STEADY_AIM,
        name: "Steady Aim",
        description: "Pin hits score 10% more for the rest of the run",
        score_bonus_pct: 10,
        duration_rounds: None,
    },
    StatusEntry {
        id: PIN_SENSE,
        name: "Pin Sense",
        description: "Pin hits score 25% more for two rounds",
        score_bonus_pct: 25,
        duration_rounds: Some(2),
    },
    StatusEntry {
        id: GOLD_RUSH,
        name: "Gold Rush",
        description: "Pin hits score 50% more next round",
        score_bonus_pct: 50,
        duration_rounds: Some(1),
    },
    StatusEntry {
        id: FOCUS,
        name: "Focus",
        description: "Pin hits score 15% more for three rounds",
        score_bonus_pct: 15,
        duration_rounds: Some(3),
    },
];

/// Find a status by id
pub fn lookup(id: StatusId) -> Option<&'static StatusEntry> {
    STATUS_TABLE.iter().find(|entry| entry.id == id)
}

/// Display name for a status, "Unknown" for ids not in the table
pub fn name_of(id: StatusId) -> &'static str {
    lookup(id).map(|e| e.name).unwrap_or("Unknown")
}

/// Combined score multiplier (percent) for a set of statuses
pub fn score_multiplier_pct(ids: impl IntoIterator<Item = StatusId>) -> u32 {
    ids.into_iter().fold(100, |acc, id| match lookup(id) {
        Some(entry) => acc + entry.score_bonus_pct,
        None => {
            log::warn!("Ignoring unknown status id {}", id);
            acc
        }
    })
}

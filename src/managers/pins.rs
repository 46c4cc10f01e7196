//! Pin board
//!
//! Builds the staggered pin grid for a stage and tracks pin health.

use glam::Vec2;

use super::PinManager;
use crate::settings::BoardSettings;
use crate::sim::{Pin, PinKind};
use crate::stage::PinLayout;

/// All pins on the board (sorted by id for determinism)
#[derive(Debug, Clone, Default)]
pub struct PinBoard {
    pins: Vec<Pin>,
}

impl PinBoard {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Replace the board with the grid described by `layout`
    ///
    /// Odd rows are shifted by half a column and hold one pin fewer.
    pub fn load_layout(&mut self, layout: &PinLayout, board: &BoardSettings) {
        self.pins.clear();

        let top = board.height - board.margin_top;
        let bottom = board.margin_bottom;
        let row_gap = if layout.rows > 1 {
            (top - bottom) / (layout.rows - 1) as f32
        } else {
            0.0
        };
        let col_gap = board.width / (layout.cols as f32 + 1.0);

        let mut next_id = 1;
        for row in 0..layout.rows {
            let odd = row % 2 == 1;
            let (count, offset) = if odd && layout.cols > 1 {
                (layout.cols - 1, col_gap * 1.5)
            } else {
                (layout.cols, col_gap)
            };
            let y = top - row as f32 * row_gap;

            for col in 0..count {
                let kind = if layout.gold_row == Some(row) {
                    PinKind::Gold
                } else if layout.bumper_every > 0 && next_id % layout.bumper_every == 0 {
                    PinKind::Bumper
                } else {
                    PinKind::Standard
                };
                let pos = Vec2::new(offset + col as f32 * col_gap, y);
                self.pins.push(Pin::new(next_id, kind, pos, board.pin_radius));
                next_id += 1;
            }
        }

        log::debug!(
            "Loaded pin layout: {} rows, {} pins",
            layout.rows,
            self.pins.len()
        );
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn standing(&self) -> usize {
        self.pins.iter().filter(|p| p.is_standing()).count()
    }

    pub fn knocked_count(&self) -> usize {
        self.pins.len() - self.standing()
    }

    pub fn get(&self, id: u32) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == id)
    }
}

impl PinManager for PinBoard {
    fn reset_all_pins(&mut self) {
        for pin in &mut self.pins {
            pin.restore();
        }
    }
}

//! Dice presented as a grid of cells.
//!
//! One column per die, one row per face (face 1 at row 0). The cell matching a
//! die's current face is lit; it carries [CELL_HELD] instead of [CELL_ON] when
//! the die is held. Unrolled dice light nothing.

use commonware_codec::Encode;
use lifedice_types::dice::{
    RoundSnapshot, BOARD_HEIGHT, BOARD_WIDTH, CELL_HELD, CELL_OFF, CELL_ON,
};

use crate::dice::RoundSession;
use crate::grid::CellGrid;
use crate::renderer::{BufferSlot, GridLayout, Renderer, RendererError};

#[derive(Clone, Debug)]
pub struct DiceBoard {
    grid: CellGrid,
}

impl Default for DiceBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceBoard {
    pub fn new() -> Self {
        Self {
            grid: CellGrid::new(BOARD_WIDTH, BOARD_HEIGHT),
        }
    }

    pub fn layout() -> GridLayout {
        GridLayout::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Compute the next board state from a snapshot.
    pub fn update(&mut self, snapshot: &RoundSnapshot) {
        let dice = snapshot.dice();
        self.grid.write_next(|x, y| {
            let die = &dice[x as usize];
            match die.face {
                Some(face) if face.index() == y as usize => {
                    if die.held {
                        CELL_HELD
                    } else {
                        CELL_ON
                    }
                }
                _ => CELL_OFF,
            }
        });
    }

    /// Upload the session's current state and draw it.
    pub fn present<R: Renderer>(
        &mut self,
        session: &RoundSession,
        renderer: &mut R,
    ) -> Result<(), RendererError> {
        let snapshot = session.snapshot();
        self.update(&snapshot);
        renderer.upload_state(BufferSlot::Cells, self.grid.as_bytes())?;
        renderer.upload_state(BufferSlot::Control, &snapshot.encode())?;
        renderer.dispatch_compute_and_draw(self.grid.bind_group())
    }
}

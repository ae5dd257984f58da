//! Conway's Game of Life on a small toroidal grid.

use lifedice_types::dice::{CELL_OFF, CELL_ON};
use tracing::debug;

use crate::dice::GameRng;
use crate::grid::CellGrid;
use crate::renderer::{BufferSlot, GridLayout, Renderer, RendererError};

/// Share of cells alive after [LifeControl::Randomize].
const RANDOM_DENSITY: f64 = 0.4;

/// Glider, relative to the top-left corner.
const GLIDER: [(u32, u32); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

/// Keyboard-driven control flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeControl {
    /// Pause or resume the animation.
    ToggleRunning,
    /// Advance one generation on the next frame.
    Step,
    Clear,
    Randomize,
}

/// B3/S23 next state.
pub fn next_state(state: u32, live_neighbors: u8) -> u32 {
    match (state != CELL_OFF, live_neighbors) {
        (true, 2 | 3) | (false, 3) => CELL_ON,
        _ => CELL_OFF,
    }
}

#[derive(Clone, Debug)]
pub struct LifeSim {
    grid: CellGrid,
    running: bool,
    pending_step: bool,
}

impl LifeSim {
    /// A running simulation seeded with a glider (when the grid fits one).
    pub fn new(width: u32, height: u32) -> Self {
        let mut grid = CellGrid::new(width, height);
        for (x, y) in GLIDER {
            grid.set(x, y, CELL_ON);
        }
        Self {
            grid,
            running: true,
            pending_step: false,
        }
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.grid.width(), self.grid.height())
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn control(&mut self, control: LifeControl, rng: &mut GameRng) {
        match control {
            LifeControl::ToggleRunning => self.running = !self.running,
            LifeControl::Step => self.pending_step = true,
            LifeControl::Clear => self.grid.clear(),
            LifeControl::Randomize => {
                let (width, height) = (self.grid.width(), self.grid.height());
                for y in 0..height {
                    for x in 0..width {
                        let state = if rng.chance(RANDOM_DENSITY) { CELL_ON } else { CELL_OFF };
                        self.grid.set(x, y, state);
                    }
                }
            }
        }
        debug!(?control, running = self.running, "life control");
    }

    /// Advance one generation if running or a single step is pending.
    /// Returns true when a step ran.
    pub fn tick(&mut self) -> bool {
        if !self.running && !self.pending_step {
            return false;
        }
        self.pending_step = false;
        self.grid.step_with(next_state);
        true
    }

    /// One animation frame: compute step, upload, draw.
    pub fn frame<R: Renderer>(&mut self, renderer: &mut R) -> Result<bool, RendererError> {
        let stepped = self.tick();
        renderer.upload_state(BufferSlot::Cells, self.grid.as_bytes())?;
        renderer.dispatch_compute_and_draw(self.grid.bind_group())?;
        Ok(stepped)
    }
}

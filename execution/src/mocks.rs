//! Deterministic stand-ins for tests.

use std::collections::VecDeque;

use lifedice_types::dice::Face;

use crate::dice::DiceSource;
use crate::renderer::{BufferSet, BufferSlot, GridLayout, Renderer, RendererError};

/// Dice that return a fixed script of faces.
///
/// `cycle` repeats the script forever; `sequence` plays it once and then keeps
/// returning its last face. Values outside `1..=6` are skipped.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: VecDeque<Face>,
    repeat: bool,
    draws: usize,
}

impl ScriptedDice {
    pub fn cycle(values: &[u8]) -> Self {
        Self::build(values, true)
    }

    pub fn sequence(values: &[u8]) -> Self {
        Self::build(values, false)
    }

    /// Faces handed out so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn build(values: &[u8], repeat: bool) -> Self {
        let mut faces: VecDeque<Face> = values.iter().filter_map(|v| Face::new(*v)).collect();
        if faces.is_empty() {
            faces.push_back(Face::ALL[0]);
        }
        Self {
            faces,
            repeat,
            draws: 0,
        }
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> Face {
        self.draws += 1;
        let face = self.faces[0];
        if self.repeat {
            self.faces.rotate_left(1);
        } else if self.faces.len() > 1 {
            self.faces.pop_front();
        }
        face
    }
}

/// Renderer that keeps every upload and draw in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub buffers: BufferSet,
    /// Bind group of every draw, in order.
    pub draws: Vec<usize>,
    /// Make the next dispatch fail, as a lost device would.
    pub fail_next_draw: bool,
}

impl Renderer for RecordingRenderer {
    fn initialize(&mut self, layout: GridLayout) -> Result<(), RendererError> {
        self.buffers.initialize(layout)
    }

    fn upload_state(&mut self, slot: BufferSlot, bytes: &[u8]) -> Result<(), RendererError> {
        self.buffers.upload(slot, bytes)
    }

    fn dispatch_compute_and_draw(&mut self, bind_group: usize) -> Result<(), RendererError> {
        self.buffers.check_bind_group(bind_group)?;
        if self.fail_next_draw {
            self.fail_next_draw = false;
            return Err(RendererError::Display("device lost".to_string()));
        }
        self.draws.push(bind_group);
        Ok(())
    }

    fn read_back(&mut self, slot: BufferSlot) -> Result<Vec<u8>, RendererError> {
        self.buffers.get(slot).map(<[u8]>::to_vec)
    }
}

//! Text renderer: draws the cell buffer as characters.

use std::io::Write;

use commonware_codec::DecodeExt;
use lifedice_execution::{BufferSet, BufferSlot, GridLayout, Renderer, RendererError};
use lifedice_types::dice::{RoundSnapshot, CELL_HELD, CELL_OFF};

fn glyph(state: u32) -> char {
    match state {
        CELL_OFF => '.',
        CELL_HELD => '*',
        _ => '#',
    }
}

/// Renders each draw to a writer, one text row per grid row.
///
/// A frame identical to the previous one is not written again, so a paused
/// simulation does not scroll the terminal.
pub struct TerminalRenderer<W: Write> {
    buffers: BufferSet,
    out: W,
    last: String,
    written: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            buffers: BufferSet::default(),
            out,
            last: String::new(),
            written: 0,
        }
    }

    /// Frames actually written to the output.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn compose(&self) -> Result<String, RendererError> {
        let layout = self.buffers.layout()?;
        let cells = self.buffers.cell_states()?;
        let mut text = String::with_capacity(layout.cells() + layout.height as usize + 64);
        for row in cells.chunks(layout.width as usize) {
            text.extend(row.iter().copied().map(glyph));
            text.push('\n');
        }

        // Control block is only uploaded by the dice board
        if let Ok(control) = self.buffers.get(BufferSlot::Control) {
            let snapshot = RoundSnapshot::decode(control)
                .map_err(|err| RendererError::Display(err.to_string()))?;
            text.push_str(&format!(
                "{} | balance {} | last {}\n",
                snapshot.status_label(),
                snapshot.balance,
                snapshot.score_label().unwrap_or("-"),
            ));
        }
        Ok(text)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn initialize(&mut self, layout: GridLayout) -> Result<(), RendererError> {
        self.buffers.initialize(layout)?;
        self.last.clear();
        Ok(())
    }

    fn upload_state(&mut self, slot: BufferSlot, bytes: &[u8]) -> Result<(), RendererError> {
        self.buffers.upload(slot, bytes)
    }

    fn dispatch_compute_and_draw(&mut self, bind_group: usize) -> Result<(), RendererError> {
        self.buffers.check_bind_group(bind_group)?;
        let text = self.compose()?;
        if text == self.last {
            return Ok(());
        }
        let draw = |out: &mut W| -> std::io::Result<()> {
            out.write_all(text.as_bytes())?;
            writeln!(out)?;
            out.flush()
        };
        draw(&mut self.out).map_err(|err| RendererError::Display(err.to_string()))?;
        self.last = text;
        self.written += 1;
        Ok(())
    }

    fn read_back(&mut self, slot: BufferSlot) -> Result<Vec<u8>, RendererError> {
        self.buffers.get(slot).map(<[u8]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::Encode;
    use lifedice_types::dice::{Category, Hand, Phase, CELL_ON};

    fn cells(states: &[u32]) -> Vec<u8> {
        states.iter().flat_map(|state| state.to_ne_bytes()).collect()
    }

    #[test]
    fn test_draws_grid() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.initialize(GridLayout::new(3, 2)).unwrap();
        renderer
            .upload_state(
                BufferSlot::Cells,
                &cells(&[CELL_ON, CELL_OFF, CELL_HELD, CELL_OFF, CELL_OFF, CELL_ON]),
            )
            .unwrap();
        renderer.dispatch_compute_and_draw(0).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "#.*\n..#\n\n");
    }

    #[test]
    fn test_status_line_from_control() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.initialize(GridLayout::new(1, 1)).unwrap();
        renderer
            .upload_state(BufferSlot::Cells, &cells(&[CELL_OFF]))
            .unwrap();
        let snapshot = RoundSnapshot {
            phase: Phase::Scored,
            balance: 140,
            hand: Hand::from_values([4, 4, 4, 4, 2]).unwrap(),
            held: [true; 5],
            last_score: Some(Category::FourOfAKind),
        };
        renderer
            .upload_state(BufferSlot::Control, &snapshot.encode())
            .unwrap();
        renderer.dispatch_compute_and_draw(1).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let status = out.lines().nth(1).unwrap();
        assert!(status.contains("balance 140"));
        assert!(status.contains(Category::FourOfAKind.label()));
    }

    #[test]
    fn test_unchanged_frame_not_rewritten() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.initialize(GridLayout::new(2, 1)).unwrap();
        let frame = cells(&[CELL_ON, CELL_OFF]);
        for bind_group in [0, 1, 0] {
            renderer.upload_state(BufferSlot::Cells, &frame).unwrap();
            renderer.dispatch_compute_and_draw(bind_group).unwrap();
        }
        assert_eq!(renderer.written(), 1);
    }

    #[test]
    fn test_rejects_unknown_bind_group() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.initialize(GridLayout::new(2, 1)).unwrap();
        assert_eq!(
            renderer.dispatch_compute_and_draw(2),
            Err(RendererError::BindGroup(2))
        );
    }
}

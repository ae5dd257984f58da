//! Double-buffered cell state.
//!
//! The renderer sees two storage buffers and two bind groups; each compute
//! step reads one buffer and writes the other. [CellGrid] mirrors that on the
//! CPU: the front buffer is current, a step fills the back buffer and then the
//! two swap. [CellGrid::bind_group] tells the renderer which of the two bind
//! groups reads the current state.

use lifedice_types::dice::CELL_OFF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    width: u32,
    height: u32,
    buffers: [Vec<u32>; 2],
    front: usize,
    generation: u64,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            buffers: [vec![CELL_OFF; len], vec![CELL_OFF; len]],
            front: 0,
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.buffers[self.front].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Completed update steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ping-pong bind group holding the current state (0 or 1).
    pub fn bind_group(&self) -> usize {
        self.front
    }

    pub fn cells(&self) -> &[u32] {
        &self.buffers[self.front]
    }

    /// Current state as uploaded to the renderer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.cells())
    }

    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.buffers[self.front][i])
    }

    /// Write a cell of the current buffer; out of range writes are dropped.
    pub fn set(&mut self, x: u32, y: u32, state: u32) {
        if let Some(i) = self.index(x, y) {
            self.buffers[self.front][i] = state;
        }
    }

    pub fn clear(&mut self) {
        self.buffers[self.front].fill(CELL_OFF);
    }

    /// Cells whose state is not off.
    pub fn population(&self) -> usize {
        self.cells().iter().filter(|&&state| state != CELL_OFF).count()
    }

    /// Live cells among the eight neighbours, wrapping at the edges.
    pub fn live_neighbors(&self, x: u32, y: u32) -> u8 {
        if self.index(x, y).is_none() {
            return 0;
        }
        live_neighbors(self.cells(), self.width, self.height, x, y)
    }

    /// Compute the next state of every cell from its current state and live
    /// neighbour count, then swap buffers.
    pub fn step_with(&mut self, mut rule: impl FnMut(u32, u8) -> u32) {
        let (width, height) = (self.width, self.height);
        let (front, back) = self.split();
        for y in 0..height {
            for x in 0..width {
                let i = (y * width + x) as usize;
                back[i] = rule(front[i], live_neighbors(front, width, height, x, y));
            }
        }
        self.commit();
    }

    /// Fill the back buffer from `state(x, y)`, then swap buffers.
    pub fn write_next(&mut self, mut state: impl FnMut(u32, u32) -> u32) {
        let width = self.width;
        let (_, back) = self.split();
        for (i, cell) in back.iter_mut().enumerate() {
            let i = i as u32;
            *cell = state(i % width, i / width);
        }
        self.commit();
    }

    fn split(&mut self) -> (&[u32], &mut [u32]) {
        let [first, second] = &mut self.buffers;
        if self.front == 0 {
            (&first[..], &mut second[..])
        } else {
            (&second[..], &mut first[..])
        }
    }

    fn commit(&mut self) {
        self.front ^= 1;
        self.generation += 1;
    }
}

fn live_neighbors(cells: &[u32], width: u32, height: u32, x: u32, y: u32) -> u8 {
    let mut live = 0;
    for dy in [height - 1, 0, 1] {
        for dx in [width - 1, 0, 1] {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (x + dx) % width;
            let ny = (y + dy) % height;
            if cells[(ny * width + nx) as usize] != CELL_OFF {
                live += 1;
            }
        }
    }
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifedice_types::dice::CELL_ON;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = CellGrid::new(6, 5);
        assert_eq!(grid.len(), 30);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.bind_group(), 0);
        assert_eq!(grid.as_bytes().len(), 30 * 4);
    }

    #[test]
    fn test_set_out_of_range_is_dropped() {
        let mut grid = CellGrid::new(3, 3);
        grid.set(3, 0, CELL_ON);
        grid.set(0, 3, CELL_ON);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_neighbors_wrap() {
        let mut grid = CellGrid::new(4, 4);
        grid.set(3, 3, CELL_ON);
        grid.set(0, 3, CELL_ON);
        grid.set(3, 0, CELL_ON);

        // Corner (0,0) touches all three through the edges
        assert_eq!(grid.live_neighbors(0, 0), 3);
        assert_eq!(grid.live_neighbors(3, 3), 2);
    }

    #[test]
    fn test_step_swaps_buffers() {
        let mut grid = CellGrid::new(2, 2);
        grid.set(0, 0, CELL_ON);

        grid.step_with(|state, _| if state == CELL_ON { CELL_OFF } else { CELL_ON });

        assert_eq!(grid.generation(), 1);
        assert_eq!(grid.bind_group(), 1);
        assert_eq!(grid.cells(), &[CELL_OFF, CELL_ON, CELL_ON, CELL_ON]);

        grid.step_with(|state, _| state);
        assert_eq!(grid.bind_group(), 0);
        assert_eq!(grid.cells(), &[CELL_OFF, CELL_ON, CELL_ON, CELL_ON]);
    }

    #[test]
    fn test_write_next_coordinates() {
        let mut grid = CellGrid::new(3, 2);
        grid.write_next(|x, y| x + 10 * y);
        assert_eq!(grid.cells(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.get(2, 1), Some(12));
    }

    #[test]
    fn test_bytes_match_cells() {
        let mut grid = CellGrid::new(2, 1);
        grid.set(1, 0, 2);
        let expected: Vec<u8> = [0u32, 2].iter().flat_map(|v| v.to_ne_bytes()).collect();
        assert_eq!(grid.as_bytes(), expected.as_slice());
    }
}

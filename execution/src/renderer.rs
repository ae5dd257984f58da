//! Boundary to the graphics backend.
//!
//! Both demos draw a grid of instanced quads whose visibility comes from a
//! per-cell state buffer. Everything behind that (device, pipelines, shader
//! text) belongs to a [Renderer] implementation; this crate only hands it
//! bytes and says which bind group to use.

use thiserror::Error;

/// Buffers a renderer exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    /// Per-cell state, `u32` per cell.
    Cells,
    /// Encoded control/status block.
    Control,
}

/// Size of the instanced grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of a full cell buffer.
    pub fn cell_bytes(&self) -> usize {
        self.cells() * std::mem::size_of::<u32>()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RendererError {
    #[error("grid layout {width}x{height} has no cells")]
    EmptyLayout { width: u32, height: u32 },
    #[error("renderer used before initialize")]
    NotInitialized,
    #[error("{slot:?} upload of {actual} bytes, expected {expected}")]
    SizeMismatch {
        slot: BufferSlot,
        expected: usize,
        actual: usize,
    },
    #[error("bind group {0} does not exist")]
    BindGroup(usize),
    #[error("{0:?} buffer was never uploaded")]
    EmptyBuffer(BufferSlot),
    #[error("display failed: {0}")]
    Display(String),
}

/// External graphics collaborator.
pub trait Renderer {
    /// Check capabilities and allocate buffers for `layout`.
    fn initialize(&mut self, layout: GridLayout) -> Result<(), RendererError>;

    /// Replace the contents of a buffer.
    fn upload_state(&mut self, slot: BufferSlot, bytes: &[u8]) -> Result<(), RendererError>;

    /// Run the compute pass and draw with the given ping-pong bind group.
    fn dispatch_compute_and_draw(&mut self, bind_group: usize) -> Result<(), RendererError>;

    /// Copy a buffer back to the host.
    fn read_back(&mut self, slot: BufferSlot) -> Result<Vec<u8>, RendererError>;
}

/// Host-side copy of the buffers a renderer owns, with the checks every
/// implementation needs.
#[derive(Clone, Debug, Default)]
pub struct BufferSet {
    layout: Option<GridLayout>,
    cells: Vec<u8>,
    control: Vec<u8>,
}

impl BufferSet {
    pub fn initialize(&mut self, layout: GridLayout) -> Result<(), RendererError> {
        if layout.cells() == 0 {
            return Err(RendererError::EmptyLayout {
                width: layout.width,
                height: layout.height,
            });
        }
        self.layout = Some(layout);
        self.cells = vec![0; layout.cell_bytes()];
        self.control.clear();
        Ok(())
    }

    pub fn layout(&self) -> Result<GridLayout, RendererError> {
        self.layout.ok_or(RendererError::NotInitialized)
    }

    pub fn upload(&mut self, slot: BufferSlot, bytes: &[u8]) -> Result<(), RendererError> {
        let layout = self.layout()?;
        match slot {
            BufferSlot::Cells => {
                if bytes.len() != layout.cell_bytes() {
                    return Err(RendererError::SizeMismatch {
                        slot,
                        expected: layout.cell_bytes(),
                        actual: bytes.len(),
                    });
                }
                self.cells.copy_from_slice(bytes);
            }
            BufferSlot::Control => {
                self.control.clear();
                self.control.extend_from_slice(bytes);
            }
        }
        Ok(())
    }

    pub fn check_bind_group(&self, bind_group: usize) -> Result<(), RendererError> {
        self.layout()?;
        if bind_group > 1 {
            return Err(RendererError::BindGroup(bind_group));
        }
        Ok(())
    }

    pub fn get(&self, slot: BufferSlot) -> Result<&[u8], RendererError> {
        self.layout()?;
        let bytes = match slot {
            BufferSlot::Cells => &self.cells,
            BufferSlot::Control => &self.control,
        };
        if bytes.is_empty() {
            return Err(RendererError::EmptyBuffer(slot));
        }
        Ok(bytes)
    }

    /// Cell states decoded from the cell buffer.
    pub fn cell_states(&self) -> Result<Vec<u32>, RendererError> {
        let bytes = self.get(BufferSlot::Cells)?;
        Ok(bytes
            .chunks_exact(std::mem::size_of::<u32>())
            .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_rejects_empty_layout() {
        let mut buffers = BufferSet::default();
        assert_eq!(
            buffers.initialize(GridLayout::new(0, 6)),
            Err(RendererError::EmptyLayout {
                width: 0,
                height: 6
            })
        );
    }

    #[test]
    fn test_upload_before_initialize() {
        let mut buffers = BufferSet::default();
        assert_eq!(
            buffers.upload(BufferSlot::Cells, &[]),
            Err(RendererError::NotInitialized)
        );
    }

    #[test]
    fn test_cell_upload_size_checked() {
        let mut buffers = BufferSet::default();
        buffers.initialize(GridLayout::new(2, 2)).unwrap();

        assert_eq!(
            buffers.upload(BufferSlot::Cells, &[0; 4]),
            Err(RendererError::SizeMismatch {
                slot: BufferSlot::Cells,
                expected: 16,
                actual: 4
            })
        );

        let bytes: Vec<u8> = [1u32, 0, 2, 0].iter().flat_map(|v| v.to_ne_bytes()).collect();
        buffers.upload(BufferSlot::Cells, &bytes).unwrap();
        assert_eq!(buffers.cell_states().unwrap(), vec![1, 0, 2, 0]);
    }

    #[test]
    fn test_control_buffer() {
        let mut buffers = BufferSet::default();
        buffers.initialize(GridLayout::new(1, 1)).unwrap();
        assert_eq!(
            buffers.get(BufferSlot::Control),
            Err(RendererError::EmptyBuffer(BufferSlot::Control))
        );

        buffers.upload(BufferSlot::Control, &[7, 8, 9]).unwrap();
        assert_eq!(buffers.get(BufferSlot::Control).unwrap(), &[7, 8, 9]);
    }

    #[test]
    fn test_bind_group_range() {
        let mut buffers = BufferSet::default();
        buffers.initialize(GridLayout::new(1, 1)).unwrap();
        assert!(buffers.check_bind_group(0).is_ok());
        assert!(buffers.check_bind_group(1).is_ok());
        assert_eq!(
            buffers.check_bind_group(2),
            Err(RendererError::BindGroup(2))
        );
    }
}

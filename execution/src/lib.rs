pub mod board;
pub mod dice;
pub mod grid;
pub mod input;
pub mod life;
pub mod renderer;
pub mod scheduler;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use board::DiceBoard;
pub use dice::{Action, DiceSource, GameRng, Outcome, RoundError, RoundSession};
pub use grid::CellGrid;
pub use input::{dice_action, life_control, Key};
pub use life::{LifeControl, LifeSim};
pub use renderer::{BufferSet, BufferSlot, GridLayout, Renderer, RendererError};
pub use scheduler::{Clock, ManualClock, MonotonicClock, Scheduler, TaskId};

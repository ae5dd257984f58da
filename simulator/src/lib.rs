//! Terminal front end for the dice and Game of Life demos.
//!
//! Each line read from the input is one key press; a frame timer advances the
//! active demo and redraws it.

use std::time::Duration;

use lifedice_execution::{Clock, RendererError};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

pub mod app;
pub mod config;
pub mod terminal;

pub use app::{Demo, DiceDemo, LifeDemo};
pub use config::{Config, ConfigError, ValidatedConfig};
pub use terminal::TerminalRenderer;

/// Line that ends the frame loop.
const QUIT: &str = "q";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("renderer failed: {0}")]
    Renderer(#[from] RendererError),
    #[error("input failed: {0}")]
    Input(#[from] std::io::Error),
}

/// Drive `demo` until the input closes or a `q` line arrives.
///
/// Key presses and frames are interleaved on one task, so the demo never
/// sees two events at once.
pub async fn run<D, I, C>(
    demo: &mut D,
    input: I,
    clock: &C,
    frame: Duration,
) -> Result<u64, RunError>
where
    D: Demo,
    I: AsyncBufRead + Unpin,
    C: Clock,
{
    let mut lines = input.lines();
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0u64;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break;
                };
                if line.trim().eq_ignore_ascii_case(QUIT) {
                    break;
                }
                demo.key(&line, clock.now());
            }
            _ = ticker.tick() => {
                demo.frame(clock.now())?;
                frames += 1;
            }
        }
    }

    info!(frames, "stopped");
    Ok(frames)
}

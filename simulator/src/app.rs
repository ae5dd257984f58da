//! The two demos, driven by key presses and frame ticks.

use std::time::Duration;

use lifedice_execution::{
    dice_action, life_control, DiceBoard, GameRng, Key, LifeSim, Outcome, Renderer, RendererError,
    RoundSession,
};
use tracing::{debug, warn};

use crate::config::ValidatedConfig;

/// Something the frame loop can drive.
pub trait Demo {
    /// Handle one line of input.
    fn key(&mut self, line: &str, now: Duration);

    /// Draw one frame.
    fn frame(&mut self, now: Duration) -> Result<(), RendererError>;
}

pub struct DiceDemo<R: Renderer> {
    session: RoundSession,
    board: DiceBoard,
    rng: GameRng,
    renderer: R,
}

impl<R: Renderer> DiceDemo<R> {
    pub fn new(config: &ValidatedConfig, seed: u64, mut renderer: R) -> Result<Self, RendererError> {
        renderer.initialize(DiceBoard::layout())?;
        Ok(Self {
            session: RoundSession::new(config.starting_balance, config.rules),
            board: DiceBoard::new(),
            rng: GameRng::new(seed),
            renderer,
        })
    }

    pub fn session(&self) -> &RoundSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Apply a key press; `None` when the key is unmapped.
    pub fn press(&mut self, key: Key, now: Duration) -> Option<Outcome> {
        let Some(action) = dice_action(key) else {
            debug!(?key, "unmapped key");
            return None;
        };
        match self.session.handle(action, now, &mut self.rng) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(%err, "action rejected");
                None
            }
        }
    }
}

impl<R: Renderer> Demo for DiceDemo<R> {
    fn key(&mut self, line: &str, now: Duration) {
        if let Some(key) = Key::parse(line) {
            self.press(key, now);
        }
    }

    fn frame(&mut self, now: Duration) -> Result<(), RendererError> {
        self.session.advance(now, &mut self.rng);
        self.board.present(&self.session, &mut self.renderer)
    }
}

pub struct LifeDemo<R: Renderer> {
    sim: LifeSim,
    rng: GameRng,
    renderer: R,
}

impl<R: Renderer> LifeDemo<R> {
    pub fn new(config: &ValidatedConfig, seed: u64, mut renderer: R) -> Result<Self, RendererError> {
        let sim = LifeSim::new(config.life_width, config.life_height);
        renderer.initialize(sim.layout())?;
        Ok(Self {
            sim,
            rng: GameRng::new(seed),
            renderer,
        })
    }

    pub fn sim(&self) -> &LifeSim {
        &self.sim
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run `generations` frames back to back, without a timer.
    pub fn run_generations(&mut self, generations: u64) -> Result<(), RendererError> {
        for _ in 0..generations {
            self.sim.frame(&mut self.renderer)?;
        }
        Ok(())
    }
}

impl<R: Renderer> Demo for LifeDemo<R> {
    fn key(&mut self, line: &str, _now: Duration) {
        match Key::parse(line).and_then(life_control) {
            Some(control) => self.sim.control(control, &mut self.rng),
            None => debug!(line, "unmapped key"),
        }
    }

    fn frame(&mut self, _now: Duration) -> Result<(), RendererError> {
        self.sim.frame(&mut self.renderer).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use lifedice_execution::mocks::RecordingRenderer;
    use lifedice_types::dice::Phase;

    fn config() -> ValidatedConfig {
        Config::default().validate().unwrap()
    }

    #[test]
    fn test_dice_demo_round() {
        let mut demo = DiceDemo::new(&config(), 3, RecordingRenderer::default()).unwrap();

        demo.key("space", Duration::ZERO);
        assert_eq!(demo.session().phase(), Phase::Rolling1);
        assert_eq!(demo.session().balance(), 90);

        demo.frame(Duration::from_millis(500)).unwrap();
        assert_eq!(demo.session().phase(), Phase::Rolling1);
        demo.frame(Duration::from_millis(1_000)).unwrap();
        assert_eq!(demo.session().phase(), Phase::AwaitingHolds);

        demo.key("1", Duration::from_millis(1_200));
        assert!(demo.session().holds().contains(0));

        demo.key(" ", Duration::from_millis(1_300));
        demo.frame(Duration::from_millis(2_300)).unwrap();
        assert_eq!(demo.session().phase(), Phase::Scored);
        assert_eq!(demo.renderer().draws.len(), 3);
    }

    #[test]
    fn test_dice_demo_unmapped_key() {
        let mut demo = DiceDemo::new(&config(), 3, RecordingRenderer::default()).unwrap();
        assert_eq!(demo.press(Key::Char('x'), Duration::ZERO), None);
        assert_eq!(demo.session().phase(), Phase::Idle);
    }

    #[test]
    fn test_dice_demo_out_of_funds() {
        let config = Config {
            starting_balance: 5,
            ..Config::default()
        }
        .validate()
        .unwrap();
        let mut demo = DiceDemo::new(&config, 3, RecordingRenderer::default()).unwrap();
        assert_eq!(demo.press(Key::Space, Duration::ZERO), None);
        assert_eq!(demo.session().balance(), 5);
    }

    #[test]
    fn test_life_demo_generations() {
        let mut demo = LifeDemo::new(&config(), 1, RecordingRenderer::default()).unwrap();
        demo.run_generations(4).unwrap();
        assert_eq!(demo.sim().generation(), 4);
        assert_eq!(demo.renderer().draws, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_life_demo_keys() {
        let mut demo = LifeDemo::new(&config(), 1, RecordingRenderer::default()).unwrap();
        demo.key(" ", Duration::ZERO);
        demo.frame(Duration::ZERO).unwrap();
        assert_eq!(demo.sim().generation(), 0);

        demo.key("n", Duration::ZERO);
        demo.frame(Duration::ZERO).unwrap();
        assert_eq!(demo.sim().generation(), 1);

        demo.key("c", Duration::ZERO);
        assert_eq!(demo.sim().population(), 0);
    }
}

//! Dice round state machine.
//!
//! Phases: Idle -> Rolling1 -> AwaitingHolds -> Rolling2 -> Scored, and back
//! to Idle only through [Action::Reset].
//!
//! Each roll is animated: unheld dice are re-sampled once when the roll
//! starts and again on every `roll_tick` until `roll_duration` has passed,
//! then they freeze on the last sample. Both timers live in the session's
//! [Scheduler] and are driven by [RoundSession::advance].

use std::time::Duration;

use lifedice_types::dice::{Category, Hand, Phase, RoundRules, RoundSnapshot, STARTING_BALANCE};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{evaluate_hand, DiceSource, HoldSet};
use crate::scheduler::{Scheduler, TaskId};

/// Player input understood by a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Starts roll 1 from Idle, roll 2 from AwaitingHolds.
    StartOrAdvanceRoll,
    /// Hold or release the die at a position (0-4).
    ToggleHold(usize),
    /// Abandon the current round and return to Idle.
    Reset,
}

/// Why an input had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    /// A roll is animating.
    Rolling,
    /// The action has no meaning in this phase.
    WrongPhase(Phase),
    /// Not a die position.
    BadPosition(usize),
}

/// Result of an action or of advancing time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Phase changed.
    Advanced { from: Phase, to: Phase },
    /// A die was held or released.
    HoldToggled { position: usize, held: bool },
    /// Roll 2 froze and the hand was paid out.
    Scored {
        category: Category,
        payout: u64,
        balance: u64,
    },
    /// Back to Idle; any running roll was cancelled.
    Reset { balance: u64 },
    /// Input arrived at the wrong time and was dropped.
    Ignored(Ignored),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}

/// Error during round execution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("insufficient funds: balance {balance} is below bet {bet}")]
    InsufficientFunds { balance: u64, bet: u64 },
}

/// Timers of the roll in progress.
#[derive(Clone, Copy, Debug)]
struct RollTimers {
    ticker: TaskId,
    deadline: TaskId,
}

/// Owner of the balance and of the current round.
///
/// The balance is only reachable through this type; it survives resets and
/// lasts as long as the session.
#[derive(Debug)]
pub struct RoundSession {
    rules: RoundRules,
    phase: Phase,
    hand: Hand,
    holds: HoldSet,
    balance: u64,
    last_score: Option<Category>,
    rounds: u64,
    scheduler: Scheduler,
    roll: Option<RollTimers>,
}

impl Default for RoundSession {
    fn default() -> Self {
        Self::new(STARTING_BALANCE, RoundRules::default())
    }
}

impl RoundSession {
    pub fn new(balance: u64, rules: RoundRules) -> Self {
        Self {
            rules,
            phase: Phase::Idle,
            hand: Hand::default(),
            holds: HoldSet::default(),
            balance,
            last_score: None,
            rounds: 0,
            scheduler: Scheduler::new(),
            roll: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn holds(&self) -> HoldSet {
        self.holds
    }

    pub fn last_score(&self) -> Option<Category> {
        self.last_score
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    /// Rounds started over the session's lifetime.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// True while roll timers are armed.
    pub fn is_animating(&self) -> bool {
        self.roll.is_some()
    }

    /// When the session next needs [Self::advance], if a roll is animating.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            balance: self.balance,
            hand: self.hand,
            held: self.holds.to_flags(),
            last_score: self.last_score,
        }
    }

    /// Apply one player action at time `now`.
    pub fn handle(
        &mut self,
        action: Action,
        now: Duration,
        rng: &mut impl DiceSource,
    ) -> Result<Outcome, RoundError> {
        match action {
            Action::StartOrAdvanceRoll => self.start_or_advance(now, rng),
            Action::ToggleHold(position) => Ok(self.toggle_hold(position)),
            Action::Reset => Ok(self.reset()),
        }
    }

    /// The single roll control: starts a round from Idle, or the second roll
    /// from AwaitingHolds.
    pub fn start_or_advance(
        &mut self,
        now: Duration,
        rng: &mut impl DiceSource,
    ) -> Result<Outcome, RoundError> {
        match self.phase {
            Phase::Idle => self.start_round(now, rng),
            Phase::AwaitingHolds => Ok(self.begin_roll(Phase::Rolling2, now, rng)),
            Phase::Rolling1 | Phase::Rolling2 => Ok(self.ignore(Ignored::Rolling)),
            Phase::Scored => Ok(self.ignore(Ignored::WrongPhase(Phase::Scored))),
        }
    }

    /// Debit the bet and start roll 1.
    pub fn start_round(
        &mut self,
        now: Duration,
        rng: &mut impl DiceSource,
    ) -> Result<Outcome, RoundError> {
        if self.phase.is_rolling() {
            return Ok(self.ignore(Ignored::Rolling));
        }
        if self.phase != Phase::Idle {
            return Ok(self.ignore(Ignored::WrongPhase(self.phase)));
        }
        if self.balance < self.rules.bet {
            warn!(
                balance = self.balance,
                bet = self.rules.bet,
                "cannot start round"
            );
            return Err(RoundError::InsufficientFunds {
                balance: self.balance,
                bet: self.rules.bet,
            });
        }

        self.balance -= self.rules.bet;
        self.hand.clear();
        self.holds.clear();
        self.last_score = None;
        self.rounds += 1;
        info!(
            round = self.rounds,
            bet = self.rules.bet,
            balance = self.balance,
            "round started"
        );
        Ok(self.begin_roll(Phase::Rolling1, now, rng))
    }

    /// Hold or release a die. Only effective while awaiting holds.
    pub fn toggle_hold(&mut self, position: usize) -> Outcome {
        if self.phase != Phase::AwaitingHolds {
            return self.ignore(if self.phase.is_rolling() {
                Ignored::Rolling
            } else {
                Ignored::WrongPhase(self.phase)
            });
        }
        match self.holds.toggle(position) {
            Some(held) => {
                debug!(position, held, "hold toggled");
                Outcome::HoldToggled { position, held }
            }
            None => self.ignore(Ignored::BadPosition(position)),
        }
    }

    /// Cancel any roll and return to Idle. The balance is kept; a bet already
    /// placed this round is not refunded.
    pub fn reset(&mut self) -> Outcome {
        self.cancel_roll();
        let from = self.phase;
        self.phase = Phase::Idle;
        self.hand.clear();
        self.holds.clear();
        info!(?from, balance = self.balance, "round reset");
        Outcome::Reset {
            balance: self.balance,
        }
    }

    /// Fire every timer due at `now`.
    ///
    /// Returns the phase change caused by a roll freezing, if one froze.
    pub fn advance(&mut self, now: Duration, rng: &mut impl DiceSource) -> Option<Outcome> {
        while let Some(id) = self.scheduler.pop_due(now) {
            let Some(roll) = self.roll else {
                // Stray task from a cancelled roll
                self.scheduler.cancel(id);
                continue;
            };
            if id == roll.ticker {
                self.sample(rng);
            } else if id == roll.deadline {
                return Some(self.freeze());
            }
        }
        None
    }

    fn begin_roll(&mut self, phase: Phase, now: Duration, rng: &mut impl DiceSource) -> Outcome {
        let from = self.phase;
        self.phase = phase;
        self.cancel_roll();
        self.roll = Some(RollTimers {
            ticker: self.scheduler.schedule_repeating(now, self.rules.roll_tick),
            deadline: self.scheduler.schedule_once(now, self.rules.roll_duration),
        });
        self.sample(rng);
        debug!(?phase, held = self.holds.mask(), "roll started");
        Outcome::Advanced { from, to: phase }
    }

    /// Draw a fresh face for every position that is not held.
    fn sample(&mut self, rng: &mut impl DiceSource) {
        for position in 0..self.hand.slots().len() {
            if !self.holds.contains(position) {
                self.hand.set(position, rng.roll_die());
            }
        }
    }

    fn freeze(&mut self) -> Outcome {
        self.cancel_roll();
        let from = self.phase;
        match from {
            Phase::Rolling1 => {
                self.phase = Phase::AwaitingHolds;
                debug!(hand = ?self.hand, "first roll frozen");
                Outcome::Advanced {
                    from,
                    to: Phase::AwaitingHolds,
                }
            }
            Phase::Rolling2 => self.score(),
            other => {
                warn!(phase = ?other, "roll deadline fired outside of a roll");
                self.ignore(Ignored::WrongPhase(other))
            }
        }
    }

    fn score(&mut self) -> Outcome {
        let category = evaluate_hand(&self.hand).unwrap_or_else(|| {
            warn!(hand = ?self.hand, "scoring an incomplete hand");
            Category::Nothing
        });
        let payout = category.payout();
        self.balance = self.balance.saturating_add(payout);
        self.last_score = Some(category);
        self.phase = Phase::Scored;
        info!(
            round = self.rounds,
            %category,
            payout,
            balance = self.balance,
            "round scored"
        );
        Outcome::Scored {
            category,
            payout,
            balance: self.balance,
        }
    }

    fn cancel_roll(&mut self) {
        if let Some(roll) = self.roll.take() {
            self.scheduler.cancel(roll.ticker);
            self.scheduler.cancel(roll.deadline);
        }
    }

    fn ignore(&self, reason: Ignored) -> Outcome {
        debug!(?reason, phase = ?self.phase, "input ignored");
        Outcome::Ignored(reason)
    }
}

use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

use super::{Category, Face, Hand, Phase, DICE_COUNT};

/// What the presentation layer needs to draw one die.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieView {
    pub position: usize,
    pub face: Option<Face>,
    pub held: bool,
}

/// Observable state of a dice session at one instant.
///
/// Encoded with the codec and uploaded to the renderer's control buffer every
/// frame, so the layout below is fixed: phase, balance, hand, hold mask,
/// optional last score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub balance: u64,
    pub hand: Hand,
    pub held: [bool; DICE_COUNT],
    pub last_score: Option<Category>,
}

impl RoundSnapshot {
    pub fn dice(&self) -> [DieView; DICE_COUNT] {
        let mut views = [DieView {
            position: 0,
            face: None,
            held: false,
        }; DICE_COUNT];
        for (position, view) in views.iter_mut().enumerate() {
            view.position = position;
            view.face = self.hand.get(position);
            view.held = self.held[position];
        }
        views
    }

    pub fn status_label(&self) -> &'static str {
        self.phase.label()
    }

    /// Label of the last scored category, if a round has been scored.
    pub fn score_label(&self) -> Option<&'static str> {
        self.last_score.map(Category::label)
    }

    /// Bit `i` set when position `i` is held.
    pub fn hold_mask(&self) -> u8 {
        self.held
            .iter()
            .enumerate()
            .filter(|(_, held)| **held)
            .fold(0u8, |mask, (i, _)| mask | (1 << i))
    }
}

impl Write for RoundSnapshot {
    fn write(&self, writer: &mut impl BufMut) {
        self.phase.write(writer);
        self.balance.write(writer);
        self.hand.write(writer);
        self.hold_mask().write(writer);
        self.last_score.write(writer);
    }
}

impl Read for RoundSnapshot {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let phase = Phase::read(reader)?;
        let balance = u64::read(reader)?;
        let hand = Hand::read(reader)?;
        let mask = u8::read(reader)?;
        if mask >> DICE_COUNT != 0 {
            return Err(Error::Invalid("RoundSnapshot", "hold mask out of range"));
        }
        let mut held = [false; DICE_COUNT];
        for (i, slot) in held.iter_mut().enumerate() {
            *slot = mask & (1 << i) != 0;
        }
        Ok(Self {
            phase,
            balance,
            hand,
            held,
            last_score: Option::<Category>::read(reader)?,
        })
    }
}

impl EncodeSize for RoundSnapshot {
    fn encode_size(&self) -> usize {
        self.phase.encode_size()
            + self.balance.encode_size()
            + self.hand.encode_size()
            + 1
            + self.last_score.encode_size()
    }
}

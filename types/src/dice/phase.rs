use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

/// Stage of a single dice round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    #[default]
    Idle = 0,
    Rolling1 = 1,
    AwaitingHolds = 2,
    Rolling2 = 3,
    Scored = 4,
}

impl Phase {
    /// True while a roll animation owns the dice.
    pub fn is_rolling(self) -> bool {
        matches!(self, Phase::Rolling1 | Phase::Rolling2)
    }

    /// Round-status label shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Press space to roll",
            Phase::Rolling1 => "Rolling...",
            Phase::AwaitingHolds => "Hold dice with 1-5, space to roll again",
            Phase::Rolling2 => "Rolling again...",
            Phase::Scored => "Round over, press r for a new round",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Phase {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Rolling1),
            2 => Ok(Self::AwaitingHolds),
            3 => Ok(Self::Rolling2),
            4 => Ok(Self::Scored),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl Write for Phase {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Phase {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Self::try_from(u8::read(reader)?)
    }
}

impl FixedSize for Phase {
    const SIZE: usize = 1;
}

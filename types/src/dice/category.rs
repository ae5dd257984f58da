use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

/// Score category of a finished hand, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    Nothing = 0,
    Pair = 1,
    TwoPairs = 2,
    ThreeOfAKind = 3,
    FiveHighStraight = 4,
    SixHighStraight = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    FiveOfAKind = 8,
}

/// Payout and display label of a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandValue {
    pub payout: u64,
    pub label: &'static str,
}

/// Every category with its value, best first.
pub const HAND_VALUES: [(Category, HandValue); 9] = [
    (Category::FiveOfAKind, HandValue { payout: 60, label: "Five of a kind" }),
    (Category::FourOfAKind, HandValue { payout: 50, label: "Four of a kind" }),
    (Category::FullHouse, HandValue { payout: 40, label: "Full house" }),
    (Category::SixHighStraight, HandValue { payout: 35, label: "Six-high straight" }),
    (Category::FiveHighStraight, HandValue { payout: 30, label: "Five-high straight" }),
    (Category::ThreeOfAKind, HandValue { payout: 20, label: "Three of a kind" }),
    (Category::TwoPairs, HandValue { payout: 15, label: "Two pairs" }),
    (Category::Pair, HandValue { payout: 10, label: "Pair" }),
    (Category::Nothing, HandValue { payout: 0, label: "Nothing" }),
];

impl Category {
    pub fn value(self) -> HandValue {
        // HAND_VALUES is ordered best first, discriminants count up from Nothing.
        HAND_VALUES[HAND_VALUES.len() - 1 - self as usize].1
    }

    /// Amount credited to the balance when a hand scores this category.
    pub fn payout(self) -> u64 {
        self.value().payout
    }

    pub fn label(self) -> &'static str {
        self.value().label
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Write for Category {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Category {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::Nothing),
            1 => Ok(Self::Pair),
            2 => Ok(Self::TwoPairs),
            3 => Ok(Self::ThreeOfAKind),
            4 => Ok(Self::FiveHighStraight),
            5 => Ok(Self::SixHighStraight),
            6 => Ok(Self::FullHouse),
            7 => Ok(Self::FourOfAKind),
            8 => Ok(Self::FiveOfAKind),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for Category {
    const SIZE: usize = 1;
}

use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use thiserror::Error as ThisError;

use super::{DICE_COUNT, FACE_COUNT};

/// Value outside of `1..=6` offered as a die face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("die face out of range: {0}")]
pub struct FaceError(pub u8);

/// A rolled die face (1-6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Face(u8);

impl Face {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub const ALL: [Face; FACE_COUNT] = [Face(1), Face(2), Face(3), Face(4), Face(5), Face(6)];

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, handy for count tables and board rows.
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Face {
    type Error = FaceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(FaceError(value))
    }
}

/// Five die slots indexed by position.
///
/// An unrolled slot is `None`; it is never mistaken for a face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hand([Option<Face>; DICE_COUNT]);

impl Hand {
    /// Build a hand from raw values, rejecting anything outside `1..=6`.
    pub fn from_values(values: [u8; DICE_COUNT]) -> Result<Self, FaceError> {
        let mut hand = Self::default();
        for (position, value) in values.into_iter().enumerate() {
            hand.0[position] = Some(Face::try_from(value)?);
        }
        Ok(hand)
    }

    pub fn get(&self, position: usize) -> Option<Face> {
        self.0.get(position).copied().flatten()
    }

    pub fn set(&mut self, position: usize, face: Face) {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = Some(face);
        }
    }

    pub fn clear(&mut self) {
        self.0 = [None; DICE_COUNT];
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// All five faces, or `None` while any slot is unrolled.
    pub fn faces(&self) -> Option<[Face; DICE_COUNT]> {
        let mut faces = [Face(Face::MIN); DICE_COUNT];
        for (out, slot) in faces.iter_mut().zip(self.0) {
            *out = slot?;
        }
        Some(faces)
    }

    pub fn slots(&self) -> &[Option<Face>; DICE_COUNT] {
        &self.0
    }
}

impl Write for Face {
    fn write(&self, writer: &mut impl BufMut) {
        self.0.write(writer);
    }
}

impl Read for Face {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Face::new(value).ok_or(Error::Invalid("Face", "out of range"))
    }
}

impl FixedSize for Face {
    const SIZE: usize = 1;
}

// Unrolled slots travel as 0.
impl Write for Hand {
    fn write(&self, writer: &mut impl BufMut) {
        for slot in &self.0 {
            slot.map_or(0, Face::get).write(writer);
        }
    }
}

impl Read for Hand {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let mut hand = Self::default();
        for slot in hand.0.iter_mut() {
            *slot = match u8::read(reader)? {
                0 => None,
                value => Some(Face::new(value).ok_or(Error::Invalid("Hand", "face out of range"))?),
            };
        }
        Ok(hand)
    }
}

impl FixedSize for Hand {
    const SIZE: usize = DICE_COUNT;
}

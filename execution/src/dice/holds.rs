use lifedice_types::dice::DICE_COUNT;

/// Positions excluded from the second roll.
///
/// Stored as a bit mask: bit 0 = position 0, bit 1 = position 1, etc.
/// Phase rules live in the round state machine; this type only tracks
/// membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldSet(u8);

impl HoldSet {
    /// Flip `position`. Returns the new held flag, or `None` when the
    /// position is not a die.
    pub fn toggle(&mut self, position: usize) -> Option<bool> {
        if position >= DICE_COUNT {
            return None;
        }
        self.0 ^= 1 << position;
        Some(self.contains(position))
    }

    pub fn contains(&self, position: usize) -> bool {
        position < DICE_COUNT && self.0 & (1 << position) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn mask(&self) -> u8 {
        self.0
    }

    pub fn to_flags(&self) -> [bool; DICE_COUNT] {
        let mut flags = [false; DICE_COUNT];
        for (position, flag) in flags.iter_mut().enumerate() {
            *flag = self.contains(position);
        }
        flags
    }
}

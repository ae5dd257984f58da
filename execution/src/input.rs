//! Key presses to actions.

use crate::dice::Action;
use crate::life::LifeControl;

/// A key press, as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    Digit(u8),
    Char(char),
}

impl Key {
    /// Parse one line of terminal input: `" "` or `"space"` for the space bar,
    /// otherwise a single character. Letters are case-insensitive.
    pub fn parse(line: &str) -> Option<Key> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line == " " || line.trim().eq_ignore_ascii_case("space") {
            return Some(Key::Space);
        }
        let mut chars = line.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Some(match c.to_digit(10) {
            Some(digit) => Key::Digit(digit as u8),
            None => Key::Char(c.to_ascii_lowercase()),
        })
    }
}

/// Dice controls: space rolls, 1-5 toggle holds, r resets.
pub fn dice_action(key: Key) -> Option<Action> {
    match key {
        Key::Space => Some(Action::StartOrAdvanceRoll),
        Key::Digit(digit @ 1..=5) => Some(Action::ToggleHold(digit as usize - 1)),
        Key::Char('r') => Some(Action::Reset),
        _ => None,
    }
}

/// Life controls: space pauses, n steps, c clears, r randomizes.
pub fn life_control(key: Key) -> Option<LifeControl> {
    match key {
        Key::Space => Some(LifeControl::ToggleRunning),
        Key::Char('n') => Some(LifeControl::Step),
        Key::Char('c') => Some(LifeControl::Clear),
        Key::Char('r') => Some(LifeControl::Randomize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Key::parse(" \n"), Some(Key::Space));
        assert_eq!(Key::parse("SPACE"), Some(Key::Space));
        assert_eq!(Key::parse("3\r\n"), Some(Key::Digit(3)));
        assert_eq!(Key::parse("R"), Some(Key::Char('r')));
        assert_eq!(Key::parse(""), None);
        assert_eq!(Key::parse("roll"), None);
    }

    #[test]
    fn test_dice_keys() {
        assert_eq!(dice_action(Key::Space), Some(Action::StartOrAdvanceRoll));
        assert_eq!(dice_action(Key::Digit(1)), Some(Action::ToggleHold(0)));
        assert_eq!(dice_action(Key::Digit(5)), Some(Action::ToggleHold(4)));
        assert_eq!(dice_action(Key::Digit(0)), None);
        assert_eq!(dice_action(Key::Digit(6)), None);
        assert_eq!(dice_action(Key::Char('r')), Some(Action::Reset));
        assert_eq!(dice_action(Key::Char('x')), None);
    }

    #[test]
    fn test_life_keys() {
        assert_eq!(life_control(Key::Space), Some(LifeControl::ToggleRunning));
        assert_eq!(life_control(Key::Char('n')), Some(LifeControl::Step));
        assert_eq!(life_control(Key::Char('c')), Some(LifeControl::Clear));
        assert_eq!(life_control(Key::Char('r')), Some(LifeControl::Randomize));
        assert_eq!(life_control(Key::Digit(1)), None);
    }
}

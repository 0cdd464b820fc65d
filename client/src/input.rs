//! Keyboard mapping for the terminal stub.
//!
//! WASD keys map to travel directions the same way the reference client
//! mapped its arrow keys; the wire bytes themselves come from
//! [`Direction::command_byte`]. Note the keymap and the protocol disagree
//! about the letter `w` on purpose: the key `w` means "up" (North) while
//! the protocol byte `'w'` means West.

use shared::Direction;

/// Maps one typed character to a turn direction. Uppercase is accepted;
/// anything else is `None` and ignored by the caller.
pub fn direction_for_key(key: char) -> Option<Direction> {
    match key.to_ascii_lowercase() {
        'w' => Some(Direction::North),
        'a' => Some(Direction::West),
        's' => Some(Direction::South),
        'd' => Some(Direction::East),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_mapping() {
        assert_eq!(direction_for_key('w'), Some(Direction::North));
        assert_eq!(direction_for_key('a'), Some(Direction::West));
        assert_eq!(direction_for_key('s'), Some(Direction::South));
        assert_eq!(direction_for_key('d'), Some(Direction::East));
    }

    #[test]
    fn test_uppercase_accepted() {
        assert_eq!(direction_for_key('W'), Some(Direction::North));
        assert_eq!(direction_for_key('D'), Some(Direction::East));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(direction_for_key('x'), None);
        assert_eq!(direction_for_key(' '), None);
        assert_eq!(direction_for_key('\n'), None);
    }

    #[test]
    fn test_key_w_is_north_not_west() {
        // The keymap is screen-relative; the protocol byte for North is
        // 'n' even though the key is 'w'.
        let dir = direction_for_key('w').unwrap();
        assert_eq!(dir.command_byte(), b'n');
    }
}

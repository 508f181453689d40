//! Keyboard mapping

use crate::sim::Direction;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Move(Direction::Left)),
            "ArrowRight" => Some(Key::Move(Direction::Right)),
            "ArrowUp" => Some(Key::Move(Direction::Up)),
            "ArrowDown" => Some(Key::Move(Direction::Down)),
            "KeyR" => Some(Key::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Move(Direction::Left)));
        assert_eq!(Key::from_code("ArrowDown"), Some(Key::Move(Direction::Down)));
        assert_eq!(Key::from_code("KeyR"), Some(Key::Restart));
        assert_eq!(Key::from_code("KeyA"), None);
        assert_eq!(Key::from_code("arrowleft"), None);
    }
}

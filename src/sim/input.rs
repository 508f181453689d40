//! Directional intent fed into each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MOVE_SPEED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Held direction keys. Set on key-down, cleared on key-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl InputState {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    /// Per-tick displacement. Diagonals are deliberately not normalized.
    pub fn displacement(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.left {
            d.x -= MOVE_SPEED;
        }
        if self.right {
            d.x += MOVE_SPEED;
        }
        if self.up {
            d.y -= MOVE_SPEED;
        }
        if self.down {
            d.y += MOVE_SPEED;
        }
        d
    }
}

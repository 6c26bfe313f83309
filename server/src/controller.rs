//! Server-side sink for the client's directional commands.

use crate::entity::Player;
use shared::{Axis, Direction};

/// Held state of the four direction keys.
///
/// Velocity on each axis is rebuilt from the opposing pair on every change,
/// so the latest command fully determines it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    pub up_arrow: bool,
    pub down_arrow: bool,
    pub left_arrow: bool,
    pub right_arrow: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_direction(&mut self, direction: Direction, pressed: bool, player: &mut Player) {
        match direction {
            Direction::Up => self.up_arrow = pressed,
            Direction::Down => self.down_arrow = pressed,
            Direction::Left => self.left_arrow = pressed,
            Direction::Right => self.right_arrow = pressed,
        }

        let axis = direction.axis();
        player.piece.set_velocity(axis, self.velocity(axis));
    }

    /// Both or neither of an opposing pair held resolves to zero.
    pub fn velocity(&self, axis: Axis) -> i8 {
        match axis {
            Axis::Horizontal => self.right_arrow as i8 - self.left_arrow as i8,
            Axis::Vertical => self.down_arrow as i8 - self.up_arrow as i8,
        }
    }
}

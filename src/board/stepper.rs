//! Single-cell movement with the bounce rule.
//!
//! A move of N cells runs as N ticks. Each tick moves one cell in the
//! current direction. A tick that would leave the board past
//! [`WINNING_CELL`] lands on cell 99 instead and turns the player around, so
//! the rest of the move walks back down. The rule is checked on every tick,
//! including ticks already heading backward.

use super::{Cell, WINNING_CELL};
use crate::core::player::{Direction, Player};

/// Position and direction after one tick.
///
/// ```
/// use ular_tangga::board::tick;
/// use ular_tangga::core::Direction;
///
/// assert_eq!(tick(41, Direction::Forward), (42, Direction::Forward));
/// assert_eq!(tick(100, Direction::Forward), (99, Direction::Backward));
/// assert_eq!(tick(99, Direction::Backward), (98, Direction::Backward));
/// ```
#[must_use]
pub fn tick(position: Cell, direction: Direction) -> (Cell, Direction) {
    let next = i16::from(position) + direction.offset();
    if next > i16::from(WINNING_CELL) {
        (WINNING_CELL - 1, Direction::Backward)
    } else {
        (next as Cell, direction)
    }
}

/// Apply one tick to a moving player.
///
/// Returns `true` while steps remain. A player with no steps left is not
/// touched.
pub fn advance(player: &mut Player) -> bool {
    if player.steps_to_move == 0 {
        return false;
    }
    let (position, direction) = tick(player.position, player.move_direction);
    player.position = position;
    player.move_direction = direction;
    player.steps_to_move -= 1;
    player.steps_to_move > 0
}

/// Cell a forward move of `roll` from `start` ends on, bounce included.
///
/// ```
/// use ular_tangga::board::landing_cell;
///
/// assert_eq!(landing_cell(90, 4), 94);
/// assert_eq!(landing_cell(94, 6), 100);
/// assert_eq!(landing_cell(97, 6), 97);
/// ```
#[must_use]
pub fn landing_cell(start: Cell, roll: u8) -> Cell {
    let target = u16::from(start) + u16::from(roll);
    let winning = u16::from(WINNING_CELL);
    if target <= winning {
        target as Cell
    } else {
        (2 * winning - target) as Cell
    }
}

//! Placement policies: where a submitted move actually lands
//!
//! The policy is chosen once at session start and fixed for the game.
//! Resolution is a pure computation; the session performs the actual write.

use crate::board::{Board, Coord};
use serde::{Deserialize, Serialize};

/// How an input coordinate maps to the cell a stone lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementRule {
    /// Stones fall toward z = 0: the input's z is ignored and the stone
    /// lands on top of column (x, y). This is the shipped game's policy.
    Gravity,
    /// The stone lands exactly where requested, if that cell is empty.
    Free,
}

impl Default for PlacementRule {
    fn default() -> Self {
        PlacementRule::Gravity
    }
}

impl PlacementRule {
    /// Compute where a stone submitted at `input` would land.
    ///
    /// Returns `None` when the move is not playable (column full, cell
    /// occupied, or out of bounds) so the caller can drop it as a no-op.
    /// Never mutates the board.
    pub fn resolve(self, board: &Board, input: Coord) -> Option<Coord> {
        match self {
            PlacementRule::Gravity => {
                let z = board.column_top(input.x, input.y)?;
                Some(Coord::new(input.x, input.y, z))
            }
            PlacementRule::Free => {
                let in_bounds = Coord::is_valid(
                    i32::from(input.x),
                    i32::from(input.y),
                    i32::from(input.z),
                    board.size(),
                );
                (in_bounds && board.is_empty_at(input)).then_some(input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_gravity_lands_on_floor() {
        let board = Board::new(4);
        // The input z is ignored under gravity
        let landed = PlacementRule::Gravity.resolve(&board, Coord::new(2, 3, 3));
        assert_eq!(landed, Some(Coord::new(2, 3, 0)));
    }

    #[test]
    fn test_gravity_stacks() {
        let mut board = Board::new(4);
        board.place_stone(Coord::new(1, 1, 0), Stone::Black);
        board.place_stone(Coord::new(1, 1, 1), Stone::White);
        let landed = PlacementRule::Gravity.resolve(&board, Coord::new(1, 1, 0));
        assert_eq!(landed, Some(Coord::new(1, 1, 2)));
    }

    #[test]
    fn test_gravity_full_column_fails() {
        let mut board = Board::new(4);
        for z in 0..4 {
            board.place_stone(Coord::new(0, 0, z), Stone::Black);
        }
        assert_eq!(PlacementRule::Gravity.resolve(&board, Coord::new(0, 0, 0)), None);
    }

    #[test]
    fn test_gravity_out_of_bounds_fails() {
        let board = Board::new(4);
        assert_eq!(PlacementRule::Gravity.resolve(&board, Coord::new(4, 0, 0)), None);
    }

    #[test]
    fn test_free_exact_cell() {
        let board = Board::new(4);
        let input = Coord::new(1, 2, 3);
        assert_eq!(PlacementRule::Free.resolve(&board, input), Some(input));
    }

    #[test]
    fn test_free_occupied_fails() {
        let mut board = Board::new(4);
        board.place_stone(Coord::new(1, 2, 3), Stone::White);
        assert_eq!(PlacementRule::Free.resolve(&board, Coord::new(1, 2, 3)), None);
    }

    #[test]
    fn test_free_out_of_bounds_fails() {
        let board = Board::new(4);
        assert_eq!(PlacementRule::Free.resolve(&board, Coord::new(0, 0, 4)), None);
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let board = Board::new(4);
        let before = board.clone();
        let _ = PlacementRule::Gravity.resolve(&board, Coord::new(2, 2, 0));
        let _ = PlacementRule::Free.resolve(&board, Coord::new(2, 2, 0));
        assert_eq!(board, before);
    }
}

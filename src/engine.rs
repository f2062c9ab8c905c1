//! Heuristic AI decision engine
//!
//! Picks the AI's next column with a strictly ranked single-ply policy:
//!
//! 1. **Immediate win**: any landing cell that completes an own run of win
//!    length is played at once.
//! 2. **Immediate block**: any landing cell where the opponent would
//!    complete such a run is occupied instead.
//! 3. **Positional**: every legal column is scored (centrality, attack,
//!    defense, plus a sub-1.0 random jitter) and the maximum wins.
//!
//! All probing is pure: the engine never mutates the board it is given.
//!
//! # Example
//!
//! ```
//! use gomoku3d::{AiEngine, Board, Coord, Stone};
//!
//! let mut board = Board::new(4);
//! board.place_stone(Coord::new(0, 0, 0), Stone::Black);
//! board.place_stone(Coord::new(0, 0, 1), Stone::Black);
//! board.place_stone(Coord::new(0, 0, 2), Stone::Black);
//!
//! let mut engine = AiEngine::with_seed(7);
//! let result = engine.choose_move(&board, Stone::Black, 4);
//! assert_eq!(result.coord, Coord::new(0, 0, 3));
//! ```

use crate::board::{Board, Coord, Stone};
use crate::eval::{score_column, Weights};
use crate::rules::max_run_through;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which tier of the ranked policy produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The move completes the AI's own winning run
    ImmediateWin,
    /// The move occupies the opponent's completing cell
    Block,
    /// Best-scoring quiet move
    Positional,
}

/// Result of a move decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// The landing cell the engine chose. Under gravity only (x, y) are
    /// contractual; z re-resolves at submission.
    pub coord: Coord,
    /// Score of the chosen move (heuristic value for positional moves)
    pub score: f64,
    /// Policy tier that produced the move
    pub decision: Decision,
}

impl MoveResult {
    #[inline]
    fn immediate_win(coord: Coord) -> Self {
        Self {
            coord,
            score: 1_000_000.0,
            decision: Decision::ImmediateWin,
        }
    }

    #[inline]
    fn block(coord: Coord) -> Self {
        Self {
            coord,
            score: 900_000.0,
            decision: Decision::Block,
        }
    }

    #[inline]
    fn positional(coord: Coord, score: f64) -> Self {
        Self {
            coord,
            score,
            decision: Decision::Positional,
        }
    }
}

/// Single-ply heuristic engine.
///
/// Holds only the jitter RNG; all game state is passed in per call. Use
/// [`AiEngine::with_seed`] for deterministic behavior in tests.
pub struct AiEngine {
    rng: StdRng,
}

impl AiEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create an engine with a fixed jitter seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for `me` on the given board.
    ///
    /// Candidate cells are the column tops, enumerated x-major then y, which
    /// fixes the first-found order for the win/block tiers. A full board
    /// should never reach the engine; it degrades to a corner no-op rather
    /// than failing.
    pub fn choose_move(&mut self, board: &Board, me: Stone, win_len: usize) -> MoveResult {
        let candidates = candidate_cells(board);
        if candidates.is_empty() {
            return MoveResult::positional(Coord::new(0, 0, 0), 0.0);
        }

        // Tier 1: take an immediate win
        for &cell in &candidates {
            if max_run_through(board, cell, me) >= win_len {
                return MoveResult::immediate_win(cell);
            }
        }

        // Tier 2: block the opponent's immediate win
        let opponent = me.opponent();
        for &cell in &candidates {
            if max_run_through(board, cell, opponent) >= win_len {
                return MoveResult::block(cell);
            }
        }

        // Tier 3: heuristic scoring; first-found wins exact pre-jitter ties
        let mut best = candidates[0];
        let mut best_score = f64::NEG_INFINITY;
        for &cell in &candidates {
            let score =
                score_column(board, cell, me) + self.rng.random_range(0.0..Weights::JITTER);
            if score > best_score {
                best = cell;
                best_score = score;
            }
        }
        MoveResult::positional(best, best_score)
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Landing cells of every playable column, x-major then y.
fn candidate_cells(board: &Board) -> Vec<Coord> {
    let size = board.size() as u8;
    let mut cells = Vec::with_capacity(board.size() * board.size());
    for x in 0..size {
        for y in 0..size {
            if let Some(z) = board.column_top(x, y) {
                cells.push(Coord::new(x, y, z));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_column(board: &mut Board, x: u8, y: u8, stone: Stone, count: u8) {
        for z in 0..count {
            board.place_stone(Coord::new(x, y, z), stone);
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board = Board::new(4);
        filled_column(&mut board, 2, 2, Stone::Black, 3);

        let mut engine = AiEngine::with_seed(1);
        let result = engine.choose_move(&board, Stone::Black, 4);
        assert_eq!(result.decision, Decision::ImmediateWin);
        assert_eq!(result.coord, Coord::new(2, 2, 3));
    }

    #[test]
    fn test_win_preferred_over_block() {
        let mut board = Board::new(4);
        // Both sides have a completing column; the engine must take its own
        filled_column(&mut board, 0, 0, Stone::White, 3);
        filled_column(&mut board, 3, 3, Stone::Black, 3);

        let mut engine = AiEngine::with_seed(1);
        let result = engine.choose_move(&board, Stone::Black, 4);
        assert_eq!(result.decision, Decision::ImmediateWin);
        assert_eq!(result.coord, Coord::new(3, 3, 3));
    }

    #[test]
    fn test_blocks_opponent_win() {
        let mut board = Board::new(4);
        filled_column(&mut board, 3, 3, Stone::White, 3);

        let mut engine = AiEngine::with_seed(1);
        let result = engine.choose_move(&board, Stone::Black, 4);
        assert_eq!(result.decision, Decision::Block);
        assert_eq!(result.coord, Coord::new(3, 3, 3));
    }

    #[test]
    fn test_blocks_horizontal_threat() {
        let mut board = Board::new(4);
        for x in 0..3 {
            board.place_stone(Coord::new(x, 0, 0), Stone::White);
        }
        let mut engine = AiEngine::with_seed(1);
        let result = engine.choose_move(&board, Stone::Black, 4);
        assert_eq!(result.decision, Decision::Block);
        assert_eq!(result.coord, Coord::new(3, 0, 0));
    }

    #[test]
    fn test_quiet_board_prefers_center() {
        // Second mover on an otherwise empty board: the opponent opened in
        // the corner, and the most central landing cell adjacent to that
        // stone dominates every alternative by more than the jitter bound.
        let mut board = Board::new(4);
        board.place_stone(Coord::new(0, 0, 0), Stone::White);

        for seed in 0..20 {
            let mut engine = AiEngine::with_seed(seed);
            let result = engine.choose_move(&board, Stone::Black, 4);
            assert_eq!(result.decision, Decision::Positional);
            assert_eq!(result.coord, Coord::new(1, 1, 0));
        }
    }

    #[test]
    fn test_choose_move_is_pure() {
        let mut board = Board::new(4);
        board.place_stone(Coord::new(1, 1, 0), Stone::White);
        let before = board.clone();

        let mut engine = AiEngine::with_seed(3);
        let _ = engine.choose_move(&board, Stone::Black, 4);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board_degrades_without_panic() {
        let mut board = Board::new(3);
        for x in 0..3 {
            for y in 0..3 {
                filled_column(&mut board, x, y, Stone::Black, 3);
            }
        }
        let mut engine = AiEngine::with_seed(1);
        let result = engine.choose_move(&board, Stone::White, 3);
        assert_eq!(result.decision, Decision::Positional);
    }

    #[test]
    fn test_respects_win_length_three() {
        let mut board = Board::new(4);
        filled_column(&mut board, 1, 2, Stone::White, 2);

        let mut engine = AiEngine::with_seed(1);
        let result = engine.choose_move(&board, Stone::Black, 3);
        assert_eq!(result.decision, Decision::Block);
        assert_eq!(result.coord, Coord::new(1, 2, 2));
    }
}

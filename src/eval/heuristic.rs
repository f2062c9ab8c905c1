//! Heuristic scoring for candidate landing cells
//!
//! Scores a single hypothetical placement, no lookahead. Three terms:
//! - centrality: cells near the cube center touch more potential lines
//! - attack: squared lengths of own runs through the cell
//! - defense: the same for the opponent, slightly down-weighted
//!
//! The caller adds a sub-1.0 random jitter on top to break exact ties.

use crate::board::{Board, Coord, Stone};
use crate::rules::run_lengths_through;

/// Scoring weights for candidate evaluation
pub struct Weights;

impl Weights {
    /// Multiplier on (size − distance-to-center).
    ///
    /// Must be large enough that the centrality gap between neighboring
    /// column rings exceeds [`Weights::JITTER`], or the tie-break jitter
    /// could override positional preference on quiet boards.
    pub const CENTER: f64 = 4.0;
    /// Multiplier on the sum of squared own-run lengths
    pub const ATTACK: f64 = 2.0;
    /// Multiplier on the sum of squared opponent-run lengths.
    /// Below ATTACK: extending an own threat beats shadowing an equal one.
    pub const DEFEND: f64 = 1.6;
    /// Exclusive upper bound of the tie-breaking jitter
    pub const JITTER: f64 = 1.0;
}

/// Centrality term: `size` minus the Euclidean distance from the cube
/// center, scaled. Always positive since the center-to-corner distance is
/// below `size`.
fn centrality(size: usize, at: Coord) -> f64 {
    let center = (size as f64 - 1.0) / 2.0;
    let dx = f64::from(at.x) - center;
    let dy = f64::from(at.y) - center;
    let dz = f64::from(at.z) - center;
    let dist = (dx * dx + dy * dy + dz * dz).sqrt();
    (size as f64 - dist) * Weights::CENTER
}

/// Sum of squared run lengths through `at` for `stone`, one term per
/// direction, counting only runs of two or more.
fn line_potential(board: &Board, at: Coord, stone: Stone) -> f64 {
    run_lengths_through(board, at, stone)
        .into_iter()
        .filter(|&len| len >= 2)
        .map(|len| (len * len) as f64)
        .sum()
}

/// Score a candidate landing cell for `me`, jitter excluded.
pub fn score_column(board: &Board, at: Coord, me: Stone) -> f64 {
    let attack = line_potential(board, at, me) * Weights::ATTACK;
    let defense = line_potential(board, at, me.opponent()) * Weights::DEFEND;
    centrality(board.size(), at) + attack + defense
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_scores_highest_on_empty_board() {
        let board = Board::new(5);
        let center = score_column(&board, Coord::new(2, 2, 2), Stone::Black);
        let edge = score_column(&board, Coord::new(0, 2, 2), Stone::Black);
        let corner = score_column(&board, Coord::new(0, 0, 0), Stone::Black);
        assert!(center > edge);
        assert!(edge > corner);
    }

    #[test]
    fn test_centrality_gap_beats_jitter_on_small_grid() {
        // On the default 4³ grid the gap between the central columns and
        // the next ring must exceed the jitter bound, so the quiet-board
        // column choice is deterministic.
        let board = Board::new(4);
        let central = score_column(&board, Coord::new(1, 1, 0), Stone::Black);
        let ring = score_column(&board, Coord::new(0, 1, 0), Stone::Black);
        assert!(central - ring > Weights::JITTER);
    }

    #[test]
    fn test_attack_counts_own_runs() {
        let mut board = Board::new(4);
        board.place_stone(Coord::new(0, 0, 0), Stone::Black);
        board.place_stone(Coord::new(0, 0, 1), Stone::Black);

        let probe = Coord::new(0, 0, 2);
        let with_run = score_column(&board, probe, Stone::Black);
        let quiet = score_column(&Board::new(4), probe, Stone::Black);
        // A run of three through the probe adds 9 × ATTACK
        assert!((with_run - quiet - 9.0 * Weights::ATTACK).abs() < 1e-9);
    }

    #[test]
    fn test_defense_weighs_less_than_attack() {
        let mut mine = Board::new(4);
        mine.place_stone(Coord::new(1, 0, 0), Stone::Black);
        let mut theirs = Board::new(4);
        theirs.place_stone(Coord::new(1, 0, 0), Stone::White);

        let probe = Coord::new(2, 0, 0);
        let attacking = score_column(&mine, probe, Stone::Black);
        let defending = score_column(&theirs, probe, Stone::Black);
        assert!(attacking > defending);
        // Both beat a board with no neighbors at all
        let quiet = score_column(&Board::new(4), probe, Stone::Black);
        assert!(defending > quiet);
    }

    #[test]
    fn test_single_stones_do_not_score() {
        // Runs of one (the probe cell alone) carry no attack/defense term
        let board = Board::new(4);
        let probe = Coord::new(3, 3, 0);
        let expected_centrality_only = score_column(&board, probe, Stone::Black);
        let again = score_column(&board, probe, Stone::White);
        assert!((expected_centrality_only - again).abs() < 1e-9);
    }
}

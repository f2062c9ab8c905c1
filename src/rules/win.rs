//! Win condition checking
//!
//! A move wins when the just-played stone sits on a contiguous run of at
//! least the configured win length along any of the 13 line directions of
//! the cube. Each direction and its negation form one line, scanned both
//! ways from the played stone.

use crate::board::{Board, Coord, Stone};

/// Direction vectors for line checking (13 directions).
///
/// The 26 unit neighbors of a cell pair up into 13 lines: 3 axes,
/// 6 face diagonals, and 4 space diagonals. Checked in this fixed order.
pub const DIRECTIONS: [(i32, i32, i32); 13] = [
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    (1, 1, 0),
    (1, -1, 0),
    (1, 0, 1),
    (1, 0, -1),
    (0, 1, 1),
    (0, 1, -1),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
];

/// Find the winning line through the just-played stone, if any.
///
/// Reads the stone at `coord` (returns `None` for an empty cell) and scans
/// each direction both ways, concatenating the two arms into one line in
/// contiguous spatial order. The first direction whose maximal run reaches
/// `win_len` is reported; shorter runs are not.
pub fn winning_line(board: &Board, coord: Coord, win_len: usize) -> Option<Vec<Coord>> {
    let stone = board.get(coord);
    if stone == Stone::Empty {
        return None;
    }

    let size = board.size();
    for &(dx, dy, dz) in &DIRECTIONS {
        let mut line = vec![coord];

        // Extend in the negative direction first, front-inserting so the
        // line stays in spatial order
        let mut x = i32::from(coord.x) - dx;
        let mut y = i32::from(coord.y) - dy;
        let mut z = i32::from(coord.z) - dz;
        while Coord::is_valid(x, y, z, size) {
            let prev = Coord::new(x as u8, y as u8, z as u8);
            if board.get(prev) != stone {
                break;
            }
            line.insert(0, prev);
            x -= dx;
            y -= dy;
            z -= dz;
        }

        // Extend in the positive direction
        let mut x = i32::from(coord.x) + dx;
        let mut y = i32::from(coord.y) + dy;
        let mut z = i32::from(coord.z) + dz;
        while Coord::is_valid(x, y, z, size) {
            let next = Coord::new(x as u8, y as u8, z as u8);
            if board.get(next) != stone {
                break;
            }
            line.push(next);
            x += dx;
            y += dy;
            z += dz;
        }

        if line.len() >= win_len {
            return Some(line);
        }
    }
    None
}

/// Run lengths through `at` in all 13 directions, treating `at` as holding
/// `stone` regardless of its actual content.
///
/// This is the simulation primitive for the AI: probing a candidate cell
/// never requires writing to the board.
pub fn run_lengths_through(board: &Board, at: Coord, stone: Stone) -> [usize; 13] {
    let size = board.size();
    let mut lengths = [1usize; 13];

    for (i, &(dx, dy, dz)) in DIRECTIONS.iter().enumerate() {
        for sign in [1i32, -1] {
            let mut x = i32::from(at.x) + dx * sign;
            let mut y = i32::from(at.y) + dy * sign;
            let mut z = i32::from(at.z) + dz * sign;
            while Coord::is_valid(x, y, z, size)
                && board.get(Coord::new(x as u8, y as u8, z as u8)) == stone
            {
                lengths[i] += 1;
                x += dx * sign;
                y += dy * sign;
                z += dz * sign;
            }
        }
    }
    lengths
}

/// Longest run through `at` in any direction, with `at` treated as `stone`.
#[inline]
pub fn max_run_through(board: &Board, at: Coord, stone: Stone) -> usize {
    run_lengths_through(board, at, stone)
        .into_iter()
        .max()
        .unwrap_or(1)
}

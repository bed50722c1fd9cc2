//! Single-ply CPU opponent.
//!
//! No lookahead: each tier ranks the moves available right now by what
//! they capture.

use std::cmp::Reverse;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::movegen::Move;

/// CPU strength.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// Highest-value capture.
    Normal,
    /// Red capture (extra turn) first, then highest value.
    Hard,
}

/// Pick one of `moves` for the CPU. None only when `moves` is empty.
///
/// Ties between equally ranked moves go to the lowest start spot, then
/// the lowest landing spot, regardless of the order of `moves`.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    moves: &[Move],
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    if moves.is_empty() {
        return None;
    }
    if difficulty == Difficulty::Easy {
        return Some(moves[rng.random_range(0..moves.len())]);
    }
    moves
        .iter()
        .copied()
        .min_by_key(|mov| (Reverse(priority(board, mov, difficulty)), mov.start, mov.end))
}

/// Ranking key, larger is better: (seeks red and captures red, points).
fn priority(board: &Board, mov: &Move, difficulty: Difficulty) -> (bool, u32) {
    let captured = board.get(mov.captured_spot());
    let points = captured.map_or(0, Color::points);
    let red_first = difficulty == Difficulty::Hard && captured == Some(Color::Red);
    (red_first, points)
}

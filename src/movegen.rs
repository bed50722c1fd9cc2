//! Jump generation.
//!
//! A piece jumps along a line over a contiguous run of 1-3 occupied spots
//! and lands on the empty spot right after the run. Only the last piece of
//! the run (the one next to the landing spot) is captured.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::board::{Board, Spot};
use crate::topology::lines_containing;

/// Longest run of pieces a single jump may cross.
pub const MAX_JUMP: usize = 3;

/// The jumped-over spots of a move, ordered from the start outwards.
/// Stored inline; a run is never empty once it is part of a `Move`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct JumpRun {
    spots: [Spot; MAX_JUMP],
    len: u8,
}

impl JumpRun {
    const fn new() -> JumpRun {
        JumpRun {
            spots: [Spot(0); MAX_JUMP],
            len: 0,
        }
    }

    /// Append a spot. Returns false when the run is already at `MAX_JUMP`.
    fn push(&mut self, spot: Spot) -> bool {
        if self.len() == MAX_JUMP {
            return false;
        }
        self.spots[self.len()] = spot;
        self.len += 1;
        true
    }

    #[inline]
    pub fn as_slice(&self) -> &[Spot] {
        &self.spots[..self.len()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The spot adjacent to the landing spot.
    #[inline]
    pub fn last(&self) -> Spot {
        debug_assert!(!self.is_empty());
        self.spots[self.len().saturating_sub(1)]
    }
}

impl fmt::Debug for JumpRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl Serialize for JumpRun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

/// A jump.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    /// Spot of the jumping piece.
    pub start: Spot,
    /// Empty landing spot.
    pub end: Spot,
    /// Pieces jumped over, start side first.
    pub jumped: JumpRun,
}

impl Move {
    /// The single spot whose piece this move captures.
    #[inline]
    pub fn captured_spot(&self) -> Spot {
        self.jumped.last()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Jump({} -> {} over {:?})", self.start, self.end, self.jumped)
    }
}

/// Legal jumps for the piece on `spot`. Empty when the spot is empty.
///
/// Order follows the line table, walking backwards along each line before
/// forwards. Callers that need a stable choice must impose their own order.
pub fn moves_from(board: &Board, spot: Spot) -> Vec<Move> {
    if board.is_empty(spot) {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for line in lines_containing(spot) {
        let Some(at) = line.position(spot) else {
            continue;
        };
        for step in [-1, 1] {
            if let Some(mov) = walk(board, spot, line.spots(), at, step) {
                moves.push(mov);
            }
        }
    }
    moves
}

/// Walk outward from `spots[at]` collecting the occupied run, then land on
/// the first empty spot. No move when the run is empty, longer than
/// `MAX_JUMP`, or runs into the end of the line.
fn walk(board: &Board, start: Spot, spots: &[Spot], at: usize, step: isize) -> Option<Move> {
    let mut run = JumpRun::new();
    let mut idx = at as isize + step;
    loop {
        let spot = *spots.get(usize::try_from(idx).ok()?)?;
        if board.is_empty(spot) {
            if run.is_empty() {
                return None;
            }
            return Some(Move {
                start,
                end: spot,
                jumped: run,
            });
        }
        if !run.push(spot) {
            return None;
        }
        idx += step;
    }
}

/// Every legal jump on the board, grouped by ascending start spot.
pub fn all_moves(board: &Board) -> Vec<Move> {
    board
        .pieces()
        .flat_map(|(spot, _)| moves_from(board, spot))
        .collect()
}

/// True when any piece on the board can jump.
pub fn any_move_exists(board: &Board) -> bool {
    board
        .pieces()
        .any(|(spot, _)| !moves_from(board, spot).is_empty())
}

//! Capture, turn and end-of-game rules.
//!
//! Each rule is a free function over plain values so it can be tested on
//! its own; `GameSession` only sequences them.

use serde::{Serialize, Serializer};

use crate::board::{Board, Color, Player, Spot};
use crate::movegen::Move;
use crate::mode::Mode;

/// Running scores.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Scores {
    pub p1: u32,
    pub p2: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.p1,
            Player::Two => self.p2,
        }
    }

    pub fn credit(&mut self, player: Player, points: u32) {
        match player {
            Player::One => self.p1 += points,
            Player::Two => self.p2 += points,
        }
    }

    pub fn zero(&mut self, player: Player) {
        match player {
            Player::One => self.p1 = 0,
            Player::Two => self.p2 = 0,
        }
    }
}

/// The piece a move took off the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Capture {
    pub spot: Spot,
    pub color: Color,
}

/// Relocate the jumping piece and remove the piece next to the landing spot.
/// Pieces earlier in the jumped run stay where they are.
///
/// Panics if `mov` does not fit the board (empty start, occupied landing
/// spot or empty captured spot); moves must come from the move generator.
pub fn resolve_capture(board: &mut Board, mov: &Move) -> Capture {
    assert!(board.is_empty(mov.end), "jump must land on an empty spot");
    let piece = board
        .take(mov.start)
        .expect("jump must start from an occupied spot");
    board.place(mov.end, piece);

    let spot = mov.captured_spot();
    let color = board.take(spot).expect("captured spot must be occupied");
    Capture { spot, color }
}

/// Who acts after a capture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TurnAdvance {
    pub next: Player,
    /// True when `next` is the mover because a red piece was captured.
    pub extra_turn: bool,
}

/// Red grants the mover another turn in every mode. Otherwise the turn
/// passes, except in solo play where there is no one to pass to.
pub fn resolve_turn_advance(mode: Mode, mover: Player, captured: Color) -> TurnAdvance {
    if captured.is_red() {
        TurnAdvance {
            next: mover,
            extra_turn: true,
        }
    } else if mode.is_solo() {
        TurnAdvance {
            next: mover,
            extra_turn: false,
        }
    } else {
        TurnAdvance {
            next: mover.opponent(),
            extra_turn: false,
        }
    }
}

/// Final result of a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Winner {
    Player(Player),
    /// Solo play has no opponent; the score is the result.
    Solo,
}

// Matches the front-end's `1 | 2 | "SOLO"`.
impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Winner::Player(player) => player.serialize(serializer),
            Winner::Solo => serializer.serialize_str("SOLO"),
        }
    }
}

/// Resolution of the terminal position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub winner: Winner,
    pub loser: Option<Player>,
    /// Scores after the end-of-game adjustment.
    pub scores: Scores,
    /// The move that ended the game captured red.
    pub red_last: bool,
}

/// Decide the result once no piece can move.
///
/// Solo: ending on a red capture wipes the score. Versus: the mover loses
/// if the final capture was red; otherwise `next` (the player left to act
/// on a stuck board) loses. The loser's score is forced to 0.
pub fn resolve_outcome(
    mode: Mode,
    scores: Scores,
    mover: Player,
    next: Player,
    last_captured: Color,
) -> Outcome {
    let red_last = last_captured.is_red();
    let mut scores = scores;

    if mode.is_solo() {
        if red_last {
            scores.zero(mover);
        }
        return Outcome {
            winner: Winner::Solo,
            loser: None,
            scores,
            red_last,
        };
    }

    // Red check first.
    let loser = if red_last { mover } else { next };
    scores.zero(loser);
    Outcome {
        winner: Winner::Player(loser.opponent()),
        loser: Some(loser),
        scores,
        red_last,
    }
}

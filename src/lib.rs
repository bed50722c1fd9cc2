//! TRYPAS game engine: a peg-solitaire style jumping game on a 15-spot
//! triangle.
//!
//! # Board Encoding (64-bit)
//!
//! ```text
//! Bits 0-44:  Board state (15 spots × 3 bits per spot)
//! Bits 45-63: Unused (always zero)
//!
//! Each spot (3 bits):
//!   0 = empty, 1 = RED, 2 = YELLOW, 3 = GREEN, 4 = BLUE, 5 = WHITE
//!
//! Spot indices (tip to base):
//!             0
//!           1   2
//!         3   4   5
//!       6   7   8   9
//!     10  11  12  13  14
//! ```
//!
//! # Rules
//!
//! ```text
//! Opening:  player 1 removes any piece (not red in solo play)
//! Jump:     along a line, over 1-3 contiguous pieces, onto the empty
//!           spot right after them
//! Capture:  only the jumped piece next to the landing spot
//! Scoring:  RED 10, YELLOW 20, GREEN 30, BLUE 40, WHITE 50
//! Red:      capturing red grants another turn
//! End:      no piece can jump. Solo: a final red capture wipes the
//!           score. Versus: whoever caught the final red loses, else the
//!           player left to act loses; the loser scores 0
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod cpu;
pub mod error;
pub mod mode;
pub mod movegen;
pub mod rules;
pub mod session;
pub mod topology;
pub mod tutorial;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::{Board, Color, Player, Spot, BOARD_SIZE, PIECES_PER_COLOR};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use cpu::{choose_move, Difficulty};
pub use error::{ActionError, ConfigError, ParseError};
pub use mode::{Mode, Phase};
pub use movegen::{all_moves, any_move_exists, moves_from, JumpRun, Move, MAX_JUMP};
pub use rules::{
    resolve_capture, resolve_outcome, resolve_turn_advance, Capture, Outcome, Scores, TurnAdvance,
    Winner,
};
pub use session::{
    Action, ActionMessage, ClickOutcome, GameSession, HistoryEntry, SessionView,
    StepDirection, TurnReport,
};
pub use topology::{adjacent, lines_containing, Line, LineKind, LINES};

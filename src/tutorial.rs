//! Scripted solo walkthrough on a fixed layout.
//!
//! ```text
//!         Y                0
//!        G W              1 2
//!       R B Y            3 4 5
//!      W R G B          6 7 8 9
//!     Y W R G B       10 11 12 13 14
//! ```
//!
//! Playing the script clears every piece but one red on the tip.

use crate::board::{Board, Color, Spot, BOARD_SIZE};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::ActionError;
use crate::mode::{Mode, Phase};
use crate::session::{ClickOutcome, GameSession};

/// Starting layout, spots 0..14.
pub const TUTORIAL_LAYOUT: [Color; BOARD_SIZE] = {
    use Color::*;
    [
        Yellow, Green, White, Red, Blue, Yellow, White, Red, Green, Blue, Yellow, White, Red,
        Green, Blue,
    ]
};

/// The opening piece the walkthrough removes.
pub const OPENING_REMOVAL: Spot = Spot::new(0);

/// Score after the last scripted jump.
pub const TUTORIAL_FINAL_SCORE: u32 = 440;

/// One scripted jump.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Step {
    pub start: Spot,
    pub end: Spot,
    /// Spot whose piece the jump takes.
    pub captured: Spot,
    points: u32,
}

impl Step {
    const fn new(start: usize, end: usize, captured: usize, color: Color) -> Step {
        Step {
            start: Spot::new(start),
            end: Spot::new(end),
            captured: Spot::new(captured),
            points: color.points(),
        }
    }

    /// Points this jump adds to the score.
    pub fn expected_points(&self) -> u32 {
        self.points
    }
}

pub static TUTORIAL_SCRIPT: [Step; 13] = [
    Step::new(3, 0, 1, Color::Green),
    Step::new(5, 3, 4, Color::Blue),
    Step::new(14, 5, 9, Color::Blue),
    Step::new(2, 9, 5, Color::Blue),
    Step::new(12, 5, 8, Color::Green),
    Step::new(10, 12, 11, Color::White),
    Step::new(13, 11, 12, Color::Yellow),
    Step::new(11, 4, 7, Color::Red),
    Step::new(9, 2, 5, Color::Red),
    Step::new(6, 1, 3, Color::Yellow),
    Step::new(0, 3, 1, Color::White),
    Step::new(3, 5, 4, Color::Green),
    Step::new(5, 0, 2, Color::White),
];

/// The tutorial layout as a board.
pub fn layout() -> Board {
    Board::from_cells(TUTORIAL_LAYOUT.map(Some))
}

/// A fresh solo session on the tutorial layout, timed by `clock`.
pub fn session(config: EngineConfig, clock: Box<dyn Clock>) -> GameSession {
    let rng = config.rng();
    GameSession::with_layout(Mode::Solo, layout(), config, rng, clock)
}

/// Guides a session through the script, refusing clicks that leave it.
#[derive(Debug)]
pub struct Tutorial {
    session: GameSession,
}

impl Tutorial {
    pub fn new(config: EngineConfig) -> Tutorial {
        Tutorial {
            session: session(config, Box::new(SystemClock)),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The jump being taught, None during the removal and once finished.
    pub fn current_step(&self) -> Option<&'static Step> {
        let done = self.session.history().len();
        done.checked_sub(1).and_then(|i| TUTORIAL_SCRIPT.get(i))
    }

    /// The spot the player should tap next.
    pub fn expected_click(&self) -> Option<Spot> {
        if self.session.phase() == Phase::Removing {
            return Some(OPENING_REMOVAL);
        }
        let step = self.current_step()?;
        if self.session.selected_spot() == Some(step.start) {
            Some(step.end)
        } else {
            Some(step.start)
        }
    }

    pub fn click(&mut self, spot: Spot) -> Result<ClickOutcome, ActionError> {
        let expected = self.expected_click().ok_or(ActionError::GameOver)?;
        if spot != expected {
            return Err(ActionError::OffScript { expected });
        }
        self.session.handle_click(spot)
    }

    pub fn is_complete(&self) -> bool {
        self.session.phase() == Phase::GameOver
    }
}

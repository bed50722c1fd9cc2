//! Game session: phases, turns, history and replay.
//!
//! A session is an explicitly owned value. Every action either applies in
//! full or is refused with an `ActionError`, leaving the session untouched.

use std::fmt;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Color, Player, Spot, BOARD_SIZE};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::cpu;
use crate::error::ActionError;
pub use crate::mode::{Mode, Phase};
use crate::movegen::{all_moves, any_move_exists, moves_from, Move};
use crate::rules::{self, Capture, Scores, Winner};

/// What a history entry recorded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// The opening removal.
    Remove { spot: Spot },
    Jump {
        #[serde(rename = "move")]
        mov: Move,
    },
}

/// One recorded transition with full before/after snapshots.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub action: Action,
    pub player: Player,
    pub board_before: Board,
    pub board_after: Board,
    pub captured: Color,
    pub score_delta: u32,
    pub think_time_ms: u64,
}

/// Status line left by the last successful action.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionMessage {
    /// `cpu` is set when the CPU opponent earned the turn.
    ExtraTurn { player: Player, cpu: bool },
    /// Solo game ended on a red capture; the score was wiped.
    RedLastPenalty,
    /// Versus game ended with `player` catching the last red.
    LastRedCaught { player: Player },
    GameOver { winner: Winner },
}

impl fmt::Display for ActionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionMessage::ExtraTurn { cpu: true, .. } => {
                f.write_str("CPU gets an extra turn (red piece)")
            }
            ActionMessage::ExtraTurn { player, cpu: false } => {
                write!(f, "{player} gets an extra turn (red piece)")
            }
            ActionMessage::RedLastPenalty => {
                f.write_str("The last capture was red: score reset to 0")
            }
            ActionMessage::LastRedCaught { player } => {
                write!(f, "{player} caught the last red and loses")
            }
            ActionMessage::GameOver { winner: Winner::Solo } => f.write_str("Game over"),
            ActionMessage::GameOver {
                winner: Winner::Player(player),
            } => write!(f, "{player} wins"),
        }
    }
}

/// Replay step direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepDirection {
    Forward,
    Backward,
}

/// Result of an executed jump.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReport {
    #[serde(rename = "move")]
    pub mov: Move,
    pub player: Player,
    pub capture: Capture,
    pub extra_turn: bool,
    pub next_player: Player,
    /// Set when this move ended the game.
    pub winner: Option<Winner>,
}

/// Result of `GameSession::handle_click`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    Removed(Color),
    Moved(TurnReport),
    /// A piece was selected; its legal jumps, possibly none.
    Selected(Vec<Move>),
    Deselected,
}

/// Read-only projection handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub mode: Mode,
    pub phase: Phase,
    /// The replayed snapshot while a replay is active, else the live board.
    pub board: Board,
    pub current_player: Player,
    pub scores: Scores,
    pub captured_p1: Vec<Color>,
    pub captured_p2: Vec<Color>,
    pub selected_spot: Option<Spot>,
    pub valid_moves: Vec<Move>,
    pub winner: Option<Winner>,
    pub message: Option<String>,
    pub is_cpu_turn: bool,
    pub replay_cursor: Option<usize>,
    pub history_len: usize,
    pub elapsed_ms: u64,
    pub turn_elapsed_ms: u64,
}

/// One game of TRYPAS.
#[derive(Debug)]
pub struct GameSession {
    mode: Mode,
    config: EngineConfig,
    /// Layout the game started from, kept for "replay same board".
    initial_board: Board,
    board: Board,
    phase: Phase,
    current_player: Player,
    scores: Scores,
    captured: [Vec<Color>; 2],
    selected: Option<Spot>,
    history: Vec<HistoryEntry>,
    winner: Option<Winner>,
    message: Option<ActionMessage>,
    /// Replay cursor: 0 is the board before the first history entry,
    /// `k` the board after entry `k - 1`.
    replay: Option<usize>,
    rng: StdRng,
    clock: Box<dyn Clock>,
    started_ms: u64,
    turn_started_ms: u64,
    finished_ms: Option<u64>,
}

impl GameSession {
    /// New session on a shuffled board, seeded from `config` and timed by
    /// the wall clock.
    pub fn new(mode: Mode, config: EngineConfig) -> GameSession {
        let rng = config.rng();
        GameSession::with_rng(mode, config, rng, Box::new(SystemClock))
    }

    /// New session on a board shuffled with `rng`. `config.seed` is ignored.
    pub fn with_rng(
        mode: Mode,
        config: EngineConfig,
        mut rng: StdRng,
        clock: Box<dyn Clock>,
    ) -> GameSession {
        let layout = Board::shuffled(&mut rng);
        GameSession::with_layout(mode, layout, config, rng, clock)
    }

    /// New session starting from an explicit layout.
    ///
    /// Panics unless every spot holds a piece.
    pub fn with_layout(
        mode: Mode,
        layout: Board,
        config: EngineConfig,
        rng: StdRng,
        clock: Box<dyn Clock>,
    ) -> GameSession {
        assert_eq!(
            layout.piece_count(),
            BOARD_SIZE,
            "starting layout must fill every spot"
        );
        let now = clock.now_ms();
        info!(%mode, layout = ?layout, "session started");
        GameSession {
            mode,
            config,
            initial_board: layout,
            board: layout,
            phase: Phase::Removing,
            current_player: Player::One,
            scores: Scores::default(),
            captured: [Vec::new(), Vec::new()],
            selected: None,
            history: Vec::new(),
            winner: None,
            message: None,
            replay: None,
            rng,
            clock,
            started_ms: now,
            turn_started_ms: now,
            finished_ms: None,
        }
    }

    // ========== Projections ==========

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The live board (ignores any active replay).
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn initial_board(&self) -> &Board {
        &self.initial_board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Pieces credited to `player`, in capture order.
    pub fn captured(&self, player: Player) -> &[Color] {
        &self.captured[player.index()]
    }

    pub fn selected_spot(&self) -> Option<Spot> {
        self.selected
    }

    /// Legal jumps of the selected piece.
    pub fn selected_moves(&self) -> Vec<Move> {
        self.selected
            .map(|spot| moves_from(&self.board, spot))
            .unwrap_or_default()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn last_message(&self) -> Option<ActionMessage> {
        self.message
    }

    /// Pacing hint for scheduling `play_cpu_turn`.
    pub fn cpu_think_delay_ms(&self) -> u64 {
        self.config.cpu_think_delay_ms
    }

    /// Time since the game started, frozen once it is over.
    pub fn elapsed_ms(&self) -> u64 {
        self.stopwatch_now().saturating_sub(self.started_ms)
    }

    /// Time the player to act has spent on the current turn.
    pub fn turn_elapsed_ms(&self) -> u64 {
        self.stopwatch_now().saturating_sub(self.turn_started_ms)
    }

    fn stopwatch_now(&self) -> u64 {
        self.finished_ms.unwrap_or_else(|| self.clock.now_ms())
    }

    /// True when the CPU should be asked to move.
    pub fn is_cpu_turn(&self) -> bool {
        self.phase == Phase::Playing
            && self.replay.is_none()
            && self.mode.is_cpu(self.current_player)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            mode: self.mode,
            phase: self.phase,
            board: self.displayed_board(),
            current_player: self.current_player,
            scores: self.scores,
            captured_p1: self.captured[0].clone(),
            captured_p2: self.captured[1].clone(),
            selected_spot: self.selected,
            valid_moves: self.selected_moves(),
            winner: self.winner,
            message: self.message.map(|m| m.to_string()),
            is_cpu_turn: self.is_cpu_turn(),
            replay_cursor: self.replay,
            history_len: self.history.len(),
            elapsed_ms: self.elapsed_ms(),
            turn_elapsed_ms: self.turn_elapsed_ms(),
        }
    }

    // ========== Actions ==========

    fn ensure_live(&self) -> Result<(), ActionError> {
        if self.replay.is_some() {
            return Err(ActionError::ReplayActive);
        }
        Ok(())
    }

    fn ensure_playing(&self) -> Result<(), ActionError> {
        self.ensure_live()?;
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::GameOver => Err(ActionError::GameOver),
            Phase::Removing => Err(ActionError::WrongPhase(Phase::Removing)),
        }
    }

    /// Take the opening piece off the board. Credited to player 1.
    pub fn remove_initial_piece(&mut self, spot: Spot) -> Result<Color, ActionError> {
        self.ensure_live()?;
        match self.phase {
            Phase::Removing => {}
            Phase::GameOver => return Err(ActionError::GameOver),
            Phase::Playing => return Err(ActionError::WrongPhase(Phase::Playing)),
        }
        let color = self.board.get(spot).ok_or(ActionError::EmptySpot(spot))?;
        if self.mode.is_solo() && color.is_red() {
            debug!(%spot, "red opening removal refused in solo play");
            return Err(ActionError::RedOpeningInSolo);
        }

        let now = self.clock.now_ms();
        let before = self.board;
        self.board.take(spot);
        self.scores.credit(Player::One, color.points());
        self.captured[Player::One.index()].push(color);
        self.history.push(HistoryEntry {
            action: Action::Remove { spot },
            player: Player::One,
            board_before: before,
            board_after: self.board,
            captured: color,
            score_delta: color.points(),
            think_time_ms: now.saturating_sub(self.turn_started_ms),
        });

        self.phase = Phase::Playing;
        self.current_player = self.mode.first_to_jump();
        self.turn_started_ms = now;
        self.selected = None;
        self.message = None;
        debug!(%spot, %color, next = %self.current_player, "opening piece removed");
        Ok(color)
    }

    /// Select a piece and return its legal jumps for highlighting.
    ///
    /// Selecting the already selected spot clears the selection. Returns an
    /// empty list, without touching the selection, when selection is not
    /// possible right now (wrong phase, CPU turn, replay).
    pub fn select_spot(&mut self, spot: Spot) -> Vec<Move> {
        if self.ensure_playing().is_err() || self.is_cpu_turn() {
            return Vec::new();
        }
        if self.selected == Some(spot) {
            self.selected = None;
            return Vec::new();
        }
        let moves = moves_from(&self.board, spot);
        self.selected = (!moves.is_empty()).then_some(spot);
        moves
    }

    /// Execute a human player's jump.
    pub fn execute_move(&mut self, mov: Move) -> Result<TurnReport, ActionError> {
        self.ensure_playing()?;
        if self.mode.is_cpu(self.current_player) {
            return Err(ActionError::CpuTurn);
        }
        self.apply_jump(mov)
    }

    /// The legal jump between two spots, if there is one.
    pub fn find_move(&self, start: Spot, end: Spot) -> Option<Move> {
        moves_from(&self.board, start)
            .into_iter()
            .find(|mov| mov.end == end)
    }

    /// Let the CPU pick and play its move.
    pub fn play_cpu_turn(&mut self) -> Result<TurnReport, ActionError> {
        if !self.is_cpu_turn() {
            return Err(ActionError::NotCpuTurn);
        }
        let difficulty = self.mode.difficulty().ok_or(ActionError::NotCpuTurn)?;
        let moves = all_moves(&self.board);
        // Playing always has a legal move; the terminal check runs after
        // every jump.
        let mov = cpu::choose_move(&self.board, &moves, difficulty, &mut self.rng)
            .ok_or(ActionError::GameOver)?;
        debug!(?difficulty, ?mov, candidates = moves.len(), "cpu chose move");
        self.apply_jump(mov)
    }

    /// Route a tap on `spot` the way the board UI expects: remove during
    /// the opening, jump to a highlighted target, toggle or change the
    /// selection otherwise.
    pub fn handle_click(&mut self, spot: Spot) -> Result<ClickOutcome, ActionError> {
        self.ensure_live()?;
        match self.phase {
            Phase::GameOver => Err(ActionError::GameOver),
            Phase::Removing => self.remove_initial_piece(spot).map(ClickOutcome::Removed),
            Phase::Playing => {
                if self.is_cpu_turn() {
                    return Err(ActionError::CpuTurn);
                }
                if self.selected == Some(spot) {
                    self.selected = None;
                    return Ok(ClickOutcome::Deselected);
                }
                if let Some(mov) = self.selected.and_then(|from| self.find_move(from, spot)) {
                    return self.apply_jump(mov).map(ClickOutcome::Moved);
                }
                if self.board.is_empty(spot) {
                    return Err(ActionError::EmptySpot(spot));
                }
                Ok(ClickOutcome::Selected(self.select_spot(spot)))
            }
        }
    }

    fn apply_jump(&mut self, mov: Move) -> Result<TurnReport, ActionError> {
        if !moves_from(&self.board, mov.start).contains(&mov) {
            debug!(?mov, "illegal move refused");
            return Err(ActionError::IllegalMove {
                start: mov.start,
                end: mov.end,
            });
        }

        let now = self.clock.now_ms();
        let mover = self.current_player;
        let before = self.board;
        let capture = rules::resolve_capture(&mut self.board, &mov);
        let points = capture.color.points();
        self.scores.credit(mover, points);
        self.captured[mover.index()].push(capture.color);
        self.history.push(HistoryEntry {
            action: Action::Jump { mov },
            player: mover,
            board_before: before,
            board_after: self.board,
            captured: capture.color,
            score_delta: points,
            think_time_ms: now.saturating_sub(self.turn_started_ms),
        });

        let advance = rules::resolve_turn_advance(self.mode, mover, capture.color);
        self.current_player = advance.next;
        self.turn_started_ms = now;
        self.selected = None;
        self.message = advance
            .extra_turn
            .then_some(ActionMessage::ExtraTurn {
                player: mover,
                cpu: self.mode.is_cpu(mover),
            });
        debug!(
            ?mov,
            player = %mover,
            captured = %capture.color,
            extra_turn = advance.extra_turn,
            "jump executed"
        );

        let winner = if any_move_exists(&self.board) {
            None
        } else {
            Some(self.finish(mover, advance.next, capture.color, now))
        };

        Ok(TurnReport {
            mov,
            player: mover,
            capture,
            extra_turn: advance.extra_turn,
            next_player: advance.next,
            winner,
        })
    }

    fn finish(&mut self, mover: Player, next: Player, last: Color, now: u64) -> Winner {
        let outcome = rules::resolve_outcome(self.mode, self.scores, mover, next, last);
        self.scores = outcome.scores;
        self.winner = Some(outcome.winner);
        self.phase = Phase::GameOver;
        self.finished_ms = Some(now);
        self.message = Some(match (self.mode.is_solo(), outcome.red_last) {
            (true, true) => ActionMessage::RedLastPenalty,
            (false, true) => ActionMessage::LastRedCaught { player: mover },
            _ => ActionMessage::GameOver {
                winner: outcome.winner,
            },
        });
        info!(
            winner = ?outcome.winner,
            p1 = self.scores.p1,
            p2 = self.scores.p2,
            red_last = outcome.red_last,
            pieces_left = self.board.piece_count(),
            "game over"
        );
        outcome.winner
    }

    /// Start over. With `reuse_initial_board` the previous starting layout
    /// is dealt again, otherwise a fresh shuffle.
    pub fn reset(&mut self, reuse_initial_board: bool) {
        if !reuse_initial_board {
            self.initial_board = Board::shuffled(&mut self.rng);
        }
        let now = self.clock.now_ms();
        self.board = self.initial_board;
        self.phase = Phase::Removing;
        self.current_player = Player::One;
        self.scores = Scores::default();
        self.captured = [Vec::new(), Vec::new()];
        self.selected = None;
        self.history.clear();
        self.winner = None;
        self.message = None;
        self.replay = None;
        self.started_ms = now;
        self.turn_started_ms = now;
        self.finished_ms = None;
        info!(mode = %self.mode, reuse_initial_board, "session reset");
    }

    // ========== Replay ==========

    /// Begin stepping through the recorded history from the first snapshot.
    pub fn start_replay(&mut self) -> Result<Board, ActionError> {
        if self.history.is_empty() {
            return Err(ActionError::NoHistory);
        }
        self.replay = Some(0);
        self.selected = None;
        Ok(self.snapshot(0))
    }

    /// Move the replay cursor one entry, clamped to the history bounds.
    /// Returns the new cursor.
    pub fn step_replay(&mut self, direction: StepDirection) -> Result<usize, ActionError> {
        let cursor = self.replay.ok_or(ActionError::NotReplaying)?;
        let next = match direction {
            StepDirection::Forward => (cursor + 1).min(self.history.len()),
            StepDirection::Backward => cursor.saturating_sub(1),
        };
        self.replay = Some(next);
        Ok(next)
    }

    /// Leave replay and return to the live game.
    pub fn stop_replay(&mut self) {
        self.replay = None;
    }

    pub fn replay_cursor(&self) -> Option<usize> {
        self.replay
    }

    /// What the UI should draw: the replay snapshot or the live board.
    pub fn displayed_board(&self) -> Board {
        match self.replay {
            Some(cursor) => self.snapshot(cursor),
            None => self.board,
        }
    }

    fn snapshot(&self, cursor: usize) -> Board {
        match cursor.checked_sub(1) {
            None => self.history.first().map_or(self.board, |e| e.board_before),
            Some(i) => self.history[i].board_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use rand::SeedableRng;

    const LAYOUT: &str = "RYGBWRYGBWRYGBW";

    fn session(mode: Mode) -> (GameSession, ManualClock) {
        let clock = ManualClock::new(10_000);
        let session = GameSession::with_layout(
            mode,
            LAYOUT.parse().unwrap(),
            EngineConfig::default(),
            StdRng::seed_from_u64(5),
            Box::new(clock.clone()),
        );
        (session, clock)
    }

    /// Session already in the playing phase on a hand-made board.
    fn playing(mode: Mode, board: &str, player: Player) -> GameSession {
        let (mut s, _) = session(mode);
        s.board = board.parse().unwrap();
        s.phase = Phase::Playing;
        s.current_player = player;
        s
    }

    fn jump(s: &GameSession, start: usize, end: usize) -> Move {
        s.find_move(Spot::new(start), Spot::new(end)).unwrap()
    }

    #[test]
    fn test_new_session_is_full_and_removing() {
        let s = GameSession::new(Mode::Local, EngineConfig { seed: Some(1), ..Default::default() });
        assert_eq!(s.phase(), Phase::Removing);
        assert_eq!(s.current_player(), Player::One);
        assert_eq!(s.board().piece_count(), 15);
        for color in Color::ALL {
            assert_eq!(s.board().count(color), 3);
        }
        assert_eq!(s.scores(), Scores::default());
        assert!(s.winner().is_none());
    }

    #[test]
    fn test_remove_credits_player_one() {
        let (mut s, _) = session(Mode::Local);
        let color = s.remove_initial_piece(Spot::new(4)).unwrap();
        assert_eq!(color, Color::White);
        assert_eq!(s.board().piece_count(), 14);
        assert_eq!(s.scores(), Scores { p1: 50, p2: 0 });
        assert_eq!(s.captured(Player::One), &[Color::White]);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].action, Action::Remove { spot: Spot::new(4) });
    }

    #[test]
    fn test_first_to_jump_per_mode() {
        for (mode, expected) in [
            (Mode::Local, Player::Two),
            (Mode::Solo, Player::One),
            (Mode::CpuEasy, Player::Two),
            (Mode::CpuNormal, Player::Two),
            (Mode::CpuHard, Player::Two),
        ] {
            let (mut s, _) = session(mode);
            s.remove_initial_piece(Spot::new(1)).unwrap();
            assert_eq!(s.current_player(), expected, "{mode}");
        }
    }

    #[test]
    fn test_solo_refuses_red_opening() {
        let (mut s, _) = session(Mode::Solo);
        assert_eq!(
            s.remove_initial_piece(Spot::new(0)),
            Err(ActionError::RedOpeningInSolo)
        );
        assert_eq!(s.phase(), Phase::Removing);
        assert_eq!(s.board().piece_count(), 15);
        assert!(s.history().is_empty());

        // Other modes allow it.
        let (mut s, _) = session(Mode::Local);
        assert_eq!(s.remove_initial_piece(Spot::new(0)), Ok(Color::Red));
    }

    #[test]
    fn test_remove_only_once() {
        let (mut s, _) = session(Mode::Local);
        s.remove_initial_piece(Spot::new(1)).unwrap();
        assert_eq!(
            s.remove_initial_piece(Spot::new(2)),
            Err(ActionError::WrongPhase(Phase::Playing))
        );
        assert_eq!(s.board().piece_count(), 14);
    }

    #[test]
    fn test_remove_empty_spot_is_refused() {
        let (mut s, _) = session(Mode::Local);
        s.board.take(Spot::new(3));
        assert_eq!(
            s.remove_initial_piece(Spot::new(3)),
            Err(ActionError::EmptySpot(Spot::new(3)))
        );
    }

    #[test]
    fn test_move_before_removal_is_refused() {
        let (mut s, _) = session(Mode::Local);
        let mut board = *s.board();
        board.take(Spot::new(0));
        let mov = moves_from(&board, Spot::new(3))[0];
        assert_eq!(
            s.execute_move(mov),
            Err(ActionError::WrongPhase(Phase::Removing))
        );
    }

    #[test]
    fn test_red_capture_grants_extra_turn() {
        let mut s = playing(Mode::Local, "..........WR.B.", Player::Two);
        let report = s.execute_move(jump(&s, 10, 12)).unwrap();
        assert!(report.extra_turn);
        assert_eq!(report.next_player, Player::Two);
        assert_eq!(s.current_player(), Player::Two);
        assert_eq!(s.scores().p2, 10);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(
            s.last_message(),
            Some(ActionMessage::ExtraTurn { player: Player::Two, cpu: false })
        );
        assert_eq!(
            s.view().message.as_deref(),
            Some("Player 2 gets an extra turn (red piece)")
        );
    }

    #[test]
    fn test_other_capture_passes_turn() {
        let mut s = playing(Mode::Local, "..........WB.B.", Player::Two);
        let report = s.execute_move(jump(&s, 10, 12)).unwrap();
        assert!(!report.extra_turn);
        assert_eq!(s.current_player(), Player::One);
        assert_eq!(s.scores().p2, 40);
        assert_eq!(s.captured(Player::Two), &[Color::Blue]);
        assert_eq!(s.last_message(), None);
    }

    #[test]
    fn test_solo_turn_never_passes() {
        let mut s = playing(Mode::Solo, "..........WB.B.", Player::One);
        s.execute_move(jump(&s, 10, 12)).unwrap();
        assert_eq!(s.current_player(), Player::One);
    }

    #[test]
    fn test_illegal_move_leaves_state_untouched() {
        let mut s = playing(Mode::Local, "..........WB.B.", Player::One);
        let mut mov = jump(&s, 10, 12);
        mov.end = Spot::new(14);
        let before = s.view();
        assert_eq!(
            s.execute_move(mov),
            Err(ActionError::IllegalMove { start: Spot::new(10), end: Spot::new(14) })
        );
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_solo_red_last_zeroes_score() {
        let mut s = playing(Mode::Solo, "..........WR...", Player::One);
        s.scores = Scores { p1: 390, p2: 0 };
        let report = s.execute_move(jump(&s, 10, 12)).unwrap();
        assert_eq!(report.winner, Some(Winner::Solo));
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.scores().p1, 0);
        assert_eq!(s.last_message(), Some(ActionMessage::RedLastPenalty));
    }

    #[test]
    fn test_solo_clean_finish_keeps_score() {
        let mut s = playing(Mode::Solo, "..........WB...", Player::One);
        s.scores = Scores { p1: 390, p2: 0 };
        s.execute_move(jump(&s, 10, 12)).unwrap();
        assert_eq!(s.winner(), Some(Winner::Solo));
        assert_eq!(s.scores().p1, 430);
        assert_eq!(
            s.last_message(),
            Some(ActionMessage::GameOver { winner: Winner::Solo })
        );
    }

    #[test]
    fn test_versus_stuck_opponent_loses() {
        let mut s = playing(Mode::Local, "..........WB...", Player::One);
        s.scores = Scores { p1: 60, p2: 150 };
        let report = s.execute_move(jump(&s, 10, 12)).unwrap();
        assert_eq!(report.winner, Some(Winner::Player(Player::One)));
        assert_eq!(s.scores(), Scores { p1: 100, p2: 0 });
    }

    #[test]
    fn test_versus_last_red_mover_loses() {
        let mut s = playing(Mode::Local, "..........WR...", Player::One);
        s.scores = Scores { p1: 200, p2: 150 };
        s.execute_move(jump(&s, 10, 12)).unwrap();
        assert_eq!(s.winner(), Some(Winner::Player(Player::Two)));
        assert_eq!(s.scores(), Scores { p1: 0, p2: 150 });
        assert_eq!(
            s.last_message(),
            Some(ActionMessage::LastRedCaught { player: Player::One })
        );
    }

    #[test]
    fn test_game_over_refuses_actions() {
        let mut s = playing(Mode::Local, "..........WB...", Player::One);
        s.execute_move(jump(&s, 10, 12)).unwrap();
        assert_eq!(s.handle_click(Spot::new(12)), Err(ActionError::GameOver));
        assert!(s.select_spot(Spot::new(12)).is_empty());
    }

    #[test]
    fn test_select_spot_toggles() {
        let mut s = playing(Mode::Local, "..........WB.B.", Player::One);
        let moves = s.select_spot(Spot::new(10));
        assert_eq!(moves.len(), 1);
        assert_eq!(s.selected_spot(), Some(Spot::new(10)));
        assert!(s.select_spot(Spot::new(10)).is_empty());
        assert_eq!(s.selected_spot(), None);

        // A piece without jumps clears the selection.
        s.select_spot(Spot::new(10));
        assert!(s.select_spot(Spot::new(11)).is_empty());
        assert_eq!(s.selected_spot(), None);
    }

    #[test]
    fn test_click_on_empty_spot_without_selection() {
        let (mut s, _) = session(Mode::Local);
        assert_eq!(s.handle_click(Spot::new(0)), Ok(ClickOutcome::Removed(Color::Red)));
        assert_eq!(s.handle_click(Spot::new(0)), Err(ActionError::EmptySpot(Spot::new(0))));

        let ClickOutcome::Selected(moves) = s.handle_click(Spot::new(3)).unwrap() else {
            panic!("expected a selection");
        };
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].end, Spot::new(0));
    }

    #[test]
    fn test_click_to_target_executes() {
        let (mut s, _) = session(Mode::Local);
        s.handle_click(Spot::new(0)).unwrap();
        s.handle_click(Spot::new(3)).unwrap();
        let ClickOutcome::Moved(report) = s.handle_click(Spot::new(0)).unwrap() else {
            panic!("expected a jump");
        };
        assert_eq!(report.player, Player::Two);
        assert_eq!(report.capture, Capture { spot: Spot::new(1), color: Color::Yellow });
        assert_eq!(s.board().get(Spot::new(0)), Some(Color::Blue));
        assert_eq!(s.current_player(), Player::One);
        assert_eq!(s.selected_spot(), None);
    }

    #[test]
    fn test_click_selected_spot_deselects() {
        let (mut s, _) = session(Mode::Local);
        s.handle_click(Spot::new(0)).unwrap();
        s.handle_click(Spot::new(3)).unwrap();
        assert_eq!(s.handle_click(Spot::new(3)), Ok(ClickOutcome::Deselected));
        assert_eq!(s.selected_spot(), None);
    }

    #[test]
    fn test_cpu_turn_blocks_human_input() {
        let (mut s, _) = session(Mode::CpuHard);
        s.remove_initial_piece(Spot::new(0)).unwrap();
        assert!(s.is_cpu_turn());
        assert_eq!(s.handle_click(Spot::new(3)), Err(ActionError::CpuTurn));
        let mov = jump(&s, 3, 0);
        assert_eq!(s.execute_move(mov), Err(ActionError::CpuTurn));
        assert!(s.select_spot(Spot::new(3)).is_empty());

        let report = s.play_cpu_turn().unwrap();
        assert_eq!(report.player, Player::Two);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_play_cpu_turn_outside_cpu_turn() {
        let (mut s, _) = session(Mode::Local);
        s.remove_initial_piece(Spot::new(0)).unwrap();
        assert_eq!(s.play_cpu_turn(), Err(ActionError::NotCpuTurn));
    }

    #[test]
    fn test_hard_cpu_chases_red_and_keeps_turn() {
        let mut s = playing(Mode::CpuHard, "..........WR.WB", Player::Two);
        let report = s.play_cpu_turn().unwrap();
        assert_eq!(report.capture.color, Color::Red);
        assert!(report.extra_turn);
        assert!(s.is_cpu_turn());
        assert_eq!(
            s.last_message(),
            Some(ActionMessage::ExtraTurn { player: Player::Two, cpu: true })
        );
        assert_eq!(
            s.last_message().map(|m| m.to_string()).as_deref(),
            Some("CPU gets an extra turn (red piece)")
        );
    }

    #[test]
    fn test_think_time_recorded() {
        let (mut s, clock) = session(Mode::Local);
        clock.advance(2_500);
        s.remove_initial_piece(Spot::new(0)).unwrap();
        clock.advance(700);
        assert_eq!(s.turn_elapsed_ms(), 700);
        let mov = jump(&s, 3, 0);
        s.execute_move(mov).unwrap();

        assert_eq!(s.history()[0].think_time_ms, 2_500);
        assert_eq!(s.history()[1].think_time_ms, 700);
        assert_eq!(s.turn_elapsed_ms(), 0);
        assert_eq!(s.elapsed_ms(), 3_200);
    }

    #[test]
    fn test_elapsed_freezes_at_game_over() {
        let (mut s, clock) = session(Mode::Solo);
        s.board = "..........WB...".parse().unwrap();
        s.phase = Phase::Playing;
        clock.advance(1_000);
        s.execute_move(jump(&s, 10, 12)).unwrap();
        clock.advance(60_000);
        assert_eq!(s.elapsed_ms(), 1_000);
    }

    #[test]
    fn test_reset_reuses_or_reshuffles() {
        let (mut s, _) = session(Mode::Local);
        s.remove_initial_piece(Spot::new(0)).unwrap();
        s.reset(true);
        assert_eq!(*s.board(), LAYOUT.parse::<Board>().unwrap());
        assert_eq!(s.phase(), Phase::Removing);
        assert!(s.history().is_empty());
        assert_eq!(s.scores(), Scores::default());

        s.reset(false);
        assert_eq!(s.board().piece_count(), 15);
        assert_eq!(*s.board(), *s.initial_board());
    }

    #[test]
    fn test_replay_walks_snapshots() {
        let (mut s, _) = session(Mode::Local);
        assert_eq!(s.start_replay(), Err(ActionError::NoHistory));

        s.remove_initial_piece(Spot::new(0)).unwrap();
        s.execute_move(jump(&s, 3, 0)).unwrap();
        let live = *s.board();

        let first = s.start_replay().unwrap();
        assert_eq!(first, LAYOUT.parse::<Board>().unwrap());
        assert_eq!(s.step_replay(StepDirection::Backward), Ok(0));
        assert_eq!(s.step_replay(StepDirection::Forward), Ok(1));
        assert_eq!(s.displayed_board().piece_count(), 14);
        assert_eq!(s.step_replay(StepDirection::Forward), Ok(2));
        assert_eq!(s.step_replay(StepDirection::Forward), Ok(2));
        assert_eq!(s.displayed_board(), live);

        assert_eq!(s.handle_click(Spot::new(5)), Err(ActionError::ReplayActive));
        s.stop_replay();
        assert_eq!(s.step_replay(StepDirection::Forward), Err(ActionError::NotReplaying));
        assert_eq!(s.displayed_board(), live);
    }

    #[test]
    fn test_view_serializes_for_frontend() {
        let (mut s, _) = session(Mode::CpuNormal);
        s.remove_initial_piece(Spot::new(2)).unwrap();
        let json = serde_json::to_value(s.view()).unwrap();
        assert_eq!(json["mode"], "CPU_NORMAL");
        assert_eq!(json["phase"], "PLAYING");
        assert_eq!(json["currentPlayer"], 2);
        assert_eq!(json["scores"]["p1"], 30);
        assert_eq!(json["capturedP1"], serde_json::json!(["GREEN"]));
        assert_eq!(json["isCpuTurn"], true);
        assert!(json["board"][2].is_null());

        let entry = serde_json::to_value(s.history()[0]).unwrap();
        assert_eq!(entry["action"]["type"], "REMOVE");
        assert_eq!(entry["scoreDelta"], 30);
    }
}

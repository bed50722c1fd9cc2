//! WASM bindings for trypas-core
//!
//! Provides a JavaScript-friendly API for a game session. The host owns
//! the clock: call `setNow` with `Date.now()` before each action so think
//! times and timers line up with what the page shows.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::clock::ManualClock;
use crate::config::EngineConfig;
use crate::error::ActionError;
use crate::mode::Mode;
use crate::session::{ClickOutcome, GameSession, StepDirection};
use crate::{tutorial, Board, Spot};

/// WASM-friendly wrapper around GameSession
#[wasm_bindgen]
pub struct WasmSession {
    inner: GameSession,
    clock: ManualClock,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session for a mode name ("LOCAL", "SOLO", "CPU_EASY", ...).
    /// `seed` drives the shuffle and the easy CPU.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, seed: u64, now_ms: f64) -> Result<WasmSession, JsValue> {
        let mode: Mode = mode.parse().map_err(to_js)?;
        let clock = ManualClock::new(now_ms as u64);
        let config = EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        };
        let inner = GameSession::with_rng(
            mode,
            config,
            StdRng::seed_from_u64(seed),
            Box::new(clock.clone()),
        );
        Ok(WasmSession { inner, clock })
    }

    /// Solo session on the tutorial layout.
    pub fn tutorial(now_ms: f64) -> WasmSession {
        let clock = ManualClock::new(now_ms as u64);
        let config = EngineConfig {
            seed: Some(0),
            ..EngineConfig::default()
        };
        let inner = tutorial::session(config, Box::new(clock.clone()));
        WasmSession { inner, clock }
    }

    /// Set the current time in milliseconds.
    #[wasm_bindgen(js_name = setNow)]
    pub fn set_now(&self, now_ms: f64) {
        self.clock.set(now_ms as u64);
    }

    /// Remove the opening piece. Returns its color name.
    #[wasm_bindgen(js_name = removeInitialPiece)]
    pub fn remove_initial_piece(&mut self, spot: u8) -> Result<String, JsValue> {
        let color = self.inner.remove_initial_piece(spot_arg(spot)?).map_err(to_js)?;
        Ok(color.to_string())
    }

    /// Select a piece. Returns its legal jumps as JSON
    /// `[{ start, end, jumped: [..] }]`.
    #[wasm_bindgen(js_name = selectSpot)]
    pub fn select_spot(&mut self, spot: u8) -> Result<JsValue, JsValue> {
        let moves = self.inner.select_spot(spot_arg(spot)?);
        to_value(&moves)
    }

    /// Handle a tap on the board. Returns `{ kind, ... }` describing what
    /// happened.
    pub fn click(&mut self, spot: u8) -> Result<JsValue, JsValue> {
        let outcome = self.inner.handle_click(spot_arg(spot)?).map_err(to_js)?;
        to_value(&WasmClick::from(outcome))
    }

    /// Execute the jump from `start` to `end`. Returns the turn report.
    #[wasm_bindgen(js_name = executeMove)]
    pub fn execute_move(&mut self, start: u8, end: u8) -> Result<JsValue, JsValue> {
        let (start, end) = (spot_arg(start)?, spot_arg(end)?);
        let mov = self.inner.find_move(start, end).ok_or_else(|| {
            to_js(ActionError::IllegalMove { start, end })
        })?;
        let report = self.inner.execute_move(mov).map_err(to_js)?;
        to_value(&report)
    }

    /// Let the CPU move. Schedule after `cpuThinkDelayMs`.
    #[wasm_bindgen(js_name = cpuMove)]
    pub fn cpu_move(&mut self) -> Result<JsValue, JsValue> {
        let report = self.inner.play_cpu_turn().map_err(to_js)?;
        to_value(&report)
    }

    #[wasm_bindgen(js_name = isCpuTurn)]
    pub fn is_cpu_turn(&self) -> bool {
        self.inner.is_cpu_turn()
    }

    #[wasm_bindgen(js_name = cpuThinkDelayMs)]
    pub fn cpu_think_delay_ms(&self) -> u32 {
        self.inner.cpu_think_delay_ms() as u32
    }

    /// Start over, on the same layout or a fresh shuffle.
    pub fn reset(&mut self, reuse_initial_board: bool) {
        self.inner.reset(reuse_initial_board);
    }

    #[wasm_bindgen(js_name = startReplay)]
    pub fn start_replay(&mut self) -> Result<(), JsValue> {
        self.inner.start_replay().map(|_| ()).map_err(to_js)
    }

    /// Step the replay. Returns the new cursor.
    #[wasm_bindgen(js_name = stepReplay)]
    pub fn step_replay(&mut self, forward: bool) -> Result<u32, JsValue> {
        let direction = if forward {
            StepDirection::Forward
        } else {
            StepDirection::Backward
        };
        let cursor = self.inner.step_replay(direction).map_err(to_js)?;
        Ok(cursor as u32)
    }

    #[wasm_bindgen(js_name = stopReplay)]
    pub fn stop_replay(&mut self) {
        self.inner.stop_replay();
    }

    /// Full UI projection as JSON.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.view())
    }

    /// Move history as JSON.
    pub fn history(&self) -> Result<JsValue, JsValue> {
        to_value(self.inner.history())
    }

    /// Board encoding of what is currently displayed.
    #[wasm_bindgen(js_name = boardBits)]
    pub fn board_bits(&self) -> u64 {
        self.inner.displayed_board().to_u64()
    }
}

/// Decode a packed board into 15 color names (null for empty spots).
#[wasm_bindgen(js_name = decodeBoard)]
pub fn decode_board(bits: u64) -> Result<JsValue, JsValue> {
    let board = Board::from_u64(bits).ok_or_else(|| JsValue::from_str("invalid board encoding"))?;
    to_value(&board)
}

fn spot_arg(index: u8) -> Result<Spot, JsValue> {
    Spot::try_new(index as usize)
        .ok_or_else(|| JsValue::from_str(&format!("spot {index} is out of range")))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Serializable click result for JavaScript
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum WasmClick {
    Removed { color: crate::Color },
    Moved { report: crate::TurnReport },
    Selected { moves: Vec<crate::Move> },
    Deselected,
}

impl From<ClickOutcome> for WasmClick {
    fn from(outcome: ClickOutcome) -> Self {
        match outcome {
            ClickOutcome::Removed(color) => WasmClick::Removed { color },
            ClickOutcome::Moved(report) => WasmClick::Moved { report },
            ClickOutcome::Selected(moves) => WasmClick::Selected { moves },
            ClickOutcome::Deselected => WasmClick::Deselected,
        }
    }
}

//! Game modes and session phases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::cpu::Difficulty;
use crate::error::ParseError;

/// Game mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Two humans on one device.
    Local,
    /// Single player, score attack.
    Solo,
    CpuEasy,
    CpuNormal,
    CpuHard,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Local,
        Mode::Solo,
        Mode::CpuEasy,
        Mode::CpuNormal,
        Mode::CpuHard,
    ];

    #[inline]
    pub fn is_solo(self) -> bool {
        self == Mode::Solo
    }

    /// CPU strength, for modes with a CPU opponent.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Mode::CpuEasy => Some(Difficulty::Easy),
            Mode::CpuNormal => Some(Difficulty::Normal),
            Mode::CpuHard => Some(Difficulty::Hard),
            Mode::Local | Mode::Solo => None,
        }
    }

    /// The CPU always plays as player 2.
    #[inline]
    pub fn is_cpu(self, player: Player) -> bool {
        self.difficulty().is_some() && player == Player::Two
    }

    /// Who acts first once the opening piece is removed.
    pub fn first_to_jump(self) -> Player {
        if self.is_solo() {
            Player::One
        } else {
            Player::Two
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Local => "LOCAL",
            Mode::Solo => "SOLO",
            Mode::CpuEasy => "CPU_EASY",
            Mode::CpuNormal => "CPU_NORMAL",
            Mode::CpuHard => "CPU_HARD",
        }
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Mode, ParseError> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::Mode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session phase. Only ever advances Removing → Playing → GameOver.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Removing,
    Playing,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Removing => "removing",
            Phase::Playing => "playing",
            Phase::GameOver => "game over",
        })
    }
}

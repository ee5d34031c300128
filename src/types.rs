use serde::{Deserialize, Serialize};

/// Stone color, also used to name the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Cell code used by the serialized board: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// A board coordinate: `x` is the column, `y` the row, both zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: u8,
    pub y: u8,
}

impl Move {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Row-major index in `0..64`.
    pub fn index(self) -> u8 {
        self.y * 8 + self.x
    }
}

/// Per-cell status derived from the occupancy and annotation masks.
///
/// An empty cell can only carry the legal-move mark and a stone can only
/// carry the fixed mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Empty { placeable: bool },
    Stone { color: Color, fixed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    VsCpuAsBlack,
    VsCpuAsWhite,
    TwoPlayers,
}

impl GameMode {
    pub fn to_bits(self) -> u8 {
        match self {
            Self::VsCpuAsBlack => 0,
            Self::VsCpuAsWhite => 1,
            Self::TwoPlayers => 2,
        }
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::VsCpuAsBlack),
            1 => Some(Self::VsCpuAsWhite),
            2 => Some(Self::TwoPlayers),
            _ => None,
        }
    }

    /// Color played by the computer, if any.
    pub fn cpu_color(self) -> Option<Color> {
        match self {
            Self::VsCpuAsBlack => Some(Color::White),
            Self::VsCpuAsWhite => Some(Color::Black),
            Self::TwoPlayers => None,
        }
    }
}

const SETTING_BIT_THINK_LED: u8 = 0x1;
const SETTING_BIT_STONES_COUNTER: u8 = 0x2;
const SETTING_BIT_SHOW_PLACEABLE: u8 = 0x4;
const SETTING_BIT_SHOW_FIXED: u8 = 0x8;

/// Display preferences stored alongside a suspended game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub think_led: bool,
    pub stones_counter: bool,
    pub show_placeable: bool,
    pub show_fixed: bool,
}

impl Settings {
    pub fn to_bits(self) -> u8 {
        let mut bits = 0;
        if self.think_led {
            bits |= SETTING_BIT_THINK_LED;
        }
        if self.stones_counter {
            bits |= SETTING_BIT_STONES_COUNTER;
        }
        if self.show_placeable {
            bits |= SETTING_BIT_SHOW_PLACEABLE;
        }
        if self.show_fixed {
            bits |= SETTING_BIT_SHOW_FIXED;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Self {
        Self {
            think_led: bits & SETTING_BIT_THINK_LED != 0,
            stones_counter: bits & SETTING_BIT_STONES_COUNTER != 0,
            show_placeable: bits & SETTING_BIT_SHOW_PLACEABLE != 0,
            show_fixed: bits & SETTING_BIT_SHOW_FIXED != 0,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_bits(SETTING_BIT_STONES_COUNTER | SETTING_BIT_SHOW_PLACEABLE)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub fixed_black_count: u8,
    pub fixed_white_count: u8,
    /// Row-major indices of legal moves for the side to move.
    pub placeable: Vec<u8>,
    /// Row-major indices of stones that can no longer flip.
    pub fixed: Vec<u8>,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Stones flipped by the previous action; 0 after a pass.
    pub flipped: u8,
    pub last_move: Option<Move>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0 on a draw, otherwise the winner's color code.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

//! Players, piece colors, spots and the packed 15-spot board.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ParseError;

/// Number of spots on the triangular board.
pub const BOARD_SIZE: usize = 15;

/// Pieces of each color in the starting set.
pub const PIECES_PER_COLOR: usize = 3;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Zero-based index for per-player tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", *self as u8)
    }
}

// The front-end identifies players as 1 and 2.
impl Serialize for Player {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Piece color. The discriminant doubles as the 3-bit cell code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Color {
    Red = 1,
    Yellow = 2,
    Green = 3,
    Blue = 4,
    White = 5,
}

impl Color {
    /// All colors, cheapest first.
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::White,
    ];

    /// Points credited for capturing (or removing) a piece of this color.
    #[inline]
    pub const fn points(self) -> u32 {
        self as u32 * 10
    }

    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    /// Convert a cell code (1-5) to a color.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Color> {
        match bits {
            1 => Some(Color::Red),
            2 => Some(Color::Yellow),
            3 => Some(Color::Green),
            4 => Some(Color::Blue),
            5 => Some(Color::White),
            _ => None,
        }
    }

    /// Single-letter symbol used by the text board format.
    pub fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::White => 'W',
        }
    }

    pub fn from_symbol(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'Y' => Some(Color::Yellow),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'W' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "RED",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::White => "WHITE",
        };
        f.write_str(name)
    }
}

/// Position on the triangular board (0-14).
///
/// Layout:
/// ```text
///         0
///       1   2
///     3   4   5
///   6   7   8   9
/// 10  11  12  13  14
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Spot(pub(crate) u8);

impl Spot {
    /// Create a spot from its index.
    ///
    /// Panics if `index >= 15`: an out-of-range spot is a caller bug, and
    /// letting it through would corrupt the packed board.
    #[inline]
    pub const fn new(index: usize) -> Spot {
        assert!(index < BOARD_SIZE, "spot index out of range");
        Spot(index as u8)
    }

    /// Checked constructor for untrusted input.
    #[inline]
    pub fn try_new(index: usize) -> Option<Spot> {
        (index < BOARD_SIZE).then_some(Spot(index as u8))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Create a spot from triangular coordinates (row 0-4, col 0-row).
    ///
    /// Panics on coordinates off the triangle.
    pub fn from_row_col(row: u8, col: u8) -> Spot {
        assert!(row < 5 && col <= row, "spot coordinates out of range");
        Spot(row * (row + 1) / 2 + col)
    }

    /// Row from the tip (0) to the base (4). Row `r` holds `r + 1` spots.
    pub fn row(self) -> u8 {
        let mut row = 0;
        while (row + 1) * (row + 2) / 2 <= self.0 {
            row += 1;
        }
        row
    }

    /// Column within the row, counted from the left edge.
    pub fn col(self) -> u8 {
        let row = self.row();
        self.0 - row * (row + 1) / 2
    }

    /// Iterate over all 15 spots.
    pub fn all() -> impl Iterator<Item = Spot> {
        (0..BOARD_SIZE as u8).map(Spot)
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Packed board: 15 cells × 3 bits in a `u64`.
///
/// Cell code 0 is empty, 1-5 are the colors. Bits 45-63 stay zero, so two
/// boards with the same pieces always compare equal. The board is `Copy`;
/// every snapshot taken from it is independent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(u64);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 3;
    /// Mask for a single cell (0b111).
    const CELL_MASK: u64 = 0b111;
    /// Bits used by the 15 cells.
    const USED_BITS: u32 = BOARD_SIZE as u32 * Self::CELL_BITS;

    /// Create a board with no pieces.
    #[inline]
    pub const fn empty() -> Board {
        Board(0)
    }

    /// Create a board from a raw encoding.
    ///
    /// Returns None for encodings with unused bits set or invalid cell codes.
    pub fn from_u64(bits: u64) -> Option<Board> {
        if bits >> Self::USED_BITS != 0 {
            return None;
        }
        let board = Board(bits);
        Spot::all()
            .all(|spot| board.cell(spot) <= Color::White as u64)
            .then_some(board)
    }

    /// Get the raw encoding.
    #[inline]
    pub fn to_u64(self) -> u64 {
        self.0
    }

    /// Build a board from per-spot contents.
    pub fn from_cells(cells: [Option<Color>; BOARD_SIZE]) -> Board {
        let mut board = Board::empty();
        for (spot, cell) in Spot::all().zip(cells) {
            if let Some(color) = cell {
                board.place(spot, color);
            }
        }
        board
    }

    /// Unpack into per-spot contents.
    pub fn cells(&self) -> [Option<Color>; BOARD_SIZE] {
        let mut cells = [None; BOARD_SIZE];
        for spot in Spot::all() {
            cells[spot.index()] = self.get(spot);
        }
        cells
    }

    #[inline]
    fn cell(&self, spot: Spot) -> u64 {
        (self.0 >> (spot.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK
    }

    #[inline]
    fn set_cell(&mut self, spot: Spot, value: u64) {
        let shift = spot.0 as u32 * Self::CELL_BITS;
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | ((value & Self::CELL_MASK) << shift);
    }

    /// Get the piece at a spot, if any.
    #[inline]
    pub fn get(&self, spot: Spot) -> Option<Color> {
        Color::from_bits(self.cell(spot) as u8)
    }

    #[inline]
    pub fn is_empty(&self, spot: Spot) -> bool {
        self.cell(spot) == 0
    }

    #[inline]
    pub fn is_occupied(&self, spot: Spot) -> bool {
        !self.is_empty(spot)
    }

    /// Put a piece on a spot, replacing whatever was there.
    /// Does NOT validate - callers keep the one-piece-per-spot rule.
    #[inline]
    pub fn place(&mut self, spot: Spot, color: Color) {
        self.set_cell(spot, color as u64);
    }

    /// Remove and return the piece at a spot.
    #[inline]
    pub fn take(&mut self, spot: Spot) -> Option<Color> {
        let color = self.get(spot);
        self.set_cell(spot, 0);
        color
    }

    /// Bit `i` is set when spot `i` is occupied.
    pub fn occupancy(&self) -> u16 {
        Spot::all()
            .filter(|&spot| self.is_occupied(spot))
            .fold(0, |mask, spot| mask | (1 << spot.0))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.occupancy().count_ones() as usize
    }

    /// Number of pieces of one color on the board.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|&(_, c)| c == color).count()
    }

    /// Occupied spots with their pieces, in spot order.
    pub fn pieces(self) -> impl Iterator<Item = (Spot, Color)> {
        Spot::all().filter_map(move |spot| self.get(spot).map(|color| (spot, color)))
    }

    /// The starting multiset: three pieces of each color.
    pub fn standard_set() -> [Color; BOARD_SIZE] {
        let mut pieces = [Color::Red; BOARD_SIZE];
        for (i, slot) in pieces.iter_mut().enumerate() {
            *slot = Color::ALL[i / PIECES_PER_COLOR];
        }
        pieces
    }

    /// A full board with the standard set shuffled uniformly across the spots.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Board {
        let mut pieces = Self::standard_set();
        pieces.shuffle(rng);
        Board::from_cells(pieces.map(Some))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self
            .cells()
            .iter()
            .map(|cell| cell.map_or('.', Color::symbol))
            .collect();
        write!(f, "Board({text})")
    }
}

/// Renders the triangle, `.` for empty spots.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..5u8 {
            let indent = (4 - row) as usize;
            write!(f, "{:indent$}", "")?;
            for col in 0..=row {
                let symbol = self
                    .get(Spot::from_row_col(row, col))
                    .map_or('.', Color::symbol);
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{symbol}")?;
            }
            if row < 4 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Parses 15 symbols (`R Y G B W`, `.` for empty) in spot order.
/// Whitespace is ignored, so the triangle drawn by `Display` parses back.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Board, ParseError> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != BOARD_SIZE {
            return Err(ParseError::SpotCount(symbols.len()));
        }
        let mut board = Board::empty();
        for (spot, &c) in Spot::all().zip(&symbols) {
            if c == '.' {
                continue;
            }
            let color = Color::from_symbol(c).ok_or(ParseError::Symbol(c))?;
            board.place(spot, color);
        }
        Ok(board)
    }
}

/// Serialized as the per-spot array the front-end renders (`null` = empty).
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells())
    }
}

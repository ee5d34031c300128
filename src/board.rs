use crate::error::OverlappingStones;
use crate::stability;
use crate::types::{CellStatus, Color, Move};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
/// Standard center stones in placement order, Black first.
const OPENING: [(u8, u8); 4] = [(4, 3), (3, 3), (3, 4), (4, 4)];

/// Reversi board state stored as one 8-bit mask per row and color.
///
/// Bit `x` of row `y` is the cell at column `x`. Besides occupancy the board
/// keeps two annotation masks, legal moves (empty cells only) and fixed
/// stones (occupied cells only), plus aggregate counters. Both annotations
/// are refreshed by [`Board::analyze`]; after [`Board::apply`] they are stale
/// until the next analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: [u8; BOARD_SIZE],
    white: [u8; BOARD_SIZE],
    placeable: [u8; BOARD_SIZE],
    fixed: [u8; BOARD_SIZE],
    num_stones: u8,
    num_black: u8,
    num_white: u8,
    num_fixed_black: u8,
    num_fixed_white: u8,
    num_placeable: u8,
    white_to_move: bool,
    last_passed: bool,
    analyzed: bool,
}

impl Board {
    /// Creates the initial board, Black to move:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (x, y) in OPENING {
            let mover = board.side_to_move();
            board.put(x, y, mover);
            board.white_to_move = !board.white_to_move;
        }
        board.analyze();
        board
    }

    /// Builds an analyzed board from raw row masks.
    pub fn from_rows(
        black: [u8; BOARD_SIZE],
        white: [u8; BOARD_SIZE],
        white_to_move: bool,
        last_passed: bool,
    ) -> Result<Self, OverlappingStones> {
        if let Some(row) = (0..BOARD_SIZE).find(|&y| black[y] & white[y] != 0) {
            return Err(OverlappingStones { row: row as u8 });
        }

        let mut board = Self::empty();
        board.black = black;
        board.white = white;
        board.white_to_move = white_to_move;
        board.last_passed = last_passed;
        board.analyze();
        Ok(board)
    }

    fn empty() -> Self {
        Self {
            black: [0; BOARD_SIZE],
            white: [0; BOARD_SIZE],
            placeable: [0; BOARD_SIZE],
            fixed: [0; BOARD_SIZE],
            num_stones: 0,
            num_black: 0,
            num_white: 0,
            num_fixed_black: 0,
            num_fixed_white: 0,
            num_placeable: 0,
            white_to_move: false,
            last_passed: false,
            analyzed: false,
        }
    }

    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn is_white_turn(&self) -> bool {
        self.white_to_move
    }

    pub fn is_last_passed(&self) -> bool {
        self.last_passed
    }

    pub fn black_row(&self, y: usize) -> u8 {
        self.black[y]
    }

    pub fn white_row(&self, y: usize) -> u8 {
        self.white[y]
    }

    /// Legal-move bits of row `y` for the side to move.
    pub fn placeable_row(&self, y: usize) -> u8 {
        self.placeable[y]
    }

    pub fn fixed_row(&self, y: usize) -> u8 {
        self.fixed[y]
    }

    /// Legal moves for the side to move as one bitmask per row.
    pub fn legal_moves(&self) -> [u8; BOARD_SIZE] {
        debug_assert!(self.analyzed, "legal moves read from an unanalyzed board");
        self.placeable
    }

    /// Legal moves in board-scan order (row by row, column fastest).
    pub fn legal_move_list(&self) -> Vec<Move> {
        debug_assert!(self.analyzed, "legal moves read from an unanalyzed board");
        let mut out = Vec::with_capacity(self.num_placeable as usize);
        for (y, &row) in self.placeable.iter().enumerate() {
            let mut bits = row;
            while bits != 0 {
                let x = bits.trailing_zeros() as u8;
                out.push(Move::new(x, y as u8));
                bits &= bits - 1;
            }
        }
        out
    }

    pub fn legal_move_count(&self) -> u8 {
        self.num_placeable
    }

    /// Number of legal moves `color` would have if it were to move now.
    pub fn legal_move_count_for(&self, color: Color) -> u8 {
        let mut count = 0;
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                if self.stone_at(x, y).is_none() && self.has_reversible_line(x, y, color) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns `(black_count, white_count)`.
    pub fn stone_counts(&self) -> (u8, u8) {
        (self.num_black, self.num_white)
    }

    /// Returns `(fixed_black_count, fixed_white_count)`.
    pub fn fixed_stone_counts(&self) -> (u8, u8) {
        (self.num_fixed_black, self.num_fixed_white)
    }

    /// Total stones on the board.
    pub fn num_stones(&self) -> u8 {
        self.num_stones
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.num_stones
    }

    pub fn cell(&self, x: u8, y: u8) -> CellStatus {
        let bit = 1u8 << x;
        let y = y as usize;
        if self.black[y] & bit != 0 {
            CellStatus::Stone {
                color: Color::Black,
                fixed: self.fixed[y] & bit != 0,
            }
        } else if self.white[y] & bit != 0 {
            CellStatus::Stone {
                color: Color::White,
                fixed: self.fixed[y] & bit != 0,
            }
        } else {
            CellStatus::Empty {
                placeable: self.placeable[y] & bit != 0,
            }
        }
    }

    /// True iff `(x, y)` is empty and placing there for the side to move
    /// reverses at least one line.
    pub fn is_legal(&self, x: u8, y: u8) -> bool {
        let (x, y) = (x as i32, y as i32);
        in_bounds(x, y)
            && self.stone_at(x, y).is_none()
            && self.has_reversible_line(x, y, self.side_to_move())
    }

    /// Places a stone for the side to move, flips every bracketed run and
    /// hands the turn to the opponent. Returns the number of flipped stones.
    ///
    /// Caller contract: `mv` is legal. Annotations are stale afterwards, so
    /// call [`Board::analyze`] before querying moves or fixed stones.
    pub fn apply(&mut self, mv: Move) -> u8 {
        debug_assert!(self.is_legal(mv.x, mv.y), "apply() requires a legal move");

        let mover = self.side_to_move();
        let (x, y) = (mv.x as i32, mv.y as i32);
        let mut flipped = 0u8;

        for (dx, dy) in DIRECTIONS {
            let run = self.reversible_run(x, y, dx, dy, mover);
            for step in 1..=run as i32 {
                self.toggle(x + dx * step, y + dy * step);
            }
            flipped += run;
        }

        self.put(mv.x, mv.y, mover);
        match mover {
            Color::Black => {
                self.num_black += flipped;
                self.num_white -= flipped;
            }
            Color::White => {
                self.num_white += flipped;
                self.num_black -= flipped;
            }
        }

        self.white_to_move = !self.white_to_move;
        self.last_passed = false;
        self.analyzed = false;
        flipped
    }

    /// Skips the turn of the side to move and re-analyzes the position.
    pub fn pass(&mut self) {
        self.white_to_move = !self.white_to_move;
        self.last_passed = true;
        self.analyze();
    }

    /// Recomputes legal-move marks, counters and fixed stones.
    pub fn analyze(&mut self) {
        let mover = self.side_to_move();
        self.num_black = 0;
        self.num_white = 0;
        self.num_placeable = 0;

        for y in 0..BOARD_SIZE {
            let black = self.black[y];
            let white = self.white[y];
            let mut placeable = 0u8;
            for x in 0..BOARD_SIZE {
                let bit = 1u8 << x;
                if (black | white) & bit == 0
                    && self.has_reversible_line(x as i32, y as i32, mover)
                {
                    placeable |= bit;
                }
            }
            self.placeable[y] = placeable;
            self.fixed[y] &= black | white;
            self.num_black += black.count_ones() as u8;
            self.num_white += white.count_ones() as u8;
            self.num_placeable += placeable.count_ones() as u8;
        }
        self.num_stones = self.num_black + self.num_white;

        stability::mark_fixed_stones(self);
        self.analyzed = true;
    }

    /// True on a full board, when a color has no stones left, or when the
    /// previous player passed and the side to move cannot move either.
    pub fn is_game_over(&self) -> bool {
        debug_assert!(self.analyzed, "game-over check on an unanalyzed board");
        self.num_stones as usize == NUM_SQUARES
            || self.num_black == 0
            || self.num_white == 0
            || (self.last_passed && self.num_placeable == 0)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let bit = 1u8 << (pos % BOARD_SIZE);
            let y = pos / BOARD_SIZE;
            *cell = if self.black[y] & bit != 0 {
                Color::Black.code()
            } else if self.white[y] & bit != 0 {
                Color::White.code()
            } else {
                0
            };
        }
        board
    }

    pub(crate) fn stone_at(&self, x: i32, y: i32) -> Option<Color> {
        let bit = 1u8 << x;
        let y = y as usize;
        if self.black[y] & bit != 0 {
            Some(Color::Black)
        } else if self.white[y] & bit != 0 {
            Some(Color::White)
        } else {
            None
        }
    }

    pub(crate) fn is_fixed(&self, x: i32, y: i32) -> bool {
        self.fixed[y as usize] & (1u8 << x) != 0
    }

    pub(crate) fn set_fixed(&mut self, x: i32, y: i32) {
        self.fixed[y as usize] |= 1u8 << x;
    }

    pub(crate) fn refresh_fixed_counts(&mut self) {
        self.num_fixed_black = 0;
        self.num_fixed_white = 0;
        for y in 0..BOARD_SIZE {
            self.num_fixed_black += (self.fixed[y] & self.black[y]).count_ones() as u8;
            self.num_fixed_white += (self.fixed[y] & self.white[y]).count_ones() as u8;
        }
    }

    fn has_reversible_line(&self, x: i32, y: i32, mover: Color) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.reversible_run(x, y, dx, dy, mover) > 0)
    }

    /// Length of the opponent run from `(x, y)` towards `(dx, dy)` that is
    /// closed by a `mover` stone; 0 when the direction reverses nothing.
    fn reversible_run(&self, x: i32, y: i32, dx: i32, dy: i32, mover: Color) -> u8 {
        let mut run = 0u8;
        let mut cx = x + dx;
        let mut cy = y + dy;

        while in_bounds(cx, cy) {
            match self.stone_at(cx, cy) {
                None => return 0,
                Some(color) if color == mover => return run,
                Some(_) => run += 1,
            }
            cx += dx;
            cy += dy;
        }

        0
    }

    fn put(&mut self, x: u8, y: u8, color: Color) {
        let bit = 1u8 << x;
        let y = y as usize;
        match color {
            Color::Black => {
                self.black[y] |= bit;
                self.num_black += 1;
            }
            Color::White => {
                self.white[y] |= bit;
                self.num_white += 1;
            }
        }
        self.num_stones += 1;
    }

    fn toggle(&mut self, x: i32, y: i32) {
        let bit = 1u8 << x;
        let y = y as usize;
        self.black[y] ^= bit;
        self.white[y] ^= bit;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

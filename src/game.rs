use log::info;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use crate::ai::search::{SearchResult, Searcher, Yield};
use crate::board::{BOARD_SIZE, Board};
use crate::config::{MAX_LEVEL, SearchConfig};
use crate::error::{GameError, SnapshotError};
use crate::snapshot::Snapshot;
use crate::types::{CellStatus, Color, GameMode, GameResult, GameState, Move, Settings};

pub trait MoveSelector: Send {
    fn select_move(
        &mut self,
        board: &Board,
        level: u8,
        host: &mut dyn FnMut() -> Yield,
    ) -> SearchResult;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(
        &mut self,
        board: &Board,
        _level: u8,
        _host: &mut dyn FnMut() -> Yield,
    ) -> SearchResult {
        match board.legal_move_list().first() {
            Some(&mv) => SearchResult::Complete(mv, 0),
            None => SearchResult::Pass,
        }
    }
}

/// Computer player backed by the alpha-beta search.
#[derive(Debug, Clone)]
pub struct AlphaBetaSelector {
    config: SearchConfig,
    rng: Xoshiro256PlusPlus,
}

impl AlphaBetaSelector {
    pub fn new(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select_move(
        &mut self,
        board: &Board,
        level: u8,
        host: &mut dyn FnMut() -> Yield,
    ) -> SearchResult {
        Searcher::new(&self.config, &mut self.rng, host).select_move(board, level)
    }
}

/// Outcome of a computer turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AiTurn {
    Placed { mv: Move, flipped: u8 },
    Passed,
    /// The host cancelled the search; call again later.
    Aborted,
}

/// Turn controller owning the live board.
pub struct GameInstance {
    board: Board,
    pub mode: GameMode,
    pub level: u8,
    pub settings: Settings,
    cursor: Move,
    is_game_over: bool,
    flipped: u8,
    last_move: Option<Move>,
    play_frames: u32,
    play_count: u16,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(mode: GameMode, level: u8, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            mode,
            level: level.min(MAX_LEVEL),
            settings: Settings::default(),
            cursor: Move::new(0, 0),
            is_game_over: false,
            flipped: 0,
            last_move: None,
            play_frames: 0,
            play_count: 1,
            selector,
        }
    }

    pub fn new_with_default_selector(mode: GameMode, level: u8) -> Self {
        Self::new(mode, level, Box::new(FirstLegalMoveSelector))
    }

    /// Restores a suspended game written by [`GameInstance::snapshot`].
    pub fn from_snapshot(
        data: &[u8],
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self, SnapshotError> {
        let snapshot = Snapshot::from_bytes(data)?;
        let mut game = Self {
            board: snapshot.board,
            mode: snapshot.mode,
            level: snapshot.level,
            settings: snapshot.settings,
            cursor: snapshot.cursor,
            is_game_over: false,
            flipped: 0,
            last_move: None,
            play_frames: snapshot.play_frames,
            play_count: snapshot.play_count,
            selector,
        };
        game.update_game_over();
        Ok(game)
    }

    pub fn snapshot(&self) -> Vec<u8> {
        Snapshot {
            board: self.board,
            mode: self.mode,
            level: self.level,
            cursor: self.cursor,
            settings: self.settings,
            play_frames: self.play_frames,
            play_count: self.play_count,
        }
        .to_bytes()
    }

    /// Starts over with the same mode, level and selector.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.is_game_over = false;
        self.flipped = 0;
        self.last_move = None;
        self.play_count = self.play_count.wrapping_add(1);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn cursor(&self) -> Move {
        self.cursor
    }

    pub fn play_frames(&self) -> u32 {
        self.play_frames
    }

    pub fn play_count(&self) -> u16 {
        self.play_count
    }

    pub fn is_cpu_turn(&self) -> bool {
        !self.is_game_over && self.mode.cpu_color() == Some(self.board.side_to_move())
    }

    /// Counts one displayed frame of play.
    pub fn tick(&mut self) {
        if !self.is_game_over {
            self.play_frames = self.play_frames.wrapping_add(1);
        }
    }

    /// Moves the cursor, wrapping around the board edges.
    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        let wrap = |v: u8, d: i8| (v as i8 + d).rem_euclid(BOARD_SIZE as i8) as u8;
        self.cursor = Move::new(wrap(self.cursor.x, dx), wrap(self.cursor.y, dy));
    }

    pub fn place_at_cursor(&mut self) -> Result<u8, GameError> {
        let Move { x, y } = self.cursor;
        self.place(x, y)
    }

    /// Places a stone for the human side to move. Returns the flip count.
    pub fn place(&mut self, x: u8, y: u8) -> Result<u8, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.is_cpu_turn() {
            return Err(GameError::NotPlayerTurn);
        }
        if x as usize >= BOARD_SIZE || y as usize >= BOARD_SIZE {
            return Err(GameError::OutOfRange { x, y });
        }
        if self.board.legal_moves()[y as usize] & (1 << x) == 0 {
            return Err(GameError::IllegalMove { x, y });
        }

        Ok(self.apply_move(Move::new(x, y)))
    }

    /// Passes for the human side; only allowed without a legal move.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.is_cpu_turn() {
            return Err(GameError::NotPlayerTurn);
        }
        if self.board.legal_move_count() > 0 {
            return Err(GameError::PassNotAllowed);
        }

        self.apply_pass();
        Ok(())
    }

    /// Plays the computer's turn, yielding to `host` during the search.
    pub fn ai_move(&mut self, host: &mut dyn FnMut() -> Yield) -> Result<AiTurn, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if !self.is_cpu_turn() {
            return Err(GameError::NotCpuTurn);
        }

        if self.board.legal_move_count() == 0 {
            self.apply_pass();
            return Ok(AiTurn::Passed);
        }

        match self.selector.select_move(&self.board, self.level, host) {
            SearchResult::Complete(mv, _score) => {
                if !self.board.is_legal(mv.x, mv.y) {
                    return Err(GameError::SelectorIllegalMove { x: mv.x, y: mv.y });
                }
                let flipped = self.apply_move(mv);
                Ok(AiTurn::Placed { mv, flipped })
            }
            SearchResult::Pass => Err(GameError::SelectorPassed),
            SearchResult::Aborted => Ok(AiTurn::Aborted),
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.stone_counts();
        let (fixed_black_count, fixed_white_count) = self.board.fixed_stone_counts();
        let mut placeable = Vec::new();
        let mut fixed = Vec::new();

        for y in 0..BOARD_SIZE as u8 {
            for x in 0..BOARD_SIZE as u8 {
                let index = Move::new(x, y).index();
                match self.board.cell(x, y) {
                    CellStatus::Empty { placeable: true } => placeable.push(index),
                    CellStatus::Stone { fixed: true, .. } => fixed.push(index),
                    _ => {}
                }
            }
        }

        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.board.side_to_move().code(),
            black_count,
            white_count,
            fixed_black_count,
            fixed_white_count,
            placeable,
            fixed,
            is_game_over: self.is_game_over,
            is_pass: self.board.is_last_passed(),
            flipped: self.flipped,
            last_move: self.last_move,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.stone_counts();
        GameResult {
            winner: if black_count > white_count {
                Color::Black.code()
            } else if white_count > black_count {
                Color::White.code()
            } else {
                0
            },
            black_count,
            white_count,
        }
    }

    fn apply_move(&mut self, mv: Move) -> u8 {
        let flipped = self.board.apply(mv);
        self.board.analyze();
        self.flipped = flipped;
        self.last_move = Some(mv);
        self.update_game_over();
        flipped
    }

    fn apply_pass(&mut self) {
        self.board.pass();
        self.flipped = 0;
        self.last_move = None;
        self.update_game_over();
    }

    fn update_game_over(&mut self) {
        if !self.is_game_over && self.board.is_game_over() {
            self.is_game_over = true;
            let (black, white) = self.board.stone_counts();
            info!("game over: black={black} white={white}");
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.is_game_over = false;
        self.flipped = 0;
        self.last_move = None;
        self.update_game_over();
    }
}

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod snapshot;
mod stability;
pub mod types;

pub use ai::search::{SearchResult, Searcher, Yield};
pub use board::Board;
pub use config::SearchConfig;
pub use error::{GameError, OverlappingStones, SnapshotError};
pub use game::{AiTurn, AlphaBetaSelector, FirstLegalMoveSelector, GameInstance, MoveSelector};
pub use types::{CellStatus, Color, GameMode, GameResult, GameState, Move, Settings};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

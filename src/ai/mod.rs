pub mod eval;
pub mod search;

pub use eval::{WIN_SCORE, evaluate};
pub use search::{SearchResult, Searcher, Yield, search_depth, select_move};

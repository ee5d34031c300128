use std::time::Duration;

use log::{debug, trace};
use rand::Rng;
use web_time::Instant;

use crate::ai::eval::{WIN_SCORE, evaluate};
use crate::board::Board;
use crate::config::SearchConfig;
use crate::types::Move;

const MIN_SCORE: i32 = -2 * WIN_SCORE;
const MAX_SCORE: i32 = 2 * WIN_SCORE;

/// Host answer at a yield point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yield {
    Continue,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    Complete(Move, i32),
    /// The side to move has no legal move.
    Pass,
    /// The host cancelled at a yield point. Nothing was decided; retry later.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cancelled;

/// Negamax alpha-beta searcher that hands control back to the host every
/// `yield_interval` of wall-clock time.
pub struct Searcher<'a, R, H> {
    config: &'a SearchConfig,
    rng: &'a mut R,
    host: H,
    interval: Duration,
    last_yield: Instant,
    nodes: u64,
    yields: u32,
}

impl<'a, R, H> Searcher<'a, R, H>
where
    R: Rng,
    H: FnMut() -> Yield,
{
    pub fn new(config: &'a SearchConfig, rng: &'a mut R, host: H) -> Self {
        Self {
            config,
            rng,
            host,
            interval: config.yield_interval(),
            last_yield: Instant::now(),
            nodes: 0,
            yields: 0,
        }
    }

    /// Picks a move for the side to move at difficulty `level`.
    pub fn select_move(&mut self, board: &Board, level: u8) -> SearchResult {
        let depth = search_depth(board, self.config.max_depth_for_level(level));
        self.search(board, depth)
    }

    /// Searches `depth` plies (at least one) below `board`.
    ///
    /// Caller contract: `board` is analyzed.
    pub fn search(&mut self, board: &Board, depth: u8) -> SearchResult {
        let moves = board.legal_move_list();
        if moves.is_empty() {
            return SearchResult::Pass;
        }

        let depth = depth.max(1);
        let start = Instant::now();
        self.last_yield = start;
        self.nodes = 0;
        self.yields = 0;

        match self.search_root(board, &moves, depth) {
            Ok((mv, score)) => {
                debug!(
                    "search done: move=({}, {}) score={} depth={} nodes={} yields={} elapsed={:?}",
                    mv.x,
                    mv.y,
                    score,
                    depth,
                    self.nodes,
                    self.yields,
                    start.elapsed()
                );
                SearchResult::Complete(mv, score)
            }
            Err(Cancelled) => {
                debug!(
                    "search aborted by host: depth={} nodes={} yields={}",
                    depth, self.nodes, self.yields
                );
                SearchResult::Aborted
            }
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn yields(&self) -> u32 {
        self.yields
    }

    fn search_root(
        &mut self,
        board: &Board,
        moves: &[Move],
        depth: u8,
    ) -> Result<(Move, i32), Cancelled> {
        self.nodes += 1;
        self.poll()?;

        let mut best_move = moves[0];
        let mut best_score = MIN_SCORE;
        let mut alpha = MIN_SCORE;

        for &mv in moves {
            let mut next = *board;
            next.apply(mv);
            next.analyze();
            let score = -self.negaalpha(&next, depth - 1, -MAX_SCORE, -alpha)?;
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
        }

        Ok((best_move, best_score))
    }

    fn negaalpha(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> Result<i32, Cancelled> {
        self.nodes += 1;

        if board.is_game_over() {
            return Ok(evaluate(board));
        }
        if depth == 0 {
            return Ok(evaluate(board) + self.jitter());
        }

        let moves = board.legal_move_list();
        if moves.is_empty() {
            // A pass explores no branching, so it costs no depth.
            let mut next = *board;
            next.pass();
            return Ok(-self.negaalpha(&next, depth, -beta, -alpha)?);
        }

        self.poll()?;

        let mut best_score = MIN_SCORE;
        let mut alpha = alpha;

        for mv in moves {
            let mut next = *board;
            next.apply(mv);
            next.analyze();
            let score = -self.negaalpha(&next, depth - 1, -beta, -alpha)?;
            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best_score)
    }

    fn jitter(&mut self) -> i32 {
        match self.config.jitter {
            0 => 0,
            bound => self.rng.random_range(0..=i32::from(bound)),
        }
    }

    fn poll(&mut self) -> Result<(), Cancelled> {
        if self.last_yield.elapsed() < self.interval {
            return Ok(());
        }

        self.yields += 1;
        trace!("search yield #{} after {} nodes", self.yields, self.nodes);
        let action = (self.host)();
        self.last_yield = Instant::now();

        match action {
            Yield::Continue => Ok(()),
            Yield::Cancel => Err(Cancelled),
        }
    }
}

/// Search depth for a position: shallow while the board is open, capped by
/// `max_depth`, and a single ply for a forced move.
pub fn search_depth(board: &Board, max_depth: u8) -> u8 {
    if board.legal_move_count() == 1 {
        return 1;
    }
    (board.num_stones() / 4 + 1).min(max_depth).max(1)
}

/// Runs one search for the side to move of `board`.
pub fn select_move<R, H>(
    board: &Board,
    level: u8,
    config: &SearchConfig,
    rng: &mut R,
    host: H,
) -> SearchResult
where
    R: Rng,
    H: FnMut() -> Yield,
{
    Searcher::new(config, rng, host).select_move(board, level)
}

//! Static evaluation from the side-to-move perspective.

use std::cmp::Ordering;

use once_cell::sync::Lazy;

use crate::board::{BOARD_SIZE, Board, NUM_SQUARES};
use crate::types::{CellStatus, Color};

/// Score of a decided game. Exceeds any positional score.
pub const WIN_SCORE: i32 = 10_000;
const NO_MOVE_BONUS: i32 = 10;

// Weights for the top-left quadrant; the other three are mirrored.
const UNSTABLE_QUADRANT: [[i32; 4]; 4] = [
    [30, -8, 6, 4],
    [-8, -16, -2, -2],
    [6, -2, 1, 0],
    [4, -2, 0, 0],
];
const STABLE_QUADRANT: [[i32; 4]; 4] = [
    [60, 48, 48, 48],
    [48, 40, 36, 36],
    [48, 36, 32, 32],
    [48, 36, 32, 32],
];

static UNSTABLE_WEIGHTS: Lazy<[i32; NUM_SQUARES]> = Lazy::new(|| unfold(&UNSTABLE_QUADRANT));
static STABLE_WEIGHTS: Lazy<[i32; NUM_SQUARES]> = Lazy::new(|| unfold(&STABLE_QUADRANT));

fn unfold(quadrant: &[[i32; 4]; 4]) -> [i32; NUM_SQUARES] {
    let mut out = [0i32; NUM_SQUARES];
    for (pos, weight) in out.iter_mut().enumerate() {
        let x = pos % BOARD_SIZE;
        let y = pos / BOARD_SIZE;
        let qx = x.min(BOARD_SIZE - 1 - x);
        let qy = y.min(BOARD_SIZE - 1 - y);
        *weight = quadrant[qy][qx];
    }
    out
}

/// Evaluates `board` for the side to move; positive favors the mover.
///
/// Caller contract: `board` is analyzed.
pub fn evaluate(board: &Board) -> i32 {
    if board.is_game_over() {
        return terminal_score(board);
    }

    let me = board.side_to_move();
    let mut score = 0i32;

    for y in 0..BOARD_SIZE as u8 {
        for x in 0..BOARD_SIZE as u8 {
            let CellStatus::Stone { color, fixed } = board.cell(x, y) else {
                continue;
            };
            let weight = if fixed {
                STABLE_WEIGHTS[(y * 8 + x) as usize]
            } else {
                unstable_weight(board, x, y)
            };
            if color == me {
                score += weight;
            } else {
                score -= weight;
            }
        }
    }

    score += board.legal_move_count() as i32;
    if board.legal_move_count_for(me.opponent()) == 0 {
        score += NO_MOVE_BONUS;
    }

    score
}

/// Win, loss or draw for the side to move, ignoring the margin.
pub fn terminal_score(board: &Board) -> i32 {
    let (black, white) = board.stone_counts();
    let (mine, theirs) = match board.side_to_move() {
        Color::Black => (black, white),
        Color::White => (white, black),
    };

    match mine.cmp(&theirs) {
        Ordering::Greater => WIN_SCORE,
        Ordering::Less => -WIN_SCORE,
        Ordering::Equal => 0,
    }
}

/// X-squares only carry their penalty while the corner next to them is empty.
fn unstable_weight(board: &Board, x: u8, y: u8) -> i32 {
    let last = BOARD_SIZE as u8 - 1;
    let is_x_square = (x == 1 || x == last - 1) && (y == 1 || y == last - 1);
    if is_x_square {
        let corner_x = if x == 1 { 0 } else { last };
        let corner_y = if y == 1 { 0 } else { last };
        if matches!(board.cell(corner_x, corner_y), CellStatus::Stone { .. }) {
            return 0;
        }
    }
    UNSTABLE_WEIGHTS[(y * 8 + x) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[(u8, u8)]) -> [u8; 8] {
        let mut out = [0u8; 8];
        for &(x, y) in cells {
            out[y as usize] |= 1 << x;
        }
        out
    }

    #[test]
    fn weight_tables_are_symmetric() {
        for y in 0..8 {
            for x in 0..8 {
                let w = UNSTABLE_WEIGHTS[y * 8 + x];
                assert_eq!(w, UNSTABLE_WEIGHTS[y * 8 + (7 - x)]);
                assert_eq!(w, UNSTABLE_WEIGHTS[(7 - y) * 8 + x]);
                assert_eq!(w, UNSTABLE_WEIGHTS[x * 8 + y]);
            }
        }
        assert_eq!(STABLE_WEIGHTS[63], 60);
        assert_eq!(UNSTABLE_WEIGHTS[6 * 8 + 1], -16);
    }

    #[test]
    fn opening_scores_only_mobility() {
        assert_eq!(evaluate(&Board::new()), 4);
    }

    #[test]
    fn score_is_relative_to_the_side_to_move() {
        let black = rows(&[(0, 0), (3, 3)]);
        let white = rows(&[(4, 4)]);

        let black_to_move = Board::from_rows(black, white, false, false).unwrap();
        let white_to_move = Board::from_rows(black, white, true, false).unwrap();

        // Fixed corner for Black plus one legal move each.
        assert_eq!(evaluate(&black_to_move), 61);
        assert_eq!(evaluate(&white_to_move), -59);
    }

    #[test]
    fn opponent_without_moves_earns_bonus() {
        // White (1,0) next to a black corner: White cannot move, Black has (2,0).
        let black = rows(&[(0, 0)]);
        let white = rows(&[(1, 0)]);
        let board = Board::from_rows(black, white, true, false).unwrap();

        assert_eq!(board.legal_move_count(), 0);
        assert_eq!(evaluate(&board), -8 - 60);

        let board = Board::from_rows(black, white, false, false).unwrap();
        assert_eq!(evaluate(&board), 60 + 8 + 1 + NO_MOVE_BONUS);
    }

    #[test]
    fn x_square_penalty_needs_an_empty_corner() {
        let open = Board::from_rows(rows(&[(1, 1)]), rows(&[(4, 4)]), false, false).unwrap();
        let taken =
            Board::from_rows(rows(&[(1, 1)]), rows(&[(0, 0), (4, 4)]), false, false).unwrap();

        assert_eq!(unstable_weight(&open, 1, 1), -16);
        assert_eq!(unstable_weight(&taken, 1, 1), 0);
        assert_eq!(unstable_weight(&open, 2, 2), 1);
    }

    #[test]
    fn terminal_positions_score_sign_not_margin() {
        let narrow_black = [0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0, 0, 0];
        let narrow_white = [0, 0, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF];
        let narrow = Board::from_rows(narrow_black, narrow_white, false, false).unwrap();

        let wide_black = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        let wide_white = [0, 0, 0, 0, 0, 0, 0, 0xF0];
        let wide = Board::from_rows(wide_black, wide_white, false, false).unwrap();

        assert_eq!(narrow.stone_counts(), (33, 31));
        assert_eq!(evaluate(&narrow), WIN_SCORE);
        assert_eq!(evaluate(&wide), WIN_SCORE);

        let lost = Board::from_rows(narrow_black, narrow_white, true, false).unwrap();
        assert_eq!(evaluate(&lost), -WIN_SCORE);

        let top = [0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0];
        let bottom = [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let even = Board::from_rows(top, bottom, false, false).unwrap();
        assert_eq!(evaluate(&even), 0);
    }
}

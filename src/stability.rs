//! Fixed-stone detection.
//!
//! A stone is fixed when it can never be flipped again. Each of the four
//! lines through a stone is checked from both ends; the stone is marked once
//! every line is safe, and marking repeats until a pass adds nothing, since a
//! new mark can make a neighbor safe.

use crate::board::{BOARD_SIZE, Board, in_bounds};
use crate::types::Color;

const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// What a ray leaving a stone finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RayEnd {
    /// The first cell is off the board or a fixed stone of the same color.
    Anchored,
    /// Some empty cell lies on the ray.
    Open,
    /// The ray reaches the border through stones only.
    Closed,
}

fn classify_ray(board: &Board, x: i32, y: i32, dx: i32, dy: i32, color: Color) -> RayEnd {
    let mut cx = x + dx;
    let mut cy = y + dy;

    if !in_bounds(cx, cy) {
        return RayEnd::Anchored;
    }
    // Only a neighbor anchors: an unfixed stone in between may still flip.
    if board.stone_at(cx, cy) == Some(color) && board.is_fixed(cx, cy) {
        return RayEnd::Anchored;
    }

    while in_bounds(cx, cy) {
        if board.stone_at(cx, cy).is_none() {
            return RayEnd::Open;
        }
        cx += dx;
        cy += dy;
    }

    RayEnd::Closed
}

fn is_line_safe(forward: RayEnd, backward: RayEnd) -> bool {
    match (forward, backward) {
        (RayEnd::Anchored, _) | (_, RayEnd::Anchored) => true,
        (RayEnd::Closed, RayEnd::Closed) => true,
        _ => false,
    }
}

fn is_stable(board: &Board, x: i32, y: i32, color: Color) -> bool {
    AXES.iter().all(|&(dx, dy)| {
        let forward = classify_ray(board, x, y, dx, dy, color);
        forward == RayEnd::Anchored
            || is_line_safe(forward, classify_ray(board, x, y, -dx, -dy, color))
    })
}

/// Extends the fixed mask of `board` to its fixpoint and refreshes the fixed
/// counters. Existing marks are kept: a fixed stone never changes color.
pub(crate) fn mark_fixed_stones(board: &mut Board) {
    let mut passes = 0u32;

    loop {
        let mut marked = false;
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                let Some(color) = board.stone_at(x, y) else {
                    continue;
                };
                if board.is_fixed(x, y) {
                    continue;
                }
                if is_stable(board, x, y, color) {
                    board.set_fixed(x, y);
                    marked = true;
                }
            }
        }

        passes += 1;
        if !marked {
            break;
        }
    }

    debug_assert!(passes <= board.num_stones() as u32 + 1);
    board.refresh_fixed_counts();
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::types::{CellStatus, Color, Move};

    fn rows(cells: &[(u8, u8)]) -> [u8; 8] {
        let mut out = [0u8; 8];
        for &(x, y) in cells {
            out[y as usize] |= 1 << x;
        }
        out
    }

    fn is_fixed(board: &Board, x: u8, y: u8) -> bool {
        matches!(board.cell(x, y), CellStatus::Stone { fixed: true, .. })
    }

    #[test]
    fn corner_stone_is_fixed() {
        let board = Board::from_rows(rows(&[(0, 0)]), rows(&[(4, 4)]), false, false).unwrap();

        assert!(is_fixed(&board, 0, 0));
        assert!(!is_fixed(&board, 4, 4));
        assert_eq!(board.fixed_stone_counts(), (1, 0));
    }

    #[test]
    fn edge_run_from_corner_is_fixed_but_gap_breaks_it() {
        // Black (0,0),(1,0),(2,0) then a gap, then (4,0).
        let black = rows(&[(0, 0), (1, 0), (2, 0), (4, 0)]);
        let white = rows(&[(3, 3)]);
        let board = Board::from_rows(black, white, false, false).unwrap();

        assert!(is_fixed(&board, 0, 0));
        assert!(is_fixed(&board, 1, 0));
        assert!(is_fixed(&board, 2, 0));
        assert!(!is_fixed(&board, 4, 0));
        assert_eq!(board.fixed_stone_counts(), (3, 0));
    }

    #[test]
    fn mixed_color_edge_stays_unfixed_next_to_a_gap() {
        // White (1,0) sits between a black corner and an empty (2,0):
        // Black at (2,0) would flip it.
        let black = rows(&[(0, 0)]);
        let white = rows(&[(1, 0), (5, 5)]);
        let board = Board::from_rows(black, white, false, false).unwrap();

        assert!(is_fixed(&board, 0, 0));
        assert!(!is_fixed(&board, 1, 0));
    }

    #[test]
    fn alternating_full_edge_row_is_entirely_fixed() {
        // Full row 0 alternating colors: every stone there is on the border,
        // so the vertical and diagonal lines are anchored by the edge.
        let black = [0b0101_0101, 0, 0, 0, 0, 0, 0, 0];
        let white = [0b1010_1010, 0, 0, 0, 0, 0, 0, 0];
        let board = Board::from_rows(black, white, false, false).unwrap();

        assert_eq!(board.fixed_stone_counts(), (4, 4));
    }

    #[test]
    fn interior_stone_on_full_lines_is_fixed() {
        // Full board except (6,7), which lies on no line through (3,3).
        let mut black = [0xFFu8; 8];
        let mut white = [0u8; 8];
        black[3] = 0xFF & !(1 << 3);
        white[3] = 1 << 3;
        black[7] &= !(1 << 6);
        let board = Board::from_rows(black, white, false, false).unwrap();

        assert!(is_fixed(&board, 3, 3));
        assert_eq!(
            board.cell(3, 3),
            CellStatus::Stone {
                color: Color::White,
                fixed: true
            }
        );
    }

    #[test]
    fn fixpoint_reaches_stones_anchored_by_later_marks() {
        // Scanning runs top to bottom, so (0,5) and (0,6) only become
        // anchored in later passes, after the corner below them.
        let black = rows(&[(0, 5), (0, 6), (0, 7)]);
        let white = rows(&[(1, 6), (4, 4)]);
        let board = Board::from_rows(black, white, false, false).unwrap();

        assert!(is_fixed(&board, 0, 7));
        assert!(is_fixed(&board, 0, 6));
        assert!(is_fixed(&board, 0, 5));
        assert!(!is_fixed(&board, 1, 6));
        assert_eq!(board.fixed_stone_counts(), (3, 0));
    }

    #[test]
    fn fixed_stone_behind_an_unfixed_run_does_not_anchor() {
        // Black (0,0), (1,1), (2,2); row 2, column 2 and the anti-diagonal
        // through (2,2) are white; (3,3), (0,1) and (4,1) are empty.
        let black = rows(&[(0, 0), (1, 1), (2, 2)]);
        let mut white = [0u8; 8];
        white[2] = 0xFF & !(1 << 2);
        for y in [0, 1, 3, 4, 5, 6, 7] {
            white[y] |= 1 << 2;
        }
        for (x, y) in [(0, 4), (1, 3), (3, 1), (4, 0)] {
            white[y] |= 1 << x;
        }
        let board = Board::from_rows(black, white, true, false).unwrap();

        assert!(is_fixed(&board, 0, 0));
        assert!(!is_fixed(&board, 1, 1));
        assert!(!is_fixed(&board, 2, 2));

        // White takes (1,1) through (0,1), then (2,2) through (3,3).
        let mut board = board;
        board.apply(Move::new(0, 1));
        board.analyze();
        assert!(matches!(
            board.cell(1, 1),
            CellStatus::Stone {
                color: Color::White,
                ..
            }
        ));

        let mut rows_black = [0u8; 8];
        let mut rows_white = [0u8; 8];
        for y in 0..8 {
            rows_black[y] = board.black_row(y);
            rows_white[y] = board.white_row(y);
        }
        let mut board = Board::from_rows(rows_black, rows_white, true, false).unwrap();
        assert!(board.is_legal(3, 3));
        board.apply(Move::new(3, 3));
        board.analyze();
        assert!(matches!(
            board.cell(2, 2),
            CellStatus::Stone {
                color: Color::White,
                ..
            }
        ));
    }

    #[test]
    fn fixed_marks_survive_subsequent_moves() {
        let mut board = Board::new();
        let mut fixed_before = [0u8; 8];

        for _ in 0..60 {
            if board.is_game_over() {
                break;
            }
            match board.legal_move_list().first() {
                Some(&mv) => {
                    board.apply(mv);
                    board.analyze();
                }
                None => board.pass(),
            }
            for (y, before) in fixed_before.iter_mut().enumerate() {
                assert_eq!(board.fixed_row(y) & *before, *before);
                *before = board.fixed_row(y);
            }
        }
    }
}

use reversi_core::{
    AiTurn, AlphaBetaSelector, Board, CellStatus, Color, GameInstance, GameMode, Move,
    SearchConfig, Yield,
};

fn rows(cells: &[(u8, u8)]) -> [u8; 8] {
    let mut out = [0u8; 8];
    for &(x, y) in cells {
        out[y as usize] |= 1 << x;
    }
    out
}

#[test]
fn standard_opening() {
    let mut board = Board::new();

    assert_eq!(board.side_to_move(), Color::Black);
    let mut moves = board.legal_move_list();
    moves.sort_by_key(|mv| (mv.x, mv.y));
    assert_eq!(
        moves,
        vec![Move::new(2, 3), Move::new(3, 2), Move::new(4, 5), Move::new(5, 4)]
    );

    assert_eq!(board.apply(Move::new(2, 3)), 1);
    board.analyze();
    assert_eq!(board.stone_counts(), (4, 1));
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn blocked_side_passes_and_game_continues() {
    // Black's lone stone is surrounded; only White can capture it via (0,0).
    let mut white = [0xFFu8; 8];
    white[0] = 0xFC;
    let mut board = Board::from_rows(rows(&[(1, 0)]), white, false, false).unwrap();

    assert_eq!(board.legal_moves(), [0; 8]);
    assert!(!board.is_game_over());

    board.pass();

    assert_eq!(board.side_to_move(), Color::White);
    assert!(board.is_last_passed());
    assert!(!board.is_game_over());
    assert_eq!(board.legal_move_list(), vec![Move::new(0, 0)]);
    assert_eq!(board.cell(0, 0), CellStatus::Empty { placeable: true });
}

#[test]
fn double_pass_ends_game_with_empty_cells() {
    let mut board = Board::from_rows(rows(&[(7, 7)]), rows(&[(0, 0)]), false, false).unwrap();

    assert_eq!(board.legal_move_count(), 0);
    assert!(!board.is_game_over());

    board.pass();

    assert_eq!(board.legal_move_count(), 0);
    assert!(board.is_game_over());
    assert_eq!(board.empty_count(), 62);
}

#[test]
fn computer_finishes_a_game_against_a_scripted_player() {
    let config = SearchConfig {
        jitter: 0,
        ..SearchConfig::default()
    };
    let selector = AlphaBetaSelector::new(config, 2024);
    let mut game = GameInstance::new(GameMode::VsCpuAsBlack, 2, Box::new(selector));
    let mut host = || Yield::Continue;

    for _ in 0..130 {
        if game.is_game_over() {
            break;
        }
        if game.is_cpu_turn() {
            match game.ai_move(&mut host).unwrap() {
                AiTurn::Placed { flipped, .. } => assert!(flipped > 0),
                AiTurn::Passed => assert!(game.board().is_last_passed()),
                AiTurn::Aborted => panic!("host never cancels"),
            }
        } else {
            match game.board().legal_move_list().first() {
                Some(&mv) => {
                    game.place(mv.x, mv.y).unwrap();
                }
                None => game.pass().unwrap(),
            }
        }
    }

    assert!(game.is_game_over());
    let result = game.to_game_result();
    assert!(result.black_count as usize + result.white_count as usize <= 64);
    assert!(game.to_game_state().is_game_over);
}

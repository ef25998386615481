use minesweep_rs::{new_session, Board, Coords, GameError, Session, Status};

fn count(session: &Session, pred: impl Fn(&minesweep_rs::Cell) -> bool) -> usize {
    session.board().cells().filter(|(_, cell)| pred(cell)).count()
}

#[test]
fn first_reveal_floods_the_zero_region() {
    // Mines, with the cells revealed from (3, 3) marked by their counts:
    //     0 1 2 3 4 5 6 7
    // 0 [           2 ☢ • ]
    // 1 [           2 ☢ ☢ ]
    // 2 [           1 2 2 ]
    // 3 [                 ]
    // 4 [         1 1 1   ]
    // 5 [         1 ☢ 2 1 ]
    // 6 [ 2 3 2 1 1 • • ☢ ]
    // 7 [ ☢ ☢ ☢ • • • ☢ ☢ ]
    let mines: [Coords; 10] = [
        (6, 0),
        (6, 1),
        (7, 1),
        (0, 7),
        (1, 7),
        (2, 7),
        (7, 7),
        (7, 6),
        (6, 7),
        (5, 5),
    ];
    let board = Board::with_mines(8, &mines).unwrap();
    assert_eq!(board.mine_count(), 10);
    let mut session = Session::with_board(board);
    assert_eq!(session.status(), Status::Ready);

    let outcome = session.reveal(3, 3).unwrap();

    assert_eq!(outcome.status, Status::Playing);
    assert_eq!(session.status(), Status::Playing);
    assert_eq!(outcome.changed.len(), 48);
    assert_eq!(count(&session, |c| c.is_revealed()), 48);

    // the pocket behind the mines and the cells only bordering numbers stay hidden
    for (x, y) in [(7, 0), (3, 7), (4, 7), (5, 6), (5, 7), (6, 6)] {
        assert!(!session.cell(x, y).unwrap().is_revealed(), "[{}, {}]", x, y);
    }
    for (x, y) in mines {
        assert!(!session.cell(x, y).unwrap().is_revealed());
    }

    // every revealed zero cell has all of its neighbors revealed
    let board = session.board();
    for ((x, y), cell) in board.cells() {
        if cell.is_revealed() && cell.adjacent_mine_count() == 0 {
            assert!(board
                .neighbors(x, y)
                .all(|(nx, ny)| board.cell(nx, ny).unwrap().is_revealed()));
        }
    }

    // revealing it again is a no-op
    let outcome = session.reveal(3, 3).unwrap();
    assert!(outcome.changed.is_empty());
    assert_eq!(count(&session, |c| c.is_revealed()), 48);
}

#[test]
fn reveal_mine_first_fails_in_one_call() {
    let mut session = Session::with_board(Board::with_mines(8, &[(4, 4), (0, 0)]).unwrap());

    let outcome = session.reveal(4, 4).unwrap();

    assert_eq!(outcome.status, Status::Failed);
    let cell = session.cell(4, 4).unwrap();
    assert!(cell.is_detonated() && cell.is_mine() && cell.is_revealed());
    assert_eq!(count(&session, |c| c.is_detonated()), 1);

    // no further reveals change anything
    let revealed = count(&session, |c| c.is_revealed());
    let outcome = session.reveal(7, 7).unwrap();
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.changed.is_empty());
    assert_eq!(count(&session, |c| c.is_revealed()), revealed);
}

#[test]
fn revealing_every_safe_cell_wins() {
    // Mines:
    //     0 1 2 3
    // 0 [ ☢ 1 1 1 ]
    // 1 [ 1 1 1 ☢ ]
    // 2 [ 1 1 2 1 ]
    // 3 [ 1 ☢ 1   ]
    let mines = [(0, 0), (3, 1), (1, 3)];
    let mut session = Session::with_board(Board::with_mines(4, &mines).unwrap());

    let safe: Vec<Coords> = session
        .board()
        .cells()
        .filter(|(_, c)| !c.is_mine())
        .map(|(coords, _)| coords)
        .collect();
    let (last, rest) = safe.split_last().unwrap();

    for &(x, y) in rest {
        let outcome = session.reveal(x, y).unwrap();
        assert_ne!(outcome.status, Status::Succeeded);
    }

    // the mines never had to be flagged
    let outcome = session.reveal(last.0, last.1).unwrap();
    assert_eq!(outcome.status, Status::Succeeded);
    assert_eq!(session.remaining_mine_count(), 0);
}

#[test]
fn flag_then_unflag_restores_the_counter() {
    let mut session = new_session(0).unwrap();
    let before = session.remaining_mine_count();

    let ((x, y), _) = session
        .board()
        .cells()
        .find(|(_, c)| !c.is_revealed())
        .unwrap();

    session.toggle_flag(x, y).unwrap();
    assert_eq!(session.remaining_mine_count(), before - 1);
    assert!(session.cell(x, y).unwrap().is_flagged());

    session.toggle_flag(x, y).unwrap();
    assert_eq!(session.remaining_mine_count(), before);

    // revealed cells cannot be flagged
    let ((rx, ry), _) = session
        .board()
        .cells()
        .find(|(_, c)| c.is_revealed())
        .unwrap();
    let outcome = session.toggle_flag(rx, ry).unwrap();
    assert!(outcome.changed.is_empty());
    assert!(!session.cell(rx, ry).unwrap().is_flagged());
    assert_eq!(session.remaining_mine_count(), before);
}

#[test]
fn reset_to_another_level() {
    let mut session = Session::with_seed(0, 2024).unwrap();
    assert_eq!(session.board_size(), 8);
    session.reveal(0, 0).unwrap();

    let outcome = session.reset(1).unwrap();

    assert_eq!(outcome.status, Status::Ready);
    assert_eq!(session.status(), Status::Ready);
    assert_eq!(session.board_size(), 16);
    assert_eq!(session.board().mine_count(), 40);
    assert_eq!(count(&session, |c| c.is_mine()), 40);
    assert_eq!(session.remaining_mine_count(), 40);
    assert_eq!(session.elapsed_seconds(), 0);
    assert_eq!(session.level(), Some(1));
}

#[test]
fn rejected_commands_do_not_mutate() {
    let mut session = Session::with_seed(2, 8).unwrap();

    assert_eq!(session.reset(3), Err(GameError::InvalidLevel(3)));
    assert_eq!(session.board_size(), 24);
    assert_eq!(session.status(), Status::Ready);

    assert_eq!(
        session.reveal(24, 0),
        Err(GameError::OutOfBounds { x: 24, y: 0, size: 24 })
    );
    assert_eq!(session.status(), Status::Ready);

    assert!(session.toggle_flag(0, 30).is_err());
    assert_eq!(session.remaining_mine_count(), 99);
}

#[test]
fn start_cell_is_safe_on_every_level() {
    for level in 0..3 {
        for seed in 0..10 {
            let session = Session::with_seed(level, seed).unwrap();
            let board = session.board();

            let starts: Vec<_> = board.cells().filter(|(_, c)| c.is_start()).collect();
            assert!(starts.len() <= 1);

            for &((x, y), start) in &starts {
                assert!(!start.is_mine());
                assert_eq!(start.adjacent_mine_count(), 0);
                assert!(board
                    .neighbors(x, y)
                    .all(|(nx, ny)| !board.cell(nx, ny).unwrap().is_mine()));
            }
            assert_eq!(count(&session, |c| c.is_mine() && c.is_revealed()), 0);
        }
    }
}

#[test]
fn board_with_every_safe_cell_revealed_is_won() {
    // Mines:
    //     0 1 2 3
    // 0 [         ]
    // 1 [         ]
    // 2 [     1 1 ]
    // 3 [     1 ☢ ]
    let mut board = Board::with_mines(4, &[(3, 3)]).unwrap();
    board.step(0, 0).unwrap();
    assert!(board.is_cleared());

    let mut session = Session::with_board(board);
    assert_eq!(session.status(), Status::Succeeded);
    assert_eq!(session.remaining_mine_count(), 0);

    let outcome = session.reveal(3, 3).unwrap();
    assert_eq!(outcome.status, Status::Succeeded);
    assert!(outcome.changed.is_empty());
    let mine = session.cell(3, 3).unwrap();
    assert!(mine.is_flagged() && !mine.is_revealed() && !mine.is_detonated());
    assert_eq!(session.elapsed_seconds(), 0);
}

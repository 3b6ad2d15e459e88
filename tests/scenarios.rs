use tether_chess::{
    Board, Color, Engine, GameState, Piece, Rank, Role, Square,
};

fn square(s: &str) -> Square {
    s.parse().unwrap()
}

fn veteran(role: Role, color: Color) -> Piece {
    Piece {
        has_moved: true,
        ..Piece::new(role, color)
    }
}

#[test]
fn the_michael_tal_queen_jump_opens_the_game() {
    let mut engine = Engine::new_game();

    assert!(!engine.michael_tal_moves().is_empty());

    let result = engine.play(square("d1"), square("c3"), None);
    assert!(result.ok, "{}", result.message);

    let m = result.played.unwrap();
    assert!(m.is_transporter());
    assert_eq!(m.mover().role, Role::Queen);
    assert_eq!(m.borrowed_from().unwrap().square, square("b1"));
    assert_eq!(m.borrowed_from().unwrap().role, Role::Knight);
    assert!(!result.gives_check);
    assert!(!result.is_checkmate);

    let queen = engine.board().piece_at(square("c3")).unwrap();
    assert_eq!(queen.role, Role::Queen);
    assert_eq!(queen.color, Color::White);
    assert_eq!(engine.board().piece_at(square("d1")), None);
    assert_eq!(engine.board().turn(), Color::Black);
}

#[test]
fn a_pawn_promotes_mid_knight_jump() {
    let mut board = Board::empty();
    board.place(square("d6"), veteran(Role::Pawn, Color::White));
    board.place(square("a6"), veteran(Role::Knight, Color::White));
    board.place(square("a1"), Piece::new(Role::King, Color::White));
    board.place(square("h1"), Piece::new(Role::King, Color::Black));

    let mut engine = Engine::with_board(board);
    let result = engine.play(square("d6"), square("e8"), Some(Role::Queen));
    assert!(result.ok, "{}", result.message);

    let m = result.played.unwrap();
    assert!(m.is_pawn_knight_apex());
    assert!(m.is_transporter());
    assert_eq!(m.promotion(), Some(Role::Queen));
    assert_eq!(m.borrowed_from().unwrap().square, square("a6"));

    let promoted = engine.board().piece_at(square("e8")).unwrap();
    assert_eq!(promoted.role, Role::Queen);
    assert_eq!(promoted.color, Color::White);
}

#[test]
fn a_transported_rook_lands_without_checking() {
    let mut board = Board::empty();
    board.place(square("a4"), veteran(Role::Rook, Color::White));
    board.place(square("c4"), veteran(Role::Knight, Color::White));
    board.place(square("f5"), veteran(Role::King, Color::Black));
    board.place(square("h1"), Piece::new(Role::King, Color::White));

    let mut engine = Engine::with_board(board);

    // The rook borrows the knight's (2, -1) vector and lands on c3, a square
    // sharing neither file nor rank with the black king.
    let result = engine.play(square("a4"), square("c3"), None);
    assert!(result.ok, "{}", result.message);

    let m = result.played.unwrap();
    assert!(m.is_transporter());
    assert_eq!(m.borrowed_from().unwrap().role, Role::Knight);
    assert!(!result.gives_check);
}

#[test]
fn lethality_is_native_only_even_when_landing_beside_the_king() {
    let mut board = Board::empty();
    board.place(square("a4"), veteran(Role::Rook, Color::White));
    board.place(square("c4"), veteran(Role::Knight, Color::White));
    board.place(square("c5"), veteran(Role::King, Color::Black));
    board.place(square("h1"), Piece::new(Role::King, Color::White));

    // a4 -> b6 via the knight's (1, 2) vector puts the rook diagonally
    // adjacent to the king: no native reach, hence no check.
    let mut engine = Engine::with_board(board.clone());
    let result = engine.play(square("a4"), square("b6"), None);
    assert!(result.ok, "{}", result.message);
    assert!(result.played.unwrap().is_transporter());
    assert!(!result.gives_check);

    // The same jump does check a king standing on the rook's new file.
    board.remove(square("c5"));
    board.place(square("b8"), veteran(Role::King, Color::Black));
    let mut engine = Engine::with_board(board);
    let result = engine.play(square("a4"), square("b6"), None);
    assert!(result.ok, "{}", result.message);
    assert!(result.gives_check);
}

#[test]
fn the_king_may_not_step_into_transporter_reach() {
    let mut board = Board::empty();
    board.place(square("a1"), Piece::new(Role::Rook, Color::White));
    board.place(square("b1"), Piece::new(Role::Knight, Color::White));
    board.place(square("h8"), Piece::new(Role::King, Color::White));
    board.place(square("c5"), veteran(Role::King, Color::Black));
    board.set_turn(Color::Black);

    let mut engine = Engine::with_board(board);

    // b4 is natively attacked by nobody, but the knight on b1 can reach it
    // by borrowing its rook mate's slide up the b file.
    let refused = engine.play(square("c5"), square("b4"), None);
    assert!(!refused.ok);

    let allowed = engine.play(square("c5"), square("d5"), None);
    assert!(allowed.ok, "{}", allowed.message);
}

#[test]
fn entanglement_is_forgotten_the_moment_a_piece_changes_rank() {
    let mut board = Board::empty();
    board.place(square("a3"), veteran(Role::Rook, Color::White));
    board.place(square("h3"), veteran(Role::Knight, Color::White));
    board.place(square("e1"), Piece::new(Role::King, Color::White));
    board.place(square("e8"), Piece::new(Role::King, Color::Black));

    let mut engine = Engine::with_board(board);

    let jumps = |engine: &Engine, from: &str| {
        engine
            .legal_moves_from(square(from))
            .into_iter()
            .filter(|m| m.is_transporter())
            .count()
    };

    assert!(jumps(&engine, "a3") > 0);

    assert!(engine.play(square("a3"), square("a4"), None).ok);
    assert!(engine.play(square("e8"), square("e7"), None).ok);

    // The rook now sits alone on the fourth rank; the knight kept the third.
    assert_eq!(jumps(&engine, "a4"), 0);
    assert!(engine
        .legal_moves_from(square("a4"))
        .iter()
        .all(|m| !m.is_transporter()));
}

#[test]
fn borrowed_movement_never_chains() {
    let mut board = Board::empty();
    board.place(square("d1"), Piece::new(Role::Queen, Color::White));
    board.place(square("b1"), Piece::new(Role::Knight, Color::White));
    board.place(square("c1"), Piece::new(Role::Bishop, Color::White));
    board.place(square("a4"), veteran(Role::King, Color::White));
    board.place(square("h8"), Piece::new(Role::King, Color::Black));

    let engine = Engine::with_board(board);

    let jumps: Vec<_> = engine
        .legal_moves_from(square("d1"))
        .into_iter()
        .filter(|m| m.is_transporter())
        .collect();

    // Knight loan: e3, c3, f2, b2. Bishop loan: e2, f3, g4, h5 northeast and
    // c2, b3 northwest, where the friendly king blocks a4. Nothing chains a
    // knight jump into a bishop slide.
    let expected = [
        "e3", "c3", "f2", "b2", "e2", "f3", "g4", "h5", "c2", "b3",
    ];

    assert_eq!(jumps.len(), expected.len());
    for s in expected {
        assert!(
            jumps.iter().any(|m| m.whither() == square(s)),
            "missing destination {s}"
        );
    }

    // Chained targets such as d5 (c3 then a bishop slide) are absent.
    assert!(jumps.iter().all(|m| m.whither() != square("d5")));
}

#[test]
fn castling_through_transporter_reach_is_refused() {
    let mut board = Board::empty();
    board.place(square("e1"), Piece::new(Role::King, Color::White));
    board.place(square("h1"), Piece::new(Role::Rook, Color::White));
    board.place(square("h8"), Piece::new(Role::King, Color::Black));
    board.place(square("a8"), Piece::new(Role::Rook, Color::Black));
    board.place(square("f8"), Piece::new(Role::Knight, Color::Black));

    let mut engine = Engine::with_board(board);

    // The knight on f8 borrows its rook mate's slide down the f file, so the
    // king's transit square is threatened without being natively attacked.
    let refused = engine.play_text("O-O");
    assert!(!refused.ok);
}

#[test]
fn a_full_game_reaches_checkmate_through_the_engine_surface() {
    let mut board = Board::empty();
    board.place(square("g1"), Piece::new(Role::King, Color::White));
    board.place(square("h1"), Piece::new(Role::Rook, Color::White));
    board.place(square("a8"), veteran(Role::King, Color::Black));
    board.place(square("a7"), veteran(Role::Pawn, Color::Black));
    board.place(square("b7"), veteran(Role::Pawn, Color::Black));

    let mut engine = Engine::with_board(board);
    assert_eq!(engine.state(), GameState::Ongoing);

    let result = engine.play_text("h1h8");
    assert!(result.ok, "{}", result.message);
    assert!(result.is_checkmate);
    assert_eq!(engine.state(), GameState::WhiteWinsCheckmate);
    assert!(engine.legal_moves().is_empty());
    assert!(engine.transporter_moves().is_empty());
}

#[test]
fn analysis_filters_agree_with_the_move_records() {
    let engine = Engine::new_game();

    assert_eq!(engine.michael_tal_moves().len(), 8);
    assert!(engine.pawn_knight_apex_moves().is_empty());

    for m in engine.transporter_moves() {
        let loan = m.borrowed_from().unwrap();
        assert_eq!(loan.square.rank, m.whence().rank);
        assert_ne!(loan.square, m.whence());
    }

    for m in engine.checking_moves() {
        assert!(!m.is_castling());
    }
}

#[test]
fn rank_mates_are_derived_from_the_current_position() {
    let engine = Engine::new_game();

    let mates = engine.rank_mates_of(square("a1"));
    assert_eq!(mates.len(), 7);
    assert!(mates.iter().all(|s| s.rank == Rank::First));

    let mates = engine.rank_mates_of(square("e4"));
    assert!(mates.is_empty());
}

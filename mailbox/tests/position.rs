use mailbox::{
    BoardError, Move, Piece, PieceKind, Position, Side, Square, Wing, KIWIPETE, STARTPOS,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Plays `plies` random playable moves from `description`, handing each position, move, and result to `check`.
fn random_playout(
    description: &str,
    seed: u64,
    plies: usize,
    mut check: impl FnMut(&Position, Move, &Position),
) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::from_description(description).unwrap();
    let mut played = Vec::with_capacity(plies);

    for _ in 0..plies {
        let moves = pos.playable_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };

        let next = pos.apply_move(mv);
        check(&pos, mv, &next);

        played.push(mv);
        pos = next;
    }

    played
}

#[test]
fn test_startpos_without_marker() {
    let pos = Position::from_description("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
    let text = pos.board().render();

    assert!(text[0..16].chars().all(|c| c.is_ascii_lowercase()));
    assert!(text[16..48].chars().all(|c| c == '.'));
    assert!(text[48..64].chars().all(|c| c.is_ascii_uppercase()));
    assert_eq!(pos, Position::default());
}

#[test]
fn test_double_push_hands_over_the_move() {
    let pos = Position::default();
    let next = pos.apply_move(Move::from_uci("e2e4").unwrap());

    // The square behind e4 is e3, which Black sees as d6
    assert_eq!(next.ep_square(), Some(Square::E3.mirrored()));
    assert_eq!(next.ep_square(), Some(Square::D6));

    // Black is to move: Black's pieces are now the uppercase ones at the bottom
    let text = next.board().render();
    assert_eq!(&text[56..64], "RNBKQBNR");
    assert_eq!(&text[0..8], "rnbkqbnr");
    assert_eq!(next.board()[Square::D5], Piece::Theirs(PieceKind::Pawn));
}

#[test]
fn test_queen_side_castling_end_to_end() {
    let pos = Position::from_description("4k3/8/8/8/8/8/8/R3K3 w").unwrap();
    assert!(pos.castling_rights().has(Side::Ours, Wing::West));

    let castle = Move::new(Square::E1, Square::C1);
    assert!(pos.enumerate_moves().contains(&castle));

    // Look at the result from White's side again
    let after = pos.apply_move(castle).mirrored();
    assert_eq!(after.board()[Square::C1], Piece::Ours(PieceKind::King));
    assert_eq!(after.board()[Square::D1], Piece::Ours(PieceKind::Rook));
    assert!(after.board()[Square::A1].is_empty());
    assert!(!after.castling_rights().has(Side::Ours, Wing::West));
    assert!(!after.castling_rights().has(Side::Ours, Wing::East));
}

#[test]
fn test_promotion_on_every_file() {
    for file in 0..8u8 {
        let pawn = Square::new(file, 6);
        let target = Square::new(file, 7);

        let before = if file > 0 { file.to_string() } else { String::new() };
        let after = if file < 7 { (7 - file).to_string() } else { String::new() };
        let description = format!("8/{before}P{after}/8/8/8/8/8/k6K w");

        let pos = Position::from_description(&description).unwrap();
        assert!(pos.board()[pawn].is_ours_of(PieceKind::Pawn), "{description}");

        let next = pos.apply_move(Move::new(pawn, target)).mirrored();
        assert_eq!(next.board()[target], Piece::Ours(PieceKind::Queen), "{description}");
        assert!(next.board()[pawn].is_empty());
    }
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        Position::from_description("8/8/8/8"),
        Err(BoardError::MalformedDescription { .. })
    ));
    assert!(matches!(
        Position::from_description("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x"),
        Err(BoardError::MalformedDescription { .. })
    ));
    assert_eq!(
        Position::from_description("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNZ"),
        Err(BoardError::InvalidPieceSymbol { val: 'Z', row: 8 })
    );
    assert_eq!(
        Position::from_description("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
        Err(BoardError::InvalidRowLength { row: 2, len: 7 })
    );
    assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w".parse::<Position>().is_ok());
}

#[test]
fn test_mirror_round_trip() {
    for index in 0..120 {
        let square = Square::from_index(index).unwrap();
        assert_eq!(square.mirrored().mirrored(), square);
    }

    for description in [STARTPOS, KIWIPETE] {
        let pos = Position::from_description(description).unwrap();
        assert_eq!(pos.board().mirrored().mirrored(), *pos.board());
        assert_eq!(pos.mirrored().mirrored(), pos);
    }
}

#[test]
fn test_random_playouts_flip_cleanly() {
    for seed in 0..8 {
        random_playout(KIWIPETE, seed, 60, |pos, _, next| {
            assert_eq!(pos.mirrored().mirrored(), *pos);
            assert_eq!(next.mirrored().mirrored(), *next);
        });
    }
}

#[test]
fn test_random_playouts_keep_score_symmetry() {
    for seed in 0..8 {
        random_playout(STARTPOS, seed, 80, |pos, mv, next| {
            assert_eq!(
                next.score(),
                -(pos.score() + pos.score_delta(mv)),
                "{mv:?} in\n{pos:?}"
            );
        });
    }
}

#[test]
fn test_random_playouts_keep_score_in_sync() {
    for seed in 0..8 {
        // Capturing a King by its passant square scores the King without removing it from the board
        let mut in_sync = true;

        random_playout(KIWIPETE, seed, 80, |pos, mv, next| {
            if pos
                .king_passant()
                .is_some_and(|passant| mv.to().distance(passant) < 2)
            {
                in_sync = false;
            }

            if in_sync {
                assert_eq!(next.score(), next.evaluate(), "{mv:?} in\n{pos:?}");
            }
        });
    }
}

#[test]
fn test_random_playouts_are_deterministic() {
    for seed in 0..4 {
        let first = random_playout(STARTPOS, seed, 40, |_, _, _| {});
        let second = random_playout(STARTPOS, seed, 40, |_, _, _| {});
        assert_eq!(first, second);
    }
}

#[test]
fn test_apply_move_leaves_original_untouched() {
    let pos = Position::from_description(KIWIPETE).unwrap();
    let copy = pos.clone();

    for mv in pos.playable_moves() {
        let _ = pos.apply_move(mv);
    }

    assert_eq!(pos, copy);
}

use crate::{attacks, Board, Color, File, Loan, Move, MoveBuilder, Piece, Role, Square};

/// All legal moves for the side to move.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    board
        .iter()
        .filter(|(_, p)| p.color == board.turn())
        .flat_map(|(s, p)| pseudo_legal(board, s, p))
        .filter(|m| is_legal(board, m))
        .collect()
}

/// All legal moves for the piece on `s`, empty unless it belongs to the side
/// to move.
pub fn legal_moves_from(board: &Board, s: Square) -> Vec<Move> {
    match board.piece_at(s) {
        Some(p) if p.color == board.turn() => pseudo_legal(board, s, p)
            .into_iter()
            .filter(|m| is_legal(board, m))
            .collect(),
        _ => Vec::new(),
    }
}

fn pseudo_legal(board: &Board, origin: Square, piece: Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    native_moves(board, origin, piece, &mut moves);
    transporter_moves(board, origin, piece, &mut moves);
    moves
}

/// Drops moves whose execution would expose the moving side's king.
///
/// King safety is native-only, except that the king itself may not land on
/// any threatened square, transporter reach included.
fn is_legal(board: &Board, m: &Move) -> bool {
    let mut next = board.clone();
    next.apply(m);

    let mover = m.mover();
    let Some(king) = next.king(mover.color) else {
        return true;
    };

    if mover.role == Role::King {
        !attacks::is_threatened(&next, king, !mover.color)
    } else {
        !attacks::is_native_attack(&next, king, !mover.color)
    }
}

fn native_moves(board: &Board, origin: Square, piece: Piece, out: &mut Vec<Move>) {
    match piece.role {
        Role::Pawn => pawn_moves(board, origin, piece, out),
        Role::King => king_moves(board, origin, piece, out),
        _ => vector_moves(board, origin, piece, out),
    }
}

fn vector_moves(board: &Board, origin: Square, piece: Piece, out: &mut Vec<Move>) {
    for v in piece.role.vectors(piece.color) {
        if piece.role.is_sliding() {
            let mut sq = origin;
            while let Some(next) = sq.offset(v.dx, v.dy) {
                match board.piece_at(next) {
                    Some(other) if other.color == piece.color => break,
                    Some(other) => {
                        out.push(Move::builder(piece, origin, next).captures(other).build());
                        break;
                    }
                    None => out.push(Move::builder(piece, origin, next).build()),
                }
                sq = next;
            }
        } else if let Some(next) = origin.offset(v.dx, v.dy) {
            match board.piece_at(next) {
                Some(other) if other.color == piece.color => {}
                Some(other) => {
                    out.push(Move::builder(piece, origin, next).captures(other).build())
                }
                None => out.push(Move::builder(piece, origin, next).build()),
            }
        }
    }
}

fn pawn_moves(board: &Board, origin: Square, pawn: Piece, out: &mut Vec<Move>) {
    let dir = pawn.color.pawn_direction();

    if let Some(ahead) = origin.offset(0, dir) {
        if board.piece_at(ahead).is_none() {
            pawn_advance(out, pawn, origin, ahead, None, None);

            if origin.rank == pawn.color.pawn_rank() {
                if let Some(two_ahead) = origin.offset(0, 2 * dir) {
                    if board.piece_at(two_ahead).is_none() {
                        out.push(Move::builder(pawn, origin, two_ahead).build());
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(diagonal) = origin.offset(df, dir) else {
            continue;
        };

        match board.piece_at(diagonal) {
            Some(victim) if victim.color != pawn.color => {
                pawn_advance(out, pawn, origin, diagonal, Some(victim), None);
            }

            None if board.en_passant() == Some(diagonal) => {
                let bypassed = Square::new(diagonal.file, origin.rank);
                if let Some(victim) = board.piece_at(bypassed) {
                    if victim.role == Role::Pawn && victim.color != pawn.color {
                        out.push(
                            Move::builder(pawn, origin, diagonal)
                                .captures(victim)
                                .en_passant()
                                .build(),
                        );
                    }
                }
            }

            _ => {}
        }
    }
}

/// Emits a pawn step onto `to`, fanning out all four promotion choices when
/// `to` lies on the far rank.
fn pawn_advance(
    out: &mut Vec<Move>,
    pawn: Piece,
    origin: Square,
    to: Square,
    victim: Option<Piece>,
    loan: Option<Loan>,
) {
    let stamp = |builder: MoveBuilder| {
        let builder = match victim {
            Some(v) => builder.captures(v),
            None => builder,
        };
        match loan {
            Some(l) => builder.borrows(l),
            None => builder,
        }
    };

    if to.is_promotion_rank(pawn.color) {
        for role in Role::PROMOTIONS {
            out.push(stamp(Move::builder(pawn, origin, to)).promotes(role).build());
        }
    } else {
        out.push(stamp(Move::builder(pawn, origin, to)).build());
    }
}

fn king_moves(board: &Board, origin: Square, king: Piece, out: &mut Vec<Move>) {
    vector_moves(board, origin, king, out);

    if king.has_moved || origin.file != File::E {
        return;
    }

    let opponent = !king.color;

    if board.castle_rights().kingside(king.color) {
        castling_move(board, origin, king, opponent, 1, &[1, 2], out);
    }

    if board.castle_rights().queenside(king.color) {
        castling_move(board, origin, king, opponent, -1, &[-1, -2, -3], out);
    }
}

/// Emits a castling move towards `direction` if the rook is eligible, the
/// squares between are empty, and neither the king's square, its transit
/// square nor its destination is under full threat. Transporter reach counts:
/// the king may not castle through a square an enemy could jump onto.
fn castling_move(
    board: &Board,
    origin: Square,
    king: Piece,
    opponent: Color,
    direction: i8,
    between: &[i8],
    out: &mut Vec<Move>,
) {
    let corner = if direction > 0 { File::H } else { File::A };
    let home = Square::new(corner, origin.rank);

    match board.piece_at(home) {
        Some(rook) if rook.role == Role::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return,
    }

    if between
        .iter()
        .filter_map(|&dx| origin.offset(dx, 0))
        .any(|sq| board.piece_at(sq).is_some())
    {
        return;
    }

    let (Some(transit), Some(destination)) = (origin.offset(direction, 0), origin.offset(2 * direction, 0))
    else {
        return;
    };

    if attacks::is_threatened(board, origin, opponent)
        || attacks::is_threatened(board, transit, opponent)
        || attacks::is_threatened(board, destination, opponent)
    {
        return;
    }

    out.push(Move::builder(king, origin, destination).castling().build());
}

/// Emits every move the piece on `origin` can make by borrowing a rank-mate's
/// native vector, applied from its own square.
///
/// Only the mates' native tables are consulted, so borrowed movement can
/// never chain through another borrow.
fn transporter_moves(board: &Board, origin: Square, piece: Piece, out: &mut Vec<Move>) {
    for (mate_square, mate) in board.rank_mates(origin) {
        let loan = Loan {
            role: mate.role,
            square: mate_square,
        };

        for v in mate.role.vectors(piece.color) {
            if mate.role.is_sliding() {
                let mut sq = origin;
                while let Some(next) = sq.offset(v.dx, v.dy) {
                    match board.piece_at(next) {
                        Some(other) if other.color == piece.color => break,
                        Some(other) => {
                            transporter_advance(out, piece, origin, next, loan, Some(other));
                            break;
                        }
                        None => transporter_advance(out, piece, origin, next, loan, None),
                    }
                    sq = next;
                }
            } else if let Some(next) = origin.offset(v.dx, v.dy) {
                match board.piece_at(next) {
                    Some(other) if other.color == piece.color => {}
                    other => transporter_advance(out, piece, origin, next, loan, other),
                }
            }
        }
    }
}

fn transporter_advance(
    out: &mut Vec<Move>,
    piece: Piece,
    origin: Square,
    to: Square,
    loan: Loan,
    victim: Option<Piece>,
) {
    if piece.role == Role::Pawn && to.is_promotion_rank(piece.color) {
        pawn_advance(out, piece, origin, to, victim, Some(loan));
    } else {
        let builder = Move::builder(piece, origin, to).borrows(loan);
        let builder = match victim {
            Some(v) => builder.captures(v),
            None => builder,
        };
        out.push(builder.build());
    }
}

use crate::{File, Piece, Role, Square};
use std::fmt;

/// Snapshot of the rank-mate a transporter move borrows movement from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Loan {
    pub role: Role,
    pub square: Square,
}

/// One move, fully described.
///
/// The record carries value snapshots of the pieces involved as they stood
/// before the move, so it stays meaningful after the board has changed.
/// Construction goes through [`Move::builder`], which checks the record's
/// structural invariants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    whence: Square,
    whither: Square,
    mover: Piece,
    captured: Option<Piece>,
    borrowed_from: Option<Loan>,
    promotion: Option<Role>,
    is_castling: bool,
    is_en_passant: bool,
}

impl Move {
    pub fn builder(mover: Piece, whence: Square, whither: Square) -> MoveBuilder {
        MoveBuilder {
            mover,
            whence,
            whither,
            captured: None,
            borrowed_from: None,
            promotion: None,
            is_castling: false,
            is_en_passant: false,
        }
    }

    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The moving [`Piece`], as it stood before the move.
    pub fn mover(&self) -> Piece {
        self.mover
    }

    /// The captured [`Piece`], if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// The rank-mate this move borrows movement from, if any.
    pub fn borrowed_from(&self) -> Option<Loan> {
        self.borrowed_from
    }

    /// The kind the mover promotes to, if any.
    pub fn promotion(&self) -> Option<Role> {
        self.promotion
    }

    pub fn is_castling(&self) -> bool {
        self.is_castling
    }

    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Whether this move borrows a rank-mate's movement.
    pub fn is_transporter(&self) -> bool {
        self.borrowed_from.is_some()
    }

    /// Whether this is a pawn promoting mid L-jump borrowed from a knight.
    pub fn is_pawn_knight_apex(&self) -> bool {
        self.mover.role == Role::Pawn
            && self.promotion.is_some()
            && matches!(self.borrowed_from, Some(l) if l.role == Role::Knight)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_castling {
            return if self.whither.file > self.whence.file {
                write!(f, "O-O")
            } else {
                write!(f, "O-O-O")
            };
        }

        if self.mover.role != Role::Pawn {
            write!(f, "{}", self.mover.role.symbol())?;
        }

        if let Some(loan) = self.borrowed_from {
            write!(f, "~{}", loan.role.symbol())?;
        }

        write!(
            f,
            "{}{}{}",
            self.whence,
            if self.is_capture() { "x" } else { "-" },
            self.whither
        )?;

        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.symbol())?;

            if self.is_pawn_knight_apex() {
                write!(f, "!")?;
            }
        }

        Ok(())
    }
}

/// Builds a [`Move`], checking its structural invariants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveBuilder {
    mover: Piece,
    whence: Square,
    whither: Square,
    captured: Option<Piece>,
    borrowed_from: Option<Loan>,
    promotion: Option<Role>,
    is_castling: bool,
    is_en_passant: bool,
}

impl MoveBuilder {
    pub fn captures(mut self, piece: Piece) -> Self {
        self.captured = Some(piece);
        self
    }

    pub fn borrows(mut self, loan: Loan) -> Self {
        self.borrowed_from = Some(loan);
        self
    }

    pub fn promotes(mut self, role: Role) -> Self {
        self.promotion = Some(role);
        self
    }

    pub fn castling(mut self) -> Self {
        self.is_castling = true;
        self
    }

    pub fn en_passant(mut self) -> Self {
        self.is_en_passant = true;
        self
    }

    pub fn build(self) -> Move {
        if self.is_castling {
            debug_assert_eq!(self.mover.role, Role::King);
            debug_assert_eq!(self.whence.rank, self.whither.rank);
            debug_assert!(matches!(self.whither.file, File::G | File::C));
            debug_assert!(self.borrowed_from.is_none());
            debug_assert!(!self.is_en_passant);
        }

        if self.is_en_passant {
            debug_assert_eq!(self.mover.role, Role::Pawn);
            debug_assert!(matches!(self.captured, Some(p) if p.role == Role::Pawn));
            debug_assert!(self.borrowed_from.is_none());
        }

        debug_assert_eq!(
            self.promotion.is_some(),
            self.mover.role == Role::Pawn && self.whither.is_promotion_rank(self.mover.color)
        );

        debug_assert!(self
            .promotion
            .map_or(true, |r| Role::PROMOTIONS.contains(&r)));

        Move {
            whence: self.whence,
            whither: self.whither,
            mover: self.mover,
            captured: self.captured,
            borrowed_from: self.borrowed_from,
            promotion: self.promotion,
            is_castling: self.is_castling,
            is_en_passant: self.is_en_passant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Rank};
    use test_strategy::proptest;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[proptest]
    fn plain_moves_are_neither_transporter_nor_special(
        #[filter(#mover.role != Role::Pawn)] mover: Piece,
        whence: Square,
        #[filter(#whither != #whence)] whither: Square,
    ) {
        let m = Move::builder(mover, whence, whither).build();
        assert!(!m.is_transporter());
        assert!(!m.is_castling());
        assert!(!m.is_en_passant());
        assert!(!m.is_capture());
        assert!(!m.is_pawn_knight_apex());
    }

    #[proptest]
    fn transporter_moves_remember_their_loan(
        #[filter(#mover.role != Role::Pawn)] mover: Piece,
        whence: Square,
        #[filter(#whither != #whence)] whither: Square,
        loan: Loan,
    ) {
        let m = Move::builder(mover, whence, whither).borrows(loan).build();
        assert!(m.is_transporter());
        assert_eq!(m.borrowed_from(), Some(loan));
    }

    #[test]
    fn quiet_move_renders_with_a_dash() {
        let rook = Piece::new(Role::Rook, Color::White);
        let m = Move::builder(rook, square("a1"), square("a4")).build();
        assert_eq!(m.to_string(), "Ra1-a4");
    }

    #[test]
    fn capture_renders_with_an_x() {
        let queen = Piece::new(Role::Queen, Color::White);
        let victim = Piece::new(Role::Knight, Color::Black);
        let m = Move::builder(queen, square("d1"), square("d7"))
            .captures(victim)
            .build();
        assert_eq!(m.to_string(), "Qd1xd7");
    }

    #[test]
    fn transporter_move_renders_the_borrowed_symbol() {
        let queen = Piece::new(Role::Queen, Color::White);
        let loan = Loan {
            role: Role::Knight,
            square: square("b1"),
        };
        let m = Move::builder(queen, square("d1"), square("c3"))
            .borrows(loan)
            .build();
        assert_eq!(m.to_string(), "Q~Nd1-c3");
    }

    #[test]
    fn pawn_knight_apex_renders_with_a_bang() {
        let pawn = Piece::new(Role::Pawn, Color::White);
        let loan = Loan {
            role: Role::Knight,
            square: square("a6"),
        };
        let m = Move::builder(pawn, square("d6"), square("e8"))
            .borrows(loan)
            .promotes(Role::Queen)
            .build();
        assert!(m.is_pawn_knight_apex());
        assert_eq!(m.to_string(), "~Nd6-e8=Q!");
    }

    #[test]
    fn sliding_transporter_promotion_is_not_an_apex() {
        let pawn = Piece::new(Role::Pawn, Color::White);
        let loan = Loan {
            role: Role::Rook,
            square: square("a7"),
        };
        let m = Move::builder(pawn, square("d7"), square("d8"))
            .borrows(loan)
            .promotes(Role::Queen)
            .build();
        assert!(!m.is_pawn_knight_apex());
        assert_eq!(m.to_string(), "~Rd7-d8=Q");
    }

    #[test]
    fn castling_renders_in_long_and_short_form() {
        let king = Piece::new(Role::King, Color::White);
        let short = Move::builder(king, square("e1"), square("g1"))
            .castling()
            .build();
        let long = Move::builder(king, square("e1"), square("c1"))
            .castling()
            .build();
        assert_eq!(short.to_string(), "O-O");
        assert_eq!(long.to_string(), "O-O-O");
    }

    #[proptest]
    fn apex_requires_a_knight_loan(
        whence: Square,
        #[filter(#loan.role != Role::Knight)] loan: Loan,
        c: Color,
    ) {
        let pawn = Piece::new(Role::Pawn, c);
        let whither = Square::new(whence.file, c.promotion_rank());
        let m = Move::builder(pawn, whence, whither)
            .borrows(loan)
            .promotes(Role::Queen)
            .build();
        assert!(!m.is_pawn_knight_apex());
    }

    #[test]
    fn en_passant_records_the_bypassing_pawn() {
        let pawn = Piece::new(Role::Pawn, Color::White);
        let victim = Piece {
            has_moved: true,
            ..Piece::new(Role::Pawn, Color::Black)
        };
        let m = Move::builder(pawn, square("e5"), square("d6"))
            .captures(victim)
            .en_passant()
            .build();
        assert!(m.is_en_passant());
        assert_eq!(m.captured(), Some(victim));
        assert_eq!(m.to_string(), "e5xd6");
    }

    #[test]
    fn promotion_rank_is_color_relative() {
        let pawn = Piece::new(Role::Pawn, Color::Black);
        assert!(square("e1").is_promotion_rank(Color::Black));
        assert_eq!(square("e1").rank, Rank::First);
        let m = Move::builder(pawn, square("e2"), square("e1"))
            .promotes(Role::Knight)
            .build();
        assert_eq!(m.to_string(), "e2-e1=N");
    }
}

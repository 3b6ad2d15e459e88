use crate::{Color, Role};
use derive_more::Display;

/// A chess piece occupying a board cell.
///
/// The piece's position lives on the grid, never on the piece. `has_moved`
/// transitions false to true on the piece's first displacement and only
/// castling eligibility reads it.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", "self.figurine()")]
pub struct Piece {
    pub role: Role,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Constructs a [`Piece`] that has not moved yet.
    pub fn new(role: Role, color: Color) -> Self {
        Piece {
            role,
            color,
            has_moved: false,
        }
    }

    fn figurine(&self) -> &'static str {
        use Color::*;
        use Role::*;
        match (self.role, self.color) {
            (Pawn, White) => "♙",
            (Knight, White) => "♘",
            (Bishop, White) => "♗",
            (Rook, White) => "♖",
            (Queen, White) => "♕",
            (King, White) => "♔",
            (Pawn, Black) => "♟",
            (Knight, Black) => "♞",
            (Bishop, Black) => "♝",
            (Rook, Black) => "♜",
            (Queen, Black) => "♛",
            (King, Black) => "♚",
        }
    }
}

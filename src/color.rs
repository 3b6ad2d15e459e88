use crate::Rank;
use derive_more::Display;
use std::ops::Not;

/// The color of a chess piece.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    pub const VARIANTS: &'static [Color] = &[Color::White, Color::Black];

    /// The direction this color's pawns advance along the rank axis.
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank this color's major pieces start the game on.
    pub fn back_rank(&self) -> Rank {
        match self {
            Color::White => Rank::First,
            Color::Black => Rank::Eighth,
        }
    }

    /// The rank this color's pawns start the game on.
    pub fn pawn_rank(&self) -> Rank {
        match self {
            Color::White => Rank::Second,
            Color::Black => Rank::Seventh,
        }
    }

    /// The rank this color's pawns promote on.
    pub fn promotion_rank(&self) -> Rank {
        match self {
            Color::White => Rank::Eighth,
            Color::Black => Rank::First,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_has_an_opposite(c: Color) {
        assert_ne!(!c, c);
        assert_eq!(!!c, c);
    }

    #[proptest]
    fn pawns_advance_towards_the_promotion_rank(c: Color) {
        let from = c.pawn_rank().index() as i8;
        let to = c.promotion_rank().index() as i8;
        assert_eq!((to - from).signum(), c.pawn_direction());
    }

    #[proptest]
    fn back_rank_is_behind_the_pawn_rank(c: Color) {
        let back = c.back_rank().index() as i8;
        let pawns = c.pawn_rank().index() as i8;
        assert_eq!(pawns - back, c.pawn_direction());
    }
}

use crate::{Color, File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use std::str::FromStr;

/// A square of the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", "self.file", "self.rank")]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    pub fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// The square displaced by `dx` files and `dy` ranks, if it lies on the board.
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Square> {
        let file = self.file.index() as i8 + dx;
        let rank = self.rank.index() as i8 + dy;

        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }

        Some(Square {
            file: File::VARIANTS[file as usize],
            rank: Rank::VARIANTS[rank as usize],
        })
    }

    /// Whether this square lies on the rank `color`'s pawns promote on.
    pub fn is_promotion_rank(&self, color: Color) -> bool {
        self.rank == color.promotion_rank()
    }
}

/// The reason why parsing a [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "unable to parse square, {}")]
pub enum ParseSquareError {
    #[display(fmt = "invalid file")]
    InvalidFile(ParseFileError),
    #[display(fmt = "invalid rank")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (i, _) = s.char_indices().nth(1).unwrap_or((s.len(), '\0'));

        Ok(Square {
            file: s[..i].parse()?,
            rank: s[i..].parse()?,
        })
    }
}

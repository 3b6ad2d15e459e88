use crate::Color;
use derive_more::Display;

/// One entry of a [`Role`]'s native movement table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Vector {
    pub dx: i8,
    pub dy: i8,
}

const OMNI: [Vector; 8] = [
    Vector { dx: -1, dy: -1 },
    Vector { dx: -1, dy: 0 },
    Vector { dx: -1, dy: 1 },
    Vector { dx: 0, dy: -1 },
    Vector { dx: 0, dy: 1 },
    Vector { dx: 1, dy: -1 },
    Vector { dx: 1, dy: 0 },
    Vector { dx: 1, dy: 1 },
];

const ROOK: [Vector; 4] = [
    Vector { dx: 1, dy: 0 },
    Vector { dx: -1, dy: 0 },
    Vector { dx: 0, dy: 1 },
    Vector { dx: 0, dy: -1 },
];

const BISHOP: [Vector; 4] = [
    Vector { dx: 1, dy: 1 },
    Vector { dx: 1, dy: -1 },
    Vector { dx: -1, dy: 1 },
    Vector { dx: -1, dy: -1 },
];

const KNIGHT: [Vector; 8] = [
    Vector { dx: 2, dy: 1 },
    Vector { dx: 2, dy: -1 },
    Vector { dx: -2, dy: 1 },
    Vector { dx: -2, dy: -1 },
    Vector { dx: 1, dy: 2 },
    Vector { dx: 1, dy: -2 },
    Vector { dx: -1, dy: 2 },
    Vector { dx: -1, dy: -2 },
];

const WHITE_PAWN: [Vector; 1] = [Vector { dx: 0, dy: 1 }];
const BLACK_PAWN: [Vector; 1] = [Vector { dx: 0, dy: -1 }];

/// The chess piece kind.
///
/// A kind's native movement table is what its rank-mates borrow and the only
/// thing that can deliver check.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Role {
    #[display(fmt = "pawn")]
    Pawn,
    #[display(fmt = "knight")]
    Knight,
    #[display(fmt = "bishop")]
    Bishop,
    #[display(fmt = "rook")]
    Rook,
    #[display(fmt = "queen")]
    Queen,
    #[display(fmt = "king")]
    King,
}

impl Role {
    pub const VARIANTS: &'static [Role] = &[
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];

    /// The kinds a pawn may promote to, in the order the generator emits them.
    pub const PROMOTIONS: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

    /// This kind's mnemonic letter.
    pub fn symbol(&self) -> &'static str {
        match self {
            Role::Pawn => "P",
            Role::Knight => "N",
            Role::Bishop => "B",
            Role::Rook => "R",
            Role::Queen => "Q",
            Role::King => "K",
        }
    }

    /// Whether this kind repeats its movement vectors along a ray.
    pub fn is_sliding(&self) -> bool {
        matches!(self, Role::Bishop | Role::Rook | Role::Queen)
    }

    /// This kind's native movement table.
    ///
    /// The pawn's table is the single forward push for its color; pawn
    /// captures and the double push are rendered by the move generator, not
    /// encoded as vectors.
    pub fn vectors(&self, color: Color) -> &'static [Vector] {
        match (self, color) {
            (Role::Pawn, Color::White) => &WHITE_PAWN,
            (Role::Pawn, Color::Black) => &BLACK_PAWN,
            (Role::Knight, _) => &KNIGHT,
            (Role::Bishop, _) => &BISHOP,
            (Role::Rook, _) => &ROOK,
            (Role::Queen, _) => &OMNI,
            (Role::King, _) => &OMNI,
        }
    }
}

impl From<Role> for &'static str {
    fn from(r: Role) -> Self {
        match r {
            Role::Pawn => "pawn",
            Role::Knight => "knight",
            Role::Bishop => "bishop",
            Role::Rook => "rook",
            Role::Queen => "queen",
            Role::King => "king",
        }
    }
}

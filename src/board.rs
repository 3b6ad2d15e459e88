use crate::{Color, File, Move, Piece, Rank, Role, Square};
use std::fmt;
use std::ops::Index;
use tracing::debug;

/// The castling permissions of both players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct CastleRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

impl CastleRights {
    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn revoke_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    fn revoke_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    fn revoke_all(&mut self, color: Color) {
        self.revoke_kingside(color);
        self.revoke_queenside(color);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Checkpoint {
    en_passant: Option<Square>,
    rights: CastleRights,
}

/// The board and everything that travels with it.
///
/// The board performs requested mutations and maintains castle rights, the
/// en passant target and the move history; it does not decide legality.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    turn: Color,
    rights: CastleRights,
    en_passant: Option<Square>,
    history: Vec<Move>,
    checkpoints: Vec<Checkpoint>,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            squares: Default::default(),
            turn: Color::White,
            rights: CastleRights::default(),
            en_passant: None,
            history: Vec::new(),
            checkpoints: Vec::new(),
        }
    }
}

// We provide a custom implementation of Arbitrary rather than deriving,
// otherwise proptest overflows the stack generating large arrays.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::prelude::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        (vec![any::<Option<Piece>>(); 64], any::<Color>())
            .prop_map(|(cells, turn)| {
                let mut board = Board::default();
                board.turn = turn;
                board
                    .squares
                    .iter_mut()
                    .flatten()
                    .zip(cells)
                    .for_each(|(cell, piece)| *cell = piece);
                board
            })
            .boxed()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, s: Square) -> &Self::Output {
        &self.squares[s.rank.index() as usize][s.file.index() as usize]
    }
}

impl Board {
    /// An empty board, white to move.
    pub fn empty() -> Self {
        Board::default()
    }

    /// A board holding the standard starting array.
    pub fn standard() -> Self {
        let mut board = Board::default();
        board.setup_standard();
        board
    }

    /// Resets to the standard starting array with all flags cleared.
    pub fn setup_standard(&mut self) {
        use Role::*;
        const BACK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        *self = Board::default();

        for (&file, &role) in File::VARIANTS.iter().zip(BACK.iter()) {
            self.place(Square::new(file, Rank::First), Piece::new(role, Color::White));
            self.place(Square::new(file, Rank::Eighth), Piece::new(role, Color::Black));
        }

        for &file in File::VARIANTS {
            self.place(Square::new(file, Rank::Second), Piece::new(Pawn, Color::White));
            self.place(Square::new(file, Rank::Seventh), Piece::new(Pawn, Color::Black));
        }
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Hands the turn to `color` without playing a move.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    /// The square a pawn may capture onto en passant, if any.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.rights
    }

    /// Every move applied so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn piece_at(&self, s: Square) -> Option<Piece> {
        self[s]
    }

    /// A copy of the grid, for display.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        self.squares
    }

    /// Puts `piece` on `s`, replacing whatever was there.
    pub fn place(&mut self, s: Square, piece: Piece) {
        self.set(s, Some(piece));
    }

    /// Takes the piece off `s`, if any.
    pub fn remove(&mut self, s: Square) -> Option<Piece> {
        let piece = self[s];
        self.set(s, None);
        piece
    }

    fn set(&mut self, s: Square, piece: Option<Piece>) {
        self.squares[s.rank.index() as usize][s.file.index() as usize] = piece;
    }

    /// An iterator over all occupied squares.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Rank::VARIANTS.iter().flat_map(move |&rank| {
            File::VARIANTS.iter().filter_map(move |&file| {
                let s = Square::new(file, rank);
                self[s].map(|p| (s, p))
            })
        })
    }

    /// Where `color`'s king stands, if it is on the board.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|(_, p)| p.role == Role::King && p.color == color)
            .map(|(s, _)| s)
    }

    /// The friendly pieces entangled with the piece on `s`.
    ///
    /// Rank-mates are re-derived from the current position on every call;
    /// a piece that changes rank forgets its former mates by construction.
    pub fn rank_mates(&self, s: Square) -> Vec<(Square, Piece)> {
        let Some(piece) = self[s] else {
            return Vec::new();
        };

        File::VARIANTS
            .iter()
            .filter_map(|&file| {
                let sq = Square::new(file, s.rank);
                if sq == s {
                    return None;
                }
                self[sq].filter(|p| p.color == piece.color).map(|p| (sq, p))
            })
            .collect()
    }

    /// Executes `m`, updating castle rights, the en passant target, the
    /// history and the side to move.
    pub fn apply(&mut self, m: &Move) {
        self.checkpoints.push(Checkpoint {
            en_passant: self.en_passant,
            rights: self.rights,
        });

        let mover = m.mover();
        let (from, to) = (m.whence(), m.whither());

        self.en_passant = None;
        if mover.role == Role::Pawn {
            let advance = to.rank.index() as i8 - from.rank.index() as i8;
            if advance.abs() == 2 {
                let transit = Rank::VARIANTS[((from.rank.index() + to.rank.index()) / 2) as usize];
                self.en_passant = Some(Square::new(from.file, transit));
            }
        }

        if m.is_en_passant() {
            self.set(Square::new(to.file, from.rank), None);
        }

        if m.is_castling() {
            let (rook_home, rook_dest) = Self::castling_rook_files(from, to);
            debug_assert!(
                matches!(self[Square::new(rook_home, from.rank)], Some(p) if p.role == Role::Rook)
            );
            if let Some(rook) = self.remove(Square::new(rook_home, from.rank)) {
                self.place(
                    Square::new(rook_dest, from.rank),
                    Piece {
                        has_moved: true,
                        ..rook
                    },
                );
            }
        }

        self.set(from, None);
        let placed = match m.promotion() {
            Some(role) => Piece {
                role,
                color: mover.color,
                has_moved: true,
            },
            None => Piece {
                has_moved: true,
                ..mover
            },
        };
        self.set(to, Some(placed));

        if mover.role == Role::King {
            self.rights.revoke_all(mover.color);
        }
        self.revoke_for(from);
        self.revoke_for(to);

        debug!(%m, "applied");
        self.history.push(*m);
        self.turn = !self.turn;
    }

    /// Reverts the most recent [`apply`](Board::apply), restoring the grid,
    /// castle rights, the en passant target and all `has_moved` flags.
    pub fn undo(&mut self) -> Option<Move> {
        let m = self.history.pop()?;
        let checkpoint = self.checkpoints.pop()?;

        self.turn = !self.turn;

        let (from, to) = (m.whence(), m.whither());

        self.set(to, None);
        self.set(from, Some(m.mover()));

        if m.is_en_passant() {
            self.set(Square::new(to.file, from.rank), m.captured());
        } else if m.captured().is_some() {
            self.set(to, m.captured());
        }

        if m.is_castling() {
            let (rook_home, rook_dest) = Self::castling_rook_files(from, to);
            if let Some(rook) = self.remove(Square::new(rook_dest, from.rank)) {
                self.place(
                    Square::new(rook_home, from.rank),
                    Piece {
                        has_moved: false,
                        ..rook
                    },
                );
            }
        }

        self.en_passant = checkpoint.en_passant;
        self.rights = checkpoint.rights;

        Some(m)
    }

    fn castling_rook_files(from: Square, to: Square) -> (File, File) {
        if to.file > from.file {
            (File::H, File::F)
        } else {
            (File::A, File::D)
        }
    }

    fn revoke_for(&mut self, s: Square) {
        match (s.file, s.rank) {
            (File::A, Rank::First) => self.rights.revoke_queenside(Color::White),
            (File::H, Rank::First) => self.rights.revoke_kingside(Color::White),
            (File::A, Rank::Eighth) => self.rights.revoke_queenside(Color::Black),
            (File::H, Rank::Eighth) => self.rights.revoke_kingside(Color::Black),
            _ => {}
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for &file in File::VARIANTS {
            write!(f, "  {} ", file)?;
        }
        writeln!(f)?;

        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        for (&rank, row) in Rank::VARIANTS.iter().zip(&self.squares).rev() {
            write!(f, " {} |", rank)?;
            for piece in row {
                match piece {
                    Some(piece) => write!(f, " {} |", piece)?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "   ")?;
        for &file in File::VARIANTS {
            write!(f, "  {} ", file)?;
        }
        writeln!(f)?;

        write!(f, " {} to move", self.turn)
    }
}

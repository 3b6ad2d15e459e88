use crate::{
    attacks, movegen, Board, Color, GameState, Move, ParsePromotionError, ParseSquareError,
    Promotion, Role, Square,
};
use derive_more::{Display, Error, From};
use std::fmt::Write;
use tracing::{info, instrument};

/// The reason why parsing a move request failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "unable to parse move, {}")]
pub enum ParseMoveError {
    #[display(fmt = "invalid source square")]
    #[from(ignore)]
    InvalidFromSquare(ParseSquareError),

    #[display(fmt = "invalid destination square")]
    #[from(ignore)]
    InvalidToSquare(ParseSquareError),

    #[display(fmt = "invalid promotion")]
    InvalidPromotion(ParsePromotionError),
}

/// The reason why a requested move was rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum MoveError {
    #[display(fmt = "the game is over, {}", _0)]
    GameOver(#[error(not(source))] GameState),

    #[display(fmt = "there is no piece on {}", _0)]
    EmptySource(#[error(not(source))] Square),

    #[display(fmt = "it is the {} player's turn", _0)]
    WrongColorToMove(#[error(not(source))] Color),

    #[display(fmt = "no legal move goes from {} to {}", _0, _1)]
    IllegalMove(Square, Square),

    #[display(fmt = "castling is not legal here")]
    IllegalCastling,

    #[display(fmt = "{}", _0)]
    InvalidNotation(ParseMoveError),
}

/// The outcome of a single move request.
///
/// Rejections are carried as values; the board is left untouched whenever
/// `ok` is false.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveResult {
    pub ok: bool,
    pub message: String,
    pub played: Option<Move>,
    pub gives_check: bool,
    pub is_checkmate: bool,
}

impl MoveResult {
    fn rejected(e: MoveError) -> Self {
        MoveResult {
            ok: false,
            message: e.to_string(),
            played: None,
            gives_check: false,
            is_checkmate: false,
        }
    }
}

/// A game of Tether Chess.
///
/// The engine owns the board, applies validated moves and tracks the
/// terminal state. It is synchronous and self-contained; hosts running
/// multiple games hold one engine per game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Engine {
    board: Board,
    state: GameState,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new_game()
    }
}

impl Engine {
    /// A fresh game from the standard starting position.
    pub fn new_game() -> Self {
        Engine {
            board: Board::standard(),
            state: GameState::Ongoing,
        }
    }

    /// Adopts an arbitrary board, deriving the game state from it.
    pub fn with_board(board: Board) -> Self {
        let mut engine = Engine {
            board,
            state: GameState::Ongoing,
        };
        engine.state = engine.classify();
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// All legal moves for the side to move, empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_over() {
            return Vec::new();
        }
        movegen::legal_moves(&self.board)
    }

    /// All legal moves for the piece on `s`.
    pub fn legal_moves_from(&self, s: Square) -> Vec<Move> {
        if self.state.is_over() {
            return Vec::new();
        }
        movegen::legal_moves_from(&self.board, s)
    }

    /// The squares of the pieces entangled with the piece on `s`.
    pub fn rank_mates_of(&self, s: Square) -> Vec<Square> {
        self.board.rank_mates(s).into_iter().map(|(sq, _)| sq).collect()
    }

    /// Plays the move from `from` to `to`.
    ///
    /// When the matching move is a promotion and `promotion` is `None` the
    /// engine promotes to a queen; this is the documented default.
    #[instrument(level = "debug", skip(self))]
    pub fn play(&mut self, from: Square, to: Square, promotion: Option<Role>) -> MoveResult {
        match self.resolve(from, to, promotion) {
            Ok(m) => self.execute(m),
            Err(e) => MoveResult::rejected(e),
        }
    }

    /// Plays a move given in minimal text form.
    ///
    /// Accepts `e2e4`, `e2-e4`, `e7e8=q`, `e7-e8q` and the castling forms
    /// `O-O` / `O-O-O` (also with zeros). Richer algebraic notation is out
    /// of scope.
    pub fn play_text(&mut self, request: &str) -> MoveResult {
        let request = request.trim();

        let kingside = match request {
            "O-O" | "0-0" => Some(true),
            "O-O-O" | "0-0-0" => Some(false),
            _ => None,
        };

        if let Some(kingside) = kingside {
            if self.state.is_over() {
                return MoveResult::rejected(MoveError::GameOver(self.state));
            }

            return match self
                .legal_moves()
                .into_iter()
                .find(|m| m.is_castling() && (m.whither().file > m.whence().file) == kingside)
            {
                Some(m) => self.execute(m),
                None => MoveResult::rejected(MoveError::IllegalCastling),
            };
        }

        match parse_request(request) {
            Ok((from, to, promotion)) => self.play(from, to, promotion),
            Err(e) => MoveResult::rejected(e.into()),
        }
    }

    /// The legal moves that borrow a rank-mate's movement.
    pub fn transporter_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.is_transporter())
            .collect()
    }

    /// The legal moves promoting a pawn mid knight-jump.
    pub fn pawn_knight_apex_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.is_pawn_knight_apex())
            .collect()
    }

    /// The legal moves whose resulting position natively checks the enemy
    /// king.
    pub fn checking_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| {
                let mut next = self.board.clone();
                next.apply(m);
                let mover = m.mover().color;
                next.king(!mover)
                    .map_or(false, |k| attacks::is_native_attack(&next, k, mover))
            })
            .collect()
    }

    /// The opening jumps named after Michael Tal: a back-rank queen or rook
    /// vaulting the pawn wall on a back-rank knight's vector, available only
    /// before the first move has been played.
    pub fn michael_tal_moves(&self) -> Vec<Move> {
        if !self.board.history().is_empty() {
            return Vec::new();
        }

        let back = self.board.turn().back_rank();

        self.transporter_moves()
            .into_iter()
            .filter(|m| {
                matches!(m.mover().role, Role::Queen | Role::Rook)
                    && m.whence().rank == back
                    && matches!(
                        m.borrowed_from(),
                        Some(l) if l.role == Role::Knight && l.square.rank == back
                    )
            })
            .collect()
    }

    fn resolve(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver(self.state));
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveError::EmptySource(from))?;

        if piece.color != self.board.turn() {
            return Err(MoveError::WrongColorToMove(self.board.turn()));
        }

        movegen::legal_moves_from(&self.board, from)
            .into_iter()
            .find(|m| {
                m.whither() == to
                    && match (promotion, m.promotion()) {
                        (Some(requested), Some(offered)) => requested == offered,
                        (None, Some(offered)) => offered == Role::Queen,
                        (Some(_), None) => false,
                        (None, None) => true,
                    }
            })
            .ok_or(MoveError::IllegalMove(from, to))
    }

    fn execute(&mut self, m: Move) -> MoveResult {
        self.board.apply(&m);

        let mover = m.mover().color;
        let gives_check = self
            .board
            .king(!mover)
            .map_or(false, |k| attacks::is_native_attack(&self.board, k, mover));

        let replies = movegen::legal_moves(&self.board);
        let is_checkmate = gives_check && replies.is_empty();
        let is_stalemate = !gives_check && replies.is_empty();

        if is_checkmate {
            self.state = match mover {
                Color::White => GameState::WhiteWinsCheckmate,
                Color::Black => GameState::BlackWinsCheckmate,
            };
        } else if is_stalemate {
            self.state = GameState::Stalemate;
        }

        let mut message = m.to_string();
        if is_checkmate {
            message.push('#');
        } else if gives_check {
            message.push('+');
        }

        if let Some(loan) = m.borrowed_from() {
            let _ = write!(message, " (borrowed the {} on {})", loan.role, loan.square);
        }

        if m.is_pawn_knight_apex() {
            message.push_str(" [pawn-knight apex]");
        }

        if self.state.is_over() {
            let _ = write!(message, " {}", self.state);
        }

        info!(%m, state = %self.state, "played");

        MoveResult {
            ok: true,
            message,
            played: Some(m),
            gives_check,
            is_checkmate,
        }
    }

    fn classify(&self) -> GameState {
        if !movegen::legal_moves(&self.board).is_empty() {
            return GameState::Ongoing;
        }

        let turn = self.board.turn();
        let in_check = self
            .board
            .king(turn)
            .map_or(false, |k| attacks::is_native_attack(&self.board, k, !turn));

        match (in_check, turn) {
            (true, Color::White) => GameState::BlackWinsCheckmate,
            (true, Color::Black) => GameState::WhiteWinsCheckmate,
            (false, _) => GameState::Stalemate,
        }
    }
}

fn parse_request(request: &str) -> Result<(Square, Square, Option<Role>), ParseMoveError> {
    use ParseMoveError::*;

    let stripped = request.replace(['-', 'x'], "");

    let i = stripped
        .char_indices()
        .nth(2)
        .map_or_else(|| stripped.len(), |(i, _)| i);
    let j = stripped
        .char_indices()
        .nth(4)
        .map_or_else(|| stripped.len(), |(i, _)| i);

    let from = stripped[..i].parse().map_err(InvalidFromSquare)?;
    let to = stripped[i..j].parse().map_err(InvalidToSquare)?;

    let promotion = stripped[j..]
        .trim_start_matches('=')
        .to_ascii_lowercase()
        .parse::<Promotion>()?;

    Ok((from, to, promotion.into()))
}

use crate::Color;
use derive_more::Display;

/// The state a game is in.
///
/// The three draw states are reserved enumerants: the engine never produces
/// them because repetition, the fifty move rule and insufficient material
/// are not tracked.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum GameState {
    #[display(fmt = "ongoing")]
    Ongoing,

    #[display(fmt = "white wins by checkmate")]
    WhiteWinsCheckmate,

    #[display(fmt = "black wins by checkmate")]
    BlackWinsCheckmate,

    #[display(fmt = "stalemate")]
    Stalemate,

    #[display(fmt = "draw by repetition")]
    DrawByRepetition,

    #[display(fmt = "draw by the fifty move rule")]
    DrawByFiftyMoves,

    #[display(fmt = "draw by insufficient material")]
    DrawByInsufficientMaterial,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Ongoing)
    }

    /// The winning side, if the game ended decisively.
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameState::WhiteWinsCheckmate => Some(Color::White),
            GameState::BlackWinsCheckmate => Some(Color::Black),
            _ => None,
        }
    }
}

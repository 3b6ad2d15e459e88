use crate::Role;
use derive_more::{Display, Error, From};
use std::str::FromStr;

/// A promotion specifier.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
    #[display(fmt = "")]
    None,
}

/// The reason why parsing a [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(
    fmt = "unable to parse promotion from `{}`; expected either one of four characters `[{}{}{}{}]` or the empty string",
    _0,
    Promotion::Knight,
    Promotion::Bishop,
    Promotion::Rook,
    Promotion::Queen
)]
#[from(forward)]
pub struct ParsePromotionError(#[error(not(source))] pub String);

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            "" => Ok(Promotion::None),
            _ => Err(s.into()),
        }
    }
}

impl From<Promotion> for Option<Role> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Some(Role::Knight),
            Promotion::Bishop => Some(Role::Bishop),
            Promotion::Rook => Some(Role::Rook),
            Promotion::Queen => Some(Role::Queen),
            Promotion::None => None,
        }
    }
}

impl From<Option<Role>> for Promotion {
    fn from(r: Option<Role>) -> Self {
        match r {
            Some(Role::Knight) => Promotion::Knight,
            Some(Role::Bishop) => Promotion::Bishop,
            Some(Role::Rook) => Promotion::Rook,
            Some(Role::Queen) => Promotion::Queen,
            _ => Promotion::None,
        }
    }
}

use derive_more::{Display, Error};
use std::str::FromStr;

/// A column of the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum File {
    #[display(fmt = "a")]
    A,
    #[display(fmt = "b")]
    B,
    #[display(fmt = "c")]
    C,
    #[display(fmt = "d")]
    D,
    #[display(fmt = "e")]
    E,
    #[display(fmt = "f")]
    F,
    #[display(fmt = "g")]
    G,
    #[display(fmt = "h")]
    H,
}

impl File {
    pub const VARIANTS: &'static [File] = &[
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// This file's index in the range (0..8), a = 0.
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

/// The reason why parsing a [`File`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(
    fmt = "unable to parse file, expected a single letter in the range [{}-{}]",
    "File::A",
    "File::H"
)]
pub struct ParseFileError;

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(File::A),
            "b" => Ok(File::B),
            "c" => Ok(File::C),
            "d" => Ok(File::D),
            "e" => Ok(File::E),
            "f" => Ok(File::F),
            "g" => Ok(File::G),
            "h" => Ok(File::H),
            _ => Err(ParseFileError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_file_is_an_identity(f: File) {
        assert_eq!(f.to_string().parse(), Ok(f));
    }

    #[proptest]
    fn parsing_file_fails_except_for_single_letters_between_a_and_h(#[strategy("[^a-h]*")] s: String) {
        assert_eq!(s.parse::<File>(), Err(ParseFileError));
    }

    #[proptest]
    fn file_has_an_index(f: File) {
        assert_eq!(File::VARIANTS[f.index() as usize], f);
    }

    #[proptest]
    fn files_are_ordered_by_index(a: File, b: File) {
        assert_eq!(a < b, a.index() < b.index());
    }
}

//! The closed set of words a learner can pick from.
//!
//! Phrase generation and answer checking both go through [`Token`], so a word
//! that is not listed here can never be generated nor accepted.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Token {
    Ett,
    To,
    Tre,
    Fire,
    Fem,
    Seks,
    Sju,
    #[strum(serialize = "åtte")]
    Atte,
    Ni,
    Ti,
    Elleve,
    Tolv,
    Kvart,
    Tjue,
    Over,
    #[strum(serialize = "på")]
    Pa,
    Halv,
}

/// Word bank sections, in the order they are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum WordGroup {
    #[strum(serialize = "Ord")]
    Words,
    #[strum(serialize = "Tall / Timer")]
    Numbers,
}

const HOURS: [Token; 12] = [
    Token::Ett,
    Token::To,
    Token::Tre,
    Token::Fire,
    Token::Fem,
    Token::Seks,
    Token::Sju,
    Token::Atte,
    Token::Ni,
    Token::Ti,
    Token::Elleve,
    Token::Tolv,
];

impl Token {
    pub const ALL: [Token; 17] = [
        Token::Ett,
        Token::To,
        Token::Tre,
        Token::Fire,
        Token::Fem,
        Token::Seks,
        Token::Sju,
        Token::Atte,
        Token::Ni,
        Token::Ti,
        Token::Elleve,
        Token::Tolv,
        Token::Kvart,
        Token::Tjue,
        Token::Over,
        Token::Pa,
        Token::Halv,
    ];

    /// Cardinal name of an hour on a 12-hour dial
    pub fn hour(hour: u8) -> Option<Token> {
        match hour {
            1..=12 => Some(HOURS[hour as usize - 1]),
            _ => None,
        }
    }

    /// Word for a minute offset. A quarter is "kvart", never "femten".
    pub fn quantity(minutes: u8) -> Option<Token> {
        match minutes {
            5 => Some(Token::Fem),
            10 => Some(Token::Ti),
            15 => Some(Token::Kvart),
            20 => Some(Token::Tjue),
            _ => None,
        }
    }

    pub fn group(self) -> WordGroup {
        match self {
            Token::Over | Token::Pa | Token::Kvart | Token::Halv | Token::Tjue => WordGroup::Words,
            _ => WordGroup::Numbers,
        }
    }
}

impl WordGroup {
    pub const ALL: [WordGroup; 2] = [WordGroup::Words, WordGroup::Numbers];

    pub fn tokens(self) -> Vec<Token> {
        match self {
            // connectives first, the way the word bank reads left to right
            WordGroup::Words => vec![
                Token::Over,
                Token::Pa,
                Token::Kvart,
                Token::Halv,
                Token::Tjue,
            ],
            WordGroup::Numbers => HOURS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWord(pub String);

impl std::fmt::Display for UnknownWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} is not a clock word", self.0)
    }
}

impl std::error::Error for UnknownWord {}

impl FromStr for Token {
    type Err = UnknownWord;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::ALL
            .into_iter()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| UnknownWord(s.to_string()))
    }
}

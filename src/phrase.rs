//! Time to phrase conversion.
//!
//! The minute hand decides the shape of the phrase. Up to a quarter past the
//! hour is counted forward from the hour, twenty to twenty-five past is
//! counted back from the coming half ("ti på halv ni" at 8:20), up to forty
//! is counted forward from the half, and the rest back from the next hour.

use std::fmt;
use std::ops::Range;

use itertools::Itertools;

use crate::clock::ClockTime;
use crate::error::{Error, Result};
use crate::vocabulary::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// "åtte"
    OnTheHour,
    /// "ti over åtte"
    PastHour,
    /// "fem på halv ni"
    ToHalf,
    /// "halv ni"
    Half,
    /// "fem over halv ni"
    PastHalf,
    /// "kvart på ni"
    ToNextHour,
}

#[derive(Debug, Clone)]
pub struct MinuteRule {
    pub minutes: Range<u8>,
    pub shape: Shape,
}

/// Ordered, non-overlapping, covering 0..60
pub const RULES: [MinuteRule; 7] = [
    MinuteRule {
        minutes: 0..1,
        shape: Shape::OnTheHour,
    },
    MinuteRule {
        minutes: 1..20,
        shape: Shape::PastHour,
    },
    // twenty past is "ti på halv", never "tjue over"
    MinuteRule {
        minutes: 20..21,
        shape: Shape::ToHalf,
    },
    MinuteRule {
        minutes: 21..30,
        shape: Shape::ToHalf,
    },
    MinuteRule {
        minutes: 30..31,
        shape: Shape::Half,
    },
    MinuteRule {
        minutes: 31..41,
        shape: Shape::PastHalf,
    },
    MinuteRule {
        minutes: 41..60,
        shape: Shape::ToNextHour,
    },
];

pub fn shape_for(minute: u8) -> Option<Shape> {
    RULES
        .iter()
        .find(|rule| rule.minutes.contains(&minute))
        .map(|rule| rule.shape)
}

/// The words of a time, in speaking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase(Vec<Token>);

impl Phrase {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Token> {
        self.0.get(idx).copied()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

pub fn generate_phrase(hour: u8, minute: u8) -> Result<Phrase> {
    phrase_for(ClockTime::new(hour, minute)?)
}

pub fn phrase_for(time: ClockTime) -> Result<Phrase> {
    let invalid = || Error::InvalidTime {
        hour: time.hour(),
        minute: time.minute(),
    };
    let minute = time.minute();
    let hour = Token::hour(time.hour()).ok_or_else(invalid)?;
    let next = Token::hour(time.next_hour()).ok_or_else(invalid)?;
    let quantity = |offset: u8| Token::quantity(offset).ok_or_else(invalid);

    let words = match shape_for(minute).ok_or_else(invalid)? {
        Shape::OnTheHour => vec![hour],
        Shape::PastHour => vec![quantity(minute)?, Token::Over, hour],
        Shape::ToHalf => vec![quantity(30 - minute)?, Token::Pa, Token::Halv, next],
        Shape::Half => vec![Token::Halv, next],
        Shape::PastHalf => vec![quantity(minute - 30)?, Token::Over, Token::Halv, next],
        Shape::ToNextHour => vec![quantity(60 - minute)?, Token::Pa, next],
    };

    Ok(Phrase(words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn words(hour: u8, minute: u8) -> Vec<String> {
        generate_phrase(hour, minute)
            .unwrap()
            .tokens()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_on_the_hour() {
        assert_eq!(words(8, 0), vec!["åtte"]);
        assert_eq!(words(12, 0), vec!["tolv"]);
    }

    #[test]
    fn test_past_the_hour() {
        assert_eq!(words(8, 5), vec!["fem", "over", "åtte"]);
        assert_eq!(words(10, 10), vec!["ti", "over", "ti"]);
        assert_eq!(words(8, 15), vec!["kvart", "over", "åtte"]);
    }

    #[test]
    fn test_twenty_past_counts_from_the_half() {
        assert_eq!(words(8, 20), vec!["ti", "på", "halv", "ni"]);
        assert!(!words(8, 20).contains(&"tjue".to_string()));
    }

    #[test]
    fn test_to_and_past_the_half() {
        assert_eq!(words(8, 25), vec!["fem", "på", "halv", "ni"]);
        assert_eq!(words(8, 30), vec!["halv", "ni"]);
        assert_eq!(words(8, 35), vec!["fem", "over", "halv", "ni"]);
        assert_eq!(words(8, 40), vec!["ti", "over", "halv", "ni"]);
    }

    #[test]
    fn test_to_the_next_hour() {
        assert_eq!(words(8, 45), vec!["kvart", "på", "ni"]);
        assert_eq!(words(8, 50), vec!["ti", "på", "ni"]);
        assert_eq!(words(8, 55), vec!["fem", "på", "ni"]);
    }

    #[test]
    fn test_next_hour_wraps_at_twelve() {
        assert_eq!(words(12, 45), vec!["kvart", "på", "ett"]);
        assert_eq!(words(12, 30), vec!["halv", "ett"]);
        assert_eq!(words(12, 15), vec!["kvart", "over", "tolv"]);
    }

    #[test]
    fn test_invalid_input() {
        assert_matches!(generate_phrase(0, 0), Err(Error::InvalidTime { .. }));
        assert_matches!(generate_phrase(13, 0), Err(Error::InvalidTime { .. }));
        assert_matches!(generate_phrase(8, 3), Err(Error::InvalidTime { .. }));
        assert_matches!(
            generate_phrase(8, 60),
            Err(Error::InvalidTime { hour: 8, minute: 60 })
        );
    }

    #[test]
    fn test_rules_cover_the_hour_without_gaps() {
        let mut expected_start = 0;
        for rule in RULES.iter() {
            assert_eq!(rule.minutes.start, expected_start);
            assert!(rule.minutes.end > rule.minutes.start);
            expected_start = rule.minutes.end;
        }
        assert_eq!(expected_start, 60);
    }

    #[test]
    fn test_shape_for() {
        assert_eq!(shape_for(0), Some(Shape::OnTheHour));
        assert_eq!(shape_for(15), Some(Shape::PastHour));
        assert_eq!(shape_for(20), Some(Shape::ToHalf));
        assert_eq!(shape_for(30), Some(Shape::Half));
        assert_eq!(shape_for(40), Some(Shape::PastHalf));
        assert_eq!(shape_for(45), Some(Shape::ToNextHour));
        assert_eq!(shape_for(60), None);
    }

    #[test]
    fn test_display_joins_with_spaces() {
        assert_eq!(generate_phrase(8, 20).unwrap().to_string(), "ti på halv ni");
        assert_eq!(generate_phrase(3, 0).unwrap().to_string(), "tre");
    }
}

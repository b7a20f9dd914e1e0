//! Query validation: ordered checks that gate search execution.

use std::fmt;

use crate::query::lexicon;
use crate::query::SearchType;

/// Shortest query worth searching for, in characters.
pub const MIN_QUERY_LEN: usize = 2;
/// Longest query the backend accepts, in characters.
pub const MAX_QUERY_LEN: usize = 50;

/// Why a query was rejected. The display string is what the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    TooShort,
    TooLong,
    InvalidCharacters,
    MeaninglessTerms,
    NoMeaningfulTerms,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvalidReason::TooShort => "too short",
            InvalidReason::TooLong => "too long",
            InvalidReason::InvalidCharacters => "invalid characters",
            InvalidReason::MeaninglessTerms => "meaningless search terms",
            InvalidReason::NoMeaningfulTerms => "no meaningful search terms",
        };
        f.write_str(message)
    }
}

/// Outcome of validating a raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid { search_type: SearchType },
    Invalid { reason: InvalidReason },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid { .. })
    }

    pub fn search_type(&self) -> Option<SearchType> {
        match self {
            Validation::Valid { search_type } => Some(*search_type),
            Validation::Invalid { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Validation::Valid { .. } => None,
            Validation::Invalid { reason } => Some(*reason),
        }
    }
}

/// Validate a raw query. Checks run in a fixed order and the first failure
/// wins; a recognised price, room-type, or location pattern short-circuits
/// the stop-word scan entirely.
pub fn validate(query: &str) -> Validation {
    let trimmed = query.trim();
    let char_count = trimmed.chars().count();
    if char_count < MIN_QUERY_LEN {
        return Validation::Invalid {
            reason: InvalidReason::TooShort,
        };
    }
    if char_count > MAX_QUERY_LEN {
        return Validation::Invalid {
            reason: InvalidReason::TooLong,
        };
    }
    if !lexicon::charset_allowed(trimmed) {
        return Validation::Invalid {
            reason: InvalidReason::InvalidCharacters,
        };
    }

    let normalized = trimmed.to_lowercase();
    if let Some(search_type) = detect_signal(&normalized) {
        return Validation::Valid { search_type };
    }

    // No recognised pattern: the query must keep at least one word that is
    // longer than one character and not a stop word.
    let words: Vec<&str> = normalized
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .collect();
    if words.is_empty() {
        return Validation::Invalid {
            reason: InvalidReason::NoMeaningfulTerms,
        };
    }
    if words.iter().all(|word| lexicon::is_stop_word(word)) {
        return Validation::Invalid {
            reason: InvalidReason::MeaninglessTerms,
        };
    }

    Validation::Valid {
        search_type: SearchType::General,
    }
}

/// Look for a price, room-type, or location signal, in precedence order.
pub(crate) fn detect_signal(normalized: &str) -> Option<SearchType> {
    if lexicon::detect_price(normalized).is_some() {
        return Some(SearchType::Price);
    }
    if lexicon::match_room_type(normalized).is_some() {
        return Some(SearchType::RoomType);
    }
    if lexicon::mentions_location(normalized) {
        return Some(SearchType::Location);
    }
    None
}

//! Search-query analysis: validation, classification, and the vocabulary
//! both lean on.
//!
//! [`validate`] decides whether a query is worth searching for at all;
//! [`classify`] turns an accepted query into a [`SearchAnalysis`] that the
//! filter and the search logger consume. Both apply the same precedence:
//! price evidence beats room-type evidence beats location evidence.

pub mod lexicon;

mod classify;
mod validate;

pub use classify::{classify, SearchAnalysis};
pub use validate::{validate, InvalidReason, Validation, MAX_QUERY_LEN, MIN_QUERY_LEN};

use std::fmt;

/// The dominant intent of a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Price,
    RoomType,
    Location,
    General,
}

impl SearchType {
    /// Wire name, as the analytics backend expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Price => "price",
            SearchType::RoomType => "room_type",
            SearchType::Location => "location",
            SearchType::General => "general",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

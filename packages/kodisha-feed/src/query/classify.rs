//! Query classification: turn a validated query into a structured analysis.

use chrono::{DateTime, Utc};
use kodisha_api::SearchRecord;

use crate::query::lexicon;
use crate::query::validate::{validate, Validation};
use crate::query::SearchType;

/// Everything the analyzer extracted from one query. Fields beyond
/// `search_type` are filled independently, so a price search through a named
/// area still records `is_location_search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchAnalysis {
    pub raw_query: String,
    pub normalized_query: String,
    pub search_type: SearchType,
    pub detected_price: Option<f64>,
    pub detected_room_type: Option<String>,
    pub is_location_search: bool,
}

impl SearchAnalysis {
    /// Shape the analysis into the wire record the backend stores.
    pub fn to_record(&self, timestamp: DateTime<Utc>) -> SearchRecord {
        SearchRecord {
            raw_query: self.raw_query.clone(),
            normalized_query: self.normalized_query.clone(),
            search_type: self.search_type.as_str().to_string(),
            detected_price: self.detected_price,
            detected_room_type: self.detected_room_type.clone(),
            is_location_search: self.is_location_search,
            timestamp,
        }
    }
}

/// Classify a raw query, or `None` when validation rejects it.
pub fn classify(query: &str) -> Option<SearchAnalysis> {
    let search_type = match validate(query) {
        Validation::Valid { search_type } => search_type,
        Validation::Invalid { .. } => return None,
    };

    let normalized = query.trim().to_lowercase();
    Some(SearchAnalysis {
        raw_query: query.to_string(),
        search_type,
        detected_price: lexicon::detect_price(&normalized),
        detected_room_type: lexicon::match_room_type(&normalized).map(str::to_string),
        is_location_search: lexicon::mentions_location(&normalized),
        normalized_query: normalized,
    })
}

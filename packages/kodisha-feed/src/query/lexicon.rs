//! Vocabulary tables and patterns behind query analysis.
//!
//! Room types, area names, and price spellings reflect the Tanzanian
//! rental market the backend serves (monthly rents in TZS, Dar es Salaam
//! neighbourhoods, Swahili filler words alongside English ones).

use lazy_static::lazy_static;
use regex::Regex;

/// Canonical room types, as stored on listings and shown in the selector.
pub const ROOM_TYPES: &[&str] = &[
    "Single Room",
    "Double Room",
    "Master Room",
    "Self Contained",
    "Bedsitter",
    "One Bedroom",
    "Two Bedroom",
    "Three Bedroom",
    "Apartment",
    "Studio",
];

/// Variant spellings that map to a canonical room type. Checked before the
/// canonical list itself; first match wins. Canonical names match by the
/// substring scan in [`match_room_type`], so only variants live here.
pub(crate) const ROOM_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("bed sitter", "Bedsitter"),
    ("bedsita", "Bedsitter"),
    ("self-contained", "Self Contained"),
    ("master bedroom", "Master Room"),
    ("1 bedroom", "One Bedroom"),
    ("2 bedroom", "Two Bedroom"),
    ("3 bedroom", "Three Bedroom"),
    ("flat", "Apartment"),
    ("chumba", "Single Room"),
];

/// Area names the classifier recognises as a location signal.
pub const KNOWN_AREAS: &[&str] = &[
    "sinza",
    "mwenge",
    "mikocheni",
    "msasani",
    "masaki",
    "oysterbay",
    "mbezi",
    "kimara",
    "ubungo",
    "kinondoni",
    "magomeni",
    "manzese",
    "tabata",
    "segerea",
    "kariakoo",
    "ilala",
    "upanga",
    "kigamboni",
    "temeke",
    "mbagala",
    "makumbusho",
    "tegeta",
    "kawe",
    "goba",
    "dar es salaam",
    "arusha",
    "mwanza",
    "dodoma",
    "morogoro",
];

/// Words that signal a location search without naming an area.
pub(crate) const LOCATION_KEYWORDS: &[&str] = &[
    "near",
    "close to",
    "around",
    "area",
    "street",
    "located",
    "mtaa",
    "karibu",
];

/// Words that carry no search intent on their own. A query made entirely of
/// these is rejected as meaningless.
pub(crate) const STOP_WORDS: &[&str] = &[
    // articles & determiners
    "a", "an", "the", "this", "that", "these", "those", "some", "any",
    // pronouns
    "i", "it", "he", "she", "we", "they", "you", "me", "my", "your", "his",
    "her", "our", "their", "them", "us",
    // auxiliaries & common verbs
    "is", "are", "was", "were", "be", "been", "am", "do", "does", "did",
    "have", "has", "had", "can", "could", "will", "would", "should", "want",
    "need", "get", "got", "find", "show", "give", "looking",
    // connectors & filler
    "and", "or", "but", "for", "with", "from", "into", "very", "really",
    "just", "please", "hello", "ok", "okay",
    // habitual keyboard-test strings
    "test", "tests", "testing", "asdf", "qwerty", "abc", "xyz",
    // Swahili connectives & filler
    "na", "ya", "wa", "za", "la", "kwa", "ni", "iko", "ipo",
];

lazy_static! {
    // `150k`, `1.5m`, `200 thousand`, `2 million`
    static ref UNIT_PRICE_REGEX: Regex =
        Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(thousand|million|k|m)\b").unwrap();

    // `5000 tsh`, `120,000 shillings`
    static ref SHILLING_PRICE_REGEX: Regex =
        Regex::new(r"(?i)\b(\d{1,3}(?:,\d{3})+|\d+)\s*(?:tsh|shillings?)\b").unwrap();

    // bare amounts: comma-grouped, or 4+ digits
    static ref BARE_PRICE_REGEX: Regex =
        Regex::new(r"\b\d{1,3}(?:,\d{3})+\b|\b\d{4,}\b").unwrap();

    // the full allowed input charset; unit letters are alphanumerics already
    static ref ALLOWED_CHARS_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9\s\-',\.]+$").unwrap();
}

/// Whether the text stays inside the search-input charset.
pub(crate) fn charset_allowed(text: &str) -> bool {
    ALLOWED_CHARS_REGEX.is_match(text)
}

pub(crate) fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Extract a price from the query, applying unit multipliers.
///
/// A unitless number only counts as a price when it is comma-grouped or has
/// four or more digits; "2 bedroom" is not a price search.
pub(crate) fn detect_price(normalized: &str) -> Option<f64> {
    if let Some(caps) = UNIT_PRICE_REGEX.captures(normalized) {
        let amount: f64 = caps[1].parse().ok()?;
        let multiplier = match caps[2].to_lowercase().as_str() {
            "k" | "thousand" => 1_000.0,
            "m" | "million" => 1_000_000.0,
            _ => 1.0,
        };
        return Some(amount * multiplier);
    }
    if let Some(caps) = SHILLING_PRICE_REGEX.captures(normalized) {
        return parse_grouped(&caps[1]);
    }
    if let Some(found) = BARE_PRICE_REGEX.find(normalized) {
        return parse_grouped(found.as_str());
    }
    None
}

fn parse_grouped(digits: &str) -> Option<f64> {
    digits.replace(',', "").parse().ok()
}

/// Resolve a room type mentioned in the query: synonym table first, then a
/// substring scan of the canonical names. First match wins.
pub(crate) fn match_room_type(normalized: &str) -> Option<&'static str> {
    for &(phrase, canonical) in ROOM_TYPE_SYNONYMS {
        if normalized.contains(phrase) {
            return Some(canonical);
        }
    }
    ROOM_TYPES
        .iter()
        .find(|room_type| normalized.contains(room_type.to_lowercase().as_str()))
        .copied()
}

/// Whether the query carries a location signal (keyword or known area).
pub(crate) fn mentions_location(normalized: &str) -> bool {
    LOCATION_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
        || KNOWN_AREAS.iter().any(|area| normalized.contains(area))
}

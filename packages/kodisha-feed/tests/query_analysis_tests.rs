//! Search-query analysis tests.
//!
//! End-to-end checks of validation and classification as the search box
//! uses them, including the reason strings the UI shows.

use kodisha_feed::{classify, validate, InvalidReason, SearchType, Validation};

// ============================================================
// Validation gates
// ============================================================

#[test]
fn empty_and_whitespace_queries_are_too_short() {
    for query in ["", " ", "\t", "z", "  z  "] {
        assert_eq!(
            validate(query),
            Validation::Invalid {
                reason: InvalidReason::TooShort
            },
            "query {query:?} should be too short"
        );
    }
}

#[test]
fn overlong_queries_are_rejected() {
    let query = "cheap rooms ".repeat(10);
    assert_eq!(
        validate(&query),
        Validation::Invalid {
            reason: InvalidReason::TooLong
        }
    );
}

#[test]
fn charset_is_enforced_after_length() {
    assert_eq!(
        validate("🏠🏠").reason(),
        Some(InvalidReason::InvalidCharacters)
    );
    assert_eq!(
        validate("price > 100k").reason(),
        Some(InvalidReason::InvalidCharacters)
    );
    // Hyphens, apostrophes, commas, and periods are everyday input.
    assert!(validate("mama's place, self-contained.").is_valid());
}

#[test]
fn reason_strings_match_the_ui_copy() {
    let cases = [
        (InvalidReason::TooShort, "too short"),
        (InvalidReason::TooLong, "too long"),
        (InvalidReason::InvalidCharacters, "invalid characters"),
        (InvalidReason::MeaninglessTerms, "meaningless search terms"),
        (InvalidReason::NoMeaningfulTerms, "no meaningful search terms"),
    ];
    for (reason, expected) in cases {
        assert_eq!(reason.to_string(), expected);
    }
}

#[test]
fn stop_word_queries_are_meaningless_but_patterns_rescue_them() {
    assert_eq!(
        validate("is the that").reason(),
        Some(InvalidReason::MeaninglessTerms)
    );
    // Same shape plus a price pattern: the pattern wins before stop words.
    assert!(validate("is the that 150k").is_valid());
}

// ============================================================
// Classification
// ============================================================

#[test]
fn plain_unit_price_classifies_as_price_search() {
    let analysis = classify("150k").unwrap();
    assert_eq!(analysis.search_type, SearchType::Price);
    assert_eq!(analysis.detected_price, Some(150_000.0));
    assert_eq!(analysis.detected_room_type, None);
    assert!(!analysis.is_location_search);
}

#[test]
fn bare_large_number_counts_as_a_price() {
    let analysis = classify("100000").unwrap();
    assert_eq!(analysis.search_type, SearchType::Price);
    assert_eq!(analysis.detected_price, Some(100_000.0));
}

#[test]
fn small_bare_number_is_not_a_price() {
    // "2 bedsitter" reads as a count, not an amount.
    let analysis = classify("2 bedsitter in sinza").unwrap();
    assert_eq!(analysis.search_type, SearchType::RoomType);
    assert_eq!(analysis.detected_price, None);
    assert_eq!(analysis.detected_room_type.as_deref(), Some("Bedsitter"));
    assert!(analysis.is_location_search);
}

#[test]
fn price_beats_room_type_beats_location() {
    let price = classify("bedsitter near sinza under 100,000 tsh").unwrap();
    assert_eq!(price.search_type, SearchType::Price);

    let room = classify("bedsitter near sinza").unwrap();
    assert_eq!(room.search_type, SearchType::RoomType);

    let location = classify("near sinza").unwrap();
    assert_eq!(location.search_type, SearchType::Location);
}

#[test]
fn location_signal_from_keyword_or_area_name() {
    assert_eq!(
        classify("near the market").unwrap().search_type,
        SearchType::Location
    );
    assert_eq!(
        classify("mikocheni").unwrap().search_type,
        SearchType::Location
    );
}

#[test]
fn everything_else_is_general() {
    let analysis = classify("cheap clean rooms").unwrap();
    assert_eq!(analysis.search_type, SearchType::General);
    assert_eq!(analysis.detected_price, None);
    assert_eq!(analysis.detected_room_type, None);
    assert!(!analysis.is_location_search);
}

#[test]
fn swahili_phrasing_classifies_like_english() {
    let analysis = classify("chumba karibu na mwenge").unwrap();
    assert_eq!(analysis.search_type, SearchType::RoomType);
    assert_eq!(analysis.detected_room_type.as_deref(), Some("Single Room"));
    assert!(analysis.is_location_search);
}

#[test]
fn analysis_round_trips_into_a_wire_record() {
    let analysis = classify("  2 Bedroom in Mbezi for 250k  ").unwrap();
    let record = analysis.to_record(chrono::Utc::now());

    assert_eq!(record.raw_query, "  2 Bedroom in Mbezi for 250k  ");
    assert_eq!(record.normalized_query, "2 bedroom in mbezi for 250k");
    assert_eq!(record.search_type, "price");
    assert_eq!(record.detected_price, Some(250_000.0));
    assert_eq!(record.detected_room_type.as_deref(), Some("Two Bedroom"));
    assert!(record.is_location_search);
}

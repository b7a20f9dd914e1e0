//! Pure, staged filtering of listings against the active search criteria.
//!
//! Stages run in a fixed order: free-text query first (OR across listing
//! fields), then the location selector, room-type selector, and price range
//! (each an AND constraint). Order of the surviving listings is preserved,
//! and the input slice is never mutated.

use kodisha_api::RoomListing;

use crate::query::{classify, SearchAnalysis, SearchType};

/// Location selector value that disables the location constraint.
pub const ALL_AREAS: &str = "All Areas";
/// Room-type selector value that disables the room-type constraint.
pub const ANY_ROOM_TYPE: &str = "Any";

/// Tolerance applied around a detected price when matching listings.
const PRICE_MATCH_TOLERANCE: f64 = 0.2;

/// An inclusive price band. `0` on either end means unbounded on that end,
/// so `{0, 0}` matches everything.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRange {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    /// The "no constraint" band.
    pub fn unconstrained() -> Self {
        Self::new("Any Price", 0.0, 0.0)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    /// Whether `price` falls inside the band, ends inclusive.
    pub fn contains(&self, price: f64) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        let above_min = price >= self.min;
        let below_max = self.max == 0.0 || price <= self.max;
        above_min && below_max
    }

    /// The fixed bands offered by the price selector, in display order.
    /// Amounts are monthly rents in TZS.
    pub fn presets() -> Vec<PriceRange> {
        vec![
            PriceRange::unconstrained(),
            PriceRange::new("Under 50,000", 0.0, 50_000.0),
            PriceRange::new("50,000 - 100,000", 50_000.0, 100_000.0),
            PriceRange::new("100,000 - 200,000", 100_000.0, 200_000.0),
            PriceRange::new("200,000 - 500,000", 200_000.0, 500_000.0),
            PriceRange::new("500,000 - 1,000,000", 500_000.0, 1_000_000.0),
            PriceRange::new("Above 1,000,000", 1_000_000.0, 0.0),
        ]
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unconstrained()
    }
}

/// The full set of active constraints. The default matches everything.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub query: String,
    pub location: String,
    pub room_type: String,
    pub price_range: PriceRange,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: ALL_AREAS.to_string(),
            room_type: ANY_ROOM_TYPE.to_string(),
            price_range: PriceRange::unconstrained(),
        }
    }
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = room_type.into();
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }
}

/// Apply every active constraint to `listings`, returning the survivors in
/// their original order. An empty or invalid free-text query skips the text
/// stage rather than matching nothing.
pub fn filter_listings(listings: &[RoomListing], criteria: &FilterCriteria) -> Vec<RoomListing> {
    let analysis = if criteria.query.trim().is_empty() {
        None
    } else {
        classify(&criteria.query)
    };

    listings
        .iter()
        .filter(|listing| {
            analysis
                .as_ref()
                .map_or(true, |analysis| matches_query(listing, analysis))
        })
        .filter(|listing| matches_location_selector(listing, &criteria.location))
        .filter(|listing| matches_room_type_selector(listing, &criteria.room_type))
        .filter(|listing| criteria.price_range.contains(listing.price.as_f64()))
        .cloned()
        .collect()
}

/// Free-text stage: a listing survives if any field matches the query.
fn matches_query(listing: &RoomListing, analysis: &SearchAnalysis) -> bool {
    let query = analysis.normalized_query.as_str();

    if listing.title.to_lowercase().contains(query) {
        return true;
    }
    if listing.location.to_lowercase().contains(query) {
        return true;
    }
    if listing.room_type.to_lowercase().contains(query) {
        return true;
    }
    if listing.price.digits().contains(query) {
        return true;
    }

    if analysis.search_type == SearchType::Price {
        if let Some(price) = analysis.detected_price {
            let listing_price = listing.price.as_f64();
            let low = price * (1.0 - PRICE_MATCH_TOLERANCE);
            let high = price * (1.0 + PRICE_MATCH_TOLERANCE);
            if listing_price >= low && listing_price <= high {
                return true;
            }
        }
    }

    if analysis.search_type == SearchType::RoomType {
        if let Some(room_type) = &analysis.detected_room_type {
            if listing.room_type == *room_type {
                return true;
            }
        }
    }

    false
}

fn matches_location_selector(listing: &RoomListing, selector: &str) -> bool {
    selector == ALL_AREAS
        || listing
            .location
            .to_lowercase()
            .contains(selector.to_lowercase().as_str())
}

fn matches_room_type_selector(listing: &RoomListing, selector: &str) -> bool {
    selector == ANY_ROOM_TYPE || listing.room_type == selector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_listing;

    fn fixture() -> Vec<RoomListing> {
        vec![
            sample_listing("a", 45_000.0, "Sinza", "Single Room"),
            sample_listing("b", 75_000.0, "Sinza", "Bedsitter"),
            sample_listing("c", 150_000.0, "Mbezi", "Two Bedroom"),
            sample_listing("d", 160_000.0, "Masaki", "Bedsitter"),
        ]
    }

    #[test]
    fn test_default_criteria_keep_everything_in_order() {
        let listings = fixture();
        let visible = filter_listings(&listings, &FilterCriteria::default());
        assert_eq!(visible, listings);
    }

    #[test]
    fn test_selectors_are_and_constraints() {
        let listings = fixture();
        let criteria = FilterCriteria::default()
            .with_location("Sinza")
            .with_room_type("Bedsitter");
        let visible = filter_listings(&listings, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "b");
    }

    #[test]
    fn test_price_band_is_inclusive_of_both_ends() {
        let range = PriceRange::new("50,000 - 100,000", 50_000.0, 100_000.0);
        assert!(!range.contains(45_000.0));
        assert!(range.contains(50_000.0));
        assert!(range.contains(75_000.0));
        assert!(range.contains(100_000.0));
        assert!(!range.contains(100_001.0));
    }

    #[test]
    fn test_open_ended_band_has_no_upper_bound() {
        let range = PriceRange::new("Above 1,000,000", 1_000_000.0, 0.0);
        assert!(range.contains(2_500_000.0));
        assert!(!range.contains(999_999.0));
    }

    #[test]
    fn test_price_query_matches_with_tolerance() {
        let listings = fixture();
        let criteria = FilterCriteria::default().with_query("150k");
        let visible = filter_listings(&listings, &criteria);
        // 150k +/- 20% covers both 150,000 and 160,000.
        let ids: Vec<&str> = visible.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
    }

    #[test]
    fn test_room_type_query_matches_the_canonical_type() {
        let listings = fixture();
        let criteria = FilterCriteria::default().with_query("bed sitter");
        let ids: Vec<String> = filter_listings(&listings, &criteria)
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn test_invalid_query_skips_the_text_stage() {
        let listings = fixture();
        let criteria = FilterCriteria::default().with_query("the is");
        assert_eq!(filter_listings(&listings, &criteria).len(), listings.len());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let listings = fixture();
        let criteria = FilterCriteria::default().with_location("Sinza");
        let once = filter_listings(&listings, &criteria);
        let twice = filter_listings(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let criteria = FilterCriteria::default().with_query("bedsitter");
        assert!(filter_listings(&[], &criteria).is_empty());
    }

    #[test]
    fn test_presets_start_unconstrained() {
        let presets = PriceRange::presets();
        assert!(presets[0].is_unconstrained());
        assert_eq!(presets.len(), 7);
    }
}

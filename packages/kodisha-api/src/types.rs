use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as an absent field.
///
/// `#[serde(default)]` alone only covers missing keys; the backend also
/// sends `"field": null`, which must not fail the page decode.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// A room listing as returned by the feed endpoint.
///
/// The backend is lenient about field presence, so every field defaults
/// rather than failing deserialization. `price` may arrive as a number or
/// as a formatted string ("250,000").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListing {
    #[serde(default, deserialize_with = "null_to_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub price: ListingPrice,
    #[serde(default, deserialize_with = "null_to_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub room_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub occupied: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub min_months: u32,
}

/// Listing price on the wire: a plain number or a formatted numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingPrice {
    Numeric(f64),
    Formatted(String),
}

impl ListingPrice {
    /// Numeric value of the price. Separators and currency markers are
    /// stripped from formatted strings; anything unparsable counts as 0.
    pub fn as_f64(&self) -> f64 {
        match self {
            ListingPrice::Numeric(n) => *n,
            ListingPrice::Formatted(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.')
                    .collect();
                cleaned.parse().unwrap_or(0.0)
            }
        }
    }

    /// Digit-only rendering used for substring matching against queries.
    pub fn digits(&self) -> String {
        match self {
            ListingPrice::Formatted(s) => s.chars().filter(|c| c.is_ascii_digit()).collect(),
            ListingPrice::Numeric(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

impl Default for ListingPrice {
    fn default() -> Self {
        ListingPrice::Numeric(0.0)
    }
}

impl From<f64> for ListingPrice {
    fn from(value: f64) -> Self {
        ListingPrice::Numeric(value)
    }
}

impl From<&str> for ListingPrice {
    fn from(value: &str) -> Self {
        ListingPrice::Formatted(value.to_string())
    }
}

/// Location context forwarded with feed requests.
///
/// All fields may be empty; an entirely absent context is signalled to the
/// backend with `noLocation=true` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationContext {
    pub street: String,
    pub district: String,
    pub region: String,
    pub city: String,
}

impl LocationContext {
    pub fn new(
        street: impl Into<String>,
        district: impl Into<String>,
        region: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            district: district.into(),
            region: region.into(),
            city: city.into(),
        }
    }
}

/// One page request against the feed endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPageRequest {
    /// Fixed page size.
    pub limit: u32,
    /// Opaque cursor; `None` requests the start of the feed.
    pub cursor: Option<String>,
    /// Set when the request comes from pull-to-refresh.
    pub is_refreshing: bool,
    /// Caller-supplied location context, if any.
    pub location: Option<LocationContext>,
}

impl FeedPageRequest {
    /// First page of a fresh feed session.
    pub fn first_page(limit: u32, location: Option<LocationContext>) -> Self {
        Self {
            limit,
            cursor: None,
            is_refreshing: false,
            location,
        }
    }

    /// Continuation page at the given cursor.
    pub fn next_page(limit: u32, cursor: String, location: Option<LocationContext>) -> Self {
        Self {
            limit,
            cursor: Some(cursor),
            is_refreshing: false,
            location,
        }
    }

    /// Page 1 again, flagged as a refresh; any stored cursor is ignored.
    pub fn refresh(limit: u32, location: Option<LocationContext>) -> Self {
        Self {
            limit,
            cursor: None,
            is_refreshing: true,
            location,
        }
    }

    /// Query-string parameters for the feed endpoint. The cursor is omitted
    /// entirely when absent; a missing location context becomes four empty
    /// location fields plus `noLocation=true`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("isRefreshing", self.is_refreshing.to_string()),
        ];
        if let Some(cursor) = &self.cursor {
            params.push(("cursor", cursor.clone()));
        }
        match &self.location {
            Some(loc) => {
                params.push(("street", loc.street.clone()));
                params.push(("district", loc.district.clone()));
                params.push(("region", loc.region.clone()));
                params.push(("city", loc.city.clone()));
            }
            None => {
                params.push(("street", String::new()));
                params.push(("district", String::new()));
                params.push(("region", String::new()));
                params.push(("city", String::new()));
                params.push(("noLocation", "true".to_string()));
            }
        }
        params
    }
}

/// One page of the property feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPageResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub recommended: Vec<RoomListing>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub can_fetch_more: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub has_more_in_batch: bool,
}

/// Body of the search-logging endpoint: the classified query plus an
/// ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub raw_query: String,
    pub normalized_query: String,
    pub search_type: String,
    pub detected_price: Option<f64>,
    pub detected_room_type: Option<String>,
    pub is_location_search: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parses_numbers_and_formatted_strings() {
        assert_eq!(ListingPrice::Numeric(250_000.0).as_f64(), 250_000.0);
        assert_eq!(ListingPrice::from("250,000").as_f64(), 250_000.0);
        assert_eq!(ListingPrice::from("250 000").as_f64(), 250_000.0);
        assert_eq!(ListingPrice::from("120,000 TZS").as_f64(), 120_000.0);
        assert_eq!(ListingPrice::from("not a price").as_f64(), 0.0);
        assert_eq!(ListingPrice::default().as_f64(), 0.0);
    }

    #[test]
    fn test_price_digits_drop_separators_and_fractions() {
        assert_eq!(ListingPrice::Numeric(250_000.0).digits(), "250000");
        assert_eq!(ListingPrice::from("1,200,500").digits(), "1200500");
    }

    #[test]
    fn test_listing_deserializes_with_missing_fields() {
        let listing: RoomListing = serde_json::from_str(r#"{"id": "r1"}"#).unwrap();
        assert_eq!(listing.id, "r1");
        assert_eq!(listing.title, "");
        assert_eq!(listing.price.as_f64(), 0.0);
        assert!(listing.images.is_empty());
        assert!(!listing.occupied);
    }

    #[test]
    fn test_listing_accepts_string_prices() {
        let listing: RoomListing =
            serde_json::from_str(r#"{"id": "r2", "price": "180,000", "roomType": "Bedsitter"}"#)
                .unwrap();
        assert_eq!(listing.price.as_f64(), 180_000.0);
        assert_eq!(listing.room_type, "Bedsitter");
    }

    #[test]
    fn test_listing_tolerates_explicit_null_fields() {
        // The backend sends nulls as readily as it omits keys.
        let json = r#"{
            "id": "r3",
            "title": null,
            "price": null,
            "location": null,
            "roomType": null,
            "images": null,
            "amenities": null,
            "occupied": null,
            "minMonths": null
        }"#;
        let listing: RoomListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, "r3");
        assert_eq!(listing.title, "");
        assert_eq!(listing.price.as_f64(), 0.0);
        assert!(listing.images.is_empty());
        assert!(!listing.occupied);
        assert_eq!(listing.min_months, 0);
    }

    #[test]
    fn test_page_decodes_despite_null_fields() {
        // One null field inside a listing must not poison the whole page.
        let json = r#"{
            "recommended": [{"id": "r1", "price": null, "title": null}],
            "hasMore": null,
            "nextCursor": null,
            "canFetchMore": null,
            "hasMoreInBatch": null
        }"#;
        let page: FeedPageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.recommended.len(), 1);
        assert_eq!(page.recommended[0].id, "r1");
        assert_eq!(page.recommended[0].price.as_f64(), 0.0);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_first_page_omits_cursor() {
        let req = FeedPageRequest::first_page(10, None);
        let params = req.query_params();
        assert!(params.iter().all(|(k, _)| *k != "cursor"));
        assert!(params.contains(&("limit", "10".to_string())));
        assert!(params.contains(&("isRefreshing", "false".to_string())));
        assert!(params.contains(&("noLocation", "true".to_string())));
    }

    #[test]
    fn test_next_page_carries_cursor_and_location() {
        let loc = LocationContext::new("", "Kinondoni", "Dar es Salaam", "Dar es Salaam");
        let req = FeedPageRequest::next_page(10, "c1".into(), Some(loc));
        let params = req.query_params();
        assert!(params.contains(&("cursor", "c1".to_string())));
        assert!(params.contains(&("district", "Kinondoni".to_string())));
        assert!(params.iter().all(|(k, _)| *k != "noLocation"));
    }

    #[test]
    fn test_refresh_flags_the_request_and_drops_the_cursor() {
        let req = FeedPageRequest::refresh(10, None);
        assert!(req.is_refreshing);
        assert!(req.cursor.is_none());
        let params = req.query_params();
        assert!(params.contains(&("isRefreshing", "true".to_string())));
    }

    #[test]
    fn test_search_record_round_trips_camel_case() {
        let record = SearchRecord {
            raw_query: "150k".into(),
            normalized_query: "150k".into(),
            search_type: "price".into(),
            detected_price: Some(150_000.0),
            detected_room_type: None,
            is_location_search: false,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["rawQuery"], "150k");
        assert_eq!(json["searchType"], "price");
        assert_eq!(json["detectedPrice"], 150_000.0);
        assert_eq!(json["isLocationSearch"], false);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_feed_page_response_tolerates_sparse_payloads() {
        let page: FeedPageResponse = serde_json::from_str(r#"{"recommended": []}"#).unwrap();
        assert!(page.recommended.is_empty());
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }
}

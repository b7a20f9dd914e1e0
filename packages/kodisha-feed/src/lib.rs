//! Property-feed subsystem for the Kodisha room-rental client.
//!
//! This crate owns everything between the search box and the backend feed
//! endpoints:
//!
//! - [`query`]: validation and classification of raw search queries
//! - [`filter`]: pure, staged filtering of loaded listings
//! - [`feed`]: the listing store and the pagination controller
//! - [`search_log`]: debounced fire-and-forget search analytics
//! - [`traits`] / [`testing`]: the backend seam and its scripted mock
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kodisha_api::PropertyApiClient;
//! use kodisha_feed::{BasePropertyApi, FeedController, FilterCriteria, SearchLogger};
//!
//! let client = PropertyApiClient::new("https://api.kodisha.example", "token")?;
//! let api: Arc<dyn BasePropertyApi> = Arc::new(client);
//!
//! let feed = FeedController::new(api.clone());
//! feed.load_initial(None).await?;
//!
//! let logger = SearchLogger::spawn(api);
//! logger.submit_query("bedsitter sinza");
//!
//! let criteria = FilterCriteria::default().with_query("bedsitter sinza");
//! let visible = feed.visible_listings(&criteria);
//! ```

pub mod error;
pub mod feed;
pub mod filter;
pub mod query;
pub mod search_log;
pub mod testing;
pub mod traits;

pub use error::{FeedError, Result};
pub use feed::{
    FeedConfig, FeedController, FeedSnapshot, FeedStore, FetchOutcome, FetchPhase, SkipReason,
    DEFAULT_PAGE_SIZE,
};
pub use filter::{filter_listings, FilterCriteria, PriceRange, ALL_AREAS, ANY_ROOM_TYPE};
pub use query::{
    classify, validate, InvalidReason, SearchAnalysis, SearchType, Validation, MAX_QUERY_LEN,
    MIN_QUERY_LEN,
};
pub use search_log::{SearchLogger, SEARCH_DEBOUNCE};
pub use traits::BasePropertyApi;

// Wire types callers handle constantly, re-exported for convenience.
pub use kodisha_api::{
    ApiError, FeedPageRequest, FeedPageResponse, ListingPrice, LocationContext, RoomListing,
    SearchRecord,
};

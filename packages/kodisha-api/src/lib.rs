//! Pure REST client for the Kodisha marketplace API.
//!
//! A minimal client for the property backend: fetching cursor-paginated
//! feed pages and recording search queries. No domain logic lives here;
//! callers decide what to do with pages and when to log searches.
//!
//! # Example
//!
//! ```rust,ignore
//! use kodisha_api::{FeedPageRequest, PropertyApiClient};
//!
//! let client = PropertyApiClient::new("https://api.kodisha.example", token)?;
//!
//! let page = client
//!     .fetch_properties(&FeedPageRequest::first_page(10, None))
//!     .await?;
//! for listing in &page.recommended {
//!     println!("{} | {}", listing.title, listing.location);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::{
    FeedPageRequest, FeedPageResponse, ListingPrice, LocationContext, RoomListing, SearchRecord,
};

use std::time::Duration;

const FEED_PATH: &str = "/api/getallproperties";
const SEARCH_LOG_PATH: &str = "/api/store-search";

/// Request timeout covering connect plus response.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PropertyApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl PropertyApiClient {
    /// Create a client for the given backend.
    ///
    /// The bearer token comes from the caller's session storage; this crate
    /// never persists or refreshes it.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Unknown(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// The backend base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the property feed.
    ///
    /// Non-2xx responses become [`ApiError::ServerError`] with the response
    /// body as the message; transport failures are classified by
    /// [`ApiError::from`].
    pub async fn fetch_properties(&self, request: &FeedPageRequest) -> Result<FeedPageResponse> {
        let url = format!("{}{}", self.base_url, FEED_PATH);
        tracing::debug!(
            limit = request.limit,
            cursor = ?request.cursor,
            refreshing = request.is_refreshing,
            "fetching property feed page"
        );

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&request.query_params())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::ServerError {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let page: FeedPageResponse = resp.json().await?;
        tracing::debug!(
            count = page.recommended.len(),
            has_more = page.has_more,
            can_fetch_more = page.can_fetch_more,
            "fetched property feed page"
        );
        Ok(page)
    }

    /// Record a classified search query.
    ///
    /// The endpoint is analytics-only; callers decide whether failures
    /// matter (the feed's search logger swallows them).
    pub async fn store_search(&self, record: &SearchRecord) -> Result<()> {
        let url = format!("{}{}", self.base_url, SEARCH_LOG_PATH);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::ServerError {
                status: Some(status.as_u16()),
                message: body,
            });
        }
        Ok(())
    }
}

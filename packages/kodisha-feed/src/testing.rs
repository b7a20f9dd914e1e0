//! Scripted test doubles and fixtures for exercising the feed without a
//! backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kodisha_api::{
    ApiError, FeedPageRequest, FeedPageResponse, ListingPrice, Result as ApiResult, RoomListing,
    SearchRecord,
};

use crate::traits::BasePropertyApi;

/// A listing fixture with display fields derived from the interesting ones.
pub fn sample_listing(id: &str, price: f64, location: &str, room_type: &str) -> RoomListing {
    RoomListing {
        id: id.to_string(),
        title: format!("{room_type} in {location}"),
        price: ListingPrice::Numeric(price),
        location: location.to_string(),
        room_type: room_type.to_string(),
        images: Vec::new(),
        amenities: Vec::new(),
        occupied: false,
        min_months: 0,
    }
}

/// A page fixture. `has_more` tracks `can_fetch_more` since the backend
/// keeps them aligned in practice.
pub fn sample_page(
    listings: Vec<RoomListing>,
    next_cursor: Option<&str>,
    can_fetch_more: bool,
) -> FeedPageResponse {
    FeedPageResponse {
        recommended: listings,
        has_more: can_fetch_more,
        next_cursor: next_cursor.map(String::from),
        can_fetch_more,
        has_more_in_batch: false,
    }
}

/// Scripted [`BasePropertyApi`]: feed pages and errors are queued up front,
/// every call is recorded. Clones share the same queues and records.
#[derive(Clone)]
pub struct MockPropertyApi {
    pages: Arc<Mutex<VecDeque<ApiResult<FeedPageResponse>>>>,
    search_failures: Arc<Mutex<VecDeque<ApiError>>>,
    fetch_calls: Arc<Mutex<Vec<FeedPageRequest>>>,
    search_calls: Arc<Mutex<Vec<SearchRecord>>>,
    fetch_delay: Option<Duration>,
}

impl MockPropertyApi {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(VecDeque::new())),
            search_failures: Arc::new(Mutex::new(VecDeque::new())),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
            search_calls: Arc::new(Mutex::new(Vec::new())),
            fetch_delay: None,
        }
    }

    /// Queue a successful page for the next unanswered fetch.
    pub fn with_page(self, page: FeedPageResponse) -> Self {
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    /// Queue a failure for the next unanswered fetch.
    pub fn with_fetch_error(self, error: ApiError) -> Self {
        self.pages.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queue a failure for the next search-store call.
    pub fn with_search_error(self, error: ApiError) -> Self {
        self.search_failures.lock().unwrap().push_back(error);
        self
    }

    /// Hold every fetch open for `delay` before answering. Lets tests drive
    /// a second request in while the first is still in flight.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn fetch_calls(&self) -> Vec<FeedPageRequest> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.lock().unwrap().len()
    }

    pub fn search_records(&self) -> Vec<SearchRecord> {
        self.search_calls.lock().unwrap().clone()
    }
}

impl Default for MockPropertyApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePropertyApi for MockPropertyApi {
    async fn fetch_page(&self, request: FeedPageRequest) -> ApiResult<FeedPageResponse> {
        self.fetch_calls.lock().unwrap().push(request);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        let scripted = self.pages.lock().unwrap().pop_front();
        // An unscripted fetch answers with an empty, exhausted page.
        scripted.unwrap_or_else(|| Ok(FeedPageResponse::default()))
    }

    async fn store_search(&self, record: SearchRecord) -> ApiResult<()> {
        self.search_calls.lock().unwrap().push(record);
        match self.search_failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_answer_in_scripted_order() {
        let api = MockPropertyApi::new()
            .with_page(sample_page(
                vec![sample_listing("a", 50_000.0, "Sinza", "Bedsitter")],
                Some("c1"),
                true,
            ))
            .with_fetch_error(ApiError::NetworkUnavailable("offline".into()));

        let first = api
            .fetch_page(FeedPageRequest::first_page(10, None))
            .await
            .unwrap();
        assert_eq!(first.recommended.len(), 1);

        let second = api.fetch_page(FeedPageRequest::first_page(10, None)).await;
        assert!(matches!(second, Err(ApiError::NetworkUnavailable(_))));

        // Past the script the mock answers with an exhausted page.
        let third = api
            .fetch_page(FeedPageRequest::first_page(10, None))
            .await
            .unwrap();
        assert!(third.recommended.is_empty());
        assert!(!third.can_fetch_more);

        assert_eq!(api.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_recorded_calls() {
        let api = MockPropertyApi::new();
        let handle = api.clone();
        api.fetch_page(FeedPageRequest::first_page(10, None))
            .await
            .unwrap();
        assert_eq!(handle.fetch_count(), 1);
    }
}

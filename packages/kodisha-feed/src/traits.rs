//! Backend seam for the feed. Production wires in [`PropertyApiClient`];
//! tests substitute [`crate::testing::MockPropertyApi`].

use async_trait::async_trait;
use kodisha_api::{
    FeedPageRequest, FeedPageResponse, PropertyApiClient, Result as ApiResult, SearchRecord,
};

#[async_trait]
pub trait BasePropertyApi: Send + Sync {
    /// Fetch one page of the property feed.
    async fn fetch_page(&self, request: FeedPageRequest) -> ApiResult<FeedPageResponse>;

    /// Persist one search record for analytics.
    async fn store_search(&self, record: SearchRecord) -> ApiResult<()>;
}

#[async_trait]
impl BasePropertyApi for PropertyApiClient {
    async fn fetch_page(&self, request: FeedPageRequest) -> ApiResult<FeedPageResponse> {
        self.fetch_properties(&request).await
    }

    async fn store_search(&self, record: SearchRecord) -> ApiResult<()> {
        PropertyApiClient::store_search(self, &record).await
    }
}

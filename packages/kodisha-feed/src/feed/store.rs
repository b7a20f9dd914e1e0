//! In-memory listing collection plus the pagination flags that came with
//! the last page.

use std::collections::HashSet;

use kodisha_api::RoomListing;

/// Listings currently held by the feed, in arrival order, plus the backend's
/// view of whether more exist. Mutation goes through the controller.
#[derive(Debug, Default)]
pub struct FeedStore {
    listings: Vec<RoomListing>,
    has_more: bool,
    can_fetch_more: bool,
    has_more_in_batch: bool,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listings(&self) -> &[RoomListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.listings.iter().any(|listing| listing.id == id)
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn can_fetch_more(&self) -> bool {
        self.can_fetch_more
    }

    pub fn has_more_in_batch(&self) -> bool {
        self.has_more_in_batch
    }

    /// Replace the whole collection, as on initial load or refresh.
    pub(crate) fn replace_all(&mut self, listings: Vec<RoomListing>) {
        self.listings = listings;
    }

    /// Append a page, dropping any listing whose id is already present.
    /// Returns the number actually added.
    pub(crate) fn append_deduped(&mut self, incoming: Vec<RoomListing>) -> usize {
        let mut seen: HashSet<String> = self
            .listings
            .iter()
            .map(|listing| listing.id.clone())
            .collect();
        let before = self.listings.len();
        for listing in incoming {
            if seen.insert(listing.id.clone()) {
                self.listings.push(listing);
            }
        }
        self.listings.len() - before
    }

    pub(crate) fn set_page_flags(
        &mut self,
        has_more: bool,
        can_fetch_more: bool,
        has_more_in_batch: bool,
    ) {
        self.has_more = has_more;
        self.can_fetch_more = can_fetch_more;
        self.has_more_in_batch = has_more_in_batch;
    }
}

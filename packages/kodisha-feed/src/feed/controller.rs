//! Feed pagination controller.
//!
//! All fetches funnel through one phase guard: while a fetch is in flight
//! the phase is non-idle and every other fetch request becomes a no-op
//! [`FetchOutcome::Skipped`], so overlapping calls can never interleave
//! writes to the store or the cursor. The state lock is only ever held
//! between awaits, never across one.

use std::sync::{Arc, Mutex, MutexGuard};

use kodisha_api::{ApiError, FeedPageRequest, FeedPageResponse, LocationContext, RoomListing};

use crate::error::{FeedError, Result};
use crate::feed::store::FeedStore;
use crate::filter::{filter_listings, FilterCriteria};
use crate::traits::BasePropertyApi;

/// Listings requested per page unless overridden via [`FeedConfig`].
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// What the feed is currently doing. At most one fetch runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    LoadingInitial,
    LoadingMore,
    Refreshing,
}

impl FetchPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchPhase::Idle)
    }
}

/// Why a fetch request became a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch holds the phase guard.
    FetchInProgress,
    /// The initial page is already in, so a second initial load is pointless.
    AlreadyLoaded,
    /// `load_more` before the initial page has ever landed.
    AwaitingInitialLoad,
    /// The backend said there is nothing further to fetch.
    EndOfFeed,
    /// This scroll gesture already triggered a fetch.
    MomentumConsumed,
}

/// Result of a fetch request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page landed; `net_new` counts listings actually added after dedup.
    Loaded { net_new: usize },
    /// The request was dropped without touching the store or the cursor.
    Skipped(SkipReason),
}

impl FetchOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped(_))
    }

    pub fn net_new(&self) -> usize {
        match self {
            FetchOutcome::Loaded { net_new } => *net_new,
            FetchOutcome::Skipped(_) => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FeedConfig {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// A point-in-time copy of the feed's state, for UI bindings and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub phase: FetchPhase,
    pub listing_count: usize,
    pub cursor: Option<String>,
    pub has_more: bool,
    pub can_fetch_more: bool,
    pub has_more_in_batch: bool,
    pub initial_load_complete: bool,
    pub last_fetch_error: Option<String>,
}

struct FeedState {
    store: FeedStore,
    phase: FetchPhase,
    cursor: Option<String>,
    initial_load_complete: bool,
    momentum_load_consumed: bool,
    last_fetch_error: Option<String>,
}

impl FeedState {
    fn new() -> Self {
        Self {
            store: FeedStore::new(),
            phase: FetchPhase::Idle,
            cursor: None,
            initial_load_complete: false,
            momentum_load_consumed: false,
            last_fetch_error: None,
        }
    }

    /// Adopt a full page: wholesale replace, new flags, new cursor.
    fn adopt_full_page(&mut self, page: FeedPageResponse) {
        let FeedPageResponse {
            recommended,
            has_more,
            next_cursor,
            can_fetch_more,
            has_more_in_batch,
        } = page;
        self.store.replace_all(recommended);
        self.store
            .set_page_flags(has_more, can_fetch_more, has_more_in_batch);
        self.cursor = next_cursor;
        self.initial_load_complete = true;
        self.last_fetch_error = None;
    }

    /// Append a follow-up page, returning the net-new listing count.
    fn append_page(&mut self, page: FeedPageResponse) -> usize {
        let FeedPageResponse {
            recommended,
            has_more,
            next_cursor,
            can_fetch_more,
            has_more_in_batch,
        } = page;
        let net_new = self.store.append_deduped(recommended);
        self.store
            .set_page_flags(has_more, can_fetch_more, has_more_in_batch);
        self.cursor = next_cursor;
        self.last_fetch_error = None;
        net_new
    }
}

/// Owns the feed state and serialises every fetch against it.
pub struct FeedController {
    api: Arc<dyn BasePropertyApi>,
    config: FeedConfig,
    state: Mutex<FeedState>,
}

impl FeedController {
    pub fn new(api: Arc<dyn BasePropertyApi>) -> Self {
        Self::with_config(api, FeedConfig::default())
    }

    pub fn with_config(api: Arc<dyn BasePropertyApi>, config: FeedConfig) -> Self {
        Self {
            api,
            config,
            state: Mutex::new(FeedState::new()),
        }
    }

    /// Load the first page. Skips when a fetch is in flight or the initial
    /// page already landed; a refresh is the way to re-pull page one.
    pub async fn load_initial(&self, location: Option<LocationContext>) -> Result<FetchOutcome> {
        {
            let mut state = self.lock_state();
            if !state.phase.is_idle() {
                return Ok(skip(SkipReason::FetchInProgress));
            }
            if state.initial_load_complete {
                return Ok(skip(SkipReason::AlreadyLoaded));
            }
            state.phase = FetchPhase::LoadingInitial;
        }

        let request = FeedPageRequest::first_page(self.config.page_size, location);
        let result = self.api.fetch_page(request).await;

        let mut state = self.lock_state();
        state.phase = FetchPhase::Idle;
        match result {
            Ok(page) => {
                let count = page.recommended.len();
                state.adopt_full_page(page);
                tracing::info!(count, "initial feed page loaded");
                Ok(FetchOutcome::Loaded { net_new: count })
            }
            Err(err) => Err(self.record_failure(&mut state, "load_initial", err)),
        }
    }

    /// Fetch the next page through the stored cursor and append it. The
    /// guard chain: phase idle, initial load done, backend says more exists,
    /// and the current scroll gesture has not already spent its fetch.
    pub async fn load_more(&self, location: Option<LocationContext>) -> Result<FetchOutcome> {
        let cursor;
        {
            let mut state = self.lock_state();
            if !state.phase.is_idle() {
                return Ok(skip(SkipReason::FetchInProgress));
            }
            if !state.initial_load_complete {
                return Ok(skip(SkipReason::AwaitingInitialLoad));
            }
            if !state.store.can_fetch_more() {
                return Ok(skip(SkipReason::EndOfFeed));
            }
            if state.momentum_load_consumed {
                return Ok(skip(SkipReason::MomentumConsumed));
            }
            state.momentum_load_consumed = true;
            state.phase = FetchPhase::LoadingMore;
            cursor = state.cursor.clone();
        }

        let request = match cursor {
            Some(cursor) => FeedPageRequest::next_page(self.config.page_size, cursor, location),
            None => FeedPageRequest::first_page(self.config.page_size, location),
        };
        let result = self.api.fetch_page(request).await;

        let mut state = self.lock_state();
        state.phase = FetchPhase::Idle;
        match result {
            Ok(page) => {
                let received = page.recommended.len();
                let net_new = state.append_page(page);
                tracing::debug!(received, net_new, "feed page appended");
                Ok(FetchOutcome::Loaded { net_new })
            }
            Err(err) => Err(self.record_failure(&mut state, "load_more", err)),
        }
    }

    /// Pull a fresh first page and replace the collection wholesale. Runs
    /// even at end of feed; only an in-flight fetch blocks it.
    pub async fn refresh(&self, location: Option<LocationContext>) -> Result<FetchOutcome> {
        {
            let mut state = self.lock_state();
            if !state.phase.is_idle() {
                return Ok(skip(SkipReason::FetchInProgress));
            }
            state.phase = FetchPhase::Refreshing;
        }

        let request = FeedPageRequest::refresh(self.config.page_size, location);
        let result = self.api.fetch_page(request).await;

        let mut state = self.lock_state();
        state.phase = FetchPhase::Idle;
        match result {
            Ok(page) => {
                let count = page.recommended.len();
                state.adopt_full_page(page);
                tracing::info!(count, "feed refreshed");
                Ok(FetchOutcome::Loaded { net_new: count })
            }
            Err(err) => Err(self.record_failure(&mut state, "refresh", err)),
        }
    }

    /// Re-arm the momentum guard. The list view calls this when a new scroll
    /// gesture begins, allowing the next end-reached event to fetch again.
    pub fn on_scroll_momentum_begin(&self) {
        self.lock_state().momentum_load_consumed = false;
    }

    /// Everything currently loaded, in arrival order.
    pub fn listings(&self) -> Vec<RoomListing> {
        self.lock_state().store.listings().to_vec()
    }

    /// The loaded listings with `criteria` applied.
    pub fn visible_listings(&self, criteria: &FilterCriteria) -> Vec<RoomListing> {
        let state = self.lock_state();
        filter_listings(state.store.listings(), criteria)
    }

    pub fn last_fetch_error(&self) -> Option<String> {
        self.lock_state().last_fetch_error.clone()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.lock_state();
        FeedSnapshot {
            phase: state.phase,
            listing_count: state.store.len(),
            cursor: state.cursor.clone(),
            has_more: state.store.has_more(),
            can_fetch_more: state.store.can_fetch_more(),
            has_more_in_batch: state.store.has_more_in_batch(),
            initial_load_complete: state.initial_load_complete,
            last_fetch_error: state.last_fetch_error.clone(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().expect("feed state lock poisoned")
    }

    fn record_failure(
        &self,
        state: &mut FeedState,
        operation: &'static str,
        err: ApiError,
    ) -> FeedError {
        tracing::warn!(operation, error = %err, "feed fetch failed");
        state.last_fetch_error = Some(err.user_message().to_string());
        FeedError::Fetch(err)
    }
}

fn skip(reason: SkipReason) -> FetchOutcome {
    tracing::debug!(?reason, "fetch request skipped");
    FetchOutcome::Skipped(reason)
}

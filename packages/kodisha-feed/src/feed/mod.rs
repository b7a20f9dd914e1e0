//! Feed state: the listing store and the pagination controller that owns it.

mod controller;
mod store;

pub use controller::{
    FeedConfig, FeedController, FeedSnapshot, FetchOutcome, FetchPhase, SkipReason,
    DEFAULT_PAGE_SIZE,
};
pub use store::FeedStore;

//! Minimal winner selection data structures and algorithm.
//!
//! This crate defines minimal data structures that contain only what's needed
//! to determine auction results. The auction service converts its full
//! per-channel state into these minimal structs, runs the pure algorithm, and
//! renders the outcome into chat messages.

pub mod bid;
pub mod results;

// Re-export key types for convenience
pub use {
    bid::{Bid, Bidder},
    results::{AuctionResults, determine_results, highest_bid_per_bidder},
};

//! This module implements the observability for the auction service. It
//! exposes functions which represent events that are meaningful to the
//! system. These functions are called when each of those events happens.
//! They emit log messages and update the metrics, if the event is worth
//! measuring.

pub mod metrics;

use crate::domain::{AuctionItem, AuctionResults, Bid, Channel, Message};

/// An item entered the queue.
pub fn item_queued(item: &AuctionItem) {
    tracing::info!(
        item = %item.description(),
        added_by = %item.added_by,
        "queued item for auction"
    );
}

/// A pending item took over an idle channel.
pub fn auction_started(channel: &Channel, item: &AuctionItem) {
    tracing::info!(%channel, item = %item.description(), "started auction");
    metrics::get()
        .auctions_started
        .with_label_values(&[channel.as_str()])
        .inc();
}

/// A bid entered an auction.
pub fn bid_placed(channel: &Channel, bid: &Bid) {
    tracing::info!(%channel, bidder = %bid.bidder, amount = bid.amount, "placed bid");
    metrics::get()
        .bids
        .with_label_values(&[channel.as_str()])
        .inc();
}

/// An auction ran out of time.
pub fn auction_closed(channel: &Channel, item: &AuctionItem, results: &AuctionResults) {
    tracing::info!(%channel, item = %item.description(), %results, "closed auction");
    metrics::get()
        .auctions_closed
        .with_label_values(&[channel.as_str()])
        .inc();
}

/// An officer accepted the results of a finished auction.
pub fn auction_accepted(channel: &Channel, item: &AuctionItem, results: &AuctionResults) {
    tracing::info!(%channel, item = %item.description(), %results, "accepted auction");
    metrics::get()
        .auctions_accepted
        .with_label_values(&[channel.as_str()])
        .inc();
}

/// An officer reopened a finished auction.
pub fn auction_reopened(channel: &Channel, item: &AuctionItem) {
    tracing::info!(%channel, item = %item.description(), "reopened auction");
    metrics::get()
        .auctions_reopened
        .with_label_values(&[channel.as_str()])
        .inc();
}

/// A guard refused an operation.
pub fn command_rejected(channel: &Channel, reason: &'static str) {
    tracing::debug!(%channel, reason, "rejected command");
    metrics::get()
        .rejections
        .with_label_values(&[reason])
        .inc();
}

/// A tick finished with this many items waiting and channels selling.
pub fn queue_status(pending_items: usize, running_auctions: usize) {
    metrics::get()
        .pending_items
        .set(pending_items.try_into().unwrap_or(i64::MAX));
    metrics::get()
        .running_auctions
        .set(running_auctions.try_into().unwrap_or(i64::MAX));
}

/// A message could not be handed to the sink.
pub fn delivery_failed(err: &anyhow::Error, message: &Message) {
    tracing::warn!(?err, channel = %message.channel, "failed to deliver message");
}

//! Per-channel auction state and its timing rules.

use {
    chrono::{DateTime, TimeDelta, Utc},
    std::collections::BTreeSet,
    winner_selection::{AuctionResults, Bid},
};

/// A channel that may host auctions. Channels are configured up front and
/// each hosts at most one auction at a time.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Channel(pub String);

impl Channel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Channel {
    fn from(inner: String) -> Self {
        Self(inner)
    }
}

impl From<&str> for Channel {
    fn from(inner: &str) -> Self {
        Self(inner.to_string())
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item to be sold, together with who queued it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionItem {
    pub name: String,
    pub quantity: usize,
    pub added_by: String,
}

impl AuctionItem {
    pub fn new(
        name: impl Into<String>,
        quantity: usize,
        added_by: impl Into<String>,
    ) -> Result<Self, InvalidQuantity> {
        if quantity == 0 {
            return Err(InvalidQuantity);
        }
        Ok(Self {
            name: name.into(),
            quantity,
            added_by: added_by.into(),
        })
    }

    /// How the item is referred to in channel messages.
    pub fn description(&self) -> String {
        if self.quantity > 1 {
            format!("{} x{}", self.name, self.quantity)
        } else {
            self.name.clone()
        }
    }
}

/// The lifecycle state of an auction occupying a channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// Accepting bids and subject to the timing rules.
    Running,
    /// Paused by an officer. No operation transitions into this state yet,
    /// but the guards treat it as a first class status.
    Stopped,
    /// Timed out. Holds its results and waits to be accepted or reopened.
    Finished,
}

/// An auction occupying a channel, from its start until the channel is
/// cleared or the auction is replaced.
#[derive(Clone, Debug)]
pub struct RunningAuction {
    pub item: AuctionItem,
    pub status: Status,
    pub started_at: DateTime<Utc>,
    pub last_bid: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub bids: BTreeSet<Bid>,
    /// The results computed when the auction finished. `None` while it is
    /// still running.
    pub results: Option<AuctionResults>,
}

impl RunningAuction {
    pub fn new(item: AuctionItem, now: DateTime<Utc>) -> Self {
        Self {
            item,
            status: Status::Running,
            started_at: now,
            last_bid: None,
            last_updated: None,
            bids: BTreeSet::new(),
            results: None,
        }
    }

    /// Estimates how much longer the auction has to run. The auction closes
    /// once this reaches zero.
    ///
    /// The rules this encodes:
    ///
    /// 1. Every auction runs for at least 90 seconds.
    /// 2. An auction stays open for at least 30 seconds past its latest bid.
    /// 3. An auction stays open for at least 15 seconds past its latest
    ///    standing update.
    /// 4. An auction must not close before an update has been posted after
    ///    its latest bid.
    ///
    /// The value is an estimate recomputed on every call: while the closing
    /// update from rule 4 is still outstanding, the end is pinned at least
    /// 15 seconds past `now`, so the remaining time can appear to hold
    /// steady across polls.
    pub fn time_left(&self, now: DateTime<Utc>) -> TimeDelta {
        let mut end = self.started_at + TimeDelta::seconds(90);

        if let Some(last_bid) = self.last_bid {
            end = end.max(last_bid + TimeDelta::seconds(30));
        }

        // An update only pins the end while no bid arrived after it.
        if let Some(last_updated) = self.last_updated {
            if self.last_bid.is_none_or(|last_bid| last_updated > last_bid) {
                end = end.max(last_updated + TimeDelta::seconds(15));
            }
        }

        // No update yet, or a bid arrived after the latest one: the closing
        // update is still outstanding. Were it to post right now, rule 3
        // would keep the auction open for another 15 seconds.
        if self
            .last_updated
            .is_none_or(|last_updated| self.last_bid.is_some_and(|last_bid| last_updated < last_bid))
        {
            end = end.max(now + TimeDelta::seconds(15));
        }

        (end - now).max(TimeDelta::zero())
    }

    /// Whether a standing update is due: the auction is running and has been
    /// quiet for a while. All bounds are strict.
    pub fn needs_update(&self, now: DateTime<Utc>) -> bool {
        if self.status != Status::Running {
            return false;
        }
        now - self.started_at > TimeDelta::seconds(30)
            && self
                .last_bid
                .is_none_or(|last_bid| now - last_bid > TimeDelta::seconds(10))
            && self
                .last_updated
                .is_none_or(|last_updated| now - last_updated > TimeDelta::seconds(30))
    }

    /// Marks the auction finished, recording its final results.
    pub fn close(&mut self, results: AuctionResults) {
        self.status = Status::Finished;
        self.results = Some(results);
    }

    /// Restarts the auction for a full run. Bids placed so far are kept.
    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.results = None;
        self.started_at = now;
        self.last_bid = None;
        self.last_updated = None;
        self.status = Status::Running;
    }
}

/// An auction item must be worth winning.
#[derive(Debug, thiserror::Error)]
#[error("auction item quantity must be at least 1")]
pub struct InvalidQuantity;

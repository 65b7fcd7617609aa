//! Bid value types.

/// The identity of a bidding member, as reported by the chat gateway.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Bidder(pub String);

impl Bidder {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Bidder {
    fn from(inner: String) -> Self {
        Self(inner)
    }
}

impl From<&str> for Bidder {
    fn from(inner: &str) -> Self {
        Self(inner.to_string())
    }
}

impl std::fmt::Display for Bidder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bid on a running auction.
///
/// Equality is by value: a collection of bids is a set, so repeating the same
/// (bidder, amount) pair collapses to one entry while the same bidder may
/// hold bids at several amounts simultaneously. The derived ordering is
/// bidder-major, which gives bid collections a stable iteration order;
/// [`determine_results`](crate::determine_results) depends on that stability
/// to make repeated computations value-equal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Bid {
    pub bidder: Bidder,
    pub amount: u64,
}

impl Bid {
    pub fn new(bidder: impl Into<Bidder>, amount: u64) -> Self {
        Self {
            bidder: bidder.into(),
            amount,
        }
    }
}

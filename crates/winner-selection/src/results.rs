//! Auction results computation.
//!
//! Implements the algorithm that assigns a limited item quantity to the
//! highest bids, detects roll-off ties, and reports how much quantity was
//! left unclaimed.

use {
    crate::bid::{Bid, Bidder},
    itertools::Itertools,
    std::{
        cmp::Reverse,
        collections::{BTreeMap, btree_map::Entry},
        fmt,
    },
};

/// The outcome of an auction at some point in time.
///
/// Never mutated after creation. Compared by value to detect results that
/// changed between an auction closing and an officer accepting it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuctionResults {
    /// Bids that won an item outright, highest group first.
    pub winners: Vec<Bid>,
    /// An entire bid group that must roll off externally because awarding
    /// all of it would exceed the remaining quantity. Empty unless a tie
    /// stopped the assignment.
    pub tied: Vec<Bid>,
    /// Quantity left unassigned because there weren't enough bids.
    pub rolled: usize,
}

/// Determines the results an auction would have if it ended right now.
///
/// Bids are sorted by descending amount and consumed group-by-group, where a
/// group holds all bids of equal amount. A group no larger than the remaining
/// need wins outright and shrinks the need; the first group larger than the
/// remaining need becomes the tie and stops the assignment, leaving lower
/// groups unexamined. Need that survives without a tie is reported as rolled.
///
/// Pure: the input collection is only read, never consumed or reordered, so
/// calling this twice against the same bids yields value-equal results. The
/// sort is stable, which keeps the within-group order of the input.
pub fn determine_results<'a>(
    bids: impl Iterator<Item = &'a Bid>,
    quantity: usize,
) -> AuctionResults {
    let mut need = quantity;
    let mut winners = Vec::new();
    let mut tied = Vec::new();

    let sorted = bids.sorted_by_key(|bid| Reverse(bid.amount));
    let groups = sorted.chunk_by(|bid| bid.amount);
    for (_amount, group) in &groups {
        let group: Vec<_> = group.collect();
        if group.len() <= need {
            need -= group.len();
            winners.extend(group.into_iter().cloned());
            if need == 0 {
                break;
            }
        } else {
            tied.extend(group.into_iter().cloned());
            break;
        }
    }

    // A tie keeps the remaining quantity in play for the roll-off, so only
    // need that survived without a tie counts as rolled.
    let rolled = if tied.is_empty() { need } else { 0 };

    AuctionResults {
        winners,
        tied,
        rolled,
    }
}

/// Reduces a bid collection to each bidder's single highest bid.
///
/// Output is ordered by bidder, making the reduction deterministic for any
/// input order.
pub fn highest_bid_per_bidder<'a>(bids: impl Iterator<Item = &'a Bid>) -> Vec<&'a Bid> {
    let mut highest: BTreeMap<&Bidder, &Bid> = BTreeMap::new();
    for bid in bids {
        match highest.entry(&bid.bidder) {
            Entry::Vacant(entry) => {
                entry.insert(bid);
            }
            Entry::Occupied(mut entry) => {
                if bid.amount > entry.get().amount {
                    entry.insert(bid);
                }
            }
        }
    }
    highest.into_values().collect()
}

impl fmt::Display for AuctionResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(bids: &[Bid]) -> String {
            if bids.is_empty() {
                "none".to_string()
            } else {
                bids.iter()
                    .map(|bid| format!("{} ({})", bid.bidder, bid.amount))
                    .join(", ")
            }
        }

        write!(
            f,
            "Winners: {} | Tied: {} | Rolled: {}",
            list(&self.winners),
            list(&self.tied),
            self.rolled
        )
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::BTreeSet};

    fn bid(bidder: &str, amount: u64) -> Bid {
        Bid::new(bidder, amount)
    }

    #[test]
    fn tie_at_the_top_exceeds_need() {
        let bids = [bid("a", 10), bid("b", 10), bid("c", 5)];
        let results = determine_results(bids.iter(), 1);
        assert!(results.winners.is_empty());
        assert_eq!(results.tied, vec![bid("a", 10), bid("b", 10)]);
        assert_eq!(results.rolled, 0);
    }

    #[test]
    fn top_group_exactly_matching_need_wins() {
        let bids = [bid("a", 10), bid("b", 10), bid("c", 5)];
        let results = determine_results(bids.iter(), 2);
        assert_eq!(results.winners, vec![bid("a", 10), bid("b", 10)]);
        assert!(results.tied.is_empty());
        assert_eq!(results.rolled, 0);
    }

    #[test]
    fn groups_are_consumed_in_descending_order() {
        let bids = [bid("a", 10), bid("b", 10), bid("c", 5)];
        let results = determine_results(bids.iter(), 3);
        assert_eq!(
            results.winners,
            vec![bid("a", 10), bid("b", 10), bid("c", 5)]
        );
        assert!(results.tied.is_empty());
        assert_eq!(results.rolled, 0);
    }

    #[test]
    fn tie_below_the_top_group_stops_assignment() {
        let bids = [bid("a", 10), bid("b", 5), bid("c", 5), bid("d", 5)];
        let results = determine_results(bids.iter(), 3);
        assert_eq!(results.winners, vec![bid("a", 10)]);
        assert_eq!(results.tied, vec![bid("b", 5), bid("c", 5), bid("d", 5)]);
        assert_eq!(results.rolled, 0);
    }

    #[test]
    fn unmet_need_is_rolled() {
        let bids = [bid("a", 10)];
        let results = determine_results(bids.iter(), 2);
        assert_eq!(results.winners, vec![bid("a", 10)]);
        assert!(results.tied.is_empty());
        assert_eq!(results.rolled, 1);
    }

    #[test]
    fn no_bids_roll_the_entire_quantity() {
        let results = determine_results(std::iter::empty(), 1);
        assert!(results.winners.is_empty());
        assert!(results.tied.is_empty());
        assert_eq!(results.rolled, 1);
    }

    #[test]
    fn zero_quantity_reports_the_top_group_as_tied() {
        let bids = [bid("a", 10), bid("b", 5)];
        let results = determine_results(bids.iter(), 0);
        assert!(results.winners.is_empty());
        assert_eq!(results.tied, vec![bid("a", 10)]);
        assert_eq!(results.rolled, 0);
    }

    #[test]
    fn duplicate_bidder_bids_are_not_deduplicated() {
        let bids = [bid("a", 10), bid("a", 8), bid("b", 6)];
        let results = determine_results(bids.iter(), 2);
        assert_eq!(results.winners, vec![bid("a", 10), bid("a", 8)]);
    }

    #[test]
    fn computing_results_does_not_disturb_the_bids() {
        let bids: BTreeSet<_> = [bid("a", 10), bid("b", 10), bid("c", 5)].into();
        let before = bids.clone();
        let first = determine_results(bids.iter(), 2);
        let second = determine_results(bids.iter(), 2);
        assert_eq!(first, second);
        assert_eq!(bids, before);
    }

    #[test]
    fn highest_bid_per_bidder_keeps_one_bid_each() {
        let bids = [bid("a", 10), bid("a", 8), bid("b", 6)];
        let highest = highest_bid_per_bidder(bids.iter());
        assert_eq!(highest, vec![&bid("a", 10), &bid("b", 6)]);
    }

    #[test]
    fn results_render_as_a_single_chat_line() {
        let results = AuctionResults {
            winners: vec![bid("a", 45), bid("b", 45)],
            tied: vec![],
            rolled: 1,
        };
        assert_eq!(
            results.to_string(),
            "Winners: a (45), b (45) | Tied: none | Rolled: 1"
        );

        let results = AuctionResults {
            winners: vec![],
            tied: vec![bid("a", 10), bid("b", 10)],
            rolled: 0,
        };
        assert_eq!(
            results.to_string(),
            "Winners: none | Tied: a (10), b (10) | Rolled: 0"
        );
    }
}

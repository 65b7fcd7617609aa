//! Coordination of auctions across the configured channels.

use {
    super::auction::{AuctionItem, Channel, RunningAuction, Status},
    crate::infra::observe,
    chrono::{DateTime, TimeDelta, Utc},
    indexmap::IndexMap,
    rand::seq::SliceRandom,
    std::collections::VecDeque,
    winner_selection::{AuctionResults, Bid, Bidder},
};

const NOT_AN_AUCTION_CHANNEL: &str = "This isn't an auction channel. Try Again.";
const NO_ACTIVE_AUCTION: &str = "There isn't an active auction in this channel.";
const BID_CLOSED: &str =
    "This auction has already closed and is waiting on an officer to accept the results.";
const BID_STOPPED: &str = "This auction has been stopped and is not accepting bids at the moment.";
const ACCEPT_NOT_FINISHED: &str = "This auction has not finished and cannot be accepted yet.";
const REOPEN_NOT_FINISHED: &str = "This auction has not finished and cannot be reopened yet.";
const RESULTS_CHANGED: &str =
    "This auction has not been accepted because the results have changed since it closed.";

/// Statuses each guarded operation refuses to act on, paired with the
/// rejection sent back to the caller.
const BID_FORBIDDEN: &[(Status, &str)] = &[
    (Status::Finished, BID_CLOSED),
    (Status::Stopped, BID_STOPPED),
];
const ACCEPT_FORBIDDEN: &[(Status, &str)] = &[
    (Status::Running, ACCEPT_NOT_FINISHED),
    (Status::Stopped, ACCEPT_NOT_FINISHED),
];
const REOPEN_FORBIDDEN: &[(Status, &str)] = &[
    (Status::Running, REOPEN_NOT_FINISHED),
    (Status::Stopped, REOPEN_NOT_FINISHED),
];

/// An outbound notification produced by an operation. Resolving the channel
/// to a concrete chat destination and the actual sending are the message
/// sink's job.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub channel: Channel,
    pub content: String,
    /// Hidden messages go privately to the invoking member instead of the
    /// whole channel.
    pub hidden: bool,
}

impl Message {
    fn hidden(channel: &Channel, content: impl Into<String>) -> Self {
        Self {
            channel: channel.clone(),
            content: content.into(),
            hidden: true,
        }
    }

    fn broadcast(channel: &Channel, content: impl Into<String>) -> Self {
        Self {
            channel: channel.clone(),
            content: content.into(),
            hidden: false,
        }
    }
}

/// Behavior of the auctioneer, fixed at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// The channels that may host auctions.
    pub channels: Vec<Channel>,
    /// Count only each bidder's highest bid when computing results.
    pub highest_bid_only: bool,
    /// Return a channel to the idle pool once its results are accepted.
    pub release_channel_on_accept: bool,
}

/// Runs every auction across the configured channels.
///
/// Holds no synchronization of its own. The run loop owns the auctioneer
/// and serializes all operations, including the periodic tick, on a single
/// task.
pub struct Auctioneer {
    pub(crate) config: Config,
    /// Items waiting for a free channel, oldest first.
    pub(crate) pending_items: VecDeque<AuctionItem>,
    /// One slot per configured channel, in configuration order.
    pub(crate) channels: IndexMap<Channel, Option<RunningAuction>>,
}

impl Auctioneer {
    pub fn new(config: Config) -> Self {
        let channels = config
            .channels
            .iter()
            .map(|channel| (channel.clone(), None))
            .collect();
        Self {
            config,
            pending_items: VecDeque::new(),
            channels,
        }
    }

    /// Queues an item for the next free channel. The item starts selling on
    /// the first tick that finds a channel for it.
    pub fn add(&mut self, item: AuctionItem) {
        observe::item_queued(&item);
        self.pending_items.push_back(item);
    }

    /// Places a bid on the auction running in the given channel.
    pub fn bid(
        &mut self,
        channel: &Channel,
        bidder: Bidder,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Vec<Message> {
        let auction = match Self::checked_auction(&mut self.channels, channel, BID_FORBIDDEN) {
            Ok(auction) => auction,
            Err(rejection) => return vec![rejection],
        };

        let bid = Bid { bidder, amount };
        observe::bid_placed(channel, &bid);
        auction.bids.insert(bid.clone());
        // An exact duplicate collapses in the set but still counts as
        // activity for the timing rules.
        auction.last_bid = Some(now);

        vec![
            Message::hidden(channel, "Bid Accepted!"),
            Message::broadcast(channel, format!("{} has bid {}", bid.bidder, bid.amount)),
        ]
    }

    /// Accepts the results of a finished auction, handing them to the
    /// channel for the payout. With `force`, accepts even when the results
    /// have drifted from the ones computed at closing.
    pub fn accept(&mut self, channel: &Channel, force: bool) -> Vec<Message> {
        let auction = match Self::checked_auction(&mut self.channels, channel, ACCEPT_FORBIDDEN) {
            Ok(auction) => auction,
            Err(rejection) => return vec![rejection],
        };

        // Computing the results again catches any drift in the bid set
        // since the auction closed. Accepting drifted results requires
        // force.
        let results = Self::results(&self.config, auction);
        if !force && auction.results.as_ref() != Some(&results) {
            observe::command_rejected(channel, "ResultsChanged");
            return vec![Message::hidden(channel, RESULTS_CHANGED)];
        }

        observe::auction_accepted(channel, &auction.item, &results);
        let messages = vec![
            Message::hidden(channel, "Auction Accepted"),
            Message::broadcast(channel, format!("Auction Accepted: {results}")),
        ];
        if self.config.release_channel_on_accept {
            self.channels.insert(channel.clone(), None);
        }
        messages
    }

    /// Restarts a finished auction for another full run, keeping the bids
    /// placed so far.
    pub fn reopen(&mut self, channel: &Channel, now: DateTime<Utc>) -> Vec<Message> {
        let auction = match Self::checked_auction(&mut self.channels, channel, REOPEN_FORBIDDEN) {
            Ok(auction) => auction,
            Err(rejection) => return vec![rejection],
        };

        auction.reopen(now);
        observe::auction_reopened(channel, &auction.item);
        vec![
            Message::hidden(channel, "Reopening Bidding"),
            Message::broadcast(
                channel,
                format!(
                    "Reopening Bids for {}, ending in {}",
                    auction.item.description(),
                    humanize(auction.time_left(now)),
                ),
            ),
        ]
    }

    /// The periodic driver step: closes auctions whose time ran out and
    /// posts standing updates for the ones that stayed quiet too long.
    pub fn run(&mut self, now: DateTime<Utc>) -> Vec<Message> {
        let mut messages = Vec::new();
        for (channel, slot) in &mut self.channels {
            let Some(auction) = slot else {
                continue;
            };

            // Closing is checked first so that an auction never posts an
            // update and closes on the same tick.
            if auction.status == Status::Running && auction.time_left(now).is_zero() {
                let results = Self::results(&self.config, auction);
                observe::auction_closed(channel, &auction.item, &results);
                messages.push(Message::broadcast(
                    channel,
                    format!("Auction Closed. Results: {results}"),
                ));
                auction.close(results);
            }

            if auction.needs_update(now) {
                auction.last_updated = Some(now);
                let results = Self::results(&self.config, auction);
                messages.push(Message::broadcast(
                    channel,
                    format!(
                        "This is an update for {} ending in {}.\nResults: {results}",
                        auction.item.description(),
                        humanize(auction.time_left(now)),
                    ),
                ));
            }
        }
        messages
    }

    /// Starts pending items in idle channels, pairing the oldest item with
    /// a randomly chosen channel, until either runs out.
    pub fn next(&mut self, now: DateTime<Utc>) -> Vec<Message> {
        let mut rng = rand::thread_rng();
        let mut messages = Vec::new();
        while !self.pending_items.is_empty() {
            let idle: Vec<_> = self
                .channels
                .iter()
                .filter(|(_, slot)| slot.is_none())
                .map(|(channel, _)| channel.clone())
                .collect();
            let Some(channel) = idle.choose(&mut rng).cloned() else {
                break;
            };
            let Some(item) = self.pending_items.pop_front() else {
                break;
            };

            let auction = RunningAuction::new(item, now);
            observe::auction_started(&channel, &auction.item);
            messages.push(Message::broadcast(
                &channel,
                format!(
                    "Starting Bid for {} by {}, ending in {}",
                    auction.item.description(),
                    auction.item.added_by,
                    humanize(auction.time_left(now)),
                ),
            ));
            self.channels.insert(channel, Some(auction));
        }
        messages
    }

    /// Runs the guards shared by the member facing operations: the channel
    /// must be configured, its slot must hold an auction, and the auction
    /// must not be in a forbidden status. The first failing guard rejects
    /// the operation, leaving all state untouched.
    fn checked_auction<'a>(
        channels: &'a mut IndexMap<Channel, Option<RunningAuction>>,
        channel: &Channel,
        forbidden: &[(Status, &'static str)],
    ) -> Result<&'a mut RunningAuction, Message> {
        match channels.get_mut(channel) {
            None => {
                observe::command_rejected(channel, "UnknownChannel");
                Err(Message::hidden(channel, NOT_AN_AUCTION_CHANNEL))
            }
            Some(None) => {
                observe::command_rejected(channel, "NoActiveAuction");
                Err(Message::hidden(channel, NO_ACTIVE_AUCTION))
            }
            Some(Some(auction)) => {
                match forbidden
                    .iter()
                    .find(|(status, _)| *status == auction.status)
                {
                    Some((_, rejection)) => {
                        observe::command_rejected(channel, "WrongStatus");
                        Err(Message::hidden(channel, *rejection))
                    }
                    None => Ok(auction),
                }
            }
        }
    }

    /// Computes the results an auction would have right now, honoring the
    /// configured bid filtering.
    fn results(config: &Config, auction: &RunningAuction) -> AuctionResults {
        if config.highest_bid_only {
            let highest = winner_selection::highest_bid_per_bidder(auction.bids.iter());
            winner_selection::determine_results(highest.into_iter(), auction.item.quantity)
        } else {
            winner_selection::determine_results(auction.bids.iter(), auction.item.quantity)
        }
    }
}

/// Renders a remaining time for channel messages, rounded down to whole
/// seconds.
fn humanize(time_left: TimeDelta) -> String {
    let seconds = u64::try_from(time_left.num_seconds()).unwrap_or_default();
    humantime::format_duration(std::time::Duration::from_secs(seconds)).to_string()
}

//! Full auction runs on a scripted clock, asserting the exact message
//! traffic a channel would see.

use {
    crate::domain::{AuctionItem, Auctioneer, Channel, Message, Status, auctioneer::Config},
    chrono::{DateTime, TimeDelta, Utc},
};

fn config() -> Config {
    Config {
        channels: vec!["auction-house".into()],
        highest_bid_only: false,
        release_channel_on_accept: false,
    }
}

fn start() -> DateTime<Utc> {
    "2021-06-05T20:00:00Z".parse().unwrap()
}

fn at(seconds: i64) -> DateTime<Utc> {
    start() + TimeDelta::seconds(seconds)
}

fn broadcast(content: &str) -> Message {
    Message {
        channel: "auction-house".into(),
        content: content.to_string(),
        hidden: false,
    }
}

fn hidden(content: &str) -> Message {
    Message {
        channel: "auction-house".into(),
        content: content.to_string(),
        hidden: true,
    }
}

#[test]
fn auction_lifecycle_from_queue_to_acceptance() {
    let mut auctioneer = Auctioneer::new(config());
    let channel = Channel::from("auction-house");

    auctioneer.add(AuctionItem::new("Girdle of Valor", 1, "quartermaster").unwrap());
    assert_eq!(auctioneer.next(start()), vec![broadcast(
        "Starting Bid for Girdle of Valor by quartermaster, ending in 1m 30s"
    )]);

    // Nothing to do until the auction has been quiet for over 30 seconds.
    assert_eq!(auctioneer.run(at(5)), vec![]);
    assert_eq!(auctioneer.run(at(31)), vec![broadcast(
        "This is an update for Girdle of Valor ending in 59s.\nResults: Winners: none | Tied: \
         none | Rolled: 1"
    )]);

    assert_eq!(
        auctioneer.bid(&channel, "ashara".into(), 25, at(40)),
        vec![hidden("Bid Accepted!"), broadcast("ashara has bid 25")]
    );

    // Quiet spell after the bid is too short for another update.
    assert_eq!(auctioneer.run(at(45)), vec![]);
    assert_eq!(auctioneer.run(at(62)), vec![broadcast(
        "This is an update for Girdle of Valor ending in 28s.\nResults: Winners: ashara (25) | \
         Tied: none | Rolled: 0"
    )]);

    assert_eq!(auctioneer.run(at(89)), vec![]);
    assert_eq!(auctioneer.run(at(90)), vec![broadcast(
        "Auction Closed. Results: Winners: ashara (25) | Tied: none | Rolled: 0"
    )]);

    // Late bids bounce off the closed auction.
    assert_eq!(
        auctioneer.bid(&channel, "belrand".into(), 40, at(91)),
        vec![hidden(
            "This auction has already closed and is waiting on an officer to accept the results."
        )]
    );

    assert_eq!(auctioneer.accept(&channel, false), vec![
        hidden("Auction Accepted"),
        broadcast("Auction Accepted: Winners: ashara (25) | Tied: none | Rolled: 0"),
    ]);

    // The channel stays occupied until an officer clears it, so queued
    // items keep waiting.
    auctioneer.add(AuctionItem::new("Orb of Command", 1, "quartermaster").unwrap());
    assert_eq!(auctioneer.next(at(95)), vec![]);
}

#[test]
fn reopened_auction_runs_again_with_preserved_bids() {
    let mut auctioneer = Auctioneer::new(config());
    let channel = Channel::from("auction-house");

    auctioneer.add(AuctionItem::new("Girdle of Valor", 1, "quartermaster").unwrap());
    auctioneer.next(start());
    auctioneer.bid(&channel, "ashara".into(), 25, at(40));
    auctioneer.run(at(62));
    auctioneer.run(at(90));

    assert_eq!(auctioneer.reopen(&channel, at(100)), vec![
        hidden("Reopening Bidding"),
        broadcast("Reopening Bids for Girdle of Valor, ending in 1m 30s"),
    ]);

    // The earlier bid still counts, and a matching bid now ties.
    auctioneer.bid(&channel, "belrand".into(), 25, at(105));
    assert_eq!(auctioneer.run(at(140)), vec![broadcast(
        "This is an update for Girdle of Valor ending in 50s.\nResults: Winners: none | Tied: \
         ashara (25), belrand (25) | Rolled: 0"
    )]);

    assert_eq!(auctioneer.run(at(190)), vec![broadcast(
        "Auction Closed. Results: Winners: none | Tied: ashara (25), belrand (25) | Rolled: 0"
    )]);

    assert_eq!(auctioneer.accept(&channel, false), vec![
        hidden("Auction Accepted"),
        broadcast("Auction Accepted: Winners: none | Tied: ashara (25), belrand (25) | Rolled: 0"),
    ]);
}

#[test]
fn stopped_auction_blocks_every_operation_but_keeps_its_state() {
    let mut auctioneer = Auctioneer::new(config());
    let channel = Channel::from("auction-house");

    auctioneer.add(AuctionItem::new("Girdle of Valor", 1, "quartermaster").unwrap());
    auctioneer.next(start());
    auctioneer.bid(&channel, "ashara".into(), 25, at(40));

    auctioneer.channels[0].as_mut().unwrap().status = Status::Stopped;

    assert_eq!(
        auctioneer.bid(&channel, "belrand".into(), 40, at(50)),
        vec![hidden(
            "This auction has been stopped and is not accepting bids at the moment."
        )]
    );
    assert_eq!(auctioneer.accept(&channel, false), vec![hidden(
        "This auction has not finished and cannot be accepted yet."
    )]);
    assert_eq!(auctioneer.reopen(&channel, at(60)), vec![hidden(
        "This auction has not finished and cannot be reopened yet."
    )]);

    // Stopped auctions neither update nor close.
    assert_eq!(auctioneer.run(at(300)), vec![]);
    assert_eq!(auctioneer.channels[0].as_ref().unwrap().bids.len(), 1);
}

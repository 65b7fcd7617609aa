pub mod auction;
pub mod auctioneer;

pub use {
    auction::{AuctionItem, Channel, RunningAuction, Status},
    auctioneer::{Auctioneer, Message},
    winner_selection::{AuctionResults, Bid, Bidder},
};

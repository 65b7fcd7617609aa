pub mod file;

use {crate::domain, std::time::Duration};

/// Static configuration of the auction service.
#[derive(Clone, Debug)]
pub struct Config {
    /// How often the run loop progresses the auctions.
    pub tick_interval: Duration,
    /// Behavior of the auctioneer itself.
    pub auctioneer: domain::auctioneer::Config,
}

/// Metrics for the auction service.
#[derive(Debug, Clone, prometheus_metric_storage::MetricStorage)]
pub struct Metrics {
    /// Auctions started, by channel.
    #[metric(labels("channel"))]
    pub auctions_started: prometheus::IntCounterVec,

    /// Auctions closed by the timing rules, by channel.
    #[metric(labels("channel"))]
    pub auctions_closed: prometheus::IntCounterVec,

    /// Auction results accepted, by channel.
    #[metric(labels("channel"))]
    pub auctions_accepted: prometheus::IntCounterVec,

    /// Auctions reopened for more bidding, by channel.
    #[metric(labels("channel"))]
    pub auctions_reopened: prometheus::IntCounterVec,

    /// Bids placed, by channel.
    #[metric(labels("channel"))]
    pub bids: prometheus::IntCounterVec,

    /// Operations refused by a guard, by reason.
    #[metric(labels("reason"))]
    pub rejections: prometheus::IntCounterVec,

    /// Items waiting for a free channel.
    pub pending_items: prometheus::IntGauge,

    /// Channels currently hosting an auction.
    pub running_auctions: prometheus::IntGauge,
}

/// Get the metrics instance.
pub fn get() -> &'static Metrics {
    Metrics::instance(observe::metrics::get_storage_registry())
        .expect("unexpected error getting metrics instance")
}

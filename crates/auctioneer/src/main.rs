#[tokio::main]
async fn main() {
    auctioneer::start(std::env::args()).await;
}

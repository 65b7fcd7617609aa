use {
    crate::domain,
    serde::Deserialize,
    std::{path::Path, time::Duration},
    tokio::fs,
};

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// The channels that may host auctions.
    channels: Vec<String>,

    /// How often the run loop progresses the auctions.
    #[serde(with = "humantime_serde", default = "default_tick_interval")]
    tick_interval: Duration,

    /// Count only each bidder's highest bid when computing results.
    #[serde(default)]
    highest_bid_only: bool,

    /// Return a channel to the idle pool once its results are accepted.
    #[serde(default)]
    release_channel_on_accept: bool,
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(5)
}

/// Load the auctioneer configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> super::Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    let config = toml::de::from_str::<Config>(&data)
        .unwrap_or_else(|e| panic!("TOML syntax error while reading {path:?}: {e:?}"));
    assert!(
        !config.channels.is_empty(),
        "invalid configuration: at least one auction channel is required"
    );

    super::Config {
        tick_interval: config.tick_interval,
        auctioneer: domain::auctioneer::Config {
            channels: config.channels.into_iter().map(Into::into).collect(),
            highest_bid_only: config.highest_bid_only,
            release_channel_on_accept: config.release_channel_on_accept,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config = toml::de::from_str::<Config>(
            r#"
            channels = ["auction-house", "auction-annex"]
            tick-interval = "2s"
            highest-bid-only = true
            release-channel-on-accept = true
            "#,
        )
        .unwrap();

        assert_eq!(config.channels, vec!["auction-house", "auction-annex"]);
        assert_eq!(config.tick_interval, Duration::from_secs(2));
        assert!(config.highest_bid_only);
        assert!(config.release_channel_on_accept);
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let config = toml::de::from_str::<Config>(
            r#"
            channels = ["auction-house"]
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert!(!config.highest_bid_only);
        assert!(!config.release_channel_on_accept);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(
            toml::de::from_str::<Config>(
                r#"
                channels = ["auction-house"]
                tick-seconds = 5
                "#,
            )
            .is_err()
        );
    }
}

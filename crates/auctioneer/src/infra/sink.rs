use {crate::domain::Message, anyhow::Result};

/// Delivers outbound messages to their destination.
///
/// The auction core only names the channel. Resolving it to a concrete chat
/// destination, platform specific formatting of hidden replies, and the
/// actual sending all live behind this trait. Failures must not feed back
/// into the auction state; the run loop logs them and moves on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, message: &Message) -> Result<()>;
}

/// Sink that writes messages to the service logs. Stands in for a chat
/// gateway in deployments that embed none.
pub struct TracingSink;

#[async_trait::async_trait]
impl MessageSink for TracingSink {
    async fn deliver(&self, message: &Message) -> Result<()> {
        tracing::info!(
            channel = %message.channel,
            hidden = message.hidden,
            content = %message.content,
            "delivering message"
        );
        Ok(())
    }
}

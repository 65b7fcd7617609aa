use {
    crate::{
        domain::{AuctionItem, Auctioneer, Bidder, Channel, Message},
        infra::{self, observe, sink::MessageSink},
        run::Liveness,
    },
    std::{sync::Arc, time::Duration},
    tokio::{sync::mpsc, time::MissedTickBehavior},
};

/// An operation submitted into the run loop. Each maps to one auctioneer
/// call; any resulting messages go out through the sink.
#[derive(Clone, Debug)]
pub enum Command {
    /// Queue an item for the next free channel.
    AddItem(AuctionItem),
    /// Place a bid on the auction running in the channel.
    Bid {
        channel: Channel,
        bidder: Bidder,
        amount: u64,
    },
    /// Accept the results of the finished auction in the channel.
    Accept { channel: Channel, force: bool },
    /// Restart the finished auction in the channel.
    Reopen { channel: Channel },
}

/// Submits commands into the run loop from other tasks, such as a chat
/// gateway binding. Cheap to clone.
#[derive(Clone)]
pub struct Handle(mpsc::UnboundedSender<Command>);

impl Handle {
    pub fn send(&self, command: Command) {
        if self.0.send(command).is_err() {
            tracing::warn!("run loop is gone, dropping command");
        }
    }
}

/// The single task that owns the auctioneer. Commands and the periodic tick
/// are serialized here, so the auction state needs no locking.
pub struct RunLoop {
    auctioneer: Auctioneer,
    sink: Arc<dyn MessageSink>,
    tick_interval: Duration,
    liveness: Arc<Liveness>,
    commands: mpsc::UnboundedReceiver<Command>,
    handle: Handle,
}

impl RunLoop {
    pub fn new(
        auctioneer: Auctioneer,
        sink: Arc<dyn MessageSink>,
        tick_interval: Duration,
        liveness: Arc<Liveness>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            auctioneer,
            sink,
            tick_interval,
            liveness,
            commands: receiver,
            handle: Handle(sender),
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    pub async fn run_forever(mut self) -> ! {
        let mut ticks = tokio::time::interval(self.tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticks.tick() => self.single_tick().await,
                command = self.commands.recv() => match command {
                    Some(command) => self.process_command(command).await,
                    // We hold a sender ourselves, so the channel never
                    // closes.
                    None => unreachable!(),
                },
            }
        }
    }

    /// Progresses all auctions once: times out the ones that are due, posts
    /// standing updates, and starts pending items in idle channels.
    async fn single_tick(&mut self) {
        let now = infra::time::now();
        let messages = self.auctioneer.run(now);
        self.deliver(messages).await;
        let messages = self.auctioneer.next(now);
        self.deliver(messages).await;

        observe::queue_status(
            self.auctioneer.pending_items.len(),
            self.auctioneer
                .channels
                .values()
                .filter(|slot| slot.is_some())
                .count(),
        );
        self.liveness.tick();
    }

    async fn process_command(&mut self, command: Command) {
        let now = infra::time::now();
        let messages = match command {
            Command::AddItem(item) => {
                self.auctioneer.add(item);
                vec![]
            }
            Command::Bid {
                channel,
                bidder,
                amount,
            } => self.auctioneer.bid(&channel, bidder, amount, now),
            Command::Accept { channel, force } => self.auctioneer.accept(&channel, force),
            Command::Reopen { channel } => self.auctioneer.reopen(&channel, now),
        };
        self.deliver(messages).await;
    }

    async fn deliver(&self, messages: Vec<Message>) {
        for message in messages {
            if let Err(err) = self.sink.deliver(&message).await {
                observe::delivery_failed(&err, &message);
            }
        }
    }
}

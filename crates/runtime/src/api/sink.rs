//! Asynchronous hand-off of decided commands.
//!
//! Deciding is synchronous CPU work; delivering the result is not. The
//! dispatcher hands each tick's [`CommandBatch`] to a [`CommandSink`] and
//! never waits on the network itself. Retries and partial failures belong to
//! the sink implementation.
use async_trait::async_trait;
use game_core::CommandBatch;
use tokio::sync::mpsc;

use super::errors::{Result, RuntimeError};

/// Destination for the commands of one tick.
///
/// Different implementations can handle:
/// - Sending batches to the game server
/// - Queueing them for another task
/// - Collecting them in tests
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Accepts the batch of one tick.
    ///
    /// # Returns
    /// An error if the batch can no longer be delivered
    async fn send(&self, batch: CommandBatch) -> Result<()>;
}

/// Sink forwarding batches into a bounded tokio channel.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    sender: mpsc::Sender<CommandBatch>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its batches arrive on.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<CommandBatch>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl CommandSink for ChannelSink {
    async fn send(&self, batch: CommandBatch) -> Result<()> {
        self.sender
            .send(batch)
            .await
            .map_err(|_| RuntimeError::SinkClosed)
    }
}

/// A sink that drops every batch.
/// Useful for dry runs.
pub struct NullSink;

#[async_trait]
impl CommandSink for NullSink {
    async fn send(&self, batch: CommandBatch) -> Result<()> {
        tracing::trace!("Dropping {} commands of tick {}", batch.len(), batch.tick.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ActorId, Command, Position, Tick};

    #[tokio::test]
    async fn channel_sink_delivers_in_order() {
        let (sink, mut receiver) = ChannelSink::new(4);
        let mut first = CommandBatch::new(Tick(1));
        first.insert(ActorId::new("m"), Command::move_to(Position::new(1, 1)));

        sink.send(first.clone()).await.unwrap();
        sink.send(CommandBatch::new(Tick(2))).await.unwrap();

        assert_eq!(receiver.recv().await, Some(first));
        assert_eq!(receiver.recv().await.map(|b| b.tick), Some(Tick(2)));
    }

    #[tokio::test]
    async fn closed_channel_is_reported() {
        let (sink, receiver) = ChannelSink::new(1);
        drop(receiver);

        let err = sink.send(CommandBatch::new(Tick(1))).await.unwrap_err();
        assert!(matches!(err, RuntimeError::SinkClosed));
    }
}

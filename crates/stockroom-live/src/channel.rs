//! Push channels.
//!
//! A channel is identified by a [`ChannelId`] handed out by the registry and
//! backed by a [`ChannelSink`]. The registry owns the sink; dropping it
//! closes the channel.

use std::fmt;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::registry::Registry;

/// A serialized event, shared between all channels of one fan-out pass.
pub type Payload = Arc<str>;

/// Opaque channel handle. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

/// A single failed write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel closed by peer")]
    Closed,

    #[error("write failed: {0}")]
    Write(String),
}

/// The writable end of a push channel.
///
/// Writes must not block: the registry calls them while holding its
/// membership lock.
pub trait ChannelSink: Send + Sync {
    /// Push one serialized event.
    fn write(&self, payload: &Payload) -> Result<(), ChannelError>;

    /// Whether the peer is already known to be gone.
    fn is_closed(&self) -> bool;
}

/// Sink feeding an in-process stream, used for HTTP event streams.
pub struct StreamSink {
    tx: mpsc::UnboundedSender<Payload>,
}

impl StreamSink {
    pub fn new(tx: mpsc::UnboundedSender<Payload>) -> Self {
        Self { tx }
    }
}

impl ChannelSink for StreamSink {
    fn write(&self, payload: &Payload) -> Result<(), ChannelError> {
        self.tx
            .send(Arc::clone(payload))
            .map_err(|_| ChannelError::Closed)
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Reading end of a channel opened with [`Registry::subscribe`].
///
/// Yields serialized events until the registry drops the channel. Dropping
/// the subscription is the transport close signal: the channel leaves the
/// registry immediately.
pub struct Subscription {
    id: ChannelId,
    rx: mpsc::UnboundedReceiver<Payload>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(
        id: ChannelId,
        rx: mpsc::UnboundedReceiver<Payload>,
        registry: &Arc<Registry>,
    ) -> Self {
        Self {
            id,
            rx,
            registry: Arc::downgrade(registry),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }
}

impl Stream for Subscription {
    type Item = Payload;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(self.id) {
                debug!(channel_id = %self.id, members = registry.len(), "Subscriber disconnected");
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_sink_reports_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = StreamSink::new(tx);
        let payload: Payload = Arc::from("{}");

        assert!(!sink.is_closed());
        assert!(sink.write(&payload).is_ok());

        drop(rx);
        assert!(sink.is_closed());
        assert_eq!(sink.write(&payload), Err(ChannelError::Closed));
    }

    #[test]
    fn test_channel_id_display() {
        assert_eq!(ChannelId::new(7).to_string(), "ch-7");
    }
}

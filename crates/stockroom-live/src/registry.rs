//! Subscriber registry.
//!
//! Owns every open push channel. Membership changes only through
//! [`Registry::admit`] and [`Registry::remove`]; fan-out passes prune failed
//! channels through the same removal path after they finish iterating.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::channel::{ChannelId, ChannelSink, Payload, StreamSink, Subscription};
use crate::error::{LiveError, LiveResult};
use crate::event::Event;

/// Outcome of [`Registry::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The channel joined and received its first heartbeat.
    Admitted,
    /// The id was already a member; nothing changed.
    Duplicate,
    /// The first heartbeat could not be written, so the channel was dropped.
    Dropped,
}

/// Result of one pass over the membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FanOut {
    pub delivered: usize,
    pub pruned: usize,
}

#[derive(Default)]
struct Members {
    sinks: HashMap<ChannelId, Box<dyn ChannelSink>>,
    shut_down: bool,
}

/// The live set of open channels.
pub struct Registry {
    members: Mutex<Members>,
    next_id: AtomicU64,
    max_channels: Option<usize>,
    heartbeat: Payload,
}

impl Registry {
    /// Create a registry with no ceiling on membership.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create a registry that rejects admissions beyond `max_channels`.
    pub fn with_limit(max_channels: Option<usize>) -> Self {
        let heartbeat = serde_json::to_string(&Event::heartbeat())
            .unwrap_or_else(|_| r#"{"type":"heartbeat"}"#.to_string());
        Self {
            members: Mutex::new(Members::default()),
            next_id: AtomicU64::new(1),
            max_channels,
            heartbeat: Arc::from(heartbeat),
        }
    }

    fn members(&self) -> MutexGuard<'_, Members> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate a fresh channel handle.
    pub fn next_channel_id(&self) -> ChannelId {
        ChannelId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Add a channel and send it one heartbeat right away.
    pub fn admit(&self, id: ChannelId, sink: Box<dyn ChannelSink>) -> LiveResult<Admission> {
        let mut members = self.members();
        if members.shut_down {
            return Err(LiveError::ShutDown);
        }
        if members.sinks.contains_key(&id) {
            debug!(channel_id = %id, "Channel already registered");
            return Ok(Admission::Duplicate);
        }
        if let Some(limit) = self.max_channels {
            if members.sinks.len() >= limit {
                warn!(channel_id = %id, limit, "Rejecting channel, subscriber limit reached");
                return Err(LiveError::Capacity { limit });
            }
        }

        if let Err(err) = sink.write(&self.heartbeat) {
            debug!(channel_id = %id, error = %err, "Initial heartbeat failed, channel dropped");
            return Ok(Admission::Dropped);
        }

        members.sinks.insert(id, sink);
        info!(channel_id = %id, members = members.sinks.len(), "Channel admitted");
        Ok(Admission::Admitted)
    }

    /// Open a channel backed by an in-process stream.
    ///
    /// The returned [`Subscription`] yields the initial heartbeat followed by
    /// every event broadcast while it stays registered.
    pub fn subscribe(self: &Arc<Self>) -> LiveResult<Subscription> {
        let id = self.next_channel_id();
        let (tx, rx) = mpsc::unbounded_channel();
        self.admit(id, Box::new(StreamSink::new(tx)))?;
        Ok(Subscription::new(id, rx, self))
    }

    /// Drop a channel. Returns `false` if it was not a member.
    pub fn remove(&self, id: ChannelId) -> bool {
        let mut members = self.members();
        let removed = members.sinks.remove(&id).is_some();
        if removed {
            debug!(channel_id = %id, members = members.sinks.len(), "Channel removed");
        }
        removed
    }

    pub fn contains(&self, id: ChannelId) -> bool {
        self.members().sinks.contains_key(&id)
    }

    /// Number of open channels.
    pub fn len(&self) -> usize {
        self.members().sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_shut_down(&self) -> bool {
        self.members().shut_down
    }

    /// Send a heartbeat to every channel. Returns how many were pruned.
    pub fn keep_alive(&self) -> usize {
        let FanOut { delivered, pruned } = self.fan_out(&self.heartbeat);
        debug!(delivered, pruned, "Keep-alive pass");
        pruned
    }

    /// Close every channel and refuse further admissions.
    ///
    /// Returns the number of channels drained.
    pub fn shutdown(&self) -> usize {
        let mut members = self.members();
        members.shut_down = true;
        let drained = members.sinks.len();
        members.sinks.clear();
        info!(drained, "Registry shut down");
        drained
    }

    /// Write `payload` to every member, then drop the ones that failed.
    ///
    /// Closed sinks are skipped without a write and dropped as well.
    pub(crate) fn fan_out(&self, payload: &Payload) -> FanOut {
        let mut members = self.members();
        let mut failed = Vec::new();
        let mut delivered = 0;

        for (id, sink) in &members.sinks {
            if sink.is_closed() {
                failed.push(*id);
                continue;
            }
            match sink.write(payload) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    debug!(channel_id = %id, error = %err, "Write failed, dropping channel");
                    failed.push(*id);
                }
            }
        }

        for id in &failed {
            members.sinks.remove(id);
        }

        FanOut {
            delivered,
            pruned: failed.len(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

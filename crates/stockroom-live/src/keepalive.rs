//! Shared keep-alive loop.
//!
//! One ticking task per registry writes a heartbeat to every open channel,
//! which keeps idle connections open and reclaims the ones whose peer went
//! away without closing cleanly.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::registry::Registry;

pub const DEFAULT_KEEPALIVE_PERIOD: Duration = Duration::from_secs(30);

/// Handle to a running keep-alive loop. The loop stops when this is dropped.
pub struct KeepAlive {
    handle: JoinHandle<()>,
}

impl KeepAlive {
    /// Start heartbeating `registry` every `period`.
    ///
    /// The first heartbeat goes out one full period after start; admission
    /// already sends one to each new channel.
    pub fn spawn(registry: &Arc<Registry>, period: Duration) -> Self {
        let registry = Arc::downgrade(registry);
        let handle = tokio::spawn(run(registry, period));
        info!(period_secs = period.as_secs_f64(), "Keep-alive loop started");
        Self { handle }
    }

    /// Stop the loop.
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(registry: Weak<Registry>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(registry) = registry.upgrade() else {
            break;
        };
        if registry.is_shut_down() {
            break;
        }
        let pruned = registry.keep_alive();
        if pruned > 0 {
            debug!(pruned, members = registry.len(), "Keep-alive reclaimed dead channels");
        }
    }

    debug!("Keep-alive loop exited");
}

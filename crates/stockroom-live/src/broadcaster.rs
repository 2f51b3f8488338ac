//! Event broadcaster.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::channel::Payload;
use crate::registry::{FanOut, Registry};

/// Pushes events to every channel in a [`Registry`].
///
/// Delivery is fire-and-forget: the caller never learns which channels
/// received an event, and channels that fail are dropped from the registry.
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<Registry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Serialize `event` once and write it to every current member.
    pub fn broadcast<E: Serialize + ?Sized>(&self, event: &E) {
        let payload: Payload = match serde_json::to_string(event) {
            Ok(json) => Arc::from(json),
            Err(err) => {
                warn!(error = %err, "Dropping event that failed to serialize");
                return;
            }
        };

        let FanOut { delivered, pruned } = self.registry.fan_out(&payload);
        debug!(event = %payload, delivered, pruned, "Broadcast event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::testing::RecordingSink;
    use crate::event::Event;
    use futures::StreamExt;
    use std::sync::atomic::Ordering;

    const HEARTBEAT: &str = r#"{"type":"heartbeat"}"#;

    fn setup() -> (Arc<Registry>, Broadcaster) {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        (registry, broadcaster)
    }

    #[test]
    fn test_fan_out_reaches_every_channel() {
        let (registry, broadcaster) = setup();
        let sinks: Vec<RecordingSink> = (0..5).map(|_| RecordingSink::default()).collect();
        for sink in &sinks {
            registry.admit(registry.next_channel_id(), sink.boxed()).unwrap();
        }

        broadcaster.broadcast(&Event::new("sale").with("amount", 42));

        for sink in &sinks {
            assert_eq!(
                sink.writes(),
                vec![HEARTBEAT.to_string(), r#"{"type":"sale","amount":42}"#.to_string()]
            );
        }
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_failing_channel_is_isolated() {
        let (registry, broadcaster) = setup();
        let a = RecordingSink::default();
        let b = RecordingSink::default();
        let c = RecordingSink::default();
        let (id_a, id_b, id_c) = (
            registry.next_channel_id(),
            registry.next_channel_id(),
            registry.next_channel_id(),
        );
        registry.admit(id_a, a.boxed()).unwrap();
        registry.admit(id_b, b.boxed()).unwrap();
        registry.admit(id_c, c.boxed()).unwrap();

        b.fail.store(true, Ordering::SeqCst);
        broadcaster.broadcast(&Event::new("sale"));

        assert_eq!(a.writes().len(), 2);
        assert_eq!(c.writes().len(), 2);
        assert!(registry.contains(id_a));
        assert!(!registry.contains(id_b));
        assert!(registry.contains(id_c));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_removed_channel_is_not_written() {
        let (registry, broadcaster) = setup();
        let sink = RecordingSink::default();
        let id = registry.next_channel_id();
        registry.admit(id, sink.boxed()).unwrap();

        registry.remove(id);
        broadcaster.broadcast(&Event::new("sale"));

        assert_eq!(sink.writes(), vec![HEARTBEAT.to_string()]);
    }

    #[test]
    fn test_closed_channel_is_skipped_and_pruned() {
        let (registry, broadcaster) = setup();
        let sink = RecordingSink::default();
        registry.admit(registry.next_channel_id(), sink.boxed()).unwrap();

        sink.closed.store(true, Ordering::SeqCst);
        broadcaster.broadcast(&Event::new("sale"));

        assert_eq!(sink.writes().len(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_events_arrive_in_broadcast_order() {
        let (registry, broadcaster) = setup();
        let sinks: Vec<RecordingSink> = (0..3).map(|_| RecordingSink::default()).collect();
        for sink in &sinks {
            registry.admit(registry.next_channel_id(), sink.boxed()).unwrap();
        }

        broadcaster.broadcast(&Event::new("sale").with("seq", 1));
        broadcaster.broadcast(&Event::new("sale").with("seq", 2));

        for sink in &sinks {
            let writes = sink.writes();
            assert_eq!(writes[1], r#"{"type":"sale","seq":1}"#);
            assert_eq!(writes[2], r#"{"type":"sale","seq":2}"#);
        }
    }

    #[test]
    fn test_broadcast_with_no_subscribers() {
        let (registry, broadcaster) = setup();
        broadcaster.broadcast(&Event::new("sale"));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_scenario() {
        let (registry, broadcaster) = setup();

        let mut a = registry.subscribe().unwrap();
        assert_eq!(a.next().await.as_deref(), Some(HEARTBEAT));
        assert_eq!(registry.len(), 1);

        let mut b = registry.subscribe().unwrap();
        assert_eq!(b.next().await.as_deref(), Some(HEARTBEAT));
        assert_eq!(registry.len(), 2);

        broadcaster.broadcast(&Event::new("sale").with("amount", 42));
        assert_eq!(a.next().await.as_deref(), Some(r#"{"type":"sale","amount":42}"#));
        assert_eq!(b.next().await.as_deref(), Some(r#"{"type":"sale","amount":42}"#));

        drop(b);
        broadcaster.broadcast(&Event::new("sale").with("amount", 7));
        assert_eq!(a.next().await.as_deref(), Some(r#"{"type":"sale","amount":7}"#));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_resubscribe_gets_fresh_channel() {
        let (registry, broadcaster) = setup();
        let first = registry.subscribe().unwrap();
        let first_id = first.id();
        drop(first);

        let mut second = registry.subscribe().unwrap();
        assert_ne!(second.id(), first_id);
        assert_eq!(second.next().await.as_deref(), Some(HEARTBEAT));

        broadcaster.broadcast(&Event::new("sale"));
        assert_eq!(second.next().await.as_deref(), Some(r#"{"type":"sale"}"#));
        assert!(!registry.contains(first_id));
    }
}

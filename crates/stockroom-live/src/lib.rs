//! Stockroom live updates
//!
//! Process-local push fan-out for dashboard clients: a registry of open
//! channels, a broadcaster that writes one event to all of them, and a
//! shared keep-alive loop that detects dead connections.

pub mod broadcaster;
pub mod channel;
pub mod error;
pub mod event;
pub mod keepalive;
pub mod registry;

pub use broadcaster::Broadcaster;
pub use channel::{ChannelError, ChannelId, ChannelSink, Payload, StreamSink, Subscription};
pub use error::{LiveError, LiveResult};
pub use event::Event;
pub use keepalive::{KeepAlive, DEFAULT_KEEPALIVE_PERIOD};
pub use registry::{Admission, Registry};

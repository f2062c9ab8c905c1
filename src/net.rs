//! Peer event boundary
//!
//! The engine is transport-agnostic: it emits typed outbound events to a
//! sink and replays the same typed events arriving from a source. How the
//! bytes travel (peer-to-peer link, relay server, local loopback) is the
//! transport implementation's concern.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Events exchanged between two peer instances.
///
/// Wire shape is tagged JSON, e.g. `{"type":"move","x":1,"y":2,"z":0}`.
/// No other message kinds are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteEvent {
    /// Opponent placed a stone
    Move { x: u8, y: u8, z: u8 },
    /// Opponent performed an undo
    Undo,
    /// Opponent started a new game with the same configuration
    Reset,
}

impl RemoteEvent {
    /// Serialize to the wire shape.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a wire message; `None` for anything malformed or unknown.
    /// Callers ignore such messages and keep the connection open.
    pub fn decode(raw: &str) -> Option<RemoteEvent> {
        serde_json::from_str(raw).ok()
    }
}

/// Outbound event sink.
///
/// The session calls `send` for every genuine local action that the remote
/// peer must replay. Delivery of *inbound* events is the host's job: it
/// feeds them to `GameSession::handle_message`.
pub trait Transport {
    fn send(&mut self, event: &RemoteEvent);
}

/// Channel-backed loopback transport.
///
/// Events sent by one session surface on the paired receiver. Used as the
/// test harness and as a template for real peer links.
pub struct ChannelTransport {
    tx: Sender<RemoteEvent>,
}

impl ChannelTransport {
    /// Create a transport plus the receiver that observes its sends.
    pub fn pair() -> (Self, Receiver<RemoteEvent>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, event: &RemoteEvent) {
        // A disconnected peer is not an engine error; the event is dropped
        let _ = self.tx.send(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_wire_shape() {
        let event = RemoteEvent::Move { x: 1, y: 2, z: 0 };
        let json = event.encode().unwrap();
        assert_eq!(json, r#"{"type":"move","x":1,"y":2,"z":0}"#);
        assert_eq!(RemoteEvent::decode(&json), Some(event));
    }

    #[test]
    fn test_unit_events_round_trip() {
        for event in [RemoteEvent::Undo, RemoteEvent::Reset] {
            let json = event.encode().unwrap();
            assert_eq!(RemoteEvent::decode(&json), Some(event));
        }
    }

    #[test]
    fn test_unknown_kind_is_ignored() {
        assert_eq!(RemoteEvent::decode(r#"{"type":"chat","text":"hi"}"#), None);
        assert_eq!(RemoteEvent::decode("not json at all"), None);
        assert_eq!(RemoteEvent::decode(r#"{"type":"move","x":1}"#), None);
    }

    #[test]
    fn test_channel_transport_delivers() {
        let (mut transport, rx) = ChannelTransport::pair();
        transport.send(&RemoteEvent::Reset);
        assert_eq!(rx.recv().unwrap(), RemoteEvent::Reset);
    }

    #[test]
    fn test_send_after_peer_drop_is_silent() {
        let (mut transport, rx) = ChannelTransport::pair();
        drop(rx);
        transport.send(&RemoteEvent::Undo);
    }
}

//! Session struct definition
//!
//! Represents one connected client: identity label, current room,
//! and the outbox channel drained by that connection's write task.

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::types::{RoomName, SessionId};

/// Default display name for sessions that never set one
pub const DEFAULT_NAME: &str = "Anonymous";

/// Per-connection session state
///
/// Exactly one per live connection, owned by the registry and mutated
/// only while the shared state lock is held. The outbox sender performs
/// no I/O, so it is safe to use inside a critical section.
#[derive(Debug)]
pub struct Session {
    /// Unique identifier for this session
    pub id: SessionId,
    /// Peer address, the stable identifier used by kick/ban
    pub addr: String,
    /// Display name (unauthenticated label)
    pub name: String,
    /// Current room, None until a successful join/create
    pub room: Option<RoomName>,
    /// Server → connection line channel
    outbox: mpsc::UnboundedSender<String>,
}

impl Session {
    /// Create a new session with the default display name and no room
    pub fn new(id: SessionId, addr: String, outbox: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id,
            addr,
            name: DEFAULT_NAME.to_string(),
            room: None,
            outbox,
        }
    }

    /// Queue a line for delivery to this session's connection
    ///
    /// Returns an error if the outbox is closed, which means the
    /// connection's write task has already exited.
    pub fn send(&self, line: impl Into<String>) -> Result<(), SendError> {
        self.outbox
            .send(line.into())
            .map_err(|_| SendError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = Session::new(SessionId::new(), "127.0.0.1:9000".to_string(), tx);

        assert_eq!(session.name, DEFAULT_NAME);
        assert!(session.room.is_none());
    }

    #[test]
    fn test_session_send() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = Session::new(SessionId::new(), "127.0.0.1:9000".to_string(), tx);

        session.send("hello\n").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "hello\n");
    }

    #[test]
    fn test_session_send_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session::new(SessionId::new(), "127.0.0.1:9000".to_string(), tx);

        drop(rx);
        assert!(session.send("hello\n").is_err());
    }
}

//! Broadcast router
//!
//! The single serialized point of fan-out delivery. Producers enqueue
//! finished room lines with `publish` (non-blocking, unbounded queue);
//! one consumer task dequeues in FIFO order and hands each message to
//! the shared state for delivery, so messages for the same room reach
//! members in publish order and dead members are pruned in one place.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::state::SharedState;
use crate::types::RoomName;

/// A rendered line addressed to every current member of a room
#[derive(Debug)]
pub struct Outbound {
    pub room: RoomName,
    pub line: String,
}

/// Cloneable publish handle for the router queue
#[derive(Debug, Clone)]
pub struct Router {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl Router {
    /// Create the router queue, returning the publish handle and the
    /// receiver that `run` consumes
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a line for fan-out; never blocks
    ///
    /// A send failure means the router task is gone, which only happens
    /// during shutdown, so it is ignored.
    pub fn publish(&self, room: RoomName, line: String) {
        let _ = self.tx.send(Outbound { room, line });
    }
}

/// Run the fan-out loop until every publish handle is dropped
pub async fn run(state: SharedState, mut rx: mpsc::UnboundedReceiver<Outbound>) {
    info!("Broadcast router started");

    while let Some(msg) = rx.recv().await {
        debug!("Delivering to room {}", msg.room);
        state.lock().await.deliver(&msg.room, &msg.line);
    }

    info!("Broadcast router shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_enqueues_fifo() {
        let (router, mut rx) = Router::channel();

        router.publish(RoomName::new("x"), "first\n".to_string());
        router.publish(RoomName::new("x"), "second\n".to_string());

        assert_eq!(rx.try_recv().unwrap().line, "first\n");
        assert_eq!(rx.try_recv().unwrap().line, "second\n");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_publish_after_consumer_gone_is_silent() {
        let (router, rx) = Router::channel();
        drop(rx);

        // Must not panic
        router.publish(RoomName::new("x"), "late\n".to_string());
    }
}

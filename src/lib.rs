//! Multi-Room Line-Chat Relay Library
//!
//! A multi-room, text-line chat relay over TCP. Clients join or create
//! named rooms and exchange newline-delimited messages that the server
//! fans out to every member of the same room. An operator console can
//! inspect connections and rooms and forcibly kick or ban addresses.
//!
//! # Features
//! - Line-oriented protocol: `/join`, `/create`, `/help`, bare chat text
//! - Named rooms with ordered membership and join/leave notices
//! - Single broadcast router task serializing per-room fan-out
//! - Address bans checked at connect time and at every join/create
//! - Operator console: list-clients, list-rooms, stats, kick, ban
//!
//! # Architecture
//! One task per connection (plus a write task draining that session's
//! outbox), one router task consuming the broadcast queue, and one
//! console task. All shared state lives in `ChatState` behind a single
//! `Mutex`; no critical section performs I/O, so fan-out order within a
//! room equals publish order while slow sockets never stall the lock.
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use chat_relay::{handle_connection, router, ChatState, Router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:3334").await.unwrap();
//!     let (publish, queue) = Router::channel();
//!     let state = ChatState::shared(publish);
//!
//!     tokio::spawn(router::run(state.clone(), queue));
//!
//!     while let Ok((stream, addr)) = listener.accept().await {
//!         let state = state.clone();
//!         tokio::spawn(handle_connection(stream, addr.to_string(), state));
//!     }
//! }
//! ```

pub mod ban;
pub mod command;
pub mod console;
pub mod error;
pub mod handler;
pub mod message;
pub mod registry;
pub mod room;
pub mod router;
pub mod session;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use ban::BanList;
pub use command::Command;
pub use error::{ChatError, SendError};
pub use handler::handle_connection;
pub use registry::{Registry, SessionInfo};
pub use room::RoomDirectory;
pub use router::{Outbound, Router};
pub use session::Session;
pub use state::{ChatState, RoomInfo, SharedState, Stats};
pub use types::{RoomName, SessionId};

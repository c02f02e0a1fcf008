//! Error types for the relay
//!
//! Defines user-facing chat errors and message send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Relay errors
///
/// Covers both fatal errors (connection termination) and user-facing
/// errors whose Display text is written back to the requesting
/// connection as a single line.
#[derive(Debug, Error)]
pub enum ChatError {
    /// IO error on the connection's own stream (fatal for that session)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Join target does not exist
    #[error("Room {0} does not exist. Use /create [room_name] to create a new room.")]
    RoomNotFound(String),

    /// Create target already exists
    #[error("Room {0} already exists. Use /join [room_name] to join the room.")]
    RoomAlreadyExists(String),

    /// Requester's address is on the ban list
    #[error("You are banned from the chat.")]
    Banned,

    /// Unrecognized slash command
    #[error("Unknown command. Type /help for a list of commands.")]
    UnknownCommand,

    /// Command missing its required argument
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Chat line sent before joining a room
    #[error("You must join a room first using /join [room_name] or create a room using /create [room_name].")]
    NotInRoom,
}

/// Message send errors
///
/// Occurs when sending to a session whose outbox has been closed.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}

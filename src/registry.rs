//! Session registry
//!
//! The authoritative mapping of live connections to sessions. Owned by
//! `ChatState`; every method is called with the shared lock held.

use std::collections::HashMap;

use crate::session::Session;
use crate::types::{RoomName, SessionId};

/// Point-in-time copy of a session's observable fields
///
/// Returned by `snapshot` so moderation and stats reporting can format
/// output without holding the state lock.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: SessionId,
    pub addr: String,
    pub name: String,
    pub room: Option<RoomName>,
}

/// All connected sessions, keyed by id
#[derive(Debug, Default)]
pub struct Registry {
    sessions: HashMap<SessionId, Session>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session; its key set mirrors the set of open connections
    pub fn register(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Remove and return a session; None if already removed
    pub fn unregister(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Find a session by its peer address (moderation targets by address)
    pub fn find_by_addr(&self, addr: &str) -> Option<SessionId> {
        self.sessions
            .values()
            .find(|s| s.addr == addr)
            .map(|s| s.id)
    }

    /// Copy of every session's observable fields
    pub fn snapshot(&self) -> Vec<SessionInfo> {
        self.sessions
            .values()
            .map(|s| SessionInfo {
                id: s.id,
                addr: s.addr.clone(),
                name: s.name.clone(),
                room: s.room.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

//! Shared relay state
//!
//! `ChatState` encapsulates the session registry, the room directory,
//! and the ban list behind atomic, intention-revealing operations.
//! Callers hold `Arc<Mutex<ChatState>>` and never touch the inner maps,
//! so every check-then-act sequence happens inside one critical
//! section. No operation awaits or performs I/O while the lock is held;
//! outbound lines go to session outboxes and the router queue, both of
//! which are non-blocking.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::ban::BanList;
use crate::error::ChatError;
use crate::message::{self, Notice};
use crate::registry::{Registry, SessionInfo};
use crate::room::RoomDirectory;
use crate::router::Router;
use crate::session::Session;
use crate::types::{RoomName, SessionId};

/// The one lock guarding all relay state
pub type SharedState = Arc<Mutex<ChatState>>;

/// A room with its members' addresses, for the console
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub name: RoomName,
    pub members: Vec<String>,
}

/// Point-in-time server counters
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub clients: usize,
    pub rooms: usize,
    pub banned: usize,
}

/// Registry + room directory + ban list as one unit
pub struct ChatState {
    registry: Registry,
    rooms: RoomDirectory,
    bans: BanList,
    router: Router,
}

impl ChatState {
    pub fn new(router: Router) -> Self {
        Self {
            registry: Registry::new(),
            rooms: RoomDirectory::new(),
            bans: BanList::new(),
            router,
        }
    }

    /// Wrap a fresh state in the shared lock
    pub fn shared(router: Router) -> SharedState {
        Arc::new(Mutex::new(Self::new(router)))
    }

    /// Admit a new connection: ban check and registration as one step
    ///
    /// A banned address is never registered.
    pub fn admit(&mut self, session: Session) -> Result<(), ChatError> {
        if self.bans.is_banned(&session.addr) {
            info!("Rejected banned address {}", session.addr);
            return Err(ChatError::Banned);
        }

        info!("Session {} admitted from {}", session.id, session.addr);
        self.registry.register(session);

        debug!(
            "Total sessions: {}, total rooms: {}",
            self.registry.len(),
            self.rooms.len()
        );
        Ok(())
    }

    /// Handle `/join <room>`
    pub fn join_room(&mut self, id: SessionId, room: RoomName) -> Result<(), ChatError> {
        let Some(session) = self.registry.get(id) else {
            return Ok(());
        };

        if !self.rooms.exists(&room) {
            return Err(ChatError::RoomNotFound(room.0));
        }
        if self.bans.is_banned(&session.addr) {
            return Err(ChatError::Banned);
        }

        info!("Session {} joined room {}", id, room);
        let confirm = format!("Joined room {room}\n");
        self.move_into(id, room, Notice::Joined, confirm);
        Ok(())
    }

    /// Handle `/create <room>`
    pub fn create_room(&mut self, id: SessionId, room: RoomName) -> Result<(), ChatError> {
        let Some(session) = self.registry.get(id) else {
            return Ok(());
        };

        if self.rooms.exists(&room) {
            return Err(ChatError::RoomAlreadyExists(room.0));
        }
        if self.bans.is_banned(&session.addr) {
            return Err(ChatError::Banned);
        }

        self.rooms.create(room.clone())?;
        info!("Session {} created room {}", id, room);

        let confirm = format!("Created and joined room {room}\n");
        self.move_into(id, room, Notice::CreatedAndJoined, confirm);
        Ok(())
    }

    /// Handle a bare chat line: render and publish to the current room
    pub fn chat(&mut self, id: SessionId, text: &str) -> Result<(), ChatError> {
        let Some(session) = self.registry.get(id) else {
            return Ok(());
        };
        let Some(room) = session.room.clone() else {
            return Err(ChatError::NotInRoom);
        };

        let line = message::render_chat(&room, &session.name, text);
        self.router.publish(room, line);
        Ok(())
    }

    /// Clean up a closed connection; idempotent against router pruning
    ///
    /// Leaving a room this way produces a leave-notice, unlike a kick.
    pub fn disconnect(&mut self, id: SessionId) {
        let Some(session) = self.registry.unregister(id) else {
            return;
        };

        info!("Session {} disconnected ({})", id, session.addr);

        if let Some(room) = session.room {
            self.rooms.remove_member(&room, id);
            let notice = message::render_notice(&room, &session.name, Notice::Left);
            self.router.publish(room, notice);
        }
    }

    /// Forcibly remove the session at `addr` from its room
    ///
    /// Silent to the room; the target gets a local notice. The session
    /// stays registered and its connection stays open (source behavior,
    /// see DESIGN.md). Returns false if no session has that address.
    pub fn kick(&mut self, addr: &str) -> bool {
        let Some(id) = self.registry.find_by_addr(addr) else {
            return false;
        };
        let Some(session) = self.registry.get_mut(id) else {
            return false;
        };

        let previous = session.room.take();
        let _ = session.send("You have been kicked from the chat.\n");

        if let Some(room) = previous {
            self.rooms.remove_member(&room, id);
        }

        info!("Kicked session {} ({})", id, addr);
        true
    }

    /// Ban `addr` for the process lifetime, then kick it if connected
    ///
    /// Idempotent; returns whether a live session was kicked.
    pub fn ban(&mut self, addr: &str) -> bool {
        if self.bans.ban(addr) {
            info!("Banned address {}", addr);
        }
        self.kick(addr)
    }

    /// Fan one line out to every current member of `room`
    ///
    /// Called by the router task with the lock held. A member whose
    /// outbox is closed is unregistered and removed from the room before
    /// the next message is processed.
    pub fn deliver(&mut self, room: &RoomName, line: &str) {
        let mut dead = Vec::new();

        for id in self.rooms.members_of(room) {
            match self.registry.get(id) {
                Some(session) => {
                    if session.send(line).is_err() {
                        warn!("Dropping unreachable member {} of room {}", session.addr, room);
                        dead.push(id);
                    }
                }
                None => dead.push(id),
            }
        }

        for id in dead {
            self.registry.unregister(id);
            self.rooms.remove_dead_member(room, id);
        }
    }

    /// Snapshot of every session, safe to format outside the lock
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        self.registry.snapshot()
    }

    /// Snapshot of every room with its members' addresses
    pub fn list_rooms(&self) -> Vec<RoomInfo> {
        self.rooms
            .overview()
            .into_iter()
            .map(|(name, members)| RoomInfo {
                name,
                members: members
                    .iter()
                    .filter_map(|id| self.registry.get(*id).map(|s| s.addr.clone()))
                    .collect(),
            })
            .collect()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            clients: self.registry.len(),
            rooms: self.rooms.len(),
            banned: self.bans.len(),
        }
    }

    /// Move a session into `dest`: atomic leave + append + notices
    ///
    /// The local confirmation is queued on the session's outbox before
    /// the notices are published so the requester sees it first.
    fn move_into(&mut self, id: SessionId, dest: RoomName, notice: Notice, confirm: String) {
        let Some(session) = self.registry.get_mut(id) else {
            return;
        };

        let name = session.name.clone();
        let previous = session.room.replace(dest.clone());
        let _ = session.send(confirm);

        if let Some(old) = previous {
            self.rooms.remove_member(&old, id);
            let leave = message::render_notice(&old, &name, Notice::Left);
            self.router.publish(old, leave);
        }

        self.rooms.insert_member(&dest, id);
        let arrive = message::render_notice(&dest, &name, notice);
        self.router.publish(dest, arrive);
    }
}

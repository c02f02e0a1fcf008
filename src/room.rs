//! Room directory
//!
//! Maps room names to ordered member lists. Rooms persist once created,
//! including when empty; name collisions and missing rooms are reported
//! to the requester, never coerced.

use std::collections::HashMap;

use crate::error::ChatError;
use crate::types::{RoomName, SessionId};

/// Room name → members in insertion order (duplicates impossible)
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomName, Vec<SessionId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, name: &RoomName) -> bool {
        self.rooms.contains_key(name)
    }

    /// Install an empty member set under `name`
    pub fn create(&mut self, name: RoomName) -> Result<(), ChatError> {
        if self.rooms.contains_key(&name) {
            return Err(ChatError::RoomAlreadyExists(name.0));
        }
        self.rooms.insert(name, Vec::new());
        Ok(())
    }

    /// Append a member; no-op if already present or the room is missing
    pub fn insert_member(&mut self, name: &RoomName, id: SessionId) {
        if let Some(members) = self.rooms.get_mut(name) {
            if !members.contains(&id) {
                members.push(id);
            }
        }
    }

    /// Remove a member, preserving the order of the rest; idempotent
    pub fn remove_member(&mut self, name: &RoomName, id: SessionId) {
        if let Some(members) = self.rooms.get_mut(name) {
            members.retain(|m| *m != id);
        }
    }

    /// Router-side removal of a member whose connection is already gone
    ///
    /// No notification is produced; the member cannot receive one.
    pub fn remove_dead_member(&mut self, name: &RoomName, id: SessionId) {
        self.remove_member(name, id);
    }

    /// Ordered snapshot of a room's members for the router to iterate
    pub fn members_of(&self, name: &RoomName) -> Vec<SessionId> {
        self.rooms.get(name).cloned().unwrap_or_default()
    }

    /// Every room with its member list, for the console
    pub fn overview(&self) -> Vec<(RoomName, Vec<SessionId>)> {
        self.rooms
            .iter()
            .map(|(name, members)| (name.clone(), members.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomName {
        RoomName::new(name)
    }

    #[test]
    fn test_create_and_exists() {
        let mut dir = RoomDirectory::new();
        assert!(!dir.exists(&room("lobby")));

        dir.create(room("lobby")).unwrap();
        assert!(dir.exists(&room("lobby")));
        assert!(dir.members_of(&room("lobby")).is_empty());
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut dir = RoomDirectory::new();
        dir.create(room("lobby")).unwrap();

        let err = dir.create(room("lobby")).unwrap_err();
        assert!(matches!(err, ChatError::RoomAlreadyExists(ref n) if n == "lobby"));
        // Member set untouched
        assert!(dir.members_of(&room("lobby")).is_empty());
    }

    #[test]
    fn test_members_keep_insertion_order() {
        let mut dir = RoomDirectory::new();
        dir.create(room("x")).unwrap();

        let a = SessionId::new();
        let b = SessionId::new();
        let c = SessionId::new();
        dir.insert_member(&room("x"), a);
        dir.insert_member(&room("x"), b);
        dir.insert_member(&room("x"), c);

        assert_eq!(dir.members_of(&room("x")), vec![a, b, c]);

        dir.remove_member(&room("x"), b);
        assert_eq!(dir.members_of(&room("x")), vec![a, c]);
    }

    #[test]
    fn test_no_duplicate_members() {
        let mut dir = RoomDirectory::new();
        dir.create(room("x")).unwrap();

        let a = SessionId::new();
        dir.insert_member(&room("x"), a);
        dir.insert_member(&room("x"), a);

        assert_eq!(dir.members_of(&room("x")).len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut dir = RoomDirectory::new();
        dir.create(room("x")).unwrap();

        let a = SessionId::new();
        dir.remove_member(&room("x"), a);
        dir.insert_member(&room("x"), a);
        dir.remove_member(&room("x"), a);
        dir.remove_member(&room("x"), a);

        assert!(dir.members_of(&room("x")).is_empty());
        // Empty rooms persist
        assert!(dir.exists(&room("x")));
    }

    #[test]
    fn test_missing_room_membership_is_noop() {
        let mut dir = RoomDirectory::new();
        let a = SessionId::new();

        dir.insert_member(&room("ghost"), a);
        assert!(!dir.exists(&room("ghost")));
        assert!(dir.members_of(&room("ghost")).is_empty());
    }
}

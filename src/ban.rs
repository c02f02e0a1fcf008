//! Address ban list
//!
//! Bans are keyed by peer address and last for the process lifetime.
//! Backed by a map so a future unban can remove entries.

use std::collections::HashMap;
use std::time::Instant;

/// Record of one banned address
#[derive(Debug)]
pub struct BanRecord {
    pub addr: String,
    pub banned_at: Instant,
}

/// Peer address → ban record
#[derive(Debug, Default)]
pub struct BanList {
    banned: HashMap<String, BanRecord>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_banned(&self, addr: &str) -> bool {
        self.banned.contains_key(addr)
    }

    /// Insert an address; returns false if it was already banned
    pub fn ban(&mut self, addr: &str) -> bool {
        if self.banned.contains_key(addr) {
            return false;
        }
        self.banned.insert(
            addr.to_string(),
            BanRecord {
                addr: addr.to_string(),
                banned_at: Instant::now(),
            },
        );
        true
    }

    pub fn len(&self) -> usize {
        self.banned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banned.is_empty()
    }
}

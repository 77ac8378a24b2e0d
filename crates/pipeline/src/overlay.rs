//! Speculative state for optimistic vote counters.
//!
//! A vote is applied to the displayed record immediately and its delta is
//! remembered here. The next authoritative fetch replaces the records and
//! clears this overlay, so the server's number always wins.
//!
//! Each recorded delta hands out a [`VoteTicket`] stamped with the current
//! epoch. Clearing the overlay starts a new epoch, after which tickets from
//! before the fetch can no longer touch deltas recorded after it.

use std::collections::HashMap;
use std::hash::Hash;

/// Receipt for one speculative delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTicket<K> {
    key: K,
    delta: i64,
    epoch: u64,
}

impl<K> VoteTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Clone)]
pub struct SpeculativeOverlay<K> {
    pending: HashMap<K, i64>,
    epoch: u64,
}

impl<K: Eq + Hash + Clone> SpeculativeOverlay<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            epoch: 0,
        }
    }

    /// Remember a speculative delta.
    pub fn record(&mut self, key: K, delta: i64) -> VoteTicket<K> {
        *self.pending.entry(key.clone()).or_insert(0) += delta;
        VoteTicket {
            key,
            delta,
            epoch: self.epoch,
        }
    }

    /// Whether `ticket` was issued since the last clear.
    pub fn is_current(&self, ticket: &VoteTicket<K>) -> bool {
        ticket.epoch == self.epoch
    }

    /// Undo a delta that the server rejected.
    ///
    /// Returns false for a ticket from an earlier epoch; its delta was
    /// already dropped by an authoritative fetch.
    pub fn retract(&mut self, ticket: &VoteTicket<K>) -> bool {
        self.take(ticket)
    }

    /// Stop tracking a delta the server accepted.
    ///
    /// Returns false for a ticket from an earlier epoch.
    pub fn settle(&mut self, ticket: &VoteTicket<K>) -> bool {
        self.take(ticket)
    }

    fn take(&mut self, ticket: &VoteTicket<K>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let Some(entry) = self.pending.get_mut(&ticket.key) else {
            return false;
        };
        *entry -= ticket.delta;
        if *entry == 0 {
            self.pending.remove(&ticket.key);
        }
        true
    }

    pub fn pending(&self, key: &K) -> i64 {
        self.pending.get(key).copied().unwrap_or(0)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Forget every pending delta and start a new epoch; returns how many
    /// keys were pending.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.epoch += 1;
        count
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for SpeculativeOverlay<K> {
    fn default() -> Self {
        Self::new()
    }
}

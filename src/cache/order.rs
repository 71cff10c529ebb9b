//! Insertion Order Module
//!
//! FIFO bookkeeping for oldest-first eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Queue of keys in the order they were inserted.
///
/// Every insert pushes a `(seq, key)` slot at the back and hands the sequence
/// number to the caller, who stores it on the entry. Removing or replacing a
/// key leaves its old slot in place; the owner tells live slots from stale
/// ones by comparing sequence numbers, and calls [`InsertionOrder::retain`]
/// once stale slots pile up.
///
/// - Front = oldest insertion
/// - Back = newest insertion
#[derive(Debug, Default)]
pub struct InsertionOrder {
    slots: VecDeque<(u64, String)>,
    next_seq: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            slots: VecDeque::new(),
            next_seq: 0,
        }
    }

    // == Push ==
    /// Records an insertion of `key` and returns its sequence number.
    pub fn push(&mut self, key: &str) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.push_back((seq, key.to_string()));
        seq
    }

    // == Pop Oldest ==
    /// Removes and returns the oldest slot, live or stale.
    pub fn pop_oldest(&mut self) -> Option<(u64, String)> {
        self.slots.pop_front()
    }

    // == Retain ==
    /// Keeps only the slots for which `is_live` returns true.
    pub fn retain<F>(&mut self, mut is_live: F)
    where
        F: FnMut(u64, &str) -> bool,
    {
        self.slots.retain(|(seq, key)| is_live(*seq, key));
    }

    // == Clear ==
    /// Drops every slot. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    // == Length ==
    /// Returns the number of slots, stale ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

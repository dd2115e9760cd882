//! FIFO storage for pending events.

use std::collections::VecDeque;

use crate::error::EventError;
use crate::event::Event;

/// Ordered queue of owned events with an optional hard capacity.
///
/// Entries own their source and payload copies outright and are dropped
/// on `pop`-then-dispatch, on `clear`, or when the queue itself is
/// dropped. A capacity of zero means unbounded.
#[derive(Debug)]
pub struct EventQueue {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl EventQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Appends at the tail. Fails only when the capacity cap is reached.
    pub fn push(&mut self, event: Event) -> Result<(), EventError> {
        if self.capacity > 0 && self.entries.len() >= self.capacity {
            return Err(EventError::QueueFull);
        }
        self.entries.push_back(event);
        Ok(())
    }

    /// Removes and returns the head entry, oldest first. O(1).
    pub fn pop(&mut self) -> Option<Event> {
        self.entries.pop_front()
    }

    /// Drops every queued entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

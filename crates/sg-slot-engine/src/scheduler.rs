//! Virtual-time timer queue
//!
//! Every suspension in the engine is a timer carrying a message. Timers
//! are ordered by `(deadline, sequence)`, so equal deadlines fire in the
//! order they were scheduled. Time only moves when the owner pops due
//! timers.
//!
//! Cancelled entries are pruned from the head of the queue whenever a
//! timer is cancelled or popped, so the head is always a live timer.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A fired timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<M> {
    pub id: TimerId,
    pub deadline_ms: u64,
    pub message: M,
}

/// Deterministic single-threaded timer queue
#[derive(Debug)]
pub struct Scheduler<M> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    pending: HashMap<u64, M>,
}

impl<M> Scheduler<M> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            pending: HashMap::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `message` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, message: M) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.queue.push(Reverse((deadline, seq)));
        self.pending.insert(seq, message);
        TimerId(seq)
    }

    /// Cancel a timer; returns its message if it was still pending
    pub fn cancel(&mut self, id: TimerId) -> Option<M> {
        let message = self.pending.remove(&id.0);
        self.discard_cancelled();
        message
    }

    /// Cancel everything; returns how many timers were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.queue.clear();
        dropped
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id.0)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest live timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Pop the earliest live timer if it is due by `until_ms`
    ///
    /// Virtual time jumps to the timer's deadline.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<M>> {
        let Reverse((deadline, seq)) = *self.queue.peek()?;
        if deadline > until_ms {
            return None;
        }
        self.queue.pop();
        let message = self.pending.remove(&seq);
        self.discard_cancelled();
        let message = message?;
        self.now_ms = self.now_ms.max(deadline);
        Some(Fired {
            id: TimerId(seq),
            deadline_ms: deadline,
            message,
        })
    }

    /// Pop the earliest live timer regardless of deadline
    pub fn pop_next(&mut self) -> Option<Fired<M>> {
        self.pop_due(u64::MAX)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, seq))) = self.queue.peek() {
            if self.pending.contains_key(seq) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<M> Default for Scheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

//! Virtual-time task scheduler.
//!
//! Replaces wall-clock timers: tasks are queued against the replicated
//! virtual clock and only run when the host drives the clock forward.
//! Entries are ordered by (due time, insertion sequence), so tasks due at the
//! same instant run in the order they were scheduled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Work the engine can schedule for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Task {
    /// One fixed simulation step.
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    seq: u64,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest queued task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(entry)| entry.due_ms)
    }

    pub fn schedule_at(&mut self, due_ms: u64, task: Task) {
        let entry = Entry {
            due_ms,
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    pub fn schedule_after(&mut self, delay_ms: u64, task: Task) {
        self.schedule_at(self.now_ms + delay_ms, task);
    }

    /// Pop the earliest task due at or before `limit_ms`, moving the clock to its due time.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<Task> {
        let Reverse(entry) = *self.queue.peek()?;
        if entry.due_ms > limit_ms {
            return None;
        }
        self.queue.pop();
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.task)
    }

    /// Pop the earliest task whatever its due time.
    pub fn pop_next(&mut self) -> Option<Task> {
        let due_ms = self.next_due_ms()?;
        self.pop_due(due_ms)
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn advance_clock(&mut self, time_ms: u64) {
        self.now_ms = self.now_ms.max(time_ms);
    }
}

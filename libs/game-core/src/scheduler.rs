//! Virtual-clock timer queue
//!
//! Cancellable one-shot delayed tasks on a millisecond clock owned by the
//! caller. Nothing here sleeps: whoever drives the event loop moves the
//! clock forward with `pop_due` / `advance_to`, which keeps game timing
//! deterministic under test and replay.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timer kinds used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timer {
    /// Periodic market price update
    MarketTick,
    /// Flip a mismatched pair back face down; `generation` names the session
    /// that scheduled it
    MismatchRevert { generation: u64 },
}

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A task whose deadline has been reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub handle: TaskHandle,
    pub deadline_ms: u64,
    pub task: T,
}

/// Queue of delayed tasks ordered by (deadline, scheduling order).
#[derive(Debug, Clone)]
pub struct TimerQueue<T = Timer> {
    now_ms: u64,
    next_id: u64,
    tasks: BTreeMap<(u64, u64), T>,
    deadlines: BTreeMap<u64, u64>,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            tasks: BTreeMap::new(),
            deadlines: BTreeMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.tasks.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        TaskHandle(id)
    }

    /// Cancel a pending task. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.tasks.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock
    /// to its deadline.
    ///
    /// Tasks scheduled while handling a fired task are visible to the next
    /// call, so periodic timers that reschedule themselves fire once per
    /// period inside a long advance.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let (&(deadline, id), _) = self.tasks.iter().next()?;
        if deadline > until_ms {
            return None;
        }
        let task = self.tasks.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now_ms = self.now_ms.max(deadline);
        Some(Fired {
            handle: TaskHandle(id),
            deadline_ms: deadline,
            task,
        })
    }

    /// Fire everything due by `until_ms` and move the clock there.
    pub fn advance_to(&mut self, until_ms: u64) -> Vec<Fired<T>> {
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until_ms) {
            fired.push(task);
        }
        self.now_ms = self.now_ms.max(until_ms);
        fired
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

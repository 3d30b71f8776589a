//! Timer Queue
//!
//! setTimeout/clearTimeout on a virtual clock. The host moves time forward
//! and collects the tasks that came due, in deadline order; tasks sharing a
//! deadline fire in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use nestable_dom::NodeId;

/// Handle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Deferred work the widget schedules for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    /// Clear the inline transform left by a FLIP animation
    ClearAnimation(NodeId),
    /// Finish a drag session once the ghost has travelled home
    Settle,
}

/// Virtual-clock timer queue
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), T>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` from now
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending task; returns it if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.queue.remove(&(deadline, id))
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time until the earliest pending task
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_sub(self.now))
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if deadline > until {
            return None;
        }
        let task = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, task))
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }
}

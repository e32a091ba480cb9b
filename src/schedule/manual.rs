//! Manually advanced clock.

use std::time::Duration;

use super::{Scheduler, TimerId, TimerQueue};

/// Scheduler over a virtual clock that only moves when told to.
///
/// Popping an item moves the clock to that item's due time, so anything the
/// item schedules is measured from the moment it fired.
#[derive(Clone, Debug)]
pub struct VirtualScheduler<T> {
    now: Duration,
    queue: TimerQueue<T>,
}

impl<T> Default for VirtualScheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            queue: TimerQueue::default(),
        }
    }
}

impl<T> VirtualScheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Scheduler<T> for VirtualScheduler<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_after(&mut self, delay: Duration, item: T) -> TimerId {
        self.queue.push(self.now.saturating_add(delay), item)
    }

    fn cancel_all(&mut self) -> usize {
        self.queue.clear()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_due()
    }

    fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (due, item) = self.queue.pop_due(until)?;
        self.now = self.now.max(due);
        Some(item)
    }

    fn catch_up(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

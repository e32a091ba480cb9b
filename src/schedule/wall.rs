//! Real-time clock.

use std::time::{Duration, Instant};

use super::{Scheduler, TimerId, TimerQueue};

/// Scheduler measuring real time elapsed since it was created.
///
/// Nothing is delivered before its due time has actually passed: a `until`
/// ahead of the real clock is capped at [`Scheduler::now`].
#[derive(Clone, Debug)]
pub struct WallClockScheduler<T> {
    origin: Instant,
    queue: TimerQueue<T>,
}

impl<T> Default for WallClockScheduler<T> {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::default(),
        }
    }
}

impl<T> WallClockScheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Scheduler<T> for WallClockScheduler<T> {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_after(&mut self, delay: Duration, item: T) -> TimerId {
        let due = self.now().saturating_add(delay);
        self.queue.push(due, item)
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
        self.queue.pop_due(until.min(self.now())).map(|(_, item)| item)
    }

    fn catch_up(&mut self, _until: Duration) {}

    fn wait_until(&self, deadline: Duration) {
        let remaining = deadline.saturating_sub(self.now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_delay() {
        let mut scheduler = WallClockScheduler::new();
        scheduler.schedule_after(Duration::from_secs(3600), "later");

        assert_eq!(scheduler.pop_due(scheduler.now()), None);
        assert!(scheduler.next_deadline().unwrap() > Duration::from_secs(3500));
    }

    #[test]
    fn test_future_until_is_capped_at_now() {
        let mut scheduler = WallClockScheduler::new();
        scheduler.schedule_after(Duration::from_secs(3600), "later");

        assert_eq!(scheduler.pop_due(Duration::from_secs(7200)), None);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut scheduler = WallClockScheduler::new();
        scheduler.schedule_after(Duration::ZERO, "now");
        assert_eq!(scheduler.pop_due(scheduler.now()), Some("now"));
    }

    #[test]
    fn test_wait_until_reaches_deadline() {
        let mut scheduler = WallClockScheduler::new();
        let deadline = scheduler.now() + Duration::from_millis(5);
        scheduler.schedule_after(Duration::from_millis(5), "tick");

        scheduler.wait_until(deadline);
        assert!(scheduler.now() >= deadline);
        assert_eq!(scheduler.pop_due(deadline), Some("tick"));
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = WallClockScheduler::new();
        scheduler.schedule_after(Duration::ZERO, 1);
        assert_eq!(scheduler.cancel_all(), 1);
        assert_eq!(scheduler.next_deadline(), None);
    }
}

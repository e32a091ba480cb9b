//! Timer scheduling for turn phases.
//!
//! Every phase of a turn ends by scheduling the next transition after a
//! delay. The engine talks to time only through [`Scheduler`], so the same
//! turn logic runs against:
//!
//! - [`VirtualScheduler`]: a manual clock moved forward by the caller. Tests
//!   and benchmarks drive it without sleeping.
//! - [`WallClockScheduler`]: real elapsed time since construction. Items
//!   never come due early, so a real-time driver either sleeps until
//!   [`Scheduler::next_deadline`] and polls, or lets [`Scheduler::wait_until`]
//!   do the sleeping.
//!
//! Both share the same ordering: earliest due time first, ties in scheduling
//! order.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use ular_tangga::schedule::{Scheduler, VirtualScheduler};
//!
//! let mut scheduler = VirtualScheduler::new();
//! scheduler.schedule_after(Duration::from_millis(300), "step");
//! scheduler.schedule_after(Duration::from_millis(100), "reveal");
//!
//! let until = Duration::from_millis(300);
//! assert_eq!(scheduler.pop_due(until), Some("reveal"));
//! assert_eq!(scheduler.pop_due(until), Some("step"));
//! assert_eq!(scheduler.pop_due(until), None);
//! ```

mod manual;
mod wall;

pub use manual::VirtualScheduler;
pub use wall::WallClockScheduler;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled item, unique per scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Delayed delivery of items on a single cooperative thread.
///
/// Times are offsets from the scheduler's own origin.
pub trait Scheduler<T> {
    /// Current time.
    fn now(&self) -> Duration;

    /// Deliver `item` once `delay` has elapsed from [`Scheduler::now`].
    fn schedule_after(&mut self, delay: Duration, item: T) -> TimerId;

    /// Drop every pending item. Returns how many were dropped.
    fn cancel_all(&mut self) -> usize;

    /// Number of pending items.
    fn pending(&self) -> usize;

    /// Due time of the earliest pending item.
    fn next_deadline(&self) -> Option<Duration>;

    /// Remove and return the earliest item due at or before `until`.
    fn pop_due(&mut self, until: Duration) -> Option<T>;

    /// Called once the caller has fired everything due up to `until`.
    ///
    /// Manual clocks jump forward to `until`; real clocks ignore it.
    fn catch_up(&mut self, until: Duration);

    /// Block until `deadline` has been reached. Manual clocks return at once.
    fn wait_until(&self, _deadline: Duration) {}
}

/// Pending items keyed by (due time, scheduling sequence).
#[derive(Clone, Debug)]
struct TimerQueue<T> {
    entries: BTreeMap<(Duration, u64), T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    fn push(&mut self, due: Duration, item: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due, seq), item);
        TimerId(seq)
    }

    fn next_due(&self) -> Option<Duration> {
        self.entries.keys().next().map(|&(due, _)| due)
    }

    fn pop_due(&mut self, until: Duration) -> Option<(Duration, T)> {
        if self.next_due()? > until {
            return None;
        }
        self.entries.pop_first().map(|((due, _), item)| (due, item))
    }

    fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

//! Timeouts and intervals on a host-driven clock.
//!
//! Effects schedule a [`TimerTask`] and receive it back through
//! `Effect::on_timer` when it falls due. The host moves the clock forward with
//! [`Timers::pop_due`] and [`Timers::settle`], so a fired task can cancel
//! other timers before they get a chance to run.

use std::time::Duration;

use vitrine_dom::ElementId;

/// Handle for a scheduled timer. Owned by the effect that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What to do when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Mark a fade element visible after its delay.
    Reveal(ElementId),
    /// Advance a running counter by one step.
    CounterTick(ElementId),
    /// A throttle window closed. Nothing listens for it.
    ThrottleRelease,
    /// A debounced call identified by a caller-chosen key.
    Debounced(u32),
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    task: TimerTask,
}

/// Pending timeouts and intervals.
#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on this clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once after `delay`.
    pub fn set_timeout(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        self.schedule(delay, None, task)
    }

    /// Run `task` every `period` until cancelled.
    pub fn set_interval(&mut self, period: Duration, task: TimerTask) -> TimerId {
        // A zero period would fire forever within one step.
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), task)
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            period,
            task,
        });
        id
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The clock value `delta` from now.
    pub fn deadline(&self, delta: Duration) -> Duration {
        self.now + delta
    }

    /// Fire the earliest timer due at or before `deadline`, moving the clock
    /// to its due time. Ties fire in scheduling order. Intervals are
    /// rescheduled; timeouts are removed.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, TimerTask)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(index, _)| index)?;

        let Entry {
            id,
            due,
            period,
            task,
        } = self.entries[index].clone();
        self.now = self.now.max(due);
        match period {
            Some(period) => self.entries[index].due += period,
            None => {
                self.entries.remove(index);
            }
        }
        Some((id, task))
    }

    /// Move the clock to `deadline` once every due timer has fired.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Fire everything due within `delta` and return it in order. Tasks run
    /// after this returns can no longer cancel timers fired in the same step;
    /// hosts that need that use [`pop_due`](Self::pop_due).
    pub fn advance(&mut self, delta: Duration) -> Vec<(TimerId, TimerTask)> {
        let deadline = self.deadline(delta);
        let mut fired = Vec::new();
        while let Some(next) = self.pop_due(deadline) {
            fired.push(next);
        }
        self.settle(deadline);
        fired
    }
}

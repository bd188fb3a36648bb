//! Helpers shared by several effects and exposed to page scripts.

use std::time::Duration;

use vitrine_core::geometry::{Rect, Size};

use crate::timer::{TimerId, TimerTask, Timers};

/// Whether a viewport-relative box intersects the viewport, with the bottom
/// edge extended by `offset`.
///
/// The box counts once its top is at or above `viewport.height + offset` and
/// its bottom is still below the viewport's top edge.
pub fn is_in_viewport(rect: Rect<f64>, viewport: Size<f64>, offset: f64) -> bool {
    rect.top() <= viewport.height + offset && rect.bottom() > 0.0
}

/// Value of `name` in a query string such as `?utm_source=mail&page=2`.
///
/// Percent-escapes and `+` are decoded. The first occurrence wins.
pub fn url_parameter(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Delays a task until `wait` has passed without another trigger.
///
/// Each trigger cancels the pending timer and schedules a fresh one, so only
/// the last trigger of a burst fires.
#[derive(Debug)]
pub struct Debounce {
    wait: Duration,
    timer: Option<TimerId>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self { wait, timer: None }
    }

    pub fn trigger(&mut self, timers: &mut Timers, task: TimerTask) -> TimerId {
        if let Some(pending) = self.timer.take() {
            timers.cancel(pending);
        }
        let id = timers.set_timeout(self.wait, task);
        self.timer = Some(id);
        id
    }

    /// Call when `fired` comes back from the timers. Returns whether it was
    /// this debounce's timer, releasing it if so.
    pub fn claim(&mut self, fired: TimerId) -> bool {
        if self.timer == Some(fired) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut Timers) {
        if let Some(pending) = self.timer.take() {
            timers.cancel(pending);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }
}

/// Lets a call through at most once per `limit`.
///
/// The first call opens a window and passes. Calls inside the window are
/// folded into a single trailing call, reported by [`release`](Self::release)
/// when the window closes.
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    timer: Option<TimerId>,
    trailing: bool,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            timer: None,
            trailing: false,
        }
    }

    /// Returns true if the caller may run now.
    pub fn try_acquire(&mut self, timers: &mut Timers) -> bool {
        if let Some(window) = self.timer
            && timers.is_pending(window)
        {
            self.trailing = true;
            return false;
        }
        self.open(timers);
        true
    }

    /// Call when `fired` comes back from the timers. Returns true if it closed
    /// this throttle's window with a call held back, which the caller should
    /// run now. That run opens a fresh window.
    pub fn release(&mut self, timers: &mut Timers, fired: TimerId) -> bool {
        if self.timer != Some(fired) {
            return false;
        }
        self.timer = None;
        if std::mem::take(&mut self.trailing) {
            self.open(timers);
            true
        } else {
            false
        }
    }

    fn open(&mut self, timers: &mut Timers) {
        self.timer = Some(timers.set_timeout(self.limit, TimerTask::ThrottleRelease));
    }
}

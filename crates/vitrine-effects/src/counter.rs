use std::time::Duration;

use vitrine_core::alloc::HashMap;
use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::effect::{Effect, EffectContext};
use crate::format::format_grouped;
use crate::timer::{TimerId, TimerTask};
use crate::utils::is_in_viewport;

const COUNTERS: &str = "[data-counter]";
const COUNTED: &str = "counted";

/// Interval between counter steps.
pub const TICK: Duration = Duration::from_millis(16);
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Amount added per tick so that `target` is reached after `duration`.
pub fn increment_for(target: f64, duration: Duration) -> f64 {
    let ticks = duration.as_millis() as f64 / TICK.as_millis() as f64;
    target / ticks
}

/// Leading integer of `raw`, ignoring anything after the digits.
///
/// `"1500+"` reads as 1500 and `"99.5"` as 99.
pub fn parse_target(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Debug, Clone, Copy)]
struct Run {
    timer: TimerId,
    target: f64,
    increment: f64,
    current: f64,
}

/// Counts `[data-counter]` numbers up from zero the first time they are
/// scrolled into view.
#[derive(Debug, Default)]
pub struct CounterAnimation {
    counters: Vec<ElementId>,
    runs: HashMap<ElementId, Run>,
}

impl CounterAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of counters still ticking.
    pub fn running(&self) -> usize {
        self.runs.len()
    }

    /// Start every uncounted counter that intersects the viewport.
    pub fn check(&mut self, cx: &mut EffectContext<'_>) {
        let viewport = cx.page.viewport();
        for &el in &self.counters {
            if cx.page.has_class(el, COUNTED)
                || !is_in_viewport(cx.page.bounding_rect(el), viewport, 0.0)
            {
                continue;
            }
            cx.page.add_class(el, COUNTED);

            let raw = cx.page.attr(el, "data-counter").unwrap_or_default();
            let Some(target) = parse_target(&raw) else {
                tracing::debug!("skipping counter {} with non-numeric target '{}'", el, raw);
                continue;
            };
            let target = target as f64;
            let duration = cx
                .page
                .attr(el, "data-duration")
                .and_then(|ms| ms.trim().parse::<u64>().ok())
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_DURATION);

            tracing::trace!("counting {} to {} over {:?}", el, target, duration);
            let timer = cx.timers.set_interval(TICK, TimerTask::CounterTick(el));
            self.runs.insert(
                el,
                Run {
                    timer,
                    target,
                    increment: increment_for(target, duration),
                    current: 0.0,
                },
            );
        }
    }
}

impl Effect for CounterAnimation {
    fn name(&self) -> &'static str {
        "counter_animation"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        // Counting starts on the first scroll, not at load.
        self.counters = cx.page.query_all(COUNTERS);
        if self.counters.is_empty() {
            tracing::debug!("no counters on page");
        }
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        match event {
            PageEvent::Scroll if !self.counters.is_empty() => {
                self.check(cx);
                EventStatus::handled()
            }
            _ => EventStatus::ignored(),
        }
    }

    fn on_timer(&mut self, cx: &mut EffectContext<'_>, timer: TimerId, task: TimerTask) {
        let TimerTask::CounterTick(el) = task else {
            return;
        };
        let Some(run) = self.runs.get_mut(&el).filter(|run| run.timer == timer) else {
            return;
        };

        run.current += run.increment;
        if run.current >= run.target {
            cx.page.set_text(el, &format_grouped(run.target));
            cx.timers.cancel(timer);
            self.runs.remove(&el);
        } else {
            cx.page.set_text(el, &format_grouped(run.current.floor()));
        }
    }
}

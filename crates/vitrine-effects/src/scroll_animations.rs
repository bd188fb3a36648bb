use std::time::Duration;

use vitrine_core::alloc::HashSet;
use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::effect::{Effect, EffectContext};
use crate::timer::{TimerId, TimerTask};
use crate::utils::is_in_viewport;

const FADE_ELEMENTS: &str = ".fade-in, .fade-in-left, .fade-in-right";
const VISIBLE: &str = "visible";

/// Reveals fade elements as they scroll near the viewport.
///
/// A reveal with a `data-delay` is scheduled once and always lands, even if
/// the element has left the viewport by then.
#[derive(Debug, Default)]
pub struct ScrollAnimations {
    elements: Vec<ElementId>,
    pending: HashSet<ElementId>,
}

impl ScrollAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Reveal every collected element that is now within reach.
    pub fn check(&mut self, cx: &mut EffectContext<'_>) {
        vitrine_core::profiling::profile_function!();
        let viewport = cx.page.viewport();
        for &el in &self.elements {
            if cx.page.has_class(el, VISIBLE) || self.pending.contains(&el) {
                continue;
            }
            if !is_in_viewport(cx.page.bounding_rect(el), viewport, cx.config.animation_offset) {
                continue;
            }

            match data_ms(cx, el, "data-delay").filter(|delay| *delay > 0) {
                Some(delay) => {
                    cx.timers
                        .set_timeout(Duration::from_millis(delay), TimerTask::Reveal(el));
                    self.pending.insert(el);
                }
                None => cx.page.add_class(el, VISIBLE),
            }
        }
    }

    /// Clear every reveal and collect the fade elements again, for content
    /// inserted after startup. Reveals already scheduled still land.
    pub fn reset(&mut self, cx: &mut EffectContext<'_>) {
        for &el in &self.elements {
            cx.page.remove_class(el, VISIBLE);
        }
        self.elements = cx.page.query_all(FADE_ELEMENTS);
        tracing::debug!("reset {} fade elements", self.elements.len());
        self.check(cx);
    }
}

fn data_ms(cx: &EffectContext<'_>, el: ElementId, name: &str) -> Option<u64> {
    let raw = cx.page.attr(el, name)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::debug!("ignoring non-numeric {}='{}' on {}", name, raw, el);
            None
        }
    }
}

impl Effect for ScrollAnimations {
    fn name(&self) -> &'static str {
        "scroll_animations"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        self.elements = cx.page.query_all(FADE_ELEMENTS);
        if self.elements.is_empty() {
            tracing::debug!("no fade elements on page");
            return;
        }
        self.check(cx);
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        match event {
            PageEvent::Scroll | PageEvent::Resize if !self.elements.is_empty() => {
                self.check(cx);
                EventStatus::handled()
            }
            _ => EventStatus::ignored(),
        }
    }

    fn on_timer(&mut self, cx: &mut EffectContext<'_>, _timer: TimerId, task: TimerTask) {
        if let TimerTask::Reveal(el) = task {
            self.pending.remove(&el);
            cx.page.add_class(el, VISIBLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_dom::{MemoryPage, Page};

    use super::*;
    use crate::testing::Harness;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn page_with(attrs: &[(&str, &str)]) -> (MemoryPage, ElementId) {
        let mut page = MemoryPage::new()
            .with_viewport(1280.0, 800.0)
            .with_document_height(4000.0);
        let body = page.body().unwrap();
        let mut builder = page.spawn(body, "div").class("fade-in").layout(1000.0, 50.0);
        for (name, value) in attrs {
            builder = builder.attr(name, value);
        }
        let el = builder.finish();
        (page, el)
    }

    #[test]
    fn test_reveal_window_is_sticky() {
        let (page, el) = page_with(&[]);
        let mut h = Harness::new(page);
        let mut fades = ScrollAnimations::new();
        fades.init(&mut h.cx());
        // top 1000 > 800 + 100
        assert!(!h.page.has_class(el, "visible"));

        h.page.set_scroll_y(100.0);
        fades.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert!(h.page.has_class(el, "visible"));

        h.page.set_scroll_y(3000.0);
        fades.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert!(h.page.has_class(el, "visible"));
    }

    #[test]
    fn test_delay_lands_after_leaving_viewport() {
        let (page, el) = page_with(&[("data-delay", "300")]);
        let mut h = Harness::new(page);
        let mut fades = ScrollAnimations::new();
        fades.init(&mut h.cx());

        h.page.set_scroll_y(500.0);
        fades.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert!(!h.page.has_class(el, "visible"));
        // Repeated checks do not stack timers.
        fades.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert_eq!(h.timers.len(), 1);

        h.page.set_scroll_y(3200.0);
        fades.handle_event(&mut h.cx(), &PageEvent::Scroll);
        h.advance(&mut fades, ms(300));
        assert!(h.page.has_class(el, "visible"));
        assert!(h.timers.is_empty());
    }

    #[test]
    fn test_resize_rechecks() {
        let (page, el) = page_with(&[]);
        let mut h = Harness::new(page);
        let mut fades = ScrollAnimations::new();
        fades.init(&mut h.cx());
        h.page.set_viewport(1280.0, 950.0);
        fades.handle_event(&mut h.cx(), &PageEvent::Resize);
        assert!(h.page.has_class(el, "visible"));
    }

    #[test]
    fn test_reset_collects_new_content() {
        let (page, el) = page_with(&[]);
        let mut h = Harness::new(page);
        let mut fades = ScrollAnimations::new();
        fades.init(&mut h.cx());
        h.page.set_scroll_y(200.0);
        fades.check(&mut h.cx());
        assert!(h.page.has_class(el, "visible"));

        let body = h.page.body().unwrap();
        let late = h.page.spawn(body, "div").class("fade-in").layout(3500.0, 100.0).finish();
        fades.reset(&mut h.cx());
        assert_eq!(fades.elements(), &[el, late]);
        // Still in reach, so the check inside reset reveals it again.
        assert!(h.page.has_class(el, "visible"));
        assert!(!h.page.has_class(late, "visible"));
    }

    #[test]
    fn test_collects_fade_classes() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let left = page.spawn(body, "div").class("fade-in-left").finish();
        let right = page.spawn(body, "div").class("fade-in-right").finish();
        page.spawn(body, "div").class("fade-in-up").finish();
        let mut h = Harness::new(page);
        let mut fades = ScrollAnimations::new();
        fades.init(&mut h.cx());
        assert_eq!(fades.elements(), &[left, right]);
    }

    #[test]
    fn test_empty_page_ignores_events() {
        let mut h = Harness::new(MemoryPage::new());
        let mut fades = ScrollAnimations::new();
        fades.init(&mut h.cx());
        let status = fades.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert!(!status.is_handled());
    }
}

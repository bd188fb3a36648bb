use std::time::Duration;

use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::effect::{Effect, EffectContext};
use crate::timer::{TimerId, TimerTask};
use crate::utils::{Throttle, is_in_viewport};

const LAZY_IMAGES: &str = "img[data-src]";
const DATA_SRC: &str = "data-src";

/// Minimum spacing between viewport checks when polling.
pub const THROTTLE_WINDOW: Duration = Duration::from_millis(200);

/// Which strategy [`LazyLoad`] settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyStrategyKind {
    /// Not initialized yet.
    Inactive,
    Native,
    ViewportPolled,
}

#[derive(Debug)]
enum Strategy {
    Inactive,
    /// The browser defers loading; every source was handed over at init.
    Native,
    /// Sources are swapped in as images reach the viewport.
    ViewportPolled {
        images: Vec<ElementId>,
        throttle: Throttle,
    },
}

/// Swaps `data-src` into `src` for deferred images.
#[derive(Debug)]
pub struct LazyLoad {
    strategy: Strategy,
}

impl Default for LazyLoad {
    fn default() -> Self {
        Self {
            strategy: Strategy::Inactive,
        }
    }
}

impl LazyLoad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(&self) -> LazyStrategyKind {
        match self.strategy {
            Strategy::Inactive => LazyStrategyKind::Inactive,
            Strategy::Native => LazyStrategyKind::Native,
            Strategy::ViewportPolled { .. } => LazyStrategyKind::ViewportPolled,
        }
    }

    /// Every deferred image gets its real source right away, with
    /// `loading="lazy"` left to the browser.
    fn promote_all(cx: &mut EffectContext<'_>) {
        let images = cx.page.query_all(LAZY_IMAGES);
        for &img in &images {
            if let Some(src) = cx.page.attr(img, DATA_SRC) {
                cx.page.set_attr(img, "src", &src);
                cx.page.set_attr(img, "loading", "lazy");
            }
        }
        tracing::debug!("handed {} images to native lazy loading", images.len());
    }

    fn load_visible(cx: &mut EffectContext<'_>, images: &[ElementId]) {
        let viewport = cx.page.viewport();
        for &img in images {
            let Some(src) = cx.page.attr(img, DATA_SRC) else {
                continue;
            };
            if is_in_viewport(cx.page.bounding_rect(img), viewport, 0.0) {
                tracing::trace!("loading {} from {}", img, src);
                cx.page.set_attr(img, "src", &src);
                cx.page.remove_attr(img, DATA_SRC);
            }
        }
    }
}

impl Effect for LazyLoad {
    fn name(&self) -> &'static str {
        "lazy_load"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        if cx.page.supports_native_lazy_loading() {
            Self::promote_all(cx);
            self.strategy = Strategy::Native;
            return;
        }

        let images = cx.page.query_all(LAZY_IMAGES);
        tracing::debug!("polling {} deferred images", images.len());
        Self::load_visible(cx, &images);
        self.strategy = Strategy::ViewportPolled {
            images,
            throttle: Throttle::new(THROTTLE_WINDOW),
        };
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        let Strategy::ViewportPolled { images, throttle } = &mut self.strategy else {
            return EventStatus::ignored();
        };
        if !matches!(event, PageEvent::Scroll | PageEvent::Resize) {
            return EventStatus::ignored();
        }
        if throttle.try_acquire(cx.timers) {
            Self::load_visible(cx, images);
        }
        EventStatus::handled()
    }

    fn on_timer(&mut self, cx: &mut EffectContext<'_>, timer: TimerId, task: TimerTask) {
        let Strategy::ViewportPolled { images, throttle } = &mut self.strategy else {
            return;
        };
        if task == TimerTask::ThrottleRelease && throttle.release(cx.timers, timer) {
            Self::load_visible(cx, images);
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_dom::{MemoryPage, Page};

    use super::*;
    use crate::testing::Harness;

    fn gallery(native: bool) -> (MemoryPage, ElementId, ElementId) {
        let mut page = MemoryPage::new()
            .with_viewport(1280.0, 800.0)
            .with_document_height(4000.0)
            .with_native_lazy_loading(native);
        let body = page.body().unwrap();
        let above = page
            .spawn(body, "img")
            .attr("src", "placeholder.gif")
            .attr("data-src", "hero.jpg")
            .layout(100.0, 300.0)
            .finish();
        let below = page
            .spawn(body, "img")
            .attr("src", "placeholder.gif")
            .attr("data-src", "team.jpg")
            .layout(2000.0, 300.0)
            .finish();
        (page, above, below)
    }

    #[test]
    fn test_native_promotes_everything_at_init() {
        let (page, above, below) = gallery(true);
        let mut h = Harness::new(page);
        let mut lazy = LazyLoad::new();
        lazy.init(&mut h.cx());
        assert_eq!(lazy.strategy(), LazyStrategyKind::Native);
        for (img, src) in [(above, "hero.jpg"), (below, "team.jpg")] {
            assert_eq!(h.page.attr(img, "src").as_deref(), Some(src));
            assert_eq!(h.page.attr(img, "loading").as_deref(), Some("lazy"));
            assert!(h.page.attr(img, "data-src").is_some());
        }
        assert!(!lazy.handle_event(&mut h.cx(), &PageEvent::Scroll).is_handled());
    }

    #[test]
    fn test_fallback_promotes_exactly_once() {
        let (page, above, below) = gallery(false);
        let mut h = Harness::new(page);
        let mut lazy = LazyLoad::new();
        lazy.init(&mut h.cx());
        assert_eq!(lazy.strategy(), LazyStrategyKind::ViewportPolled);

        assert_eq!(h.page.attr(above, "src").as_deref(), Some("hero.jpg"));
        assert_eq!(h.page.attr(above, "data-src"), None);
        assert_eq!(h.page.attr(below, "src").as_deref(), Some("placeholder.gif"));
        assert_eq!(h.page.attr(below, "data-src").as_deref(), Some("team.jpg"));

        h.page.set_scroll_y(1500.0);
        lazy.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert_eq!(h.page.attr(below, "src").as_deref(), Some("team.jpg"));
        assert_eq!(h.page.attr(below, "data-src"), None);

        // Later promotions find nothing left to do.
        h.page.set_attr(below, "src", "swapped.jpg");
        h.advance(&mut lazy, THROTTLE_WINDOW);
        lazy.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert_eq!(h.page.attr(below, "src").as_deref(), Some("swapped.jpg"));
    }

    #[test]
    fn test_checks_are_throttled() {
        let (page, _, below) = gallery(false);
        let mut h = Harness::new(page);
        let mut lazy = LazyLoad::new();
        lazy.init(&mut h.cx());

        // Opens the window while nothing new is visible.
        lazy.handle_event(&mut h.cx(), &PageEvent::Scroll);
        h.page.set_scroll_y(1500.0);
        lazy.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert!(h.page.attr(below, "data-src").is_some());

        // The held-back check runs when the window closes.
        h.advance(&mut lazy, Duration::from_millis(199));
        assert!(h.page.attr(below, "data-src").is_some());
        h.advance(&mut lazy, Duration::from_millis(1));
        assert!(h.page.attr(below, "data-src").is_none());
        assert_eq!(h.page.attr(below, "src").as_deref(), Some("team.jpg"));
    }
}

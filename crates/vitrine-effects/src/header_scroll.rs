use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::effect::{Effect, EffectContext};

const HEADER: &str = ".header";
const SCROLLED: &str = "header--scrolled";
const TRANSPARENT: &str = "header--transparent";
const HIDDEN: &str = "header--hidden";

/// Switches the header between its transparent and scrolled looks.
///
/// With [`Config::header_autohide`](vitrine_core::Config::header_autohide)
/// the header also hides while scrolling down past the threshold.
#[derive(Debug, Default)]
pub struct HeaderScroll {
    header: Option<ElementId>,
    last_scroll_y: f64,
}

impl HeaderScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, cx: &mut EffectContext<'_>) {
        let Some(header) = self.header else {
            return;
        };
        let scroll_y = cx.page.scroll_y();
        let threshold = cx.config.scroll_threshold;

        if scroll_y > threshold {
            cx.page.remove_class(header, TRANSPARENT);
            cx.page.add_class(header, SCROLLED);
        } else {
            cx.page.remove_class(header, SCROLLED);
            cx.page.add_class(header, TRANSPARENT);
        }

        if cx.config.header_autohide {
            if scroll_y > self.last_scroll_y && scroll_y > threshold {
                cx.page.add_class(header, HIDDEN);
            } else {
                cx.page.remove_class(header, HIDDEN);
            }
            self.last_scroll_y = scroll_y;
        }
    }
}

impl Effect for HeaderScroll {
    fn name(&self) -> &'static str {
        "header_scroll"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        self.header = cx.page.query_one(HEADER);
        if self.header.is_none() {
            tracing::debug!("no header on page");
            return;
        }
        self.check(cx);
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        match event {
            PageEvent::Scroll if self.header.is_some() => {
                self.check(cx);
                EventStatus::handled()
            }
            _ => EventStatus::ignored(),
        }
    }
}

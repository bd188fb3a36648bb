use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::animation::{Track, Tween};
use crate::effect::{Effect, EffectContext};

const ANCHOR_LINKS: &str = "a[href^=\"#\"]";
const HEADER: &str = ".header";

/// Header height (px) assumed when the page has no measurable header.
pub const FALLBACK_HEADER_HEIGHT: f64 = 80.0;

/// Scroll position that puts an element at `target_top` just below a fixed
/// header of `header_height`.
pub fn scroll_offset(target_top: f64, header_height: f64) -> f64 {
    let header_height = if header_height > 0.0 {
        header_height
    } else {
        FALLBACK_HEADER_HEIGHT
    };
    target_top - header_height
}

/// Animates in-page anchor navigation.
#[derive(Debug, Default)]
pub struct SmoothScroll {
    links: Vec<ElementId>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll to the first element matching `selector`. Returns false, doing
    /// nothing, when no element matches.
    pub fn scroll_to_element(&self, cx: &mut EffectContext<'_>, selector: &str) -> bool {
        match cx.page.query_one(selector) {
            Some(target) => {
                Self::scroll_to(cx, target);
                true
            }
            None => {
                tracing::debug!("scroll target '{}' not found", selector);
                false
            }
        }
    }

    fn scroll_to(cx: &mut EffectContext<'_>, target: ElementId) {
        let header_height = cx
            .page
            .query_one(HEADER)
            .map(|header| cx.page.outer_height(header))
            .unwrap_or_default();
        let offset = scroll_offset(cx.page.offset_top(target), header_height);
        tracing::trace!("smooth scrolling to {} at {}", target, offset);

        cx.animator.animate(
            Tween::new(Track::ScrollY)
                .from(cx.page.scroll_y())
                .to(offset)
                .duration(cx.config.scroll_duration),
        );
    }
}

impl Effect for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth_scroll"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        self.links = cx.page.query_all(ANCHOR_LINKS);
        tracing::debug!("captured {} anchor links", self.links.len());
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        let PageEvent::Click { target } = *event else {
            return EventStatus::ignored();
        };
        let Some(link) = cx
            .page
            .closest(target, ANCHOR_LINKS)
            .filter(|link| self.links.contains(link))
        else {
            return EventStatus::ignored();
        };
        let Some(href) = cx.page.attr(link, "href") else {
            return EventStatus::ignored();
        };
        if href == "#" {
            return EventStatus::ignored();
        }
        match cx.page.query_one(&href) {
            Some(destination) => {
                Self::scroll_to(cx, destination);
                EventStatus::prevent_default()
            }
            None => EventStatus::ignored(),
        }
    }
}

use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::animation::{Track, Tween};
use crate::effect::{Effect, EffectContext};

const BUTTON: &str = ".back-to-top";

/// Scroll position (px) past which the button shows.
pub const SHOW_AFTER: f64 = 300.0;

const ICON: &str = concat!(
    "<svg width=\"20\" height=\"20\" viewBox=\"0 0 24 24\" fill=\"none\" ",
    "stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\" ",
    "stroke-linejoin=\"round\"><polyline points=\"18 15 12 9 6 15\"></polyline></svg>",
);

const BUTTON_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("bottom", "30px"),
    ("right", "30px"),
    ("width", "50px"),
    ("height", "50px"),
    ("background-color", "#2563eb"),
    ("color", "#fff"),
    ("border", "none"),
    ("border-radius", "50%"),
    ("cursor", "pointer"),
    ("opacity", "0"),
    ("visibility", "hidden"),
    ("transition", "all 0.3s"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("z-index", "999"),
    ("box-shadow", "0 4px 15px rgba(37, 99, 235, 0.3)"),
];

/// Floating button that scrolls the page back to the top.
#[derive(Debug, Default)]
pub struct BackToTop {
    button: Option<ElementId>,
}

impl BackToTop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(&self) -> Option<ElementId> {
        self.button
    }

    fn create_button(cx: &mut EffectContext<'_>) -> Option<ElementId> {
        let body = cx.page.body()?;
        let button = cx.page.create_element("button")?;
        cx.page.add_class(button, "back-to-top");
        cx.page.set_attr(button, "aria-label", "Back to top");
        for (property, value) in BUTTON_STYLE {
            cx.page.set_style(button, property, value);
        }
        cx.page.set_inner_html(button, ICON);
        cx.page.append_child(body, button);
        tracing::debug!("created back-to-top button {}", button);
        Some(button)
    }

    fn update_visibility(cx: &mut EffectContext<'_>, button: ElementId) {
        let (opacity, visibility) = if cx.page.scroll_y() > SHOW_AFTER {
            ("1", "visible")
        } else {
            ("0", "hidden")
        };
        cx.page.set_style(button, "opacity", opacity);
        cx.page.set_style(button, "visibility", visibility);
    }
}

impl Effect for BackToTop {
    fn name(&self) -> &'static str {
        "back_to_top"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        self.button = match cx.page.query_one(BUTTON) {
            Some(existing) => Some(existing),
            None => Self::create_button(cx),
        };
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        let Some(button) = self.button else {
            return EventStatus::ignored();
        };
        match *event {
            PageEvent::Scroll => {
                Self::update_visibility(cx, button);
                EventStatus::handled()
            }
            PageEvent::Click { target } if cx.page.contains(button, target) => {
                cx.animator.animate(
                    Tween::new(Track::ScrollY)
                        .from(cx.page.scroll_y())
                        .to(0.0)
                        .duration(cx.config.scroll_duration),
                );
                EventStatus::handled()
            }
            PageEvent::MouseEnter { target } if target == button => {
                cx.page.set_style(button, "transform", "translateY(-3px)");
                EventStatus::handled()
            }
            PageEvent::MouseLeave { target } if target == button => {
                cx.page.set_style(button, "transform", "translateY(0)");
                EventStatus::handled()
            }
            _ => EventStatus::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use vitrine_dom::{MemoryPage, Page};

    use super::*;
    use crate::testing::Harness;

    fn tall_page() -> MemoryPage {
        MemoryPage::new().with_document_height(5000.0)
    }

    #[test]
    fn test_creates_exactly_one_button() {
        let mut h = Harness::new(tall_page());
        let mut effect = BackToTop::new();
        effect.init(&mut h.cx());
        let button = effect.button().unwrap();
        assert_eq!(h.page.parent(button), h.page.body());
        assert_eq!(h.page.style(button, "opacity").as_deref(), Some("0"));
        assert_eq!(h.page.attr(button, "aria-label").as_deref(), Some("Back to top"));

        // A second init reuses the button already on the page.
        let mut again = BackToTop::new();
        again.init(&mut h.cx());
        assert_eq!(again.button(), Some(button));
        assert_eq!(h.page.query_all(".back-to-top").len(), 1);
    }

    #[test]
    fn test_reuses_existing_button() {
        let mut page = tall_page();
        let body = page.body().unwrap();
        let existing = page.spawn(body, "a").class("back-to-top").finish();
        let mut h = Harness::new(page);
        let mut effect = BackToTop::new();
        effect.init(&mut h.cx());
        assert_eq!(effect.button(), Some(existing));
        assert_eq!(h.page.style(existing, "position"), None);
    }

    #[test]
    fn test_visibility_follows_scroll() {
        let mut h = Harness::new(tall_page());
        let mut effect = BackToTop::new();
        effect.init(&mut h.cx());
        let button = effect.button().unwrap();

        h.page.set_scroll_y(300.0);
        effect.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert_eq!(h.page.style(button, "visibility").as_deref(), Some("hidden"));

        h.page.set_scroll_y(301.0);
        effect.handle_event(&mut h.cx(), &PageEvent::Scroll);
        assert_eq!(h.page.style(button, "opacity").as_deref(), Some("1"));
        assert_eq!(h.page.style(button, "visibility").as_deref(), Some("visible"));
    }

    #[test]
    fn test_click_scrolls_to_top() {
        let mut h = Harness::new(tall_page());
        let mut effect = BackToTop::new();
        effect.init(&mut h.cx());
        let button = effect.button().unwrap();
        h.page.set_scroll_y(2400.0);

        let status = effect.handle_event(&mut h.cx(), &PageEvent::Click { target: button });
        assert!(status.is_handled());
        h.advance(&mut effect, Duration::from_millis(800));
        assert_eq!(h.page.scroll_y(), 0.0);
    }

    #[test]
    fn test_hover_lifts_button() {
        let mut h = Harness::new(tall_page());
        let mut effect = BackToTop::new();
        effect.init(&mut h.cx());
        let button = effect.button().unwrap();

        effect.handle_event(&mut h.cx(), &PageEvent::MouseEnter { target: button });
        assert_eq!(h.page.style(button, "transform").as_deref(), Some("translateY(-3px)"));
        effect.handle_event(&mut h.cx(), &PageEvent::MouseLeave { target: button });
        assert_eq!(h.page.style(button, "transform").as_deref(), Some("translateY(0)"));
    }
}

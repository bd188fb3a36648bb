use std::time::Duration;

use vitrine_core::alloc::HashSet;
use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::animation::{Frame, Track, Tween};
use crate::carousel::{Carousel, CarouselOptions};
use crate::effect::{Effect, EffectContext};

const SLIDER: &str = ".hero__slider";
const SLIDE_CONTENT: &str = ".hero__content";

/// Vertical distance (px) slide content rises while fading in.
pub const RISE_DISTANCE: f64 = 30.0;
pub const FADE_DURATION: Duration = Duration::from_millis(600);

/// Vertical offset for slide content at the given opacity.
pub fn rise_offset(opacity: f64) -> f64 {
    RISE_DISTANCE * (1.0 - opacity)
}

/// Mounts the hero carousel and fades slide content in on every slide change.
pub struct HeroSlider {
    carousel: Option<Box<dyn Carousel>>,
    slider: Option<ElementId>,
    fading: HashSet<ElementId>,
}

impl HeroSlider {
    /// `carousel` is the capability to mount, if the page provides one.
    pub fn new(carousel: Option<Box<dyn Carousel>>) -> Self {
        Self {
            carousel,
            slider: None,
            fading: HashSet::default(),
        }
    }

    /// Whether the carousel was mounted.
    pub fn is_mounted(&self) -> bool {
        self.slider.is_some()
    }

    fn animate_slide(&mut self, cx: &mut EffectContext<'_>, slide: ElementId) {
        for content in cx.page.query_within(slide, SLIDE_CONTENT) {
            cx.page.set_style(content, "opacity", "0");
            cx.page
                .set_style(content, "transform", &format!("translateY({}px)", RISE_DISTANCE));
            cx.animator.animate(
                Tween::new(Track::Opacity(content))
                    .from(0.0)
                    .to(1.0)
                    .duration(FADE_DURATION),
            );
            self.fading.insert(content);
        }
    }
}

impl std::fmt::Debug for HeroSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroSlider")
            .field("carousel", &self.carousel.as_ref().map(|c| c.name()))
            .field("slider", &self.slider)
            .field("fading", &self.fading.len())
            .finish()
    }
}

impl Effect for HeroSlider {
    fn name(&self) -> &'static str {
        "hero_slider"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        let Some(container) = cx.page.query_one(SLIDER) else {
            tracing::debug!("no hero slider on page");
            return;
        };
        let Some(carousel) = self.carousel.as_mut() else {
            tracing::debug!("carousel capability unavailable, hero slider disabled");
            return;
        };

        let options = CarouselOptions::hero(cx.config);
        match carousel.mount(&mut *cx.page, container, &options) {
            Ok(()) => {
                tracing::debug!("mounted {} carousel on {}", carousel.name(), container);
                self.slider = Some(container);
            }
            Err(err) => tracing::warn!("failed to mount {} carousel: {}", carousel.name(), err),
        }
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        let (Some(slider), PageEvent::SlideChanged { slide }) = (self.slider, *event) else {
            return EventStatus::ignored();
        };
        if !cx.page.contains(slider, slide) {
            return EventStatus::ignored();
        }
        tracing::trace!("slide changed to {}", slide);
        self.animate_slide(cx, slide);
        EventStatus::handled()
    }

    fn on_frame(&mut self, cx: &mut EffectContext<'_>, frame: &Frame) {
        let Track::Opacity(content) = frame.track else {
            return;
        };
        if !self.fading.contains(&content) {
            return;
        }
        cx.page.set_style(
            content,
            "transform",
            &format!("translateY({}px)", rise_offset(frame.value)),
        );
        if frame.finished {
            self.fading.remove(&content);
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_dom::{MemoryPage, Page, PageError};

    use super::*;
    use crate::testing::Harness;

    struct StubCarousel {
        fail: bool,
    }

    impl Carousel for StubCarousel {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn mount(
            &mut self,
            page: &mut dyn Page,
            container: ElementId,
            options: &CarouselOptions,
        ) -> Result<(), PageError> {
            if self.fail {
                return Err(PageError::MissingCapability { name: "stub" });
            }
            page.add_class(container, "owl-carousel");
            assert_eq!(options.items, 1);
            Ok(())
        }
    }

    fn slider_page() -> (MemoryPage, ElementId, ElementId, ElementId) {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let slider = page.spawn(body, "div").class("hero__slider").finish();
        let slide = page.spawn(slider, "div").class("slide").finish();
        let content = page.spawn(slide, "div").class("hero__content").finish();
        (page, slider, slide, content)
    }

    #[test]
    fn test_rise_offset() {
        assert_eq!(rise_offset(0.0), 30.0);
        assert_eq!(rise_offset(0.5), 15.0);
        assert_eq!(rise_offset(1.0), 0.0);
    }

    #[test]
    fn test_no_capability_is_noop() {
        let (page, slider, slide, content) = slider_page();
        let mut h = Harness::new(page);
        let mut hero = HeroSlider::new(None);
        hero.init(&mut h.cx());
        assert!(!hero.is_mounted());
        hero.handle_event(&mut h.cx(), &PageEvent::SlideChanged { slide });
        assert!(h.animator.is_empty());
        assert!(h.page.classes(slider).contains(&"hero__slider"));
        assert_eq!(h.page.style(content, "opacity"), None);
    }

    #[test]
    fn test_mount_failure_is_logged_not_fatal() {
        let (page, ..) = slider_page();
        let mut h = Harness::new(page);
        let mut hero = HeroSlider::new(Some(Box::new(StubCarousel { fail: true })));
        hero.init(&mut h.cx());
        assert!(!hero.is_mounted());
    }

    #[test]
    fn test_slide_change_fades_and_rises() {
        let (page, slider, slide, content) = slider_page();
        let mut h = Harness::new(page);
        let mut hero = HeroSlider::new(Some(Box::new(StubCarousel { fail: false })));
        hero.init(&mut h.cx());
        assert!(h.page.has_class(slider, "owl-carousel"));

        hero.handle_event(&mut h.cx(), &PageEvent::SlideChanged { slide });
        assert_eq!(h.page.style(content, "opacity").as_deref(), Some("0"));
        assert_eq!(h.page.style(content, "transform").as_deref(), Some("translateY(30px)"));

        h.advance(&mut hero, Duration::from_millis(300));
        // Swing is symmetric, so half time is half opacity.
        let opacity: f64 = h.page.style(content, "opacity").unwrap().parse().unwrap();
        assert!((opacity - 0.5).abs() < 1e-9);
        let transform = h.page.style(content, "transform").unwrap();
        let rise: f64 = transform
            .trim_start_matches("translateY(")
            .trim_end_matches("px)")
            .parse()
            .unwrap();
        assert!((rise - 15.0).abs() < 1e-9);

        h.advance(&mut hero, Duration::from_millis(300));
        assert_eq!(h.page.style(content, "opacity").as_deref(), Some("1"));
        assert_eq!(h.page.style(content, "transform").as_deref(), Some("translateY(0px)"));
        assert!(h.animator.is_empty());
    }

    #[test]
    fn test_foreign_slide_ignored() {
        let (mut page, _, _, _) = slider_page();
        let body = page.body().unwrap();
        let other = page.spawn(body, "div").finish();
        let mut h = Harness::new(page);
        let mut hero = HeroSlider::new(Some(Box::new(StubCarousel { fail: false })));
        hero.init(&mut h.cx());
        let status = hero.handle_event(&mut h.cx(), &PageEvent::SlideChanged { slide: other });
        assert!(!status.is_handled());
    }
}

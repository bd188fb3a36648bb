//! The external carousel capability the hero slider delegates to.

use std::collections::BTreeMap;
use std::time::Duration;

use vitrine_core::Config;
use vitrine_dom::{ElementId, Page, PageError};

/// Settings that replace the base options from a minimum viewport width up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsiveOverride {
    pub nav: bool,
}

/// Initialization record handed to a [`Carousel`].
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselOptions {
    /// Slides per view.
    pub items: u32,
    pub looping: bool,
    pub autoplay: bool,
    pub autoplay_timeout: Duration,
    pub autoplay_hover_pause: bool,
    /// Show previous/next arrows.
    pub nav: bool,
    /// Markup for the previous and next arrows.
    pub nav_text: [&'static str; 2],
    /// Show pagination dots.
    pub dots: bool,
    /// Entrance transition name.
    pub animate_in: &'static str,
    /// Exit transition name.
    pub animate_out: &'static str,
    pub smart_speed: Duration,
    pub mouse_drag: bool,
    pub touch_drag: bool,
    /// Overrides keyed by minimum viewport width in px.
    pub responsive: BTreeMap<u32, ResponsiveOverride>,
}

impl CarouselOptions {
    /// Options for the full-width hero slider.
    pub fn hero(config: &Config) -> Self {
        Self {
            items: 1,
            looping: true,
            autoplay: true,
            autoplay_timeout: config.autoplay_timeout,
            autoplay_hover_pause: true,
            nav: true,
            nav_text: [
                "<span aria-label=\"Previous\">&lt;</span>",
                "<span aria-label=\"Next\">&gt;</span>",
            ],
            dots: true,
            animate_in: "fadeIn",
            animate_out: "fadeOut",
            smart_speed: Duration::from_millis(500),
            mouse_drag: true,
            touch_drag: true,
            responsive: BTreeMap::from([
                (0, ResponsiveOverride { nav: false }),
                (768, ResponsiveOverride { nav: true }),
            ]),
        }
    }

    /// Whether arrows show at `width`, after applying responsive overrides.
    pub fn nav_at(&self, width: u32) -> bool {
        self.responsive
            .range(..=width)
            .next_back()
            .map_or(self.nav, |(_, o)| o.nav)
    }
}

/// A carousel implementation the hero slider can mount.
///
/// Implementations report slide changes back to the host, which delivers
/// them as [`PageEvent::SlideChanged`](vitrine_dom::PageEvent::SlideChanged)
/// carrying the new active slide element.
pub trait Carousel {
    fn name(&self) -> &'static str;

    fn mount(
        &mut self,
        page: &mut dyn Page,
        container: ElementId,
        options: &CarouselOptions,
    ) -> Result<(), PageError>;
}

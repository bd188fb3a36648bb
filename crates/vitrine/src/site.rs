//! The host that owns a page and drives every effect.

use std::time::Duration;

use vitrine_core::Config;
use vitrine_core::profiling::profile_function;
use vitrine_dom::{EventStatus, Page, PageEvent};
use vitrine_effects::{
    Animator, BackToTop, Carousel, CounterAnimation, Effect, EffectContext, FormValidation,
    HeaderScroll, HeroSlider, LazyLoad, MobileMenu, ScrollAnimations, SmoothScroll, Timers,
    apply_frame, utils,
};

/// Class added to `<body>` once every effect is initialized.
const PAGE_LOADED: &str = "page-loaded";

/// Every effect a site runs, in initialization order.
#[derive(Debug)]
pub struct Effects {
    pub mobile_menu: MobileMenu,
    pub hero_slider: HeroSlider,
    pub smooth_scroll: SmoothScroll,
    pub scroll_animations: ScrollAnimations,
    pub header_scroll: HeaderScroll,
    pub back_to_top: BackToTop,
    pub lazy_load: LazyLoad,
    pub form_validation: FormValidation,
    pub counter: CounterAnimation,
}

impl Effects {
    fn new(carousel: Option<Box<dyn Carousel>>) -> Self {
        Self {
            mobile_menu: MobileMenu::new(),
            hero_slider: HeroSlider::new(carousel),
            smooth_scroll: SmoothScroll::new(),
            scroll_animations: ScrollAnimations::new(),
            header_scroll: HeaderScroll::new(),
            back_to_top: BackToTop::new(),
            lazy_load: LazyLoad::new(),
            form_validation: FormValidation::new(),
            counter: CounterAnimation::new(),
        }
    }

    fn iter_mut(&mut self) -> [&mut dyn Effect; 9] {
        [
            &mut self.mobile_menu,
            &mut self.hero_slider,
            &mut self.smooth_scroll,
            &mut self.scroll_animations,
            &mut self.header_scroll,
            &mut self.back_to_top,
            &mut self.lazy_load,
            &mut self.form_validation,
            &mut self.counter,
        ]
    }
}

/// A page with its effects, timers and animations.
///
/// The host feeds events through [`dispatch`](Self::dispatch) and moves time
/// forward with [`advance`](Self::advance), typically once per animation
/// frame. Nothing happens until [`PageEvent::Ready`] arrives.
///
/// # Example
///
/// ```
/// use vitrine::{Config, MemoryPage, Page, PageEvent, Site};
///
/// let mut page = MemoryPage::new().with_document_height(3000.0);
/// let body = page.body().unwrap();
/// page.spawn(body, "section").attr("id", "about").layout(900.0, 400.0);
///
/// let mut site = Site::new(page, Config::default());
/// site.dispatch(PageEvent::Ready);
/// assert!(site.scroll_to_element("#about"));
/// ```
pub struct Site<P: Page> {
    page: P,
    config: Config,
    timers: Timers,
    animator: Animator,
    effects: Effects,
    initialized: bool,
}

impl<P: Page> Site<P> {
    pub fn new(page: P, config: Config) -> Self {
        Self {
            page,
            config,
            timers: Timers::new(),
            animator: Animator::new(),
            effects: Effects::new(None),
            initialized: false,
        }
    }

    /// Provide the carousel the hero slider mounts. Has no effect once the
    /// site is initialized.
    pub fn with_carousel(mut self, carousel: Box<dyn Carousel>) -> Self {
        if self.initialized {
            tracing::warn!("carousel supplied after initialization, ignoring");
            return self;
        }
        self.effects.hero_slider = HeroSlider::new(Some(carousel));
        self
    }

    fn split(&mut self) -> (&mut Effects, EffectContext<'_>) {
        let Self {
            page,
            config,
            timers,
            animator,
            effects,
            ..
        } = self;
        (
            effects,
            EffectContext {
                page,
                config,
                timers,
                animator,
            },
        )
    }

    /// Deliver an event to every effect in initialization order.
    ///
    /// The returned status tells the host whether to suppress the browser's
    /// default action.
    pub fn dispatch(&mut self, event: PageEvent) -> EventStatus {
        profile_function!();
        match event {
            PageEvent::Ready => {
                if self.initialized {
                    tracing::debug!("page already initialized, ignoring ready");
                    return EventStatus::ignored();
                }
                self.init();
                return EventStatus::handled();
            }
            PageEvent::Load if self.initialized => {
                self.recheck_animations();
                return EventStatus::handled();
            }
            _ if !self.initialized => {
                tracing::trace!("{:?} before ready, ignoring", event);
                return EventStatus::ignored();
            }
            _ => {}
        }

        let (effects, mut cx) = self.split();
        let mut status = EventStatus::ignored();
        for effect in effects.iter_mut() {
            status |= effect.handle_event(&mut cx, &event);
        }
        status
    }

    fn init(&mut self) {
        let (effects, mut cx) = self.split();
        for effect in effects.iter_mut() {
            tracing::debug!("initializing {}", effect.name());
            effect.init(&mut cx);
        }
        if let Some(body) = self.page.body() {
            self.page.add_class(body, PAGE_LOADED);
        }
        self.initialized = true;
        tracing::info!("vitrine initialized");
    }

    /// Fire due timers in order, then step running animations by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        profile_function!();
        vitrine_core::profiling::new_frame();

        let deadline = self.timers.deadline(delta);
        while let Some((id, task)) = self.timers.pop_due(deadline) {
            let (effects, mut cx) = self.split();
            for effect in effects.iter_mut() {
                effect.on_timer(&mut cx, id, task);
            }
        }
        self.timers.settle(deadline);

        let frames = self.animator.advance(delta);
        let (effects, mut cx) = self.split();
        for frame in &frames {
            apply_frame(&mut *cx.page, frame);
            for effect in effects.iter_mut() {
                effect.on_frame(&mut cx, frame);
            }
        }
    }

    /// Smoothly scroll to the first element matching `selector`. Returns false
    /// when nothing matches.
    pub fn scroll_to_element(&mut self, selector: &str) -> bool {
        let (effects, mut cx) = self.split();
        effects.smooth_scroll.scroll_to_element(&mut cx, selector)
    }

    /// Clear reveals and pick up fade elements added since startup.
    pub fn reset_animations(&mut self) {
        let (effects, mut cx) = self.split();
        effects.scroll_animations.reset(&mut cx);
    }

    /// Re-run the reveal check, e.g. after images changed the layout.
    pub fn recheck_animations(&mut self) {
        let (effects, mut cx) = self.split();
        effects.scroll_animations.check(&mut cx);
    }

    /// Value of a query-string parameter of the current location.
    pub fn url_parameter(&self, name: &str) -> Option<String> {
        utils::url_parameter(&self.page.location_search(), name)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<P: Page + std::fmt::Debug> std::fmt::Debug for Site<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("page", &self.page)
            .field("config", &self.config)
            .field("timers", &self.timers.len())
            .field("animator", &self.animator.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

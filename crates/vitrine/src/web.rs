//! Browser entry point.
//!
//! [`start`] builds a `Site<WebPage>`, attaches DOM listeners that translate
//! browser events into [`PageEvent`]s, and runs a `requestAnimationFrame`
//! loop that drives timers and animations.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, Window};

use vitrine_core::Config;
use vitrine_dom::{PageError, PageEvent, WebPage};

use crate::owl::{OwlCarousel, SLIDE_CHANGED_EVENT};
use crate::site::Site;

type SharedSite = Rc<RefCell<Site<WebPage>>>;

/// Scripting surface handed back to the page by [`start`].
#[wasm_bindgen]
pub struct SiteHandle {
    site: SharedSite,
}

#[wasm_bindgen]
impl SiteHandle {
    /// Smoothly scroll to the first element matching `selector`.
    #[wasm_bindgen(js_name = scrollToElement)]
    pub fn scroll_to_element(&self, selector: &str) -> bool {
        self.site.borrow_mut().scroll_to_element(selector)
    }

    /// Clear reveals and pick up fade elements added since startup.
    #[wasm_bindgen(js_name = resetAnimations)]
    pub fn reset_animations(&self) {
        self.site.borrow_mut().reset_animations();
    }

    #[wasm_bindgen(js_name = recheckAnimations)]
    pub fn recheck_animations(&self) {
        self.site.borrow_mut().recheck_animations();
    }

    #[wasm_bindgen(js_name = urlParameter)]
    pub fn url_parameter(&self, name: &str) -> Option<String> {
        self.site.borrow().url_parameter(name)
    }

    #[wasm_bindgen(getter, js_name = scrollThreshold)]
    pub fn scroll_threshold(&self) -> f64 {
        self.site.borrow().config().scroll_threshold
    }

    #[wasm_bindgen(getter, js_name = animationOffset)]
    pub fn animation_offset(&self) -> f64 {
        self.site.borrow().config().animation_offset
    }

    /// Milliseconds.
    #[wasm_bindgen(getter, js_name = scrollDuration)]
    pub fn scroll_duration(&self) -> f64 {
        self.site.borrow().config().scroll_duration.as_millis() as f64
    }

    /// Milliseconds.
    #[wasm_bindgen(getter, js_name = autoplayTimeout)]
    pub fn autoplay_timeout(&self) -> f64 {
        self.site.borrow().config().autoplay_timeout.as_millis() as f64
    }
}

/// Wire Vitrine into the current document.
#[wasm_bindgen]
pub fn start() -> Result<SiteHandle, JsValue> {
    vitrine_core::logging::init();

    let page = WebPage::new().map_err(to_js)?;
    let window = page.window().clone();
    let document = page.document().clone();

    let mut site = Site::new(page.clone(), Config::default());
    match OwlCarousel::detect(&page) {
        Some(owl) => site = site.with_carousel(Box::new(owl)),
        None => tracing::debug!("no carousel library on page"),
    }
    let site: SharedSite = Rc::new(RefCell::new(site));

    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", false, &site, |_, _| Some(PageEvent::Ready))?;
    } else {
        dispatch(&site, PageEvent::Ready);
    }
    listen(&window, "load", false, &site, |_, _| Some(PageEvent::Load))?;
    listen(&window, "scroll", false, &site, |_, _| Some(PageEvent::Scroll))?;
    listen(&window, "resize", false, &site, |_, _| Some(PageEvent::Resize))?;
    listen(&document, "click", false, &site, |page, event| {
        target(page, event).map(|target| PageEvent::Click { target })
    })?;
    listen(&document, "submit", false, &site, |page, event| {
        target(page, event).map(|form| PageEvent::Submit { form })
    })?;
    // Enter and leave do not bubble; capturing sees them for every element.
    listen(&document, "mouseenter", true, &site, |page, event| {
        target(page, event).map(|target| PageEvent::MouseEnter { target })
    })?;
    listen(&document, "mouseleave", true, &site, |page, event| {
        target(page, event).map(|target| PageEvent::MouseLeave { target })
    })?;
    listen(&document, SLIDE_CHANGED_EVENT, false, &site, |page, event| {
        target(page, event).map(|slide| PageEvent::SlideChanged { slide })
    })?;

    run_frame_loop(window, site.clone())?;
    Ok(SiteHandle { site })
}

fn to_js(err: PageError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn target(page: &WebPage, event: &Event) -> Option<vitrine_dom::ElementId> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    Some(page.register(&element))
}

fn dispatch(site: &SharedSite, event: PageEvent) -> bool {
    match site.try_borrow_mut() {
        Ok(mut site) => site.dispatch(event).is_default_prevented(),
        Err(_) => {
            tracing::warn!("{:?} arrived during another dispatch, dropped", event);
            false
        }
    }
}

fn listen(
    target: &EventTarget,
    name: &str,
    capture: bool,
    site: &SharedSite,
    translate: impl Fn(&WebPage, &Event) -> Option<PageEvent> + 'static,
) -> Result<(), JsValue> {
    let site = site.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let page_event = match site.try_borrow() {
            Ok(site) => translate(site.page(), &event),
            Err(_) => None,
        };
        if let Some(page_event) = page_event
            && dispatch(&site, page_event)
        {
            event.prevent_default();
        }
    });
    target.add_event_listener_with_callback_and_bool(
        name,
        callback.as_ref().unchecked_ref(),
        capture,
    )?;
    // Listeners stay attached for the lifetime of the page.
    callback.forget();
    Ok(())
}

fn run_frame_loop(window: Window, site: SharedSite) -> Result<(), JsValue> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let loop_window = window.clone();
    let mut last: Option<f64> = None;

    *slot.borrow_mut() = Some(Closure::new(move |now: f64| {
        let elapsed_ms = last.map_or(0.0, |last| (now - last).max(0.0));
        last = Some(now);
        if let Ok(mut site) = site.try_borrow_mut() {
            site.advance(Duration::from_secs_f64(elapsed_ms / 1000.0));
        }
        if let Some(callback) = next.borrow().as_ref()
            && let Err(err) = loop_window.request_animation_frame(callback.as_ref().unchecked_ref())
        {
            tracing::warn!("frame loop stopped: {}", PageError::from(err));
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

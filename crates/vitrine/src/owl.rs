//! Owl Carousel 2 behind the [`Carousel`] trait.
//!
//! Owl is a jQuery plugin, so everything goes through `window.jQuery` via
//! `js_sys::Reflect`. Slide changes are re-announced as a bubbling
//! [`SLIDE_CHANGED_EVENT`] on the active slide, which the host listener turns
//! into [`PageEvent::SlideChanged`](vitrine_dom::PageEvent::SlideChanged).

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventInit};

use vitrine_dom::{ElementId, Page, PageError, WebPage};
use vitrine_effects::{Carousel, CarouselOptions};

/// DOM event dispatched on the active slide after every change.
pub(crate) const SLIDE_CHANGED_EVENT: &str = "vitrine:slide-changed";

const ACTIVE_SLIDE: &str = ".owl-item.active";

pub(crate) struct OwlCarousel {
    page: WebPage,
    jquery: Function,
}

impl OwlCarousel {
    /// The adapter, if both jQuery and the Owl plugin are loaded.
    pub(crate) fn detect(page: &WebPage) -> Option<Self> {
        let jquery = get(page.window(), "jQuery")
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let plugins = get(&jquery, "fn").ok()?;
        if !get(&plugins, "owlCarousel").ok()?.is_function() {
            tracing::debug!("jQuery present but owlCarousel is not loaded");
            return None;
        }
        Some(Self {
            page: page.clone(),
            jquery,
        })
    }
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, PageError> {
    Ok(Reflect::get(target, &JsValue::from_str(key))?)
}

fn set(target: &Object, key: &str, value: impl Into<JsValue>) -> Result<(), PageError> {
    Reflect::set(target, &JsValue::from_str(key), &value.into())?;
    Ok(())
}

fn method(target: &JsValue, name: &'static str) -> Result<Function, PageError> {
    get(target, name)?
        .dyn_into::<Function>()
        .map_err(|_| PageError::MissingCapability { name })
}

/// Translate options to Owl's option object.
fn owl_options(options: &CarouselOptions) -> Result<Object, PageError> {
    let object = Object::new();
    set(&object, "items", options.items)?;
    set(&object, "loop", options.looping)?;
    set(&object, "autoplay", options.autoplay)?;
    set(
        &object,
        "autoplayTimeout",
        options.autoplay_timeout.as_millis() as f64,
    )?;
    set(&object, "autoplayHoverPause", options.autoplay_hover_pause)?;
    set(&object, "nav", options.nav)?;
    let nav_text: Array = options.nav_text.iter().map(|s| JsValue::from_str(s)).collect();
    set(&object, "navText", nav_text)?;
    set(&object, "dots", options.dots)?;
    set(&object, "animateIn", options.animate_in)?;
    set(&object, "animateOut", options.animate_out)?;
    set(&object, "smartSpeed", options.smart_speed.as_millis() as f64)?;
    set(&object, "mouseDrag", options.mouse_drag)?;
    set(&object, "touchDrag", options.touch_drag)?;

    let responsive = Object::new();
    for (width, overrides) in &options.responsive {
        let entry = Object::new();
        set(&entry, "nav", overrides.nav)?;
        set(&responsive, &width.to_string(), entry)?;
    }
    set(&object, "responsive", responsive)?;
    Ok(object)
}

fn announce_active_slide(carousel: &Element) {
    let active = match carousel.query_selector(ACTIVE_SLIDE) {
        Ok(Some(active)) => active,
        Ok(None) => return,
        Err(err) => {
            tracing::warn!("active slide lookup failed: {}", PageError::from(err));
            return;
        }
    };
    let init = EventInit::new();
    init.set_bubbles(true);
    let result = Event::new_with_event_init_dict(SLIDE_CHANGED_EVENT, &init)
        .and_then(|event| active.dispatch_event(&event));
    if let Err(err) = result {
        tracing::warn!("failed to announce slide change: {}", PageError::from(err));
    }
}

impl Carousel for OwlCarousel {
    fn name(&self) -> &'static str {
        "owl"
    }

    fn mount(
        &mut self,
        _page: &mut dyn Page,
        container: ElementId,
        options: &CarouselOptions,
    ) -> Result<(), PageError> {
        let element = self
            .page
            .element(container)
            .ok_or(PageError::MissingCapability {
                name: "carousel container",
            })?;
        let wrapped = self.jquery.call1(&JsValue::NULL, &element)?;

        method(&wrapped, "owlCarousel")?.call1(&wrapped, &owl_options(options)?)?;

        // Owl finishes updating `.active` before it fires `changed`.
        let on_change = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            announce_active_slide(&element);
        });
        method(&wrapped, "on")?.call2(
            &wrapped,
            &JsValue::from_str("changed.owl.carousel"),
            on_change.as_ref().unchecked_ref(),
        )?;
        // Lives as long as the page.
        on_change.forget();
        Ok(())
    }
}

//! `web-sys` backend for the browser.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_core::geometry::{Rect, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList, Window,
};

use crate::element::ElementId;
use crate::error::PageError;
use crate::page::Page;

/// The live browser document.
///
/// Elements are registered the first time a query returns them and keep
/// their [`ElementId`] for the lifetime of the page. Clones share the same
/// registry, so host glue can resolve handles the effects hand out.
#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
    elements: Rc<RefCell<Vec<Element>>>,
}

impl WebPage {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(Self {
            window,
            document,
            elements: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Handle for a DOM element, registering it on first sight.
    pub fn register(&self, element: &Element) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        if let Some(index) = elements
            .iter()
            .position(|known| known.is_same_node(Some(element.as_ref())))
        {
            return ElementId::new(index as u32);
        }
        elements.push(element.clone());
        ElementId::new((elements.len() - 1) as u32)
    }

    /// The DOM element behind a handle.
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.index()).cloned()
    }

    fn html_element(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: Result<NodeList, JsValue>, selector: &str) -> Vec<ElementId> {
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("querySelectorAll('{}') failed: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.register(&el))
            .collect()
    }
}

impl From<JsValue> for PageError {
    fn from(err: JsValue) -> Self {
        PageError::Script {
            message: err
                .as_string()
                .unwrap_or_else(|| format!("{:?}", err)),
        }
    }
}

fn script_error(err: JsValue) -> PageError {
    PageError::from(err)
}

fn warn_on_err(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!("{} failed: {}", what, script_error(err));
    }
}

impl Page for WebPage {
    fn body(&self) -> Option<ElementId> {
        let body: Element = self.document.body()?.into();
        Some(self.register(&body))
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.collect(self.document.query_selector_all(selector), selector)
    }

    fn query_within(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        match self.element(root) {
            Some(root) => self.collect(root.query_selector_all(selector), selector),
            None => Vec::new(),
        }
    }

    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId> {
        match self.element(el)?.closest(selector) {
            Ok(found) => found.map(|found| self.register(&found)),
            Err(err) => {
                tracing::warn!("closest('{}') failed: {}", selector, script_error(err));
                None
            }
        }
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(ancestor), Some(node)) => ancestor.contains(Some(node.as_ref())),
            _ => false,
        }
    }

    fn create_element(&mut self, tag: &str) -> Option<ElementId> {
        match self.document.create_element(tag) {
            Ok(el) => Some(self.register(&el)),
            Err(err) => {
                tracing::warn!("createElement('{}') failed: {}", tag, script_error(err));
                None
            }
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            warn_on_err("appendChild", parent.append_child(&child).map(|_| ()));
        }
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.element(el)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(el) = self.element(el) {
            warn_on_err("classList.add", el.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(el) = self.element(el) {
            warn_on_err("classList.remove", el.class_list().remove_1(class));
        }
    }

    fn attr(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el)?.get_attribute(name)
    }

    fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(el) = self.element(el) {
            warn_on_err("setAttribute", el.set_attribute(name, value));
        }
    }

    fn remove_attr(&mut self, el: ElementId, name: &str) {
        if let Some(el) = self.element(el) {
            warn_on_err("removeAttribute", el.remove_attribute(name));
        }
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.html_element(el)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(el) = self.html_element(el) {
            warn_on_err("style.setProperty", el.style().set_property(property, value));
        }
    }

    fn text(&self, el: ElementId) -> String {
        self.element(el)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(el) = self.element(el) {
            el.set_text_content(Some(text));
        }
    }

    fn set_inner_html(&mut self, el: ElementId, html: &str) {
        if let Some(el) = self.element(el) {
            el.set_inner_html(html);
        }
    }

    fn value(&self, el: ElementId) -> String {
        let Some(el) = self.element(el) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn offset_top(&self, el: ElementId) -> f64 {
        self.bounding_rect(el).top() + self.scroll_y()
    }

    fn outer_height(&self, el: ElementId) -> f64 {
        self.bounding_rect(el).height
    }

    fn bounding_rect(&self, el: ElementId) -> Rect<f64> {
        self.element(el)
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
            })
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn set_scroll_y(&mut self, y: f64) {
        let x = self.window.scroll_x().unwrap_or_default();
        self.window.scroll_to_with_x_and_y(x, y);
    }

    fn viewport(&self) -> Size<f64> {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default()
        };
        Size::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn supports_native_lazy_loading(&self) -> bool {
        // Same check as `'loading' in HTMLImageElement.prototype`.
        self.document
            .create_element("img")
            .ok()
            .and_then(|img| js_sys::Reflect::has(&img, &JsValue::from_str("loading")).ok())
            .unwrap_or(false)
    }

    fn location_search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }
}

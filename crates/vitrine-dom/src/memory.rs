//! In-memory page for headless runs and tests.

use indexmap::{IndexMap, IndexSet};
use vitrine_core::geometry::{Rect, Size};

use crate::element::ElementId;
use crate::page::Page;
use crate::selector::{SelectorList, SelectorSubject};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: IndexMap<String, String>,
    classes: IndexSet<String>,
    styles: IndexMap<String, String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Border box in document coordinates.
    layout: Rect<f64>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: IndexMap::new(),
            classes: IndexSet::new(),
            styles: IndexMap::new(),
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            layout: Rect::default(),
        }
    }
}

/// A document held entirely in memory.
///
/// Layout is not computed: each element carries the document-space box it
/// was given with [`MemoryPage::set_layout`]. Scrolling is clamped to the
/// document height, which defaults to the lowest element edge.
///
/// # Example
///
/// ```
/// use vitrine_dom::{MemoryPage, Page};
///
/// let mut page = MemoryPage::new();
/// let body = page.body().unwrap();
/// let header = page.spawn(body, "header").class("header").layout(0.0, 80.0).finish();
///
/// assert_eq!(page.query_one(".header"), Some(header));
/// assert_eq!(page.outer_height(header), 80.0);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryPage {
    nodes: Vec<Node>,
    root: ElementId,
    body: ElementId,
    scroll_y: f64,
    viewport: Size<f64>,
    document_height: Option<f64>,
    native_lazy_loading: bool,
    search: String,
}

impl MemoryPage {
    /// An empty `<html><head/><body/></html>` document with a 1280x800 viewport.
    pub fn new() -> Self {
        let mut page = Self {
            nodes: vec![Node::new("html")],
            root: ElementId::new(0),
            body: ElementId::new(0),
            scroll_y: 0.0,
            viewport: Size::new(1280.0, 800.0),
            document_height: None,
            native_lazy_loading: false,
            search: String::new(),
        };
        let head = page.push_node("head");
        page.append_child(page.root, head);
        let body = page.push_node("body");
        page.append_child(page.root, body);
        page.body = body;
        page
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn with_native_lazy_loading(mut self, supported: bool) -> Self {
        self.native_lazy_loading = supported;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_document_height(mut self, height: f64) -> Self {
        self.document_height = Some(height);
        self
    }

    /// Create an element under `parent` and return a builder for it.
    pub fn spawn(&mut self, parent: ElementId, tag: &str) -> ElementBuilder<'_> {
        let id = self.push_node(tag);
        self.append_child(parent, id);
        ElementBuilder { page: self, id }
    }

    /// Set the document-space box of `el` (x = 0, full viewport width).
    pub fn set_layout(&mut self, el: ElementId, top: f64, height: f64) {
        let width = self.viewport.width;
        if let Some(node) = self.node_mut(el) {
            node.layout = Rect::new(0.0, top, width, height);
        }
    }

    /// Set the current value of a form control.
    pub fn set_value(&mut self, el: ElementId, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.value = value.to_owned();
        }
    }

    /// Resize the viewport, as a window resize would.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
        self.set_scroll_y(self.scroll_y);
    }

    /// Classes of `el` in insertion order.
    pub fn classes(&self, el: ElementId) -> Vec<&str> {
        self.node(el)
            .map(|node| node.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|node| node.parent)
    }

    fn children(&self, el: ElementId) -> &[ElementId] {
        self.node(el).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    pub fn document_height(&self) -> f64 {
        self.document_height.unwrap_or_else(|| {
            self.nodes
                .iter()
                .map(|node| node.layout.bottom())
                .fold(self.viewport.height, f64::max)
        })
    }

    fn push_node(&mut self, tag: &str) -> ElementId {
        let id = ElementId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(tag));
        id
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.index())
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.index())
    }

    /// Pre-order walk of the subtree under `root`, excluding `root`.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.children(el).iter().rev().copied());
        }
        out
    }

    fn select(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        match SelectorList::parse(selector) {
            Ok(list) => self
                .descendants(root)
                .into_iter()
                .filter(|&el| list.matches(self, el))
                .collect(),
            Err(err) => {
                tracing::warn!("{}", err);
                Vec::new()
            }
        }
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorSubject for MemoryPage {
    fn tag_name(&self, el: ElementId) -> &str {
        self.node(el).map(|node| node.tag.as_str()).unwrap_or_default()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.node(el)?.attrs.get(name).map(String::as_str)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).is_some_and(|node| node.classes.contains(class))
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        MemoryPage::parent(self, el)
    }
}

impl Page for MemoryPage {
    fn body(&self) -> Option<ElementId> {
        Some(self.body)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.select(self.root, selector)
    }

    fn query_within(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        self.select(root, selector)
    }

    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("{}", err);
                return None;
            }
        };
        let mut current = self.node(el).map(|_| el);
        while let Some(candidate) = current {
            if list.matches(self, candidate) {
                return Some(candidate);
            }
            current = MemoryPage::parent(self, candidate);
        }
        None
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = MemoryPage::parent(self, el);
        }
        false
    }

    fn create_element(&mut self, tag: &str) -> Option<ElementId> {
        Some(self.push_node(tag))
    }

    /// Attach a detached element. Elements that already have a parent stay
    /// where they are.
    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child
            || self.node(parent).is_none()
            || self.node(child).is_none_or(|node| node.parent.is_some())
        {
            return;
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        SelectorSubject::has_class(self, el, class)
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.classes.shift_remove(class);
        }
    }

    /// Classes live apart from attributes; `class` is not visible here.
    fn attr(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el)?.attrs.get(name).cloned()
    }

    fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attr(&mut self, el: ElementId, name: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attrs.shift_remove(name);
        }
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.node(el)?.styles.get(property).cloned()
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn text(&self, el: ElementId) -> String {
        self.node(el).map(|node| node.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_owned();
        }
    }

    fn set_inner_html(&mut self, el: ElementId, html: &str) {
        // Markup is kept verbatim; nothing parses it into child nodes.
        self.set_text(el, html);
    }

    fn value(&self, el: ElementId) -> String {
        self.node(el).map(|node| node.value.clone()).unwrap_or_default()
    }

    fn offset_top(&self, el: ElementId) -> f64 {
        self.node(el).map(|node| node.layout.top()).unwrap_or_default()
    }

    fn outer_height(&self, el: ElementId) -> f64 {
        self.node(el).map(|node| node.layout.height).unwrap_or_default()
    }

    fn bounding_rect(&self, el: ElementId) -> Rect<f64> {
        self.node(el)
            .map(|node| node.layout.shifted_up(self.scroll_y))
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn set_scroll_y(&mut self, y: f64) {
        let max = (self.document_height() - self.viewport.height).max(0.0);
        self.scroll_y = y.clamp(0.0, max);
    }

    fn viewport(&self) -> Size<f64> {
        self.viewport
    }

    fn supports_native_lazy_loading(&self) -> bool {
        self.native_lazy_loading
    }

    fn location_search(&self) -> String {
        self.search.clone()
    }
}

/// Fluent setup for an element created with [`MemoryPage::spawn`].
#[derive(Debug)]
pub struct ElementBuilder<'a> {
    page: &'a mut MemoryPage,
    id: ElementId,
}

impl ElementBuilder<'_> {
    pub fn class(self, class: &str) -> Self {
        self.page.add_class(self.id, class);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.page.set_attr(self.id, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.page.set_text(self.id, text);
        self
    }

    /// Document-space top edge and height.
    pub fn layout(self, top: f64, height: f64) -> Self {
        self.page.set_layout(self.id, top, height);
        self
    }

    pub fn finish(self) -> ElementId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_page() -> (MemoryPage, ElementId, ElementId) {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let nav = page.spawn(body, "nav").class("mobile-nav").finish();
        let ul = page.spawn(nav, "ul").finish();
        let li = page.spawn(ul, "li").finish();
        let link = page.spawn(li, "a").attr("href", "#about").finish();
        (page, nav, link)
    }

    #[test]
    fn test_query_document_order() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let a = page.spawn(body, "div").class("fade-in").finish();
        let wrapper = page.spawn(body, "section").finish();
        let b = page.spawn(wrapper, "div").class("fade-in-right").finish();
        let c = page.spawn(body, "div").class("fade-in-left").finish();

        let found = page.query_all(".fade-in-left, .fade-in, .fade-in-right");
        assert_eq!(found, vec![a, b, c]);
    }

    #[test]
    fn test_descendant_selectors() {
        let (page, nav, link) = nav_page();
        assert_eq!(page.query_all(".mobile-nav a"), vec![link]);
        assert_eq!(page.query_all("body .mobile-nav li a"), vec![link]);
        assert!(page.query_all("li .mobile-nav a").is_empty());
        assert_eq!(page.query_within(nav, "a[href^=\"#\"]"), vec![link]);
        assert!(page.query_within(nav, "a[href^='#s']").is_empty());
    }

    #[test]
    fn test_closest_and_contains() {
        let (page, nav, link) = nav_page();
        assert_eq!(page.closest(link, ".mobile-nav"), Some(nav));
        assert_eq!(page.closest(link, "a"), Some(link));
        assert_eq!(page.closest(nav, ".header__menu-toggle"), None);
        assert!(page.contains(nav, link));
        assert!(page.contains(nav, nav));
        assert!(!page.contains(link, nav));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let (page, _, link) = nav_page();
        assert!(page.query_all("a[").is_empty());
        assert_eq!(page.closest(link, "#"), None);
    }

    #[test]
    fn test_class_toggling() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let el = page.spawn(body, "div").class("a").class("b").finish();
        assert!(page.toggle_class(el, "c"));
        assert_eq!(page.classes(el), vec!["a", "b", "c"]);
        assert!(!page.toggle_class(el, "c"));
        assert_eq!(page.query_all(".a.b"), vec![el]);
    }

    #[test]
    fn test_scroll_clamps_to_document() {
        let mut page = MemoryPage::new().with_viewport(1280.0, 800.0);
        let body = page.body().unwrap();
        page.spawn(body, "footer").layout(2800.0, 200.0);

        page.set_scroll_y(5000.0);
        assert_eq!(page.scroll_y(), 2200.0);
        page.set_scroll_y(-10.0);
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_bounding_rect_follows_scroll() {
        let mut page = MemoryPage::new().with_document_height(5000.0);
        let body = page.body().unwrap();
        let el = page.spawn(body, "div").layout(1000.0, 50.0).finish();
        page.set_scroll_y(400.0);
        let rect = page.bounding_rect(el);
        assert_eq!(rect.top(), 600.0);
        assert_eq!(rect.bottom(), 650.0);
        assert_eq!(page.offset_top(el), 1000.0);
    }

    #[test]
    fn test_created_element_attaches_once() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let other = page.spawn(body, "div").finish();
        let button = page.create_element("button").unwrap();
        assert_eq!(page.parent(button), None);
        page.append_child(body, button);
        page.append_child(other, button);
        assert_eq!(page.parent(button), Some(body));
        assert_eq!(page.query_all("button"), vec![button]);
    }
}

use vitrine_core::geometry::{Rect, Size};

use crate::element::ElementId;

/// The live page structure every effect reads and mutates.
///
/// The trait is object-safe so effects can take `&mut dyn Page` and run
/// unchanged against the browser ([`WebPage`](crate::WebPage) on wasm32) or
/// the in-memory [`MemoryPage`](crate::MemoryPage).
///
/// Lookups never fail loudly: an unknown handle or an unparsable selector
/// yields nothing, so a missing element degrades to a no-op.
pub trait Page {
    /// The `<body>` element, if the document has one.
    fn body(&self) -> Option<ElementId>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    /// First element matching `selector`.
    fn query_one(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: ElementId, selector: &str) -> Vec<ElementId>;

    /// `el` itself or its nearest ancestor matching `selector`.
    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Option<ElementId>;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    fn has_class(&self, el: ElementId, class: &str) -> bool;
    fn add_class(&mut self, el: ElementId, class: &str);
    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Flip `class`, returning whether it is now present.
    fn toggle_class(&mut self, el: ElementId, class: &str) -> bool {
        if self.has_class(el, class) {
            self.remove_class(el, class);
            false
        } else {
            self.add_class(el, class);
            true
        }
    }

    fn attr(&self, el: ElementId, name: &str) -> Option<String>;
    fn set_attr(&mut self, el: ElementId, name: &str, value: &str);
    fn remove_attr(&mut self, el: ElementId, name: &str);

    /// Inline style property, e.g. `opacity`.
    fn style(&self, el: ElementId, property: &str) -> Option<String>;
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    fn text(&self, el: ElementId) -> String;
    fn set_text(&mut self, el: ElementId, text: &str);
    fn set_inner_html(&mut self, el: ElementId, html: &str);

    /// Current value of a form control. Empty for anything else.
    fn value(&self, el: ElementId) -> String;

    /// Top edge in document coordinates.
    fn offset_top(&self, el: ElementId) -> f64;

    /// Border-box height.
    fn outer_height(&self, el: ElementId) -> f64;

    /// Border box relative to the viewport (`getBoundingClientRect`).
    fn bounding_rect(&self, el: ElementId) -> Rect<f64>;

    /// Vertical scroll position of the window.
    fn scroll_y(&self) -> f64;
    fn set_scroll_y(&mut self, y: f64);

    /// Inner size of the window.
    fn viewport(&self) -> Size<f64>;

    /// Whether `<img loading="lazy">` is supported natively.
    fn supports_native_lazy_loading(&self) -> bool;

    /// The location's query string, including the leading `?` if any.
    fn location_search(&self) -> String;
}

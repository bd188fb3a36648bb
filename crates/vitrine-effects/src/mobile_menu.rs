use vitrine_dom::{ElementId, EventStatus, PageEvent};

use crate::effect::{Effect, EffectContext};

/// Viewport widths above this are desktop layouts with no menu panel.
pub const DESKTOP_BREAKPOINT: f64 = 991.0;

const TOGGLE: &str = ".header__menu-toggle";
const PANEL: &str = ".mobile-nav";
const PANEL_LINKS: &str = ".mobile-nav a";
const ACTIVE: &str = "active";
/// Set on `<body>` while the panel is open, for scroll locking.
const MENU_OPEN: &str = "menu-open";

#[derive(Debug, Clone, Copy)]
struct Handles {
    toggle: ElementId,
    panel: ElementId,
    body: Option<ElementId>,
}

impl Handles {
    /// Each handle with the class it carries while open.
    fn each(&self) -> impl Iterator<Item = (ElementId, &'static str)> {
        [
            Some((self.toggle, ACTIVE)),
            Some((self.panel, ACTIVE)),
            self.body.map(|body| (body, MENU_OPEN)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Opens and closes the navigation panel on small screens.
#[derive(Debug, Default)]
pub struct MobileMenu {
    handles: Option<Handles>,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, cx: &EffectContext<'_>) -> bool {
        self.handles
            .is_some_and(|handles| cx.page.has_class(handles.panel, ACTIVE))
    }

    /// Flip `active` on the toggle and the panel, and `menu-open` on the body.
    pub fn toggle_menu(&self, cx: &mut EffectContext<'_>) {
        let Some(handles) = self.handles else {
            return;
        };
        for (el, class) in handles.each() {
            cx.page.toggle_class(el, class);
        }
    }

    pub fn close_menu(&self, cx: &mut EffectContext<'_>) {
        let Some(handles) = self.handles else {
            return;
        };
        for (el, class) in handles.each() {
            cx.page.remove_class(el, class);
        }
    }
}

impl Effect for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile_menu"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        let toggle = cx.page.query_one(TOGGLE);
        let panel = cx.page.query_one(PANEL);
        self.handles = match (toggle, panel) {
            (Some(toggle), Some(panel)) => Some(Handles {
                toggle,
                panel,
                body: cx.page.body(),
            }),
            _ => {
                tracing::debug!("no menu toggle or panel, mobile menu disabled");
                None
            }
        };
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        let Some(handles) = self.handles else {
            return EventStatus::ignored();
        };
        match *event {
            PageEvent::Click { target } => {
                if cx.page.contains(handles.toggle, target) {
                    self.toggle_menu(cx);
                    return EventStatus::prevent_default();
                }
                let on_link = cx.page.closest(target, PANEL_LINKS).is_some();
                if on_link || !cx.page.contains(handles.panel, target) {
                    self.close_menu(cx);
                }
                EventStatus::ignored()
            }
            PageEvent::Resize if cx.page.viewport().width > DESKTOP_BREAKPOINT => {
                self.close_menu(cx);
                EventStatus::ignored()
            }
            _ => EventStatus::ignored(),
        }
    }
}

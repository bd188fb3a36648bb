//! Vitrine - the behavior layer of a static marketing site
//!
//! Vitrine reacts to page events with small, independent UI effects: the
//! mobile menu, the hero slider, smooth anchor scrolling, scroll-triggered
//! reveals, the sticky header, the back-to-top button, lazy images, form
//! validation and counting statistics.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use vitrine::{Config, MemoryPage, Page, PageEvent, Site};
//!
//! let mut page = MemoryPage::new();
//! let body = page.body().unwrap();
//! let header = page.spawn(body, "header").class("header").layout(0.0, 80.0).finish();
//!
//! let mut site = Site::new(page, Config::default());
//! site.dispatch(PageEvent::Ready);
//! assert!(site.page().has_class(header, "header--transparent"));
//!
//! // Drive timers and animations, once per animation frame.
//! site.advance(Duration::from_millis(16));
//! ```
//!
//! In the browser, `vitrine::web::start()` wires the DOM listeners and the
//! `requestAnimationFrame` loop around a `Site<WebPage>`.
//!
//! # Architecture
//!
//! A [`Site`] owns the page, the timer queue and the animator, and forwards
//! every [`PageEvent`] to each effect in a fixed order. Effects only see the
//! page through the [`Page`] trait, so the same code runs against the
//! browser and the in-memory [`MemoryPage`].

pub mod site;
#[cfg(target_arch = "wasm32")]
mod owl;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use site::{Effects, Site};

pub use vitrine_core as core;
pub use vitrine_core::Config;
pub use vitrine_dom::{ElementId, EventStatus, MemoryPage, Page, PageError, PageEvent};
pub use vitrine_effects as effects;
pub use vitrine_effects::utils;
pub use vitrine_effects::{Carousel, CarouselOptions};

#[cfg(target_arch = "wasm32")]
pub use vitrine_dom::WebPage;

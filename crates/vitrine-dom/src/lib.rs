//! Vitrine DOM
//!
//! The page-structure seam between the effects and whatever hosts them:
//! - [`Page`], the object-safe trait every effect talks to
//! - [`MemoryPage`], an in-memory document for headless runs and tests
//! - `WebPage`, the `web-sys` backend (wasm32 only)
//! - [`PageEvent`] / [`EventStatus`], the events a host feeds in

pub mod element;
pub mod error;
pub mod event;
pub mod memory;
pub mod page;
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use element::ElementId;
pub use error::PageError;
pub use event::{EventStatus, PageEvent};
pub use memory::{ElementBuilder, MemoryPage};
pub use page::Page;
pub use selector::SelectorList;
#[cfg(target_arch = "wasm32")]
pub use web::WebPage;

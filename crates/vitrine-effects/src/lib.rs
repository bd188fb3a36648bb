//! Vitrine Effects
//!
//! Each effect is a self-contained handler bundle over a [`Page`]:
//! - [`MobileMenu`] toggles the navigation panel
//! - [`HeroSlider`] mounts the carousel and animates slide content in
//! - [`SmoothScroll`] animates in-page anchor navigation
//! - [`ScrollAnimations`] reveals fade elements as they near the viewport
//! - [`HeaderScroll`] switches the header between transparent and scrolled
//! - [`BackToTop`] injects and drives the floating back-to-top button
//! - [`LazyLoad`] promotes deferred image sources
//! - [`FormValidation`] blocks submission of invalid forms
//! - [`CounterAnimation`] counts numbers up when they come into view
//!
//! Effects never touch the same element state for different purposes, so
//! they can run in any registration order without coordination.
//!
//! [`Page`]: vitrine_dom::Page

pub mod animation;
pub mod back_to_top;
pub mod carousel;
pub mod counter;
pub mod effect;
pub mod form_validation;
pub mod format;
pub mod header_scroll;
pub mod hero_slider;
pub mod lazy_load;
pub mod mobile_menu;
pub mod scroll_animations;
pub mod smooth_scroll;
pub mod timer;
pub mod utils;

#[cfg(test)]
mod testing;

pub use animation::{Animator, Frame, Track, Tween, apply_frame, swing};
pub use back_to_top::BackToTop;
pub use carousel::{Carousel, CarouselOptions, ResponsiveOverride};
pub use counter::CounterAnimation;
pub use effect::{Effect, EffectContext};
pub use form_validation::FormValidation;
pub use header_scroll::HeaderScroll;
pub use hero_slider::HeroSlider;
pub use lazy_load::{LazyLoad, LazyStrategyKind};
pub use mobile_menu::MobileMenu;
pub use scroll_animations::ScrollAnimations;
pub use smooth_scroll::SmoothScroll;
pub use timer::{TimerId, TimerTask, Timers};

//! Test utilities for Vitrine.
//!
//! - [`landing_page`] builds an in-memory copy of a typical landing page
//!   carrying every marker the effects look for.
//! - [`RecordingCarousel`] stands in for the carousel library and records
//!   each mount for verification.

pub mod fixtures;
pub mod mock_carousel;

pub use fixtures::{Landing, landing_page};
pub use mock_carousel::{MountCall, RecordingCarousel};

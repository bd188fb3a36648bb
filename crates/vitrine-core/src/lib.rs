//! Vitrine Core
//!
//! Shared configuration, geometry, logging and profiling for the Vitrine
//! behavior layer.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;

pub use config::Config;
pub use geometry::{Rect, Size};

//! Hash collections used for per-element state.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

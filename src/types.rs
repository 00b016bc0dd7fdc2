//! Data types used throughout the seolens library.
//!
//! This module is organized by domain:
//! - [`entries`] - Scorer inputs and the flat key/value display entries
//! - [`payload`] - Wire types of the on-page analysis API response

pub mod entries;
pub mod payload;

// Re-export scorer inputs and display entries
pub use entries::{ChecksMap, EntryValue, KeyValueEntry, TimingMetrics};

// Re-export API payload types
pub use payload::{InstantPagesResponse, PageItem, PageMeta, PageTiming, Task, TaskResult};

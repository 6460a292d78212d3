//! Genoview Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the Genoview workspace.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized `tracing` subscriber setup
//! - **Types**: Genomic coordinate types shared by the adapters and the viewers
//!
//! # Example
//!
//! ```
//! use genoview_common::types::{GeneBounds, SequenceRange};
//!
//! let bounds = GeneBounds::from_unordered(500, 100);
//! assert_eq!(bounds.min, 100);
//!
//! let window = SequenceRange::initial_window(&bounds);
//! assert_eq!(window, SequenceRange::new(100, 500));
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{GenoviewError, Result};

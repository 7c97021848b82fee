//! Helmview Engine - pure string transformations over rendered chart output
//!
//! This crate provides the two transformations at the heart of helmview:
//! - `splitter`: partition `helm template` stdout back into per-source files
//! - `template`: a closed-grammar substitution engine for the conditional
//!   ConfigMap preview (`lookup` / `splitLines` directives only)
//!
//! Both are synchronous, total functions over in-memory strings. I/O lives
//! with the callers; malformed input degrades to empty or partial output,
//! never an error.

pub mod splitter;
pub mod template;

pub use splitter::{split_rendered_output, RenderedBundle, SOURCE_MARKER};
pub use template::{Directive, Template};

//! Helmview Core - Core types for the Helm chart configuration toolkit
//!
//! This crate provides the foundational types used throughout helmview:
//! - `Values`: YAML-backed configuration values with dotted-path access
//! - `Chart`: Chart.yaml metadata and chart directory layout
//! - `KeyValueStore`: injected persistence for user settings

pub mod chart;
pub mod error;
pub mod store;
pub mod values;

pub use chart::{ChartMetadata, LoadedChart, Maintainer};
pub use error::CoreError;
pub use store::{FileStore, KeyValueStore};
pub use values::{parse_set_values, Values};

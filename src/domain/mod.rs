//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - gap-free dated series (`TimeSeries`, `Observation`)
//! - filter and comparison outputs (`FilterResult`, `ComovementSummary`)
//! - growth accounting rows and per-command configuration

pub mod types;

pub use types::*;

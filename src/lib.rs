//! `hp-cycles` library crate.
//!
//! The binary (`hpc`) is a thin wrapper around this library so that:
//!
//! - the filter and statistics are testable without spawning processes
//! - the analysis core stays free of I/O and presentation
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod cycle;
pub mod data;
pub mod domain;
pub mod error;
pub mod growth;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;

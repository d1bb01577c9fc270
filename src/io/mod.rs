//! Input/output helpers.
//!
//! - CSV exports of cycles and the growth table (`export`)
//! - comparison JSON (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;

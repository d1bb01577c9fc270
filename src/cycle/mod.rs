//! Cycle decomposition core.
//!
//! Pure functions only; no I/O happens here:
//!
//! - HP trend/cycle split, single and multi-λ (`decompose`)
//! - date-range alignment and co-movement statistics (`comovement`)
//! - smoothing-parameter sensitivity diagnostics (`sensitivity`)

pub mod comovement;
pub mod decompose;
pub mod sensitivity;

pub use comovement::*;
pub use decompose::*;
pub use sensitivity::*;

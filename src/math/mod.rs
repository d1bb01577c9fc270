//! Mathematical utilities: HP filter, descriptive statistics, least squares.

pub mod hp;
pub mod ols;
pub mod stats;

pub use hp::*;
pub use ols::*;
pub use stats::*;

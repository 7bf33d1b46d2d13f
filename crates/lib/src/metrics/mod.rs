//! Metric and widget descriptors.
//!
//! Descriptors are declarative records of what a dashboard should plot. They
//! are built fresh on every assembly pass and never mutated afterwards.

mod factory;
mod types;

pub use factory::*;
pub use types::*;

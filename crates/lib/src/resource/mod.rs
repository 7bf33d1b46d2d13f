//! Supported resource kinds and node classification.
//!
//! Every resource the dashboard knows about is one variant of the closed
//! [`Resource`] sum type, carrying only the identity fields its metrics are
//! dimensioned by. [`classify`] is the single place nodes are narrowed into
//! those variants.

mod classify;
mod types;

pub use classify::classify;
pub use types::*;

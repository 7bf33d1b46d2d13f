//! Shared utilities.
//!
//! Common utilities used across the crate including hashing, duration
//! (de)serialization and test helpers.

pub mod duration;
pub mod hash;

#[cfg(test)]
pub mod testutil;

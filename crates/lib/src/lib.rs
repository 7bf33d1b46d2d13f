//! stackdash-lib: resource discovery and dashboard assembly.
//!
//! This crate walks a deployment stack's construct tree, discovers resources
//! of known kinds and turns them into an ordered set of dashboard widgets:
//! - `tree`: construct tree loading and depth-first traversal
//! - `resource`: the closed set of supported resource kinds and classification
//! - `metrics`: metric and widget descriptors plus the factories that build them
//! - `providers`: one widget provider per resource kind
//! - `collector`: buckets classified resources by kind during traversal
//! - `dashboard`: assembly, rendering and publishing to a sink

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod consts;
pub mod dashboard;
pub mod metrics;
pub mod providers;
pub mod resource;
pub mod tree;
pub mod util;

//! forest-util - test utilities for balanced-forest
//!
//! Seeded random workload generation shared by the tree test suites.

pub mod fuzzer;

pub use fuzzer::{Fuzzer, TraceOp};

//! Crate-level determinism and integration tests.
//!
//! - `determinism.rs`: same inputs and seed give identical results
//! - `integration.rs`: end-to-end checks across phases
//! - `helpers.rs`: battle and match factories shared by both

mod determinism;
mod helpers;

pub use helpers::*;

//! weightforge-testkit - Randomized conformance harness for weight types
//!
//! This crate validates the algebraic and numeric contracts of
//! `weightforge-core`:
//! - [`WeightGenerator`] produces deterministic, seed-derived streams of
//!   member values for any weight type implementing [`RandomWeight`]
//! - [`WeightTester`] runs randomized trials of the semiring, equality,
//!   ordering and text-I/O laws each type declares
//! - [`HarnessConfig`] carries the only tunable parameters of the testing
//!   surface: the seed and the repeat count
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! weightforge-testkit = { workspace = true }
//! ```

pub mod config;
pub mod generate;
pub mod tester;

pub use config::{ConfigError, HarnessConfig};
pub use generate::{GenerateOptions, RandomWeight, WeightGenerator};
pub use tester::WeightTester;

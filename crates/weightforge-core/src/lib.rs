//! weightforge-core - Weight algebra for weighted finite-state transducers
//!
//! This crate provides the mathematical foundation of the toolkit:
//! - Scalar semiring families (tropical, log, real, min-max, signed log)
//!   over two floating precisions
//! - String and set weights
//! - Composite combinators (product, lexicographic, power, sparse power,
//!   union, gallic, expectation) nesting to arbitrary depth
//! - Structural conversion between related weight types
//! - Compensated accumulation of long weight sequences
//!
//! Everything downstream — composition, shortest distance, optimization —
//! leans on the contracts defined here, so the companion testkit crate
//! checks them exhaustively with randomized trials.

pub mod adder;
pub mod convert;
pub mod error;
pub mod weight;

pub use adder::{Adder, Summable};
pub use convert::WeightConvert;
pub use error::WeightError;
pub use weight::{
    minus, plus, times, BooleanSet, ExpectationWeight, FloatT, GallicLeft, GallicMin,
    GallicRestrict, GallicRight, GallicUnionWeight, GallicVariant, GallicWeight, IntersectUnion,
    Label, LeftString, LexicographicWeight, LogWeight, MinMaxWeight, NaturalLess, PowerWeight,
    ProductWeight, RealWeight, RestrictString, RightString, SetVariant, SetWeight, SignedLogWeight,
    SignedWeight, SparsePowerWeight, StringVariant, StringWeight, TextConfig, TropicalWeight,
    UnionIntersect, UnionWeight, UnionWeightOptions, Weight, WeightProperties, DELTA,
};

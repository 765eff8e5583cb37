//! Weight types: the semiring values a transducer toolkit computes with.
//!
//! All weight types are immutable values implementing [`Weight`]. Scalar
//! families come in two floating precisions (distinct types with distinct
//! identifiers); composite combinators nest to arbitrary depth.

#[macro_use]
mod macros;

mod expectation;
mod float;
mod gallic;
mod lexicographic;
mod log;
mod minmax;
mod power;
mod product;
mod real;
mod set_weight;
mod signed_log;
mod sparse_power;
mod string_weight;
pub mod text;
mod traits;
mod tropical;
mod union;

#[cfg(test)]
mod tests;

pub use expectation::ExpectationWeight;
pub use float::{FloatT, DELTA};
pub use gallic::{
    GallicKind, GallicLeft, GallicMin, GallicMinRight, GallicRestrict, GallicRight,
    GallicUnionOptions, GallicUnionWeight, GallicVariant, GallicWeight,
};
pub use lexicographic::LexicographicWeight;
pub use log::LogWeight;
pub use minmax::MinMaxWeight;
pub use power::PowerWeight;
pub use product::ProductWeight;
pub use real::RealWeight;
pub use set_weight::{BooleanSet, IntersectUnion, SetKind, SetVariant, SetWeight, UnionIntersect};
pub use signed_log::SignedLogWeight;
pub use sparse_power::SparsePowerWeight;
pub use string_weight::{
    Label, LeftString, RestrictString, RightString, StringKind, StringVariant, StringWeight,
};
pub use text::{TextConfig, TextReader, TextWriter};
pub use traits::{
    minus, plus, times, NaturalLess, ScaleWeight, SignedWeight, Weight, WeightProperties,
};
pub use tropical::TropicalWeight;
pub use union::{UnionWeight, UnionWeightOptions};

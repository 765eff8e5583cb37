//! weightforge - Weight algebra for weighted finite-state transducers
//!
//! Semiring value types and the numeric plumbing every transducer
//! algorithm leans on:
//!
//! ```
//! use weightforge::{TropicalWeight, Weight};
//!
//! let a = TropicalWeight::from(2.0f32);
//! let b = TropicalWeight::from(3.0f32);
//! assert_eq!(a.plus(&b), a);                          // min
//! assert_eq!(a.times(&b), TropicalWeight::from(5.0f32)); // +
//! ```

// Weight contract and scalar families
pub use weightforge_core::weight::{
    minus, plus, times, FloatT, Label, LogWeight, MinMaxWeight, NaturalLess, RealWeight,
    SignedLogWeight, SignedWeight, TropicalWeight, Weight, WeightProperties, DELTA,
};

// Sequence and set weights
pub use weightforge_core::weight::{
    BooleanSet, IntersectUnion, LeftString, RestrictString, RightString, SetVariant, SetWeight,
    StringVariant, StringWeight, UnionIntersect,
};

// Composite combinators
pub use weightforge_core::weight::{
    ExpectationWeight, GallicLeft, GallicMin, GallicRestrict, GallicRight, GallicUnionWeight,
    GallicVariant, GallicWeight, LexicographicWeight, PowerWeight, ProductWeight,
    SparsePowerWeight, UnionWeight, UnionWeightOptions,
};

// Text form
pub use weightforge_core::weight::TextConfig;

// Conversion and accumulation
pub use weightforge_core::{Adder, Summable, WeightConvert, WeightError};

//! Core weight trait definition

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::WeightError;
use crate::weight::float::DELTA;
use crate::weight::text::{TextConfig, TextReader, TextWriter};

/// Static capability record for a weight type.
///
/// The generic property tester inspects this record to decide which
/// semiring laws apply, instead of special-casing concrete types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightProperties {
    /// `Times` distributes over `Plus` from the left.
    pub left_semiring: bool,
    /// `Times` distributes over `Plus` from the right.
    pub right_semiring: bool,
    /// `Times` is commutative.
    pub commutative: bool,
    /// `Plus(a, a) == a`; prerequisite for [`NaturalLess`].
    pub idempotent: bool,
    /// `Plus(a, b)` is always one of its operands.
    pub path: bool,
}

impl WeightProperties {
    /// Distributivity holds on both sides.
    pub const fn semiring(&self) -> bool {
        self.left_semiring && self.right_semiring
    }

    /// Componentwise conjunction for pair-style composites.
    ///
    /// The path property never survives pairing: componentwise `Plus` can
    /// mix both operands.
    pub const fn both(self, other: Self) -> Self {
        WeightProperties {
            left_semiring: self.left_semiring && other.left_semiring,
            right_semiring: self.right_semiring && other.right_semiring,
            commutative: self.commutative && other.commutative,
            idempotent: self.idempotent && other.idempotent,
            path: false,
        }
    }
}

/// A value in a specific semiring.
///
/// All weights are immutable values: every operation returns a new
/// instance, and no operation panics on ordinary numeric edge cases.
/// Operating on a non-member value yields the `no_weight()` sentinel,
/// detectable via `is_member()` on the result.
pub trait Weight:
    Clone + Debug + Display + PartialEq + Hash + Send + Sync + Sized + 'static
{
    /// Weight type obtained when reversing a transducer over this type.
    type Reverse: Weight;

    /// The `Plus` identity and `Times` annihilator.
    fn zero() -> Self;

    /// The `Times` identity.
    fn one() -> Self;

    /// The non-member sentinel produced by invalid operations.
    fn no_weight() -> Self;

    fn plus(&self, rhs: &Self) -> Self;

    fn times(&self, rhs: &Self) -> Self;

    /// Whether this value lies in the semiring's valid domain.
    fn is_member(&self) -> bool;

    /// Approximate equality within `delta`.
    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool;

    /// Maps near-equal values to a canonical representative within `delta`,
    /// making approximate equality usable for hashing and comparison.
    fn quantize(&self, delta: f32) -> Self;

    /// Structural transform applied when reversing a transducer; the
    /// identity for commutative semirings.
    fn reverse(&self) -> Self::Reverse;

    fn properties() -> WeightProperties;

    /// Stable type identifier; distinct across families, variants and
    /// floating precisions.
    fn type_name() -> String;

    fn write_text(&self, w: &mut TextWriter);

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError>;

    /// Approximate equality with the default [`DELTA`] tolerance.
    fn approx_eq_default(&self, rhs: &Self) -> bool {
        self.approx_eq(rhs, DELTA)
    }

    /// Serializes to text under the given configuration.
    fn text(&self, cfg: &TextConfig) -> String {
        let mut w = TextWriter::new(cfg);
        self.write_text(&mut w);
        w.finish()
    }

    /// Parses the text form produced by [`text`](Weight::text) under the
    /// same configuration.
    fn from_text(s: &str, cfg: &TextConfig) -> Result<Self, WeightError> {
        let mut r = TextReader::new(s, cfg);
        let w = Self::read_text(&mut r)?;
        r.finish()?;
        Ok(w)
    }
}

/// Weights supporting exact subtraction (additive inverses).
pub trait SignedWeight: Weight {
    fn minus(&self, rhs: &Self) -> Self;
}

/// Left multiplication of `Self` by a scalar weight of type `S`.
///
/// Every weight type scales by itself via `Times`; tuple-like types
/// additionally scale componentwise by their element type. The
/// expectation combinator uses this to multiply a moment slot by a value
/// slot of a different type.
pub trait ScaleWeight<S: Weight>: Weight {
    fn scale(&self, scalar: &S) -> Self;
}

impl<W: Weight> ScaleWeight<W> for W {
    fn scale(&self, scalar: &W) -> W {
        scalar.times(self)
    }
}

/// `Plus` over anything convertible into `W`, so bare numerics work on
/// either side: `plus::<TropicalWeight>(3.0, TropicalWeight::zero())`.
pub fn plus<W: Weight>(a: impl Into<W>, b: impl Into<W>) -> W {
    a.into().plus(&b.into())
}

/// `Times` over anything convertible into `W`.
pub fn times<W: Weight>(a: impl Into<W>, b: impl Into<W>) -> W {
    a.into().times(&b.into())
}

/// `Minus` over anything convertible into `W`.
pub fn minus<W: SignedWeight>(a: impl Into<W>, b: impl Into<W>) -> W {
    a.into().minus(&b.into())
}

/// Three-way comparison in the natural order induced by an idempotent
/// `Plus`. Values whose sum is neither operand are treated as equivalent
/// (the order may be partial).
pub(crate) fn natural_cmp<W: Weight>(a: &W, b: &W) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let sum = a.plus(b);
    if &sum == a {
        Ordering::Less
    } else if &sum == b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// The strict order induced by an idempotent `Plus`:
/// `less(a, b) ⇔ Plus(a, b) == a && a != b`.
///
/// Only defined for idempotent semirings; constructing it for any other
/// type is a programming error.
#[derive(Clone, Copy, Debug)]
pub struct NaturalLess<W: Weight> {
    _weight: PhantomData<W>,
}

impl<W: Weight> NaturalLess<W> {
    /// # Panics
    /// Panics if `W` is not idempotent.
    pub fn new() -> Self {
        assert!(
            W::properties().idempotent,
            "natural order requires an idempotent Plus, which {} lacks",
            W::type_name()
        );
        NaturalLess {
            _weight: PhantomData,
        }
    }

    pub fn less(&self, a: &W, b: &W) -> bool {
        a != b && &a.plus(b) == a
    }
}

impl<W: Weight> Default for NaturalLess<W> {
    fn default() -> Self {
        Self::new()
    }
}

//! Lexicographic weight: ties on the first component break on the second.

use std::cmp::Ordering;
use std::fmt;

use crate::error::WeightError;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{natural_cmp, Weight, WeightProperties};

/// Pair of weights where `Plus` keeps the lexicographically smaller pair
/// in the natural order: the first components are compared with
/// `NaturalLess`, and only when they tie does the second component decide.
///
/// Both component types must be idempotent, or the natural order — and
/// with it this type's `Plus` — is not well defined.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct LexicographicWeight<W1: Weight, W2: Weight> {
    first: W1,
    second: W2,
}

impl<W1: Weight, W2: Weight> LexicographicWeight<W1, W2> {
    /// # Panics
    /// Panics if either component type is not idempotent.
    pub fn new(first: W1, second: W2) -> Self {
        assert!(
            W1::properties().idempotent && W2::properties().idempotent,
            "lexicographic weights require idempotent components, got {} and {}",
            W1::type_name(),
            W2::type_name()
        );
        LexicographicWeight { first, second }
    }

    pub fn first(&self) -> &W1 {
        &self.first
    }

    pub fn second(&self) -> &W2 {
        &self.second
    }

    fn pair(first: W1, second: W2) -> Self {
        LexicographicWeight { first, second }
    }
}

impl<W1: Weight, W2: Weight> Weight for LexicographicWeight<W1, W2> {
    type Reverse = LexicographicWeight<W1::Reverse, W2::Reverse>;

    fn zero() -> Self {
        Self::pair(W1::zero(), W2::zero())
    }

    fn one() -> Self {
        Self::pair(W1::one(), W2::one())
    }

    fn no_weight() -> Self {
        Self::pair(W1::no_weight(), W2::no_weight())
    }

    fn plus(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        match natural_cmp(&self.first, &rhs.first) {
            Ordering::Less => self.clone(),
            Ordering::Greater => rhs.clone(),
            Ordering::Equal => match natural_cmp(&self.second, &rhs.second) {
                Ordering::Greater => rhs.clone(),
                _ => self.clone(),
            },
        }
    }

    fn times(&self, rhs: &Self) -> Self {
        Self::pair(
            self.first.times(&rhs.first),
            self.second.times(&rhs.second),
        )
    }

    fn is_member(&self) -> bool {
        self.first.is_member() && self.second.is_member()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        self.first.approx_eq(&rhs.first, delta) && self.second.approx_eq(&rhs.second, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        Self::pair(self.first.quantize(delta), self.second.quantize(delta))
    }

    fn reverse(&self) -> Self::Reverse {
        LexicographicWeight {
            first: self.first.reverse(),
            second: self.second.reverse(),
        }
    }

    fn properties() -> WeightProperties {
        let p1 = W1::properties();
        let p2 = W2::properties();
        WeightProperties {
            left_semiring: p1.left_semiring && p2.left_semiring,
            right_semiring: p1.right_semiring && p2.right_semiring,
            commutative: p1.commutative && p2.commutative,
            idempotent: true,
            path: p1.path && p2.path,
        }
    }

    fn type_name() -> String {
        format!("lexicographic_{}_{}", W1::type_name(), W2::type_name())
    }

    fn write_text(&self, w: &mut TextWriter) {
        w.begin();
        self.first.write_text(w);
        self.second.write_text(w);
        w.end();
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        r.begin()?;
        let first = W1::read_text(r)?;
        let second = W2::read_text(r)?;
        r.end()?;
        Ok(Self::pair(first, second))
    }
}

impl<W1: Weight, W2: Weight> fmt::Display for LexicographicWeight<W1, W2> {
    fmt_display_via_text!();
}

//! Product weight: componentwise pairing of two semirings.

use std::fmt;

use crate::error::WeightError;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Pair of weights with componentwise `Plus` and `Times`.
///
/// The component types may differ, and may themselves be composite, so
/// products nest to arbitrary depth.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct ProductWeight<W1: Weight, W2: Weight> {
    first: W1,
    second: W2,
}

impl<W1: Weight, W2: Weight> ProductWeight<W1, W2> {
    pub fn new(first: W1, second: W2) -> Self {
        ProductWeight { first, second }
    }

    pub fn first(&self) -> &W1 {
        &self.first
    }

    pub fn second(&self) -> &W2 {
        &self.second
    }
}

impl<W1: Weight, W2: Weight> Weight for ProductWeight<W1, W2> {
    type Reverse = ProductWeight<W1::Reverse, W2::Reverse>;

    fn zero() -> Self {
        ProductWeight::new(W1::zero(), W2::zero())
    }

    fn one() -> Self {
        ProductWeight::new(W1::one(), W2::one())
    }

    fn no_weight() -> Self {
        ProductWeight::new(W1::no_weight(), W2::no_weight())
    }

    fn plus(&self, rhs: &Self) -> Self {
        ProductWeight::new(self.first.plus(&rhs.first), self.second.plus(&rhs.second))
    }

    fn times(&self, rhs: &Self) -> Self {
        ProductWeight::new(
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
        ProductWeight::new(self.first.quantize(delta), self.second.quantize(delta))
    }

    fn reverse(&self) -> Self::Reverse {
        ProductWeight::new(self.first.reverse(), self.second.reverse())
    }

    fn properties() -> WeightProperties {
        W1::properties().both(W2::properties())
    }

    fn type_name() -> String {
        format!("product_{}_{}", W1::type_name(), W2::type_name())
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
        Ok(ProductWeight::new(first, second))
    }
}

impl<W1: Weight, W2: Weight> fmt::Display for ProductWeight<W1, W2> {
    fmt_display_via_text!();
}

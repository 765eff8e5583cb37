//! Expectation weight: first- and second-moment accumulator pairs.

use std::fmt;

use crate::error::WeightError;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{ScaleWeight, Weight, WeightProperties};

/// Pair (value, moment) accumulating a quantity's probability mass and a
/// weighted second moment.
///
/// `Plus` is componentwise; `Times` follows the product rule
/// `(x1, x2) ⊗ (y1, y2) = (x1·y1, x1·y2 ⊕ x2·y1)` so scaling a
/// distribution scales both moments consistently. `One` is (1, 0).
/// The moment type must support scaling by the value type
/// ([`ScaleWeight`]); sharing one scalar family, or wrapping it in a
/// sparse power, satisfies that.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct ExpectationWeight<W1: Weight, W2: Weight> {
    value: W1,
    moment: W2,
}

impl<W1: Weight, W2: Weight> ExpectationWeight<W1, W2> {
    pub fn new(value: W1, moment: W2) -> Self {
        ExpectationWeight { value, moment }
    }

    pub fn value(&self) -> &W1 {
        &self.value
    }

    pub fn moment(&self) -> &W2 {
        &self.moment
    }
}

impl<W1, W2> Weight for ExpectationWeight<W1, W2>
where
    W1: Weight<Reverse = W1>,
    W2: ScaleWeight<W1> + Weight<Reverse = W2>,
{
    // Expectation pairs are built over reverse-invariant components
    // (scalar families and powers thereof), so the pair reverses onto
    // its own type.
    type Reverse = Self;

    fn zero() -> Self {
        ExpectationWeight::new(W1::zero(), W2::zero())
    }

    fn one() -> Self {
        ExpectationWeight::new(W1::one(), W2::zero())
    }

    fn no_weight() -> Self {
        ExpectationWeight::new(W1::no_weight(), W2::no_weight())
    }

    fn plus(&self, rhs: &Self) -> Self {
        ExpectationWeight::new(self.value.plus(&rhs.value), self.moment.plus(&rhs.moment))
    }

    fn times(&self, rhs: &Self) -> Self {
        // Product rule: d(xy) = x dy + y dx, carried in the moment slot.
        ExpectationWeight::new(
            self.value.times(&rhs.value),
            rhs.moment
                .scale(&self.value)
                .plus(&self.moment.scale(&rhs.value)),
        )
    }

    fn is_member(&self) -> bool {
        self.value.is_member() && self.moment.is_member()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        self.value.approx_eq(&rhs.value, delta) && self.moment.approx_eq(&rhs.moment, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        ExpectationWeight::new(self.value.quantize(delta), self.moment.quantize(delta))
    }

    fn reverse(&self) -> Self {
        ExpectationWeight::new(self.value.reverse(), self.moment.reverse())
    }

    fn properties() -> WeightProperties {
        let p = W1::properties().both(W2::properties());
        WeightProperties {
            idempotent: false,
            ..p
        }
    }

    fn type_name() -> String {
        format!("expectation_{}_{}", W1::type_name(), W2::type_name())
    }

    fn write_text(&self, w: &mut TextWriter) {
        w.begin();
        self.value.write_text(w);
        self.moment.write_text(w);
        w.end();
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        r.begin()?;
        let value = W1::read_text(r)?;
        let moment = W2::read_text(r)?;
        r.end()?;
        Ok(ExpectationWeight::new(value, moment))
    }
}

impl<W1, W2> fmt::Display for ExpectationWeight<W1, W2>
where
    W1: Weight<Reverse = W1>,
    W2: ScaleWeight<W1> + Weight<Reverse = W2>,
{
    fmt_display_via_text!();
}

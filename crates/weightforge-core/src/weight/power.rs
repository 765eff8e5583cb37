//! Power weight: fixed-arity homogeneous tuple.

use std::fmt;

use crate::error::WeightError;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Fixed-size tuple of `N` weights of the same type, with componentwise
/// `Plus` and `Times` and indexed access.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct PowerWeight<W: Weight, const N: usize> {
    values: [W; N],
}

impl<W: Weight, const N: usize> PowerWeight<W, N> {
    pub fn new(values: [W; N]) -> Self {
        PowerWeight { values }
    }

    /// # Panics
    /// Panics if `index >= N`.
    pub fn value(&self, index: usize) -> &W {
        &self.values[index]
    }

    /// # Panics
    /// Panics if `index >= N`.
    pub fn set_value(&mut self, index: usize, w: W) {
        self.values[index] = w;
    }

    fn map(&self, rhs: &Self, f: impl Fn(&W, &W) -> W) -> Self {
        PowerWeight {
            values: std::array::from_fn(|i| f(&self.values[i], &rhs.values[i])),
        }
    }
}

impl<W: Weight, const N: usize> Weight for PowerWeight<W, N> {
    type Reverse = PowerWeight<W::Reverse, N>;

    fn zero() -> Self {
        PowerWeight {
            values: std::array::from_fn(|_| W::zero()),
        }
    }

    fn one() -> Self {
        PowerWeight {
            values: std::array::from_fn(|_| W::one()),
        }
    }

    fn no_weight() -> Self {
        PowerWeight {
            values: std::array::from_fn(|_| W::no_weight()),
        }
    }

    fn plus(&self, rhs: &Self) -> Self {
        self.map(rhs, |a, b| a.plus(b))
    }

    fn times(&self, rhs: &Self) -> Self {
        self.map(rhs, |a, b| a.times(b))
    }

    fn is_member(&self) -> bool {
        self.values.iter().all(W::is_member)
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        self.values
            .iter()
            .zip(rhs.values.iter())
            .all(|(a, b)| a.approx_eq(b, delta))
    }

    fn quantize(&self, delta: f32) -> Self {
        PowerWeight {
            values: std::array::from_fn(|i| self.values[i].quantize(delta)),
        }
    }

    fn reverse(&self) -> Self::Reverse {
        PowerWeight {
            values: std::array::from_fn(|i| self.values[i].reverse()),
        }
    }

    fn properties() -> WeightProperties {
        let p = W::properties();
        WeightProperties { path: false, ..p }
    }

    fn type_name() -> String {
        format!("{}_^{}", W::type_name(), N)
    }

    fn write_text(&self, w: &mut TextWriter) {
        w.begin();
        for v in &self.values {
            v.write_text(w);
        }
        w.end();
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        r.begin()?;
        let mut values = Vec::with_capacity(N);
        for _ in 0..N {
            values.push(W::read_text(r)?);
        }
        r.end()?;
        match values.try_into() {
            Ok(values) => Ok(PowerWeight { values }),
            Err(_) => unreachable!("read exactly N components"),
        }
    }
}

impl<W: Weight, const N: usize> fmt::Display for PowerWeight<W, N> {
    fmt_display_via_text!();
}

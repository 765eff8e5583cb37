//! Signed log semiring: the log semiring extended with a sign, so exact
//! subtraction is defined.

use crate::error::WeightError;
use crate::weight::float::{approx_eq_float, float_from_atom, float_to_atom, quantize_float, FloatT};
use crate::weight::log::log_plus;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{SignedWeight, Weight, WeightProperties};

/// Weight in the signed log semiring.
///
/// A value is `sign · e^(−magnitude)`: the magnitude lives in the −log
/// domain exactly like [`LogWeight`](crate::weight::LogWeight), and the
/// sign makes additive inverses — and therefore [`SignedWeight::minus`] —
/// well defined. `Zero` is (+, +∞) and `One` is (+, 0).
///
/// Negative zero is normalized away at construction: any value with an
/// infinite magnitude is stored with a positive sign, so derived equality
/// and hashing agree with semiring equality.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedLogWeight<T: FloatT = f32> {
    positive: bool,
    magnitude: T,
}

impl<T: FloatT> SignedLogWeight<T> {
    pub fn new(positive: bool, magnitude: T) -> Self {
        if magnitude == T::infinity() || magnitude.is_nan() {
            SignedLogWeight {
                positive: true,
                magnitude,
            }
        } else {
            SignedLogWeight {
                positive,
                magnitude,
            }
        }
    }

    #[inline]
    pub fn positive(&self) -> bool {
        self.positive
    }

    /// The −log of the absolute value.
    #[inline]
    pub fn magnitude(&self) -> T {
        self.magnitude
    }

    /// The additive inverse.
    pub fn negated(&self) -> Self {
        SignedLogWeight::new(!self.positive, self.magnitude)
    }
}

impl<T: FloatT> Weight for SignedLogWeight<T> {
    type Reverse = Self;

    #[inline]
    fn zero() -> Self {
        SignedLogWeight::new(true, T::infinity())
    }

    #[inline]
    fn one() -> Self {
        SignedLogWeight::new(true, T::zero())
    }

    #[inline]
    fn no_weight() -> Self {
        SignedLogWeight::new(true, T::nan())
    }

    fn plus(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        if self.magnitude == T::infinity() {
            return *rhs;
        }
        if rhs.magnitude == T::infinity() {
            return *self;
        }
        if self.positive == rhs.positive {
            return SignedLogWeight::new(self.positive, log_plus(self.magnitude, rhs.magnitude));
        }
        // Opposite signs: the dominant term (smaller magnitude in the
        // -log domain) decides the sign; equal magnitudes cancel exactly.
        if self.magnitude == rhs.magnitude {
            return Self::zero();
        }
        let (dominant, other) = if self.magnitude < rhs.magnitude {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let lo = dominant.magnitude;
        let hi = other.magnitude;
        // -log(e^-lo - e^-hi) = lo - ln(1 - e^(lo - hi))
        let mag = lo - (-(lo - hi).exp()).ln_1p();
        SignedLogWeight::new(dominant.positive, mag)
    }

    fn times(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        SignedLogWeight::new(
            self.positive == rhs.positive,
            self.magnitude + rhs.magnitude,
        )
    }

    fn is_member(&self) -> bool {
        !self.magnitude.is_nan() && self.magnitude != T::neg_infinity()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        if self.positive == rhs.positive {
            approx_eq_float(self.magnitude, rhs.magnitude, delta)
        } else {
            // Opposite signs only agree near zero: the linear residue of
            // both sides must fit inside the tolerance.
            (-self.magnitude.to_f64()).exp() + (-rhs.magnitude.to_f64()).exp() <= delta as f64
        }
    }

    fn quantize(&self, delta: f32) -> Self {
        SignedLogWeight::new(self.positive, quantize_float(self.magnitude, delta))
    }

    fn reverse(&self) -> Self {
        *self
    }

    fn properties() -> WeightProperties {
        WeightProperties {
            left_semiring: true,
            right_semiring: true,
            commutative: true,
            idempotent: false,
            path: false,
        }
    }

    fn type_name() -> String {
        format!("signed_log{}", T::SUFFIX)
    }

    fn write_text(&self, w: &mut TextWriter) {
        let sign = if self.positive { '+' } else { '-' };
        w.atom(format_args!("{}{}", sign, float_to_atom(self.magnitude)));
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        let pos = r.pos();
        let atom = r.atom()?;
        let (positive, rest) = match atom.chars().next() {
            Some('+') => (true, &atom[1..]),
            Some('-') => (false, &atom[1..]),
            _ => {
                return Err(WeightError::parse(
                    pos,
                    format!("signed log value '{atom}' must start with a sign"),
                ))
            }
        };
        float_from_atom(rest)
            .map(|m| SignedLogWeight::new(positive, m))
            .ok_or_else(|| WeightError::parse(pos, format!("invalid signed log value '{atom}'")))
    }
}

impl<T: FloatT> SignedWeight for SignedLogWeight<T> {
    fn minus(&self, rhs: &Self) -> Self {
        self.plus(&rhs.negated())
    }
}

impl<T: FloatT> std::hash::Hash for SignedLogWeight<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u8(self.positive as u8);
        state.write_u64(self.magnitude.to_bits64());
    }
}

impl<T: FloatT> std::fmt::Display for SignedLogWeight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{}{}", sign, float_to_atom(self.magnitude))
    }
}

//! Numerically stable accumulation of many weight values.

use std::fmt;

use crate::weight::{
    ExpectationWeight, FloatT, GallicVariant, GallicWeight, Label, LexicographicWeight, LogWeight,
    MinMaxWeight, PowerWeight, ProductWeight, RealWeight, ScaleWeight, SetVariant, SetWeight,
    SignedLogWeight, SparsePowerWeight, StringVariant, StringWeight, TropicalWeight, UnionWeight,
    UnionWeightOptions, Weight,
};

/// Accumulator state behind [`Adder`].
///
/// Exact semirings fold with plain `Plus`; floating semirings carry a
/// compensation term so error stays bounded over long sequences instead
/// of growing with every addition.
pub trait Summable: Weight {
    type Acc: Clone + fmt::Debug;

    fn acc_init(init: &Self) -> Self::Acc;

    fn acc_add(acc: &mut Self::Acc, w: &Self);

    fn acc_sum(acc: &Self::Acc) -> Self;
}

/// Accumulates a sequence of weights under repeated `Plus`, equivalent
/// (within tolerance for floating semirings) to a left-to-right fold.
#[derive(Clone, Debug)]
pub struct Adder<W: Summable> {
    acc: W::Acc,
}

impl<W: Summable> Adder<W> {
    /// Starts from `Zero`.
    pub fn new() -> Self {
        Adder {
            acc: W::acc_init(&W::zero()),
        }
    }

    /// Starts from an existing weight.
    pub fn from_weight(w: &W) -> Self {
        Adder { acc: W::acc_init(w) }
    }

    pub fn add(&mut self, w: &W) {
        W::acc_add(&mut self.acc, w);
    }

    /// The accumulated sum so far.
    pub fn sum(&self) -> W {
        W::acc_sum(&self.acc)
    }

    pub fn reset(&mut self) {
        self.acc = W::acc_init(&W::zero());
    }
}

impl<W: Summable> Default for Adder<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain running fold; exact for these types, so no compensation applies.
macro_rules! plain_fold_summable {
    (impl[$($g:tt)*] Summable for $t:ty) => {
        impl<$($g)*> Summable for $t {
            type Acc = $t;

            fn acc_init(init: &Self) -> Self::Acc {
                init.clone()
            }

            fn acc_add(acc: &mut Self::Acc, w: &Self) {
                *acc = acc.plus(w);
            }

            fn acc_sum(acc: &Self::Acc) -> Self {
                acc.clone()
            }
        }
    };
}

plain_fold_summable!(impl[T: FloatT] Summable for TropicalWeight<T>);
plain_fold_summable!(impl[T: FloatT] Summable for MinMaxWeight<T>);
plain_fold_summable!(impl[L: Label, V: StringVariant] Summable for StringWeight<L, V>);
plain_fold_summable!(impl[L: Label, V: SetVariant] Summable for SetWeight<L, V>);
plain_fold_summable!(impl[W1: Weight, W2: Weight] Summable for ProductWeight<W1, W2>);
plain_fold_summable!(impl[W1: Weight, W2: Weight] Summable for LexicographicWeight<W1, W2>);
plain_fold_summable!(impl[W: Weight, const N: usize] Summable for PowerWeight<W, N>);
plain_fold_summable!(impl[W: Weight] Summable for SparsePowerWeight<W>);
plain_fold_summable!(impl[W: Weight, O: UnionWeightOptions<W>] Summable for UnionWeight<W, O>);
plain_fold_summable!(impl[L: Label, W: Weight, V: GallicVariant] Summable for GallicWeight<L, W, V>);

impl<W1, W2> Summable for ExpectationWeight<W1, W2>
where
    W1: Weight<Reverse = W1>,
    W2: ScaleWeight<W1> + Weight<Reverse = W2>,
{
    type Acc = Self;

    fn acc_init(init: &Self) -> Self::Acc {
        init.clone()
    }

    fn acc_add(acc: &mut Self::Acc, w: &Self) {
        *acc = acc.plus(w);
    }

    fn acc_sum(acc: &Self::Acc) -> Self {
        acc.clone()
    }
}

/// Kahan accumulator for the real semiring: the `comp` term recovers the
/// low-order bits each addition drops.
#[derive(Clone, Debug)]
pub struct KahanAcc {
    sum: f64,
    comp: f64,
}

impl<T: FloatT> Summable for RealWeight<T> {
    type Acc = KahanAcc;

    fn acc_init(init: &Self) -> KahanAcc {
        KahanAcc {
            sum: init.value().to_f64(),
            comp: 0.0,
        }
    }

    fn acc_add(acc: &mut KahanAcc, w: &Self) {
        let y = w.value().to_f64() - acc.comp;
        let t = acc.sum + y;
        acc.comp = (t - acc.sum) - y;
        acc.sum = t;
    }

    fn acc_sum(acc: &KahanAcc) -> Self {
        RealWeight::new(T::from_f64(acc.sum))
    }
}

/// Compensated log-sum accumulator: the running sum lives in the −log
/// domain and the compensation term corrects the log-add increments.
#[derive(Clone, Debug)]
pub struct LogAcc {
    sum: f64,
    comp: f64,
}

fn kahan_log_add(acc_sum: f64, acc_comp: &mut f64, f: f64) -> f64 {
    // Work from the dominant (smaller, in -log space) term.
    let (lo, hi) = if acc_sum <= f { (acc_sum, f) } else { (f, acc_sum) };
    let y = -(lo - hi).exp().ln_1p() - *acc_comp;
    let t = lo + y;
    *acc_comp = (t - lo) - y;
    t
}

impl<T: FloatT> Summable for LogWeight<T> {
    type Acc = LogAcc;

    fn acc_init(init: &Self) -> LogAcc {
        LogAcc {
            sum: init.value().to_f64(),
            comp: 0.0,
        }
    }

    fn acc_add(acc: &mut LogAcc, w: &Self) {
        let f = w.value().to_f64();
        if f.is_nan() {
            acc.sum = f64::NAN;
            return;
        }
        if acc.sum.is_nan() || f == f64::INFINITY {
            return;
        }
        if acc.sum == f64::INFINITY {
            acc.sum = f;
            acc.comp = 0.0;
            return;
        }
        acc.sum = kahan_log_add(acc.sum, &mut acc.comp, f);
    }

    fn acc_sum(acc: &LogAcc) -> Self {
        LogWeight::new(T::from_f64(acc.sum))
    }
}

/// Sign-aware variant of [`LogAcc`]: opposite-sign contributions go
/// through a compensated log-difference, so subtraction stays stable and
/// equal magnitudes cancel to exact `Zero`.
#[derive(Clone, Debug)]
pub struct SignedLogAcc {
    positive: bool,
    sum: f64,
    comp: f64,
}

impl<T: FloatT> Summable for SignedLogWeight<T> {
    type Acc = SignedLogAcc;

    fn acc_init(init: &Self) -> SignedLogAcc {
        SignedLogAcc {
            positive: init.positive(),
            sum: init.magnitude().to_f64(),
            comp: 0.0,
        }
    }

    fn acc_add(acc: &mut SignedLogAcc, w: &Self) {
        let f = w.magnitude().to_f64();
        if f.is_nan() {
            acc.sum = f64::NAN;
            return;
        }
        if acc.sum.is_nan() || f == f64::INFINITY {
            return;
        }
        if acc.sum == f64::INFINITY {
            acc.positive = w.positive();
            acc.sum = f;
            acc.comp = 0.0;
            return;
        }
        if acc.positive == w.positive() {
            acc.sum = kahan_log_add(acc.sum, &mut acc.comp, f);
            return;
        }
        if acc.sum == f {
            // Exact cancellation.
            acc.positive = true;
            acc.sum = f64::INFINITY;
            acc.comp = 0.0;
            return;
        }
        let (lo, hi, positive) = if acc.sum < f {
            (acc.sum, f, acc.positive)
        } else {
            (f, acc.sum, w.positive())
        };
        // -log(e^-lo - e^-hi) = lo - ln(1 - e^(lo - hi))
        let y = -(-(lo - hi).exp()).ln_1p() - acc.comp;
        let t = lo + y;
        acc.comp = (t - lo) - y;
        acc.sum = t;
        acc.positive = positive;
    }

    fn acc_sum(acc: &SignedLogAcc) -> Self {
        SignedLogWeight::new(acc.positive, T::from_f64(acc.sum))
    }
}

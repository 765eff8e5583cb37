//! Structural conversion between related weight types.

use crate::weight::{
    ExpectationWeight, FloatT, GallicVariant, GallicWeight, Label, LexicographicWeight, LogWeight,
    MinMaxWeight, PowerWeight, ProductWeight, RealWeight, ScaleWeight, SetVariant, SetWeight,
    SignedLogWeight, SparsePowerWeight, StringVariant, StringWeight, TropicalWeight, UnionWeight,
    UnionWeightOptions, Weight,
};

/// Conversion to a related weight type.
///
/// A pure function, total over member values: lossy projections (such as
/// a negative signed-log value into the plain log semiring) yield
/// `To::no_weight()` rather than an arbitrary value. Composite impls
/// recurse structurally, converting each component with the corresponding
/// inner conversion. Round trips are exact except across floating
/// precisions or domains, which round-trip within tolerance.
pub trait WeightConvert<To: Weight>: Weight {
    fn convert(&self) -> To;
}

/// Cross-precision conversion within one scalar family (covers the
/// identity conversion as the same-precision case).
macro_rules! impl_scalar_convert_family {
    ($type:ident) => {
        impl<T: FloatT, U: FloatT> WeightConvert<$type<U>> for $type<T> {
            fn convert(&self) -> $type<U> {
                $type::new(U::from_f64(self.value().to_f64()))
            }
        }
    };
}

impl_scalar_convert_family!(TropicalWeight);
impl_scalar_convert_family!(LogWeight);
impl_scalar_convert_family!(RealWeight);
impl_scalar_convert_family!(MinMaxWeight);

impl<T: FloatT, U: FloatT> WeightConvert<SignedLogWeight<U>> for SignedLogWeight<T> {
    fn convert(&self) -> SignedLogWeight<U> {
        SignedLogWeight::new(self.positive(), U::from_f64(self.magnitude().to_f64()))
    }
}

// The tropical and log semirings share their value representation, so
// conversion between them is exact.

impl<T: FloatT, U: FloatT> WeightConvert<LogWeight<U>> for TropicalWeight<T> {
    fn convert(&self) -> LogWeight<U> {
        LogWeight::new(U::from_f64(self.value().to_f64()))
    }
}

impl<T: FloatT, U: FloatT> WeightConvert<TropicalWeight<U>> for LogWeight<T> {
    fn convert(&self) -> TropicalWeight<U> {
        TropicalWeight::new(U::from_f64(self.value().to_f64()))
    }
}

impl<T: FloatT, U: FloatT> WeightConvert<SignedLogWeight<U>> for LogWeight<T> {
    fn convert(&self) -> SignedLogWeight<U> {
        SignedLogWeight::new(true, U::from_f64(self.value().to_f64()))
    }
}

impl<T: FloatT, U: FloatT> WeightConvert<LogWeight<U>> for SignedLogWeight<T> {
    /// Negative values have no image in the plain log semiring.
    fn convert(&self) -> LogWeight<U> {
        if self.positive() {
            LogWeight::new(U::from_f64(self.magnitude().to_f64()))
        } else {
            LogWeight::no_weight()
        }
    }
}

impl<T: FloatT, U: FloatT> WeightConvert<RealWeight<U>> for LogWeight<T> {
    fn convert(&self) -> RealWeight<U> {
        RealWeight::new(U::from_f64((-self.value().to_f64()).exp()))
    }
}

impl<T: FloatT, U: FloatT> WeightConvert<LogWeight<U>> for RealWeight<T> {
    /// Negative reals have no image in the log semiring.
    fn convert(&self) -> LogWeight<U> {
        let v = self.value().to_f64();
        if v.is_nan() || v < 0.0 {
            LogWeight::no_weight()
        } else {
            LogWeight::new(U::from_f64(-v.ln()))
        }
    }
}

impl<L: Label, V1: StringVariant, V2: StringVariant> WeightConvert<StringWeight<L, V2>>
    for StringWeight<L, V1>
{
    /// Label-preserving; changing the variant reinterprets how `Plus`
    /// will combine the sequence, not the sequence itself.
    fn convert(&self) -> StringWeight<L, V2> {
        if !self.is_member() {
            StringWeight::no_weight()
        } else {
            match self.labels() {
                Some(labels) => StringWeight::from_labels(labels.iter().copied()),
                None => StringWeight::zero(),
            }
        }
    }
}

impl<L: Label, V1: SetVariant, V2: SetVariant> WeightConvert<SetWeight<L, V2>>
    for SetWeight<L, V1>
{
    fn convert(&self) -> SetWeight<L, V2> {
        if !self.is_member() {
            SetWeight::no_weight()
        } else {
            match self.labels() {
                Some(labels) => SetWeight::from_labels(labels.iter().copied()),
                None => SetWeight::universe(),
            }
        }
    }
}

impl<L, W1, W2, V1, V2> WeightConvert<GallicWeight<L, W2, V2>> for GallicWeight<L, W1, V1>
where
    L: Label,
    W1: WeightConvert<W2>,
    W2: Weight,
    V1: GallicVariant,
    V2: GallicVariant,
{
    fn convert(&self) -> GallicWeight<L, W2, V2> {
        GallicWeight::new(self.string().convert(), self.weight().convert())
    }
}

impl<A, B, C, D> WeightConvert<ProductWeight<C, D>> for ProductWeight<A, B>
where
    A: WeightConvert<C>,
    B: WeightConvert<D>,
    C: Weight,
    D: Weight,
{
    fn convert(&self) -> ProductWeight<C, D> {
        ProductWeight::new(self.first().convert(), self.second().convert())
    }
}

impl<A, B, C, D> WeightConvert<LexicographicWeight<C, D>> for LexicographicWeight<A, B>
where
    A: WeightConvert<C>,
    B: WeightConvert<D>,
    C: Weight,
    D: Weight,
{
    fn convert(&self) -> LexicographicWeight<C, D> {
        LexicographicWeight::new(self.first().convert(), self.second().convert())
    }
}

impl<A, B, const N: usize> WeightConvert<PowerWeight<B, N>> for PowerWeight<A, N>
where
    A: WeightConvert<B>,
    B: Weight,
{
    fn convert(&self) -> PowerWeight<B, N> {
        PowerWeight::new(std::array::from_fn(|i| self.value(i).convert()))
    }
}

impl<A, B> WeightConvert<SparsePowerWeight<B>> for SparsePowerWeight<A>
where
    A: WeightConvert<B>,
    B: Weight,
{
    fn convert(&self) -> SparsePowerWeight<B> {
        let mut out = SparsePowerWeight::with_default(self.default_value().convert());
        for (index, v) in self.iter() {
            out.set_value(index, v.convert());
        }
        out
    }
}

impl<A, OA, B, OB> WeightConvert<UnionWeight<B, OB>> for UnionWeight<A, OA>
where
    A: WeightConvert<B>,
    OA: UnionWeightOptions<A>,
    B: Weight,
    OB: UnionWeightOptions<B>,
{
    fn convert(&self) -> UnionWeight<B, OB> {
        match self.elements() {
            None => UnionWeight::no_weight(),
            Some(elements) => elements.iter().fold(UnionWeight::zero(), |acc, w| {
                acc.plus(&UnionWeight::from_weight(w.convert()))
            }),
        }
    }
}

impl<A1, A2, B1, B2> WeightConvert<ExpectationWeight<B1, B2>> for ExpectationWeight<A1, A2>
where
    A1: WeightConvert<B1> + Weight<Reverse = A1>,
    A2: WeightConvert<B2> + ScaleWeight<A1> + Weight<Reverse = A2>,
    B1: Weight<Reverse = B1>,
    B2: ScaleWeight<B1> + Weight<Reverse = B2>,
{
    fn convert(&self) -> ExpectationWeight<B1, B2> {
        ExpectationWeight::new(self.value().convert(), self.moment().convert())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weight::{IntersectUnion, LeftString, UnionIntersect};

    #[test]
    fn test_tropical_log_round_trip() {
        let w = TropicalWeight::<f32>::from(2.0f32);
        let log: LogWeight<f32> = w.convert();
        assert_eq!(log, LogWeight::from(2.0f32));
        let back: TropicalWeight<f32> = log.convert();
        assert_eq!(back, w);
    }

    #[test]
    fn test_cross_precision_widening_is_exact() {
        let w = TropicalWeight::<f32>::from(2.5f32);
        let wide: TropicalWeight<f64> = w.convert();
        let back: TropicalWeight<f32> = wide.convert();
        assert_eq!(back, w);
    }

    #[test]
    fn test_signed_log_projection_is_lossy() {
        let negative = SignedLogWeight::<f32>::new(false, 1.0);
        let log: LogWeight<f32> = negative.convert();
        assert!(!log.is_member());

        let positive = SignedLogWeight::<f32>::new(true, 1.0);
        let log: LogWeight<f32> = positive.convert();
        assert_eq!(log, LogWeight::from(1.0f32));
    }

    #[test]
    fn test_real_log_round_trip_within_tolerance() {
        let w = RealWeight::<f64>::from(3.0f64);
        let log: LogWeight<f64> = w.convert();
        let back: RealWeight<f64> = log.convert();
        assert!(back.approx_eq_default(&w));
    }

    #[test]
    fn test_set_variant_round_trip() {
        let iu = SetWeight::<i32, IntersectUnion>::from_labels([3, 1, 2]);
        let ui: SetWeight<i32, UnionIntersect> = iu.convert();
        assert_eq!(ui.labels(), Some(&[1, 2, 3][..]));
        let back: SetWeight<i32, IntersectUnion> = ui.convert();
        assert_eq!(back, iu);
    }

    #[test]
    fn test_product_recurses_componentwise() {
        let w = ProductWeight::new(
            TropicalWeight::<f32>::from(1.0f32),
            StringWeight::<i32, LeftString>::from_labels([4, 5]),
        );
        let converted: ProductWeight<LogWeight<f32>, StringWeight<i32, LeftString>> = w.convert();
        assert_eq!(*converted.first(), LogWeight::from(1.0f32));
        let back: ProductWeight<TropicalWeight<f32>, StringWeight<i32, LeftString>> =
            converted.convert();
        assert_eq!(back, w);
    }
}

//! Randomized conformance run over the full weight-type inventory.
//!
//! Every tester runs twice: once with the plain text form and once with a
//! configured parenthesis pair, so both composite grammars are exercised.

use std::cmp::Ordering;

use weightforge_core::adder::Adder;
use weightforge_core::convert::WeightConvert;
use weightforge_core::weight::{
    plus, times, BooleanSet, ExpectationWeight, FloatT, GallicLeft, GallicRestrict,
    GallicUnionWeight, GallicWeight, IntersectUnion, LeftString, LexicographicWeight, LogWeight,
    MinMaxWeight, PowerWeight, ProductWeight, RealWeight, RightString, SetWeight, SignedLogWeight,
    SignedWeight, SparsePowerWeight, StringWeight, TextConfig, TropicalWeight, UnionIntersect,
    UnionWeight, UnionWeightOptions, Weight,
};
use weightforge_testkit::{GenerateOptions, HarnessConfig, RandomWeight, WeightGenerator, WeightTester};

type Tropical = TropicalWeight<f32>;

/// Natural-less comparison with a first-wins merge, the conventional
/// options for unions over an idempotent inner type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
struct TropicalUnionOptions;

impl<T: FloatT> UnionWeightOptions<TropicalWeight<T>> for TropicalUnionOptions {
    type Reverse = TropicalUnionOptions;

    fn compare(a: &TropicalWeight<T>, b: &TropicalWeight<T>) -> Ordering {
        a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal)
    }

    fn merge(a: &TropicalWeight<T>, _b: &TropicalWeight<T>) -> TropicalWeight<T> {
        *a
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn conformance<W>(config: &HarnessConfig, opts: GenerateOptions)
where
    W: RandomWeight,
    W::Reverse: Weight<Reverse = W>,
{
    WeightTester::new(WeightGenerator::<W>::with_options(config.seed, opts)).test(config.repeat);
    WeightTester::new(WeightGenerator::<W>::with_options(config.seed, opts))
        .with_text_config(TextConfig::parenthesized())
        .test(config.repeat);
}

fn scalar_family_conformance<T: FloatT>(config: &HarnessConfig) {
    conformance::<TropicalWeight<T>>(config, GenerateOptions::default());
    conformance::<LogWeight<T>>(config, GenerateOptions::default());
    conformance::<RealWeight<T>>(config, GenerateOptions::default());
    conformance::<MinMaxWeight<T>>(config, GenerateOptions::default());
    conformance::<SignedLogWeight<T>>(config, GenerateOptions::default());
}

#[test]
fn test_scalar_weights_conform() {
    init_tracing();
    let config = HarnessConfig::default();
    scalar_family_conformance::<f32>(&config);
    scalar_family_conformance::<f64>(&config);
}

#[test]
fn test_string_weights_conform() {
    init_tracing();
    let config = HarnessConfig::default();
    conformance::<StringWeight<i32, LeftString>>(&config, GenerateOptions::default());
    conformance::<StringWeight<i32, RightString>>(&config, GenerateOptions::default());
    // The restricted variant requires equal operands, so it cannot face
    // independently generated ones.
}

#[test]
fn test_set_weights_conform() {
    init_tracing();
    let config = HarnessConfig::default();
    conformance::<SetWeight<i32, IntersectUnion>>(&config, GenerateOptions::default());
    conformance::<SetWeight<i32, UnionIntersect>>(&config, GenerateOptions::default());
    conformance::<SetWeight<i32, BooleanSet>>(&config, GenerateOptions::default());
}

#[test]
fn test_composite_weights_conform() {
    init_tracing();
    let config = HarnessConfig::default();

    conformance::<GallicWeight<i32, Tropical, GallicLeft>>(&config, GenerateOptions::default());
    conformance::<GallicUnionWeight<i32, Tropical>>(&config, GenerateOptions::no_zero());
    conformance::<ProductWeight<Tropical, Tropical>>(&config, GenerateOptions::default());
    conformance::<LexicographicWeight<Tropical, Tropical>>(&config, GenerateOptions::default());
    conformance::<PowerWeight<Tropical, 3>>(&config, GenerateOptions::default());
    conformance::<SparsePowerWeight<LogWeight<f32>>>(&config, GenerateOptions::default());
    conformance::<ExpectationWeight<LogWeight<f32>, LogWeight<f32>>>(
        &config,
        GenerateOptions::default(),
    );
    conformance::<ExpectationWeight<RealWeight<f64>, RealWeight<f64>>>(
        &config,
        GenerateOptions::default(),
    );
    conformance::<UnionWeight<Tropical, TropicalUnionOptions>>(&config, GenerateOptions::default());
}

#[test]
fn test_nested_composites_conform() {
    init_tracing();
    let config = HarnessConfig::default();

    type FirstNested = ProductWeight<ProductWeight<Tropical, Tropical>, Tropical>;
    type SecondNested = ProductWeight<Tropical, ProductWeight<Tropical, Tropical>>;
    type NestedCube = PowerWeight<FirstNested, 3>;
    type SparseNestedCube = SparsePowerWeight<PowerWeight<ProductWeight<Tropical, Tropical>, 3>>;
    type SparseExpectation = ExpectationWeight<LogWeight<f32>, SparsePowerWeight<LogWeight<f32>>>;

    conformance::<FirstNested>(&config, GenerateOptions::default());
    conformance::<SecondNested>(&config, GenerateOptions::default());
    conformance::<NestedCube>(&config, GenerateOptions::default());
    conformance::<SparseNestedCube>(&config, GenerateOptions::default());
    conformance::<SparseExpectation>(&config, GenerateOptions::default());
}

fn adder_matches_fold<W: RandomWeight + weightforge_core::Summable>(n: usize) {
    let mut sum = W::zero();
    let mut adder = Adder::<W>::new();
    for _ in 0..n {
        sum = sum.plus(&W::one());
        adder.add(&W::one());
    }
    assert!(
        adder.sum().approx_eq_default(&sum),
        "{}: adder diverged from direct fold",
        W::type_name()
    );
}

#[test]
fn test_adder_equivalence() {
    init_tracing();
    adder_matches_fold::<TropicalWeight<f32>>(1000);
    adder_matches_fold::<LogWeight<f32>>(1000);
    adder_matches_fold::<LogWeight<f64>>(1000);
    adder_matches_fold::<RealWeight<f32>>(1000);
    adder_matches_fold::<RealWeight<f64>>(1000);
}

#[test]
fn test_signed_adder_equivalence() {
    init_tracing();
    // +1 in the first and last quarters, -1 in between, so the running
    // sum crosses zero in both directions.
    let n = 1000;
    let one = SignedLogWeight::<f32>::one();
    let minus_one = SignedLogWeight::<f32>::zero().minus(&one);
    let mut sum = SignedLogWeight::<f32>::zero();
    let mut adder = Adder::<SignedLogWeight<f32>>::new();
    for i in 0..n {
        if i < n / 4 || i > 3 * n / 4 {
            sum = sum.plus(&one);
            adder.add(&one);
        } else {
            sum = sum.minus(&one);
            adder.add(&minus_one);
        }
    }
    assert!(adder.sum().approx_eq_default(&sum));
}

fn implicit_numeric_checks<W>()
where
    W: Weight + From<f32> + From<f64> + PartialEq<f32>,
{
    assert_eq!(W::from(2.0f32), 2.0f32);
    assert_eq!(W::from(2.0f64), 2.0f32);

    assert_eq!(W::zero(), times::<W>(W::zero(), 3.0f32));
    assert_eq!(W::zero(), times::<W>(W::zero(), 3.0f64));
    assert_eq!(W::zero(), times::<W>(3.0f64, W::zero()));

    assert_eq!(W::from(3.0f32), plus::<W>(W::zero(), 3.0f32));
    assert_eq!(W::from(3.0f32), plus::<W>(W::zero(), 3.0f64));
    assert_eq!(W::from(3.0f32), plus::<W>(3.0f64, W::zero()));
}

#[test]
fn test_implicit_numeric_construction() {
    init_tracing();
    implicit_numeric_checks::<TropicalWeight<f32>>();
    implicit_numeric_checks::<LogWeight<f32>>();
    implicit_numeric_checks::<RealWeight<f32>>();
    implicit_numeric_checks::<MinMaxWeight<f32>>();
}

fn convert_round_trip<A, B>(w: A)
where
    A: WeightConvert<B> + PartialEq,
    B: WeightConvert<A>,
{
    let there: B = w.convert();
    let back: A = there.convert();
    assert_eq!(back, w, "conversion round trip failed for {}", A::type_name());
}

#[test]
fn test_weight_conversion_round_trips() {
    init_tracing();
    let config = HarnessConfig::default();

    convert_round_trip::<Tropical, LogWeight<f32>>(Tropical::from(2.0f32));
    convert_round_trip::<LogWeight<f64>, SignedLogWeight<f64>>(LogWeight::from(2.0f64));

    // Set-variant and string-variant pairs, over generated values.
    let mut iu = WeightGenerator::<SetWeight<i32, IntersectUnion>>::new(config.seed);
    let mut ui = WeightGenerator::<SetWeight<i32, UnionIntersect>>::new(config.seed);
    let mut boolean = WeightGenerator::<SetWeight<i32, BooleanSet>>::new(config.seed);
    for _ in 0..64 {
        convert_round_trip::<_, SetWeight<i32, UnionIntersect>>(iu.generate());
        convert_round_trip::<_, SetWeight<i32, BooleanSet>>(iu.generate());
        convert_round_trip::<_, SetWeight<i32, IntersectUnion>>(ui.generate());
        convert_round_trip::<_, SetWeight<i32, BooleanSet>>(ui.generate());
        convert_round_trip::<_, SetWeight<i32, IntersectUnion>>(boolean.generate());
        convert_round_trip::<_, SetWeight<i32, UnionIntersect>>(boolean.generate());
    }

    // Gallic variant pair, converting the inner weight too.
    let mut gallic = WeightGenerator::<GallicWeight<i32, Tropical, GallicRestrict>>::new(config.seed);
    for _ in 0..64 {
        convert_round_trip::<_, GallicWeight<i32, TropicalWeight<f64>, GallicLeft>>(
            gallic.generate(),
        );
    }

    // Structural recursion through a composite.
    let mut product = WeightGenerator::<ProductWeight<Tropical, LogWeight<f32>>>::new(config.seed);
    for _ in 0..64 {
        convert_round_trip::<_, ProductWeight<LogWeight<f32>, Tropical>>(product.generate());
    }
}

#[test]
fn test_cross_type_copy_and_move_preserve_value() {
    init_tracing();
    let config = HarnessConfig::default();
    let mut generator = WeightGenerator::<SetWeight<i32, IntersectUnion>>::new(config.seed);

    for _ in 0..64 {
        let w = generator.generate();

        // Copy into the related type and back.
        let copied: SetWeight<i32, UnionIntersect> = w.convert();
        let copy_assigned = copied.clone();
        let round_trip_copied: SetWeight<i32, IntersectUnion> = copy_assigned.convert();
        assert_eq!(round_trip_copied, w);

        // Move through the related type and back.
        let moved: SetWeight<i32, UnionIntersect> = {
            let taken = w.clone();
            taken.convert()
        };
        let round_trip_moved: SetWeight<i32, IntersectUnion> = moved.convert();
        assert_eq!(round_trip_moved, w);
    }
}

#[test]
fn test_type_names_are_stable_and_distinct() {
    init_tracing();
    assert_eq!(TropicalWeight::<f32>::type_name(), "tropical");
    assert_ne!(
        TropicalWeight::<f64>::type_name(),
        TropicalWeight::<f32>::type_name()
    );
    assert_eq!(LogWeight::<f32>::type_name(), "log");
    assert_ne!(LogWeight::<f64>::type_name(), LogWeight::<f32>::type_name());
    assert_eq!(RealWeight::<f32>::type_name(), "real");
    assert_ne!(
        RealWeight::<f64>::type_name(),
        RealWeight::<f32>::type_name()
    );

    let narrow = TropicalWeight::<f32>::from(2.0f32);
    let wide = TropicalWeight::<f64>::from(2.0f64);
    assert_eq!(narrow.value() as f64, wide.value());
}

// If this fails, x == x does not hold for identically computed floats and
// the natural order degenerates; see the scalar unit tests for the
// in-crate twin of this regression check.
fn float_equality_is_reflexive<T: FloatT>(m: T) -> bool {
    let mut x = T::from_f64(1.111);
    x = std::hint::black_box(x * m);
    let y = T::from_f64(1.111) * m;
    x == y
}

#[test]
fn test_float_equality_is_reflexive() {
    let test_value = std::hint::black_box(1.1f64);
    assert!(float_equality_is_reflexive(test_value as f32));
    assert!(float_equality_is_reflexive(test_value));
}

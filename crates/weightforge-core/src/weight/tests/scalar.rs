use crate::weight::*;

#[test]
fn test_tropical_plus_times() {
    let two = TropicalWeight::<f32>::from(2.0f32);
    let three = TropicalWeight::<f32>::from(3.0f32);

    assert_eq!(two.plus(&three), two);
    assert_eq!(two.times(&three), TropicalWeight::from(5.0f32));
}

#[test]
fn test_tropical_zero_is_plus_identity() {
    let two = TropicalWeight::<f32>::from(2.0f32);

    // Zero behaves as +inf under Plus and annihilates under Times.
    assert_eq!(two.plus(&TropicalWeight::zero()), two);
    assert_eq!(two.times(&TropicalWeight::zero()), TropicalWeight::zero());
    assert_eq!(two.times(&TropicalWeight::one()), two);
}

#[test]
fn test_bare_numeric_interop() {
    assert_eq!(TropicalWeight::<f32>::from(2.0f32), 2.0f32);
    assert_eq!(2.0f32, TropicalWeight::<f32>::from(2.0f32));
    assert_eq!(TropicalWeight::<f64>::from(2.0f64), 2.0f64);
    assert_eq!(2.0f64, TropicalWeight::<f64>::from(2.0f64));

    // Cross-width construction.
    assert_eq!(TropicalWeight::<f32>::from(2.0f64), 2.0f32);
    assert_eq!(TropicalWeight::<f64>::from(2.0f32), 2.0f64);

    // Bare operands on either side of the free functions.
    assert_eq!(
        plus::<TropicalWeight<f32>>(TropicalWeight::zero(), 3.0f32),
        TropicalWeight::from(3.0f32)
    );
    assert_eq!(
        plus::<TropicalWeight<f32>>(3.0f32, TropicalWeight::zero()),
        TropicalWeight::from(3.0f32)
    );
    assert_eq!(
        times::<TropicalWeight<f32>>(3.0f32, TropicalWeight::zero()),
        TropicalWeight::zero()
    );
    assert_eq!(
        times::<LogWeight<f64>>(LogWeight::one(), 3.0f64),
        LogWeight::from(3.0f64)
    );
    assert_eq!(
        plus::<RealWeight<f32>>(RealWeight::zero(), 3.0f32),
        RealWeight::from(3.0f32)
    );
    assert_eq!(2.0f32, MinMaxWeight::<f32>::from(2.0f32));
}

#[test]
fn test_member_gating() {
    let bad = TropicalWeight::<f32>::no_weight();
    assert!(!bad.is_member());
    assert!(!bad.plus(&TropicalWeight::one()).is_member());
    assert!(!bad.times(&TropicalWeight::one()).is_member());
    assert!(!TropicalWeight::<f32>::new(f32::NEG_INFINITY).is_member());

    // The sentinel never equals itself; members do.
    assert_ne!(bad, bad);
    assert_eq!(TropicalWeight::<f32>::one(), TropicalWeight::one());
}

#[test]
fn test_log_plus_is_probability_addition() {
    let one = LogWeight::<f32>::one();
    let sum = one.plus(&one);
    // -log(e^0 + e^0) = -ln 2
    assert!(sum.approx_eq_default(&LogWeight::new(-std::f32::consts::LN_2)));
    assert_eq!(one.times(&one), LogWeight::one());
    assert_eq!(one.plus(&LogWeight::zero()), one);
}

#[test]
fn test_minmax_ops() {
    let two = MinMaxWeight::<f32>::from(2.0f32);
    let three = MinMaxWeight::<f32>::from(3.0f32);

    assert_eq!(two.plus(&three), two);
    assert_eq!(two.times(&three), three);
    assert_eq!(two.times(&MinMaxWeight::one()), two);
    assert_eq!(two.plus(&MinMaxWeight::zero()), two);
    assert_eq!(two.times(&MinMaxWeight::zero()), MinMaxWeight::zero());
}

#[test]
fn test_real_ops() {
    let two = RealWeight::<f64>::from(2.0f64);
    let three = RealWeight::<f64>::from(3.0f64);

    assert_eq!(two.plus(&three), RealWeight::from(5.0f64));
    assert_eq!(two.times(&three), RealWeight::from(6.0f64));
    assert!(!RealWeight::<f64>::new(f64::INFINITY).is_member());
}

#[test]
fn test_signed_log_arithmetic() {
    let one = SignedLogWeight::<f64>::one();

    // 1 - 1 = 0
    assert_eq!(one.minus(&one), SignedLogWeight::zero());

    // 1 + 1 = 2, i.e. magnitude -ln 2
    let two = one.plus(&one);
    assert!(two.positive());
    assert!(two.approx_eq_default(&SignedLogWeight::new(true, -std::f64::consts::LN_2)));

    // 1 - 2 = -1
    let minus_one = one.minus(&two);
    assert!(!minus_one.positive());
    assert!(minus_one.approx_eq_default(&SignedLogWeight::new(false, 0.0)));

    // (-1) * (-1) = 1
    assert!(minus_one.times(&minus_one).approx_eq_default(&one));
}

#[test]
fn test_signed_log_zero_is_normalized() {
    // Negative zero collapses onto positive zero, so equality and hashing
    // agree with semiring equality.
    assert_eq!(
        SignedLogWeight::<f32>::new(false, f32::INFINITY),
        SignedLogWeight::zero()
    );
}

#[test]
fn test_type_names_distinct() {
    assert_eq!(TropicalWeight::<f32>::type_name(), "tropical");
    assert_eq!(TropicalWeight::<f64>::type_name(), "tropical64");
    assert_eq!(LogWeight::<f32>::type_name(), "log");
    assert_eq!(RealWeight::<f32>::type_name(), "real");
    assert_ne!(
        LogWeight::<f64>::type_name(),
        LogWeight::<f32>::type_name()
    );
    assert_ne!(
        MinMaxWeight::<f32>::type_name(),
        TropicalWeight::<f32>::type_name()
    );
    assert_ne!(
        SignedLogWeight::<f32>::type_name(),
        LogWeight::<f32>::type_name()
    );
}

#[test]
fn test_quantize_collapses_near_equal_values() {
    let a = TropicalWeight::<f32>::new(1.0);
    let b = TropicalWeight::<f32>::new(1.0 + 1e-5);
    assert_ne!(a, b);
    assert_eq!(a.quantize(DELTA), b.quantize(DELTA));

    // Infinities pass through.
    assert_eq!(TropicalWeight::<f32>::zero().quantize(DELTA), TropicalWeight::zero());
}

#[test]
fn test_natural_less_on_tropical() {
    let less = NaturalLess::<TropicalWeight<f32>>::new();
    let two = TropicalWeight::from(2.0f32);
    let three = TropicalWeight::from(3.0f32);

    assert!(less.less(&two, &three));
    assert!(!less.less(&three, &two));
    assert!(!less.less(&two, &two));
}

#[test]
#[should_panic(expected = "idempotent")]
fn test_natural_less_rejects_non_idempotent() {
    let _ = NaturalLess::<LogWeight<f32>>::new();
}

// If this fails, x == x does not hold for identically computed floats,
// breaking the natural order and much more. Historically triggered by
// extended-precision registers on 32-bit x87 builds.
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

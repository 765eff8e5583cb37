use std::cmp::Ordering;

use crate::weight::*;

fn round_trips<W: Weight>(w: &W, cfg: &TextConfig) {
    let encoded = w.text(cfg);
    let decoded = W::from_text(&encoded, cfg)
        .unwrap_or_else(|e| panic!("failed to parse '{encoded}' for {}: {e}", W::type_name()));
    assert!(
        decoded.approx_eq_default(w),
        "round trip changed {:?} into {:?} (text '{encoded}')",
        w,
        decoded
    );
}

fn both_configs<W: Weight>(w: &W) {
    round_trips(w, &TextConfig::default());
    round_trips(w, &TextConfig::parenthesized());
}

#[test]
fn test_scalar_atoms() {
    let cfg = TextConfig::default();

    assert_eq!(TropicalWeight::<f32>::from(2.5f32).text(&cfg), "2.5");
    assert_eq!(TropicalWeight::<f32>::zero().text(&cfg), "Infinity");
    assert_eq!(TropicalWeight::<f32>::no_weight().text(&cfg), "BadNumber");
    assert_eq!(MinMaxWeight::<f32>::one().text(&cfg), "-Infinity");
    assert_eq!(SignedLogWeight::<f32>::one().text(&cfg), "+0");

    both_configs(&TropicalWeight::<f64>::from(3.25f64));
    both_configs(&SignedLogWeight::<f64>::new(false, 1.5));

    // The sentinel atom parses back to a non-member value.
    let parsed = TropicalWeight::<f32>::from_text("BadNumber", &cfg).unwrap();
    assert!(!parsed.is_member());
}

#[test]
fn test_string_and_set_atoms() {
    let cfg = TextConfig::default();
    let s = StringWeight::<i32, LeftString>::from_labels([1, 2, 3]);
    assert_eq!(s.text(&cfg), "1_2_3");
    assert_eq!(StringWeight::<i32, LeftString>::one().text(&cfg), "Epsilon");
    assert_eq!(StringWeight::<i32, LeftString>::zero().text(&cfg), "Infinity");
    both_configs(&s);

    let set = SetWeight::<i32, UnionIntersect>::from_labels([2, 4]);
    assert_eq!(set.text(&cfg), "2_4");
    assert_eq!(SetWeight::<i32, UnionIntersect>::zero().text(&cfg), "Empty");
    assert_eq!(
        SetWeight::<i32, IntersectUnion>::zero().text(&cfg),
        "Universe"
    );
    both_configs(&set);
}

#[test]
fn test_product_text_with_and_without_parentheses() {
    type W = ProductWeight<TropicalWeight<f32>, TropicalWeight<f32>>;
    let w = W::new(TropicalWeight::from(1.0f32), TropicalWeight::from(2.0f32));

    assert_eq!(w.text(&TextConfig::default()), "1,2");
    assert_eq!(w.text(&TextConfig::parenthesized()), "(1,2)");
    both_configs(&w);
}

#[test]
fn test_nested_composite_text() {
    type Inner = ProductWeight<TropicalWeight<f32>, TropicalWeight<f32>>;
    type Nested = ProductWeight<Inner, TropicalWeight<f32>>;

    let w = Nested::new(
        Inner::new(TropicalWeight::from(1.0f32), TropicalWeight::from(2.0f32)),
        TropicalWeight::from(3.0f32),
    );

    // Fixed arity keeps the flat form unambiguous.
    assert_eq!(w.text(&TextConfig::default()), "1,2,3");
    assert_eq!(w.text(&TextConfig::parenthesized()), "((1,2),3)");
    both_configs(&w);
}

#[test]
fn test_sparse_power_text_is_self_delimiting() {
    type W = SparsePowerWeight<LogWeight<f32>>;
    let mut w = W::zero();
    w.set_value(3, LogWeight::from(7.0f32));
    w.set_value(5, LogWeight::from(9.0f32));

    assert_eq!(w.text(&TextConfig::default()), "Infinity,2,3,7,5,9");
    both_configs(&w);
    both_configs(&W::zero());
}

#[test]
fn test_union_text_round_trip() {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    struct FirstWins;

    impl UnionWeightOptions<TropicalWeight<f32>> for FirstWins {
        type Reverse = FirstWins;

        fn compare(a: &TropicalWeight<f32>, b: &TropicalWeight<f32>) -> Ordering {
            a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal)
        }

        fn merge(a: &TropicalWeight<f32>, _b: &TropicalWeight<f32>) -> TropicalWeight<f32> {
            *a
        }
    }

    type W = UnionWeight<TropicalWeight<f32>, FirstWins>;
    let w = W::from_weight(TropicalWeight::from(1.0f32))
        .plus(&W::from_weight(TropicalWeight::from(4.0f32)));

    assert_eq!(w.text(&TextConfig::default()), "2,1,4");
    both_configs(&w);
    both_configs(&W::zero());
}

#[test]
fn test_gallic_text_round_trip() {
    type W = GallicWeight<i32, TropicalWeight<f32>, GallicLeft>;
    let w = W::new(StringWeight::from_labels([1, 2]), TropicalWeight::from(3.0f32));

    assert_eq!(w.text(&TextConfig::default()), "1_2,3");
    assert_eq!(w.text(&TextConfig::parenthesized()), "(1_2,3)");
    both_configs(&w);
}

#[test]
fn test_three_level_nested_round_trip() {
    type Inner = ProductWeight<TropicalWeight<f32>, TropicalWeight<f32>>;
    type Cube = PowerWeight<Inner, 2>;
    type Sparse = SparsePowerWeight<Cube>;

    let mut w = Sparse::zero();
    w.set_value(
        4,
        Cube::new([
            Inner::new(TropicalWeight::from(1.0f32), TropicalWeight::from(2.0f32)),
            Inner::new(TropicalWeight::from(3.0f32), TropicalWeight::from(4.0f32)),
        ]),
    );
    both_configs(&w);
}

#[test]
fn test_malformed_text_is_an_error() {
    let cfg = TextConfig::default();

    assert!(TropicalWeight::<f32>::from_text("abc", &cfg).is_err());
    assert!(TropicalWeight::<f32>::from_text("", &cfg).is_err());
    assert!(TropicalWeight::<f32>::from_text("1,2", &cfg).is_err());
    assert!(
        ProductWeight::<TropicalWeight<f32>, TropicalWeight<f32>>::from_text("1", &cfg).is_err()
    );
    assert!(ProductWeight::<TropicalWeight<f32>, TropicalWeight<f32>>::from_text(
        "(1,2)",
        &TextConfig::default()
    )
    .is_err());
    assert!(StringWeight::<i32, LeftString>::from_text("1_x", &cfg).is_err());
}

#[test]
fn test_configs_are_independent_values() {
    // Two configurations used back to back cannot interfere: the setting
    // travels with the call, not with the process.
    type W = ProductWeight<TropicalWeight<f32>, TropicalWeight<f32>>;
    let w = W::new(TropicalWeight::from(1.0f32), TropicalWeight::from(2.0f32));

    let plain = TextConfig::default();
    let parens = TextConfig::parenthesized();
    assert_eq!(w.text(&plain), "1,2");
    assert_eq!(w.text(&parens), "(1,2)");
    assert_eq!(w.text(&plain), "1,2");
    assert_eq!(W::from_text("(1,2)", &parens).unwrap(), w);
    assert_eq!(W::from_text("1,2", &plain).unwrap(), w);
}

//! Generic property tester for weight types.
//!
//! Each trial draws fresh instances from the generator and checks the
//! semiring, equality, ordering and I/O contracts the type declares
//! through its [`WeightProperties`] record. A single failing trial aborts
//! the run with the failing values and the violated law.

use std::hash::{DefaultHasher, Hash, Hasher};

use weightforge_core::weight::{NaturalLess, TextConfig, Weight, WeightProperties};

use crate::generate::{RandomWeight, WeightGenerator};

fn hash_of<W: Hash>(w: &W) -> u64 {
    let mut hasher = DefaultHasher::new();
    w.hash(&mut hasher);
    hasher.finish()
}

/// Runs randomized conformance trials for one weight type.
pub struct WeightTester<W>
where
    W: RandomWeight,
    W::Reverse: Weight<Reverse = W>,
{
    generator: WeightGenerator<W>,
    text_config: TextConfig,
}

impl<W> WeightTester<W>
where
    W: RandomWeight,
    W::Reverse: Weight<Reverse = W>,
{
    pub fn new(generator: WeightGenerator<W>) -> Self {
        WeightTester {
            generator,
            text_config: TextConfig::default(),
        }
    }

    /// Round-trips text under `config` instead of the default.
    pub fn with_text_config(mut self, config: TextConfig) -> Self {
        self.text_config = config;
        self
    }

    /// Runs `repeat` trials, panicking on the first violated law.
    pub fn test(&mut self, repeat: usize) {
        let props = W::properties();
        tracing::info!(
            weight = %W::type_name(),
            repeat,
            parenthesized = self.text_config.parentheses.is_some(),
            "running weight conformance trials"
        );
        self.check_constants();
        let natural_less = props.idempotent.then(NaturalLess::<W>::new);
        for trial in 0..repeat {
            let a = self.generator.generate();
            let b = self.generator.generate();
            let c = self.generator.generate();
            self.check_semiring(trial, &props, &a, &b, &c);
            self.check_equality(trial, &a, &b, &c);
            self.check_io(trial, &a);
            if let Some(less) = &natural_less {
                self.check_natural_order(trial, less, &a, &b, &c);
            }
            if props.path {
                let sum = a.plus(&b);
                assert!(
                    sum == a || sum == b,
                    "{}: trial {trial}: path property violated: plus({a:?}, {b:?}) = {sum:?}",
                    W::type_name()
                );
            }
        }
    }

    fn check_constants(&self) {
        let name = W::type_name();
        assert!(W::zero().is_member(), "{name}: Zero must be a member");
        assert!(W::one().is_member(), "{name}: One must be a member");
        assert!(
            W::zero() != W::one(),
            "{name}: Zero and One must be distinct"
        );
        assert!(
            !W::no_weight().is_member(),
            "{name}: the sentinel must not be a member"
        );
        // Operations on the sentinel stay in sentinel space.
        assert!(
            !W::no_weight().plus(&W::one()).is_member(),
            "{name}: Plus on a non-member must yield a non-member"
        );
        assert!(
            !W::no_weight().times(&W::one()).is_member(),
            "{name}: Times on a non-member must yield a non-member"
        );
    }

    fn check_semiring(&self, trial: usize, props: &WeightProperties, a: &W, b: &W, c: &W) {
        let name = W::type_name();

        // Closure.
        assert!(
            a.plus(b).is_member(),
            "{name}: trial {trial}: Plus is not closed: plus({a:?}, {b:?})"
        );
        assert!(
            a.times(b).is_member(),
            "{name}: trial {trial}: Times is not closed: times({a:?}, {b:?})"
        );

        // Commutativity of Plus holds in every implemented semiring.
        assert!(
            a.plus(b).approx_eq_default(&b.plus(a)),
            "{name}: trial {trial}: Plus is not commutative: {a:?}, {b:?}"
        );
        if props.commutative {
            assert!(
                a.times(b).approx_eq_default(&b.times(a)),
                "{name}: trial {trial}: Times is not commutative: {a:?}, {b:?}"
            );
        }

        // Associativity.
        assert!(
            a.plus(b).plus(c).approx_eq_default(&a.plus(&b.plus(c))),
            "{name}: trial {trial}: Plus is not associative: {a:?}, {b:?}, {c:?}"
        );
        assert!(
            a.times(b).times(c).approx_eq_default(&a.times(&b.times(c))),
            "{name}: trial {trial}: Times is not associative: {a:?}, {b:?}, {c:?}"
        );

        // Identities and the annihilator, exactly.
        assert_eq!(
            a.plus(&W::zero()),
            *a,
            "{name}: trial {trial}: Zero is not the Plus identity"
        );
        assert_eq!(
            a.times(&W::one()),
            *a,
            "{name}: trial {trial}: One is not the right Times identity"
        );
        assert_eq!(
            W::one().times(a),
            *a,
            "{name}: trial {trial}: One is not the left Times identity"
        );
        assert_eq!(
            a.times(&W::zero()),
            W::zero(),
            "{name}: trial {trial}: Zero does not annihilate from the right"
        );
        assert_eq!(
            W::zero().times(a),
            W::zero(),
            "{name}: trial {trial}: Zero does not annihilate from the left"
        );

        // Distributivity per declared sidedness.
        if props.left_semiring {
            assert!(
                a.times(&b.plus(c))
                    .approx_eq_default(&a.times(b).plus(&a.times(c))),
                "{name}: trial {trial}: Times does not left-distribute: {a:?}, {b:?}, {c:?}"
            );
        }
        if props.right_semiring {
            assert!(
                a.plus(b)
                    .times(c)
                    .approx_eq_default(&a.times(c).plus(&b.times(c))),
                "{name}: trial {trial}: Times does not right-distribute: {a:?}, {b:?}, {c:?}"
            );
        }
    }

    fn check_equality(&self, trial: usize, a: &W, b: &W, c: &W) {
        let name = W::type_name();

        assert_eq!(*a, *a, "{name}: trial {trial}: equality is not reflexive");
        assert!(
            a.approx_eq_default(a),
            "{name}: trial {trial}: approximate equality is not reflexive"
        );
        if a == b {
            assert_eq!(*b, *a, "{name}: trial {trial}: equality is not symmetric");
            assert_eq!(
                hash_of(a),
                hash_of(b),
                "{name}: trial {trial}: equal values must hash alike: {a:?}"
            );
            if b == c {
                assert_eq!(
                    *a, *c,
                    "{name}: trial {trial}: equality is not transitive"
                );
            }
        }

        // Clone preserves value.
        let cloned = a.clone();
        assert_eq!(cloned, *a, "{name}: trial {trial}: clone changed the value");

        // Quantization stays within tolerance of the original and is
        // stable under re-quantization.
        let q = a.quantize(weightforge_core::DELTA);
        assert!(
            q.approx_eq_default(a),
            "{name}: trial {trial}: quantize moved {a:?} to {q:?}"
        );
        assert_eq!(
            q.quantize(weightforge_core::DELTA),
            q,
            "{name}: trial {trial}: quantize is not stable on {a:?}"
        );

        // Reverse is an involution.
        let back: W = a.reverse().reverse();
        assert_eq!(
            back, *a,
            "{name}: trial {trial}: reverse is not an involution"
        );
    }

    fn check_io(&self, trial: usize, a: &W) {
        let name = W::type_name();
        let encoded = a.text(&self.text_config);
        let decoded = W::from_text(&encoded, &self.text_config).unwrap_or_else(|e| {
            panic!("{name}: trial {trial}: failed to re-read '{encoded}': {e}")
        });
        assert!(
            decoded.approx_eq_default(a),
            "{name}: trial {trial}: text round trip changed {a:?} into {decoded:?} ('{encoded}')"
        );
    }

    fn check_natural_order(&self, trial: usize, less: &NaturalLess<W>, a: &W, b: &W, c: &W) {
        let name = W::type_name();

        assert!(
            !less.less(a, a),
            "{name}: trial {trial}: natural order is not irreflexive: {a:?}"
        );
        assert!(
            !(less.less(a, b) && less.less(b, a)),
            "{name}: trial {trial}: natural order is not asymmetric: {a:?}, {b:?}"
        );
        if less.less(a, b) && less.less(b, c) {
            assert!(
                less.less(a, c),
                "{name}: trial {trial}: natural order is not transitive: {a:?}, {b:?}, {c:?}"
            );
        }
        // Definition: less(a, b) ⇔ plus(a, b) == a && a != b.
        assert_eq!(
            less.less(a, b),
            a.plus(b) == *a && a != b,
            "{name}: trial {trial}: natural order disagrees with Plus: {a:?}, {b:?}"
        );
    }
}

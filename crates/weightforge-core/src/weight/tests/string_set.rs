use crate::weight::*;

type LeftW = StringWeight<i32, LeftString>;
type RightW = StringWeight<i32, RightString>;
type RestrictW = StringWeight<i32, RestrictString>;

#[test]
fn test_left_string_plus_is_common_prefix() {
    let ab = LeftW::from_labels([1, 2]);
    let ac = LeftW::from_labels([1, 3]);
    let a = LeftW::from_labels([1]);

    assert_eq!(ab.plus(&ac), a);
    assert_eq!(ab.plus(&ab), ab);
    assert_eq!(
        LeftW::from_labels([1, 2]).plus(&LeftW::from_labels([3])),
        LeftW::one()
    );
}

#[test]
fn test_right_string_plus_is_common_suffix() {
    let ba = RightW::from_labels([2, 1]);
    let ca = RightW::from_labels([3, 1]);

    assert_eq!(ba.plus(&ca), RightW::from_labels([1]));
}

#[test]
fn test_restricted_string_plus_requires_equal_operands() {
    let ab = RestrictW::from_labels([1, 2]);

    assert_eq!(ab.plus(&ab), ab);
    assert!(!ab.plus(&RestrictW::from_labels([1, 3])).is_member());
}

#[test]
fn test_string_times_is_concatenation() {
    let ab = LeftW::from_labels([1, 2]);
    let c = LeftW::from_labels([3]);

    assert_eq!(ab.times(&c), LeftW::from_labels([1, 2, 3]));
    assert_eq!(ab.times(&LeftW::one()), ab);
    assert_eq!(LeftW::one().times(&ab), ab);
    assert_eq!(ab.times(&LeftW::zero()), LeftW::zero());
}

#[test]
fn test_string_zero_is_plus_identity() {
    let ab = LeftW::from_labels([1, 2]);
    assert_eq!(ab.plus(&LeftW::zero()), ab);
    assert_eq!(LeftW::zero().plus(&ab), ab);
}

#[test]
fn test_string_reverse_swaps_direction() {
    let abc = LeftW::from_labels([1, 2, 3]);
    let reversed: RightW = abc.reverse();

    assert_eq!(reversed.labels(), Some(&[3, 2, 1][..]));
    assert_eq!(reversed.reverse(), abc);
}

#[test]
fn test_set_intersect_union() {
    type W = SetWeight<i32, IntersectUnion>;

    let a = W::from_labels([1, 2, 3]);
    let b = W::from_labels([2, 3, 4]);

    // Plus = intersection, Times = union.
    assert_eq!(a.plus(&b), W::from_labels([2, 3]));
    assert_eq!(a.times(&b), W::from_labels([1, 2, 3, 4]));

    // Zero is the universal set; One is empty.
    assert_eq!(a.plus(&W::zero()), a);
    assert_eq!(a.times(&W::zero()), W::zero());
    assert_eq!(a.times(&W::one()), a);
}

#[test]
fn test_set_union_intersect() {
    type W = SetWeight<i32, UnionIntersect>;

    let a = W::from_labels([1, 2]);
    let b = W::from_labels([2, 4]);

    assert_eq!(a.plus(&b), W::from_labels([1, 2, 4]));
    assert_eq!(a.times(&b), W::from_labels([2]));
    assert_eq!(a.plus(&W::zero()), a);
    assert_eq!(a.times(&W::zero()), W::zero());
    assert_eq!(a.times(&W::one()), a);
}

#[test]
fn test_boolean_set() {
    type W = SetWeight<i32, BooleanSet>;

    let t = W::one();
    let f = W::zero();

    assert_eq!(t.plus(&f), t);
    assert_eq!(f.plus(&f), f);
    assert_eq!(t.times(&f), f);
    assert_eq!(t.times(&t), t);
}

#[test]
fn test_set_from_labels_sorts_and_dedups() {
    type W = SetWeight<i32, UnionIntersect>;
    assert_eq!(W::from_labels([3, 1, 3, 2]), W::from_labels([1, 2, 3]));
}

#[test]
fn test_string_and_set_variant_names_distinct() {
    assert_ne!(LeftW::type_name(), RightW::type_name());
    assert_ne!(LeftW::type_name(), RestrictW::type_name());
    assert_ne!(
        SetWeight::<i32, IntersectUnion>::type_name(),
        SetWeight::<i32, UnionIntersect>::type_name()
    );
}

//! Gallic weight: (string weight, inner weight) pairs, used to carry
//! output labels through weight algebra.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::error::WeightError;
use crate::weight::string_weight::{
    Label, LeftString, RestrictString, RightString, StringVariant, StringWeight,
};
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{natural_cmp, Weight, WeightProperties};
use crate::weight::union::{UnionWeight, UnionWeightOptions};

/// How a gallic variant's `Plus` combines two pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GallicKind {
    /// Componentwise: string `Plus` (prefix/suffix) with inner `Plus`.
    Pair,
    /// Equal strings demanded; anything else is the sentinel.
    Restrict,
    /// Keep the pair whose inner weight is naturally smaller, breaking
    /// ties on the string.
    Min,
}

/// Marker selecting a gallic variant at the type level.
pub trait GallicVariant:
    Copy + Clone + fmt::Debug + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    const KIND: GallicKind;
    const NAME: &'static str;
    type Str: StringVariant;
    type Reverse: GallicVariant<Str = <Self::Str as StringVariant>::Reverse>;
}

/// Plain pairing over left strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GallicLeft;

/// Plain pairing over right strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GallicRight;

/// `Plus` restricted to equal strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GallicRestrict;

/// `Plus` keeps the naturally-least pair, over left strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GallicMin;

/// Mirror of [`GallicMin`] over right strings, its reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GallicMinRight;

impl GallicVariant for GallicLeft {
    const KIND: GallicKind = GallicKind::Pair;
    const NAME: &'static str = "left_gallic";
    type Str = LeftString;
    type Reverse = GallicRight;
}

impl GallicVariant for GallicRight {
    const KIND: GallicKind = GallicKind::Pair;
    const NAME: &'static str = "right_gallic";
    type Str = RightString;
    type Reverse = GallicLeft;
}

impl GallicVariant for GallicRestrict {
    const KIND: GallicKind = GallicKind::Restrict;
    const NAME: &'static str = "restricted_gallic";
    type Str = RestrictString;
    type Reverse = GallicRestrict;
}

impl GallicVariant for GallicMin {
    const KIND: GallicKind = GallicKind::Min;
    const NAME: &'static str = "min_gallic";
    type Str = LeftString;
    type Reverse = GallicMinRight;
}

impl GallicVariant for GallicMinRight {
    const KIND: GallicKind = GallicKind::Min;
    const NAME: &'static str = "min_right_gallic";
    type Str = RightString;
    type Reverse = GallicMin;
}

/// Pair of a string weight and an inner weight.
///
/// `Times` concatenates the strings and multiplies the inner weights;
/// `Plus` depends on the variant `V`.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct GallicWeight<L: Label, W: Weight, V: GallicVariant = GallicLeft> {
    string: StringWeight<L, V::Str>,
    weight: W,
}

impl<L: Label, W: Weight, V: GallicVariant> GallicWeight<L, W, V> {
    pub fn new(string: StringWeight<L, V::Str>, weight: W) -> Self {
        GallicWeight { string, weight }
    }

    pub fn string(&self) -> &StringWeight<L, V::Str> {
        &self.string
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }
}

impl<L: Label, W: Weight, V: GallicVariant> Weight for GallicWeight<L, W, V> {
    type Reverse = GallicWeight<L, W::Reverse, V::Reverse>;

    fn zero() -> Self {
        GallicWeight::new(StringWeight::zero(), W::zero())
    }

    fn one() -> Self {
        GallicWeight::new(StringWeight::one(), W::one())
    }

    fn no_weight() -> Self {
        GallicWeight::new(StringWeight::no_weight(), W::no_weight())
    }

    fn plus(&self, rhs: &Self) -> Self {
        match V::KIND {
            // The string Plus of the variant's string type already yields
            // the sentinel on a restriction violation.
            GallicKind::Pair | GallicKind::Restrict => GallicWeight::new(
                self.string.plus(&rhs.string),
                self.weight.plus(&rhs.weight),
            ),
            GallicKind::Min => {
                if !self.is_member() || !rhs.is_member() {
                    return Self::no_weight();
                }
                // Zero is (infinite string, zero weight), so the natural
                // comparison below already treats it as the identity.
                match natural_cmp(&self.weight, &rhs.weight) {
                    Ordering::Less => self.clone(),
                    Ordering::Greater => rhs.clone(),
                    Ordering::Equal => {
                        match StringWeight::compare(&self.string, &rhs.string) {
                            Ordering::Greater => rhs.clone(),
                            _ => self.clone(),
                        }
                    }
                }
            }
        }
    }

    fn times(&self, rhs: &Self) -> Self {
        GallicWeight::new(
            self.string.times(&rhs.string),
            self.weight.times(&rhs.weight),
        )
    }

    fn is_member(&self) -> bool {
        self.string.is_member() && self.weight.is_member()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        self.string.approx_eq(&rhs.string, delta) && self.weight.approx_eq(&rhs.weight, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        GallicWeight::new(self.string.quantize(delta), self.weight.quantize(delta))
    }

    fn reverse(&self) -> Self::Reverse {
        GallicWeight::new(self.string.reverse(), self.weight.reverse())
    }

    fn properties() -> WeightProperties {
        let s = StringWeight::<L, V::Str>::properties();
        let w = W::properties();
        WeightProperties {
            left_semiring: s.left_semiring && w.left_semiring,
            right_semiring: s.right_semiring && w.right_semiring,
            commutative: false,
            idempotent: w.idempotent,
            path: V::KIND == GallicKind::Min && w.path,
        }
    }

    fn type_name() -> String {
        format!("{}_{}", V::NAME, W::type_name())
    }

    fn write_text(&self, w: &mut TextWriter) {
        w.begin();
        self.string.write_text(w);
        self.weight.write_text(w);
        w.end();
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        r.begin()?;
        let string = StringWeight::read_text(r)?;
        let weight = W::read_text(r)?;
        r.end()?;
        Ok(GallicWeight::new(string, weight))
    }
}

impl<L: Label, W: Weight, V: GallicVariant> fmt::Display for GallicWeight<L, W, V> {
    fmt_display_via_text!();
}

/// Options making a [`UnionWeight`] of restricted gallics behave as the
/// general gallic weight: elements are ordered by string, and pairs with
/// equal strings merge by `Plus` on the inner weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GallicUnionOptions;

impl<L: Label, W: Weight> UnionWeightOptions<GallicWeight<L, W, GallicRestrict>>
    for GallicUnionOptions
{
    type Reverse = GallicUnionOptions;

    fn compare(
        a: &GallicWeight<L, W, GallicRestrict>,
        b: &GallicWeight<L, W, GallicRestrict>,
    ) -> Ordering {
        StringWeight::compare(a.string(), b.string())
    }

    fn merge(
        a: &GallicWeight<L, W, GallicRestrict>,
        b: &GallicWeight<L, W, GallicRestrict>,
    ) -> GallicWeight<L, W, GallicRestrict> {
        GallicWeight::new(a.string().clone(), a.weight().plus(b.weight()))
    }
}

/// The general gallic weight: a multiset of restricted gallics keyed by
/// string, so `Plus` keeps distinct strings side by side and sums the
/// inner weights of equal strings.
pub type GallicUnionWeight<L, W> =
    UnionWeight<GallicWeight<L, W, GallicRestrict>, GallicUnionOptions>;

//! Set weight: sorted label sets under union/intersection.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::error::WeightError;
use crate::weight::string_weight::Label;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Which set operation plays `Plus` and which plays `Times`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetKind {
    /// `Plus` = ∩, `Times` = ∪, `Zero` = the universal set, `One` = ∅.
    IntersectUnion,
    /// `Plus` = ∪, `Times` = ∩, `Zero` = ∅, `One` = the universal set.
    UnionIntersect,
    /// Boolean OR/AND over {∅, universal set}.
    Boolean,
}

/// Marker selecting a set weight variant at the type level.
///
/// A restricted variant requiring equal operands exists in principle but
/// cannot satisfy closure under independently generated operands, so it is
/// not provided.
pub trait SetVariant:
    Copy + Clone + fmt::Debug + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    const KIND: SetKind;
    const NAME: &'static str;
}

/// Intersect-then-union set weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct IntersectUnion;

/// Union-then-intersect set weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct UnionIntersect;

/// Boolean set weights over {∅, universal set}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BooleanSet;

impl SetVariant for IntersectUnion {
    const KIND: SetKind = SetKind::IntersectUnion;
    const NAME: &'static str = "intersect_union_set";
}

impl SetVariant for UnionIntersect {
    const KIND: SetKind = SetKind::UnionIntersect;
    const NAME: &'static str = "union_intersect_set";
}

impl SetVariant for BooleanSet {
    const KIND: SetKind = SetKind::Boolean;
    const NAME: &'static str = "boolean_set";
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SetValue<L> {
    /// Sorted, deduplicated labels.
    Finite(SmallVec<[L; 4]>),
    Universe,
    Bad,
}

/// Weight over label sets. The variant `V` fixes which of ∪/∩ is `Plus`
/// and which is `Times`. All variants are commutative and idempotent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetWeight<L: Label, V: SetVariant> {
    value: SetValue<L>,
    _variant: PhantomData<V>,
}

impl<L: Label, V: SetVariant> SetWeight<L, V> {
    /// Builds a finite set; labels are sorted and deduplicated.
    pub fn from_labels(labels: impl IntoIterator<Item = L>) -> Self {
        let mut l: SmallVec<[L; 4]> = labels.into_iter().collect();
        l.sort_unstable();
        l.dedup();
        SetWeight {
            value: SetValue::Finite(l),
            _variant: PhantomData,
        }
    }

    pub fn empty() -> Self {
        Self::from_labels([])
    }

    pub fn universe() -> Self {
        SetWeight {
            value: SetValue::Universe,
            _variant: PhantomData,
        }
    }

    fn bad() -> Self {
        SetWeight {
            value: SetValue::Bad,
            _variant: PhantomData,
        }
    }

    /// The labels of a finite set; `None` for the universal set and the
    /// sentinel.
    pub fn labels(&self) -> Option<&[L]> {
        match &self.value {
            SetValue::Finite(l) => Some(l),
            _ => None,
        }
    }

    fn union(&self, rhs: &Self) -> Self {
        match (&self.value, &rhs.value) {
            (SetValue::Bad, _) | (_, SetValue::Bad) => Self::bad(),
            (SetValue::Universe, _) | (_, SetValue::Universe) => Self::universe(),
            (SetValue::Finite(a), SetValue::Finite(b)) => {
                let mut out: SmallVec<[L; 4]> = SmallVec::new();
                let (mut i, mut j) = (0, 0);
                while i < a.len() && j < b.len() {
                    match a[i].cmp(&b[j]) {
                        std::cmp::Ordering::Less => {
                            out.push(a[i]);
                            i += 1;
                        }
                        std::cmp::Ordering::Greater => {
                            out.push(b[j]);
                            j += 1;
                        }
                        std::cmp::Ordering::Equal => {
                            out.push(a[i]);
                            i += 1;
                            j += 1;
                        }
                    }
                }
                out.extend(a[i..].iter().copied());
                out.extend(b[j..].iter().copied());
                SetWeight {
                    value: SetValue::Finite(out),
                    _variant: PhantomData,
                }
            }
        }
    }

    fn intersect(&self, rhs: &Self) -> Self {
        match (&self.value, &rhs.value) {
            (SetValue::Bad, _) | (_, SetValue::Bad) => Self::bad(),
            (SetValue::Universe, _) => rhs.clone(),
            (_, SetValue::Universe) => self.clone(),
            (SetValue::Finite(a), SetValue::Finite(b)) => {
                let mut out: SmallVec<[L; 4]> = SmallVec::new();
                let (mut i, mut j) = (0, 0);
                while i < a.len() && j < b.len() {
                    match a[i].cmp(&b[j]) {
                        std::cmp::Ordering::Less => i += 1,
                        std::cmp::Ordering::Greater => j += 1,
                        std::cmp::Ordering::Equal => {
                            out.push(a[i]);
                            i += 1;
                            j += 1;
                        }
                    }
                }
                SetWeight {
                    value: SetValue::Finite(out),
                    _variant: PhantomData,
                }
            }
        }
    }
}

impl<L: Label, V: SetVariant> Weight for SetWeight<L, V> {
    type Reverse = Self;

    fn zero() -> Self {
        match V::KIND {
            SetKind::IntersectUnion => Self::universe(),
            SetKind::UnionIntersect | SetKind::Boolean => Self::empty(),
        }
    }

    fn one() -> Self {
        match V::KIND {
            SetKind::IntersectUnion => Self::empty(),
            SetKind::UnionIntersect | SetKind::Boolean => Self::universe(),
        }
    }

    fn no_weight() -> Self {
        Self::bad()
    }

    fn plus(&self, rhs: &Self) -> Self {
        match V::KIND {
            SetKind::IntersectUnion => self.intersect(rhs),
            SetKind::UnionIntersect | SetKind::Boolean => self.union(rhs),
        }
    }

    fn times(&self, rhs: &Self) -> Self {
        match V::KIND {
            SetKind::IntersectUnion => self.union(rhs),
            SetKind::UnionIntersect | SetKind::Boolean => self.intersect(rhs),
        }
    }

    fn is_member(&self) -> bool {
        self.value != SetValue::Bad
    }

    fn approx_eq(&self, rhs: &Self, _delta: f32) -> bool {
        self == rhs
    }

    fn quantize(&self, _delta: f32) -> Self {
        self.clone()
    }

    fn reverse(&self) -> Self {
        self.clone()
    }

    fn properties() -> WeightProperties {
        WeightProperties {
            left_semiring: true,
            right_semiring: true,
            commutative: true,
            idempotent: true,
            path: V::KIND == SetKind::Boolean,
        }
    }

    fn type_name() -> String {
        V::NAME.to_string()
    }

    fn write_text(&self, w: &mut TextWriter) {
        match &self.value {
            SetValue::Bad => w.atom("BadSet"),
            SetValue::Universe => w.atom("Universe"),
            SetValue::Finite(l) if l.is_empty() => w.atom("Empty"),
            SetValue::Finite(l) => {
                let joined = l
                    .iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join("_");
                w.atom(joined);
            }
        }
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        let pos = r.pos();
        let atom = r.atom()?;
        match atom {
            "BadSet" => Ok(Self::bad()),
            "Universe" => Ok(Self::universe()),
            "Empty" => Ok(Self::empty()),
            _ => {
                let mut labels = SmallVec::<[L; 4]>::new();
                for part in atom.split('_') {
                    let label = part.parse::<L>().map_err(|_| {
                        WeightError::parse(pos, format!("invalid set label '{part}'"))
                    })?;
                    labels.push(label);
                }
                Ok(Self::from_labels(labels))
            }
        }
    }
}

impl<L: Label, V: SetVariant> fmt::Display for SetWeight<L, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text(&Default::default()))
    }
}

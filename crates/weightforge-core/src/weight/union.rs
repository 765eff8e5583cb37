//! Union weight: ordered multiset of inner weights with custom merge.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::WeightError;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Comparator and merge function for a [`UnionWeight`].
///
/// `compare` must be a total order on member values. `merge` collapses
/// compare-equal elements; it must be insensitive to argument order for
/// compare-equal operands, and `merge(a, a) == a` whenever `W` is
/// idempotent, or the declared properties stop holding.
pub trait UnionWeightOptions<W: Weight>:
    Copy + Clone + fmt::Debug + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    /// Options used for the reversed element type.
    type Reverse: UnionWeightOptions<W::Reverse>;

    fn compare(a: &W, b: &W) -> Ordering;

    fn merge(a: &W, b: &W) -> W;
}

/// Multiset of inner weights kept sorted by the options' comparator, with
/// compare-equal elements collapsed through the merge function.
///
/// `Plus` is multiset union with merge; `Times` distributes
/// componentwise over all element pairs. `Zero` is the empty multiset.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct UnionWeight<W: Weight, O: UnionWeightOptions<W>> {
    /// `None` is the non-member sentinel.
    list: Option<Vec<W>>,
    _options: PhantomData<O>,
}

impl<W: Weight, O: UnionWeightOptions<W>> UnionWeight<W, O> {
    fn from_list(list: Option<Vec<W>>) -> Self {
        UnionWeight {
            list,
            _options: PhantomData,
        }
    }

    /// The singleton multiset.
    pub fn from_weight(w: W) -> Self {
        Self::from_list(Some(vec![w]))
    }

    /// The elements in comparator order; `None` for the sentinel.
    pub fn elements(&self) -> Option<&[W]> {
        self.list.as_deref()
    }

    /// Sorts and merge-collapses `list` into canonical form.
    fn normalize(mut list: Vec<W>) -> Vec<W> {
        list.sort_by(|a, b| O::compare(a, b));
        let mut out: Vec<W> = Vec::with_capacity(list.len());
        for w in list {
            if let Some(last) = out.last_mut() {
                if O::compare(last, &w) == Ordering::Equal {
                    let merged = O::merge(last, &w);
                    *last = merged;
                    continue;
                }
            }
            out.push(w);
        }
        out
    }
}

impl<W: Weight, O: UnionWeightOptions<W>> Weight for UnionWeight<W, O> {
    type Reverse = UnionWeight<W::Reverse, O::Reverse>;

    fn zero() -> Self {
        Self::from_list(Some(Vec::new()))
    }

    fn one() -> Self {
        Self::from_weight(W::one())
    }

    fn no_weight() -> Self {
        Self::from_list(None)
    }

    fn plus(&self, rhs: &Self) -> Self {
        let (a, b) = match (&self.list, &rhs.list) {
            (Some(a), Some(b)) => (a, b),
            _ => return Self::no_weight(),
        };
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match O::compare(&a[i], &b[j]) {
                Ordering::Less => {
                    out.push(a[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    out.push(O::merge(&a[i], &b[j]));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend(a[i..].iter().cloned());
        out.extend(b[j..].iter().cloned());
        Self::from_list(Some(out))
    }

    fn times(&self, rhs: &Self) -> Self {
        let (a, b) = match (&self.list, &rhs.list) {
            (Some(a), Some(b)) => (a, b),
            _ => return Self::no_weight(),
        };
        let mut products = Vec::with_capacity(a.len() * b.len());
        for x in a {
            for y in b {
                products.push(x.times(y));
            }
        }
        Self::from_list(Some(Self::normalize(products)))
    }

    fn is_member(&self) -> bool {
        match &self.list {
            Some(list) => list.iter().all(W::is_member),
            None => false,
        }
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        match (&self.list, &rhs.list) {
            (Some(a), Some(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.approx_eq(y, delta))
            }
            _ => false,
        }
    }

    fn quantize(&self, delta: f32) -> Self {
        match &self.list {
            Some(list) => Self::from_list(Some(Self::normalize(
                list.iter().map(|w| w.quantize(delta)).collect(),
            ))),
            None => Self::no_weight(),
        }
    }

    fn reverse(&self) -> Self::Reverse {
        match &self.list {
            Some(list) => UnionWeight::from_list(Some(UnionWeight::<W::Reverse, O::Reverse>::normalize(
                list.iter().map(W::reverse).collect(),
            ))),
            None => UnionWeight::no_weight(),
        }
    }

    fn properties() -> WeightProperties {
        let p = W::properties();
        WeightProperties {
            left_semiring: p.left_semiring,
            right_semiring: p.right_semiring,
            commutative: p.commutative,
            idempotent: p.idempotent,
            path: false,
        }
    }

    fn type_name() -> String {
        format!("union_{}", W::type_name())
    }

    fn write_text(&self, w: &mut TextWriter) {
        w.begin();
        match &self.list {
            None => w.atom("BadUnion"),
            Some(list) => {
                w.atom(list.len());
                for v in list {
                    v.write_text(w);
                }
            }
        }
        w.end();
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        r.begin()?;
        let pos = r.pos();
        let head = r.atom()?;
        let out = if head == "BadUnion" {
            Self::no_weight()
        } else {
            let count = head
                .parse::<usize>()
                .map_err(|_| WeightError::parse(pos, format!("invalid union size '{head}'")))?;
            let mut list = Vec::with_capacity(count);
            for _ in 0..count {
                list.push(W::read_text(r)?);
            }
            Self::from_list(Some(Self::normalize(list)))
        };
        r.end()?;
        Ok(out)
    }
}

impl<W: Weight, O: UnionWeightOptions<W>> fmt::Display for UnionWeight<W, O> {
    fmt_display_via_text!();
}

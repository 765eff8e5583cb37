//! Sparse power weight: an index-to-weight mapping with an explicit
//! default value.

use std::fmt;

use crate::error::WeightError;
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Mapping from non-negative index to weight, with an explicit default.
///
/// Only indices bound to a non-default value are materialized: memory and
/// `size()` track the explicit entries, not the addressable range.
/// Setting an entry to the default removes it.
///
/// Invariant: `entries` is sorted by index and never holds a value equal
/// to `default`.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct SparsePowerWeight<W: Weight> {
    default: W,
    entries: Vec<(usize, W)>,
}

impl<W: Weight> SparsePowerWeight<W> {
    /// Creates an empty mapping: every index reads as `default`.
    pub fn with_default(default: W) -> Self {
        SparsePowerWeight {
            default,
            entries: Vec::new(),
        }
    }

    pub fn default_value(&self) -> &W {
        &self.default
    }

    /// Replaces the default; existing entries equal to the new default are
    /// absorbed into it.
    pub fn set_default_value(&mut self, default: W) {
        self.default = default;
        let d = self.default.clone();
        self.entries.retain(|(_, v)| *v != d);
    }

    /// The value at `index`, falling back to the default.
    pub fn value(&self, index: usize) -> &W {
        match self.entries.binary_search_by_key(&index, |(i, _)| *i) {
            Ok(slot) => &self.entries[slot].1,
            Err(_) => &self.default,
        }
    }

    /// Binds `index` to `w`, keeping entries sorted; binding the default
    /// value removes the entry instead.
    pub fn set_value(&mut self, index: usize, w: W) {
        match self.entries.binary_search_by_key(&index, |(i, _)| *i) {
            Ok(slot) => {
                if w == self.default {
                    self.entries.remove(slot);
                } else {
                    self.entries[slot].1 = w;
                }
            }
            Err(slot) => {
                if w != self.default {
                    self.entries.insert(slot, (index, w));
                }
            }
        }
    }

    /// Number of explicit (non-default) entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Explicit entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &W)> {
        self.entries.iter().map(|(i, v)| (*i, v))
    }

    /// Applies `f` componentwise over the union of explicit indices,
    /// combining the defaults too and dropping results equal to the
    /// combined default.
    fn combine(&self, rhs: &Self, f: impl Fn(&W, &W) -> W) -> Self {
        let default = f(&self.default, &rhs.default);
        let mut entries = Vec::new();
        let (a, b) = (&self.entries, &rhs.entries);
        let (mut i, mut j) = (0, 0);
        let mut push = |index: usize, v: W| {
            if v != default {
                entries.push((index, v));
            }
        };
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => {
                    push(a[i].0, f(&a[i].1, &rhs.default));
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    push(b[j].0, f(&self.default, &b[j].1));
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    push(a[i].0, f(&a[i].1, &b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        for (index, v) in &a[i..] {
            push(*index, f(v, &rhs.default));
        }
        for (index, v) in &b[j..] {
            push(*index, f(&self.default, v));
        }
        SparsePowerWeight { default, entries }
    }
}

impl<W: Weight> Weight for SparsePowerWeight<W> {
    type Reverse = SparsePowerWeight<W::Reverse>;

    fn zero() -> Self {
        Self::with_default(W::zero())
    }

    fn one() -> Self {
        Self::with_default(W::one())
    }

    fn no_weight() -> Self {
        Self::with_default(W::no_weight())
    }

    fn plus(&self, rhs: &Self) -> Self {
        self.combine(rhs, |a, b| a.plus(b))
    }

    fn times(&self, rhs: &Self) -> Self {
        self.combine(rhs, |a, b| a.times(b))
    }

    fn is_member(&self) -> bool {
        self.default.is_member() && self.entries.iter().all(|(_, v)| v.is_member())
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        if !self.default.approx_eq(&rhs.default, delta) {
            return false;
        }
        // Walk the union of explicit indices; missing entries read as the
        // owner's default.
        let (a, b) = (&self.entries, &rhs.entries);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => {
                    if !a[i].1.approx_eq(&rhs.default, delta) {
                        return false;
                    }
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    if !self.default.approx_eq(&b[j].1, delta) {
                        return false;
                    }
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    if !a[i].1.approx_eq(&b[j].1, delta) {
                        return false;
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        a[i..].iter().all(|(_, v)| v.approx_eq(&rhs.default, delta))
            && b[j..].iter().all(|(_, v)| self.default.approx_eq(v, delta))
    }

    fn quantize(&self, delta: f32) -> Self {
        let mut out = Self::with_default(self.default.quantize(delta));
        for (index, v) in &self.entries {
            out.set_value(*index, v.quantize(delta));
        }
        out
    }

    fn reverse(&self) -> Self::Reverse {
        SparsePowerWeight {
            default: self.default.reverse(),
            entries: self
                .entries
                .iter()
                .map(|(i, v)| (*i, v.reverse()))
                .collect(),
        }
    }

    fn properties() -> WeightProperties {
        let p = W::properties();
        WeightProperties { path: false, ..p }
    }

    fn type_name() -> String {
        format!("sparse_power_{}", W::type_name())
    }

    fn write_text(&self, w: &mut TextWriter) {
        w.begin();
        self.default.write_text(w);
        w.atom(self.entries.len());
        for (index, v) in &self.entries {
            w.atom(index);
            v.write_text(w);
        }
        w.end();
    }

    fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
        r.begin()?;
        let default = W::read_text(r)?;
        let count = r.count()?;
        let mut out = Self::with_default(default);
        let mut last = None;
        for _ in 0..count {
            let pos = r.pos();
            let index = r.count()?;
            if last.is_some_and(|prev| index <= prev) {
                return Err(WeightError::parse(pos, "sparse indices must increase"));
            }
            last = Some(index);
            let v = W::read_text(r)?;
            out.set_value(index, v);
        }
        r.end()?;
        Ok(out)
    }
}

impl<W: Weight> fmt::Display for SparsePowerWeight<W> {
    fmt_display_via_text!();
}

impl<W: Weight> crate::weight::traits::ScaleWeight<W> for SparsePowerWeight<W> {
    /// Componentwise left multiplication by a scalar of the element type.
    fn scale(&self, scalar: &W) -> Self {
        let mut out = Self::with_default(scalar.times(&self.default));
        for (index, v) in &self.entries {
            out.set_value(*index, scalar.times(v));
        }
        out
    }
}

//! Non-overlapping Groups of Indices

use std::collections::BTreeMap;

use ndarray::prelude::*;
use ndarray::{NdFloat, RemoveAxis};

use super::Coefficient;
use crate::error::{check_len, Error, Result};
use crate::numeric::cast;

/// A partition of the indices `0..n` into non-empty, disjoint groups.
///
/// The default puts every index in its own group and fits inputs of any
/// length. Explicit partitions are validated once, when built, and fit only
/// inputs of the length they were built for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    partition: Option<Partition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Partition {
    len: usize,
    labels: Vec<usize>,
    members: Vec<Vec<usize>>,
}

impl Grouping {
    /// Every index is its own group.
    pub fn singletons() -> Self {
        Grouping { partition: None }
    }

    /// Group indices by label: index `i` belongs to the group `labels[i]`.
    ///
    /// Groups are ordered by ascending label, and per-group weights are
    /// given in that order. Labels need not be contiguous.
    pub fn from_labels(labels: &[usize]) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::invalid_parameter("grouping needs at least one index"));
        }
        let mut by_label: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (index, &label) in labels.iter().enumerate() {
            by_label.entry(label).or_insert_with(Vec::new).push(index);
        }
        let (groups, members): (Vec<usize>, Vec<Vec<usize>>) = by_label.into_iter().unzip();
        Ok(Grouping {
            partition: Some(Partition {
                len: labels.len(),
                labels: groups,
                members,
            }),
        })
    }

    /// Groups given as explicit index lists; group `k` gets label `k`.
    ///
    /// Together the lists must cover `0..n` exactly once, for `n` the total
    /// number of indices given.
    pub fn from_groups(groups: Vec<Vec<usize>>) -> Result<Self> {
        if groups.is_empty() {
            return Err(Error::invalid_parameter("grouping needs at least one group"));
        }
        let len: usize = groups.iter().map(Vec::len).sum();
        let mut seen = vec![false; len];
        for (k, group) in groups.iter().enumerate() {
            if group.is_empty() {
                return Err(Error::invalid_parameter(format!("group {} is empty", k)));
            }
            for &index in group {
                if index >= len {
                    return Err(Error::invalid_parameter(format!(
                        "index {} in group {} is out of range for {} indices",
                        index, k, len
                    )));
                }
                if seen[index] {
                    return Err(Error::invalid_parameter(format!(
                        "index {} appears in more than one group",
                        index
                    )));
                }
                seen[index] = true;
            }
        }
        Ok(Grouping {
            partition: Some(Partition {
                len,
                labels: (0..groups.len()).collect(),
                members: groups,
            }),
        })
    }

    pub fn is_singletons(&self) -> bool {
        self.partition.is_none()
    }

    /// Number of indices an explicit partition covers.
    pub fn len(&self) -> Option<usize> {
        self.partition.as_ref().map(|p| p.len)
    }

    /// Group labels in iteration order, for explicit partitions.
    pub fn labels(&self) -> Option<&[usize]> {
        self.partition.as_ref().map(|p| p.labels.as_slice())
    }

    /// Per-group weights in iteration order, looked up by group label.
    ///
    /// Every label needs a weight, and the map may not name labels the
    /// grouping lacks. Singleton groups have no labels.
    pub fn weights_by_label<A: NdFloat>(
        &self,
        weights: &BTreeMap<usize, A>,
    ) -> Result<Array1<A>> {
        let labels = self.labels().ok_or_else(|| {
            Error::invalid_parameter("singleton groups have no labels to key weights by")
        })?;
        if let Some(extra) = weights.keys().find(|l| labels.binary_search(l).is_err()) {
            return Err(Error::invalid_parameter(format!(
                "weight given for unknown group label {}",
                extra
            )));
        }
        labels
            .iter()
            .map(|label| {
                weights.get(label).copied().ok_or_else(|| {
                    Error::invalid_parameter(format!("no weight for group label {}", label))
                })
            })
            .collect::<Result<Vec<A>>>()
            .map(Array1::from)
    }

    /// Number of groups when applied to an input of length `len`.
    pub fn num_groups(&self, len: usize) -> usize {
        match &self.partition {
            None => len,
            Some(p) => p.members.len(),
        }
    }

    /// Fails unless the grouping partitions `0..len`.
    pub fn check_len(&self, len: usize) -> Result<()> {
        match &self.partition {
            None => Ok(()),
            Some(p) => check_len("grouping", p.len, len),
        }
    }

    /// Indices of the `k`-th group.
    fn indices(&self, k: usize) -> GroupIndices<'_> {
        match &self.partition {
            None => GroupIndices::Single(k),
            Some(p) => GroupIndices::Set(&p.members[k]),
        }
    }

    /// Iterate over the groups of `x` along its first axis.
    ///
    /// Each group is visited once, in order, and together the groups cover
    /// every index once. The iterator is cheap to recreate, so it can simply
    /// be called again to restart.
    pub fn iter<'a, A, D>(
        &'a self,
        x: ArrayView<'a, A, D>,
        coefficient: &'a Coefficient<A>,
    ) -> Result<GroupIter<'a, A, D>>
    where
        A: NdFloat,
        D: RemoveAxis,
    {
        let len = x.len_of(Axis(0));
        self.check_len(len)?;
        let count = self.num_groups(len);
        if let Coefficient::Weights(w) = coefficient {
            check_len("per-group weights", count, w.len())?;
        }
        Ok(GroupIter {
            x,
            coefficient,
            grouping: self,
            next: 0,
            count,
        })
    }
}

/// The indices that make up one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupIndices<'a> {
    Single(usize),
    Set(&'a [usize]),
}

impl<'a> GroupIndices<'a> {
    pub fn as_slice(&self) -> &[usize] {
        match self {
            GroupIndices::Single(i) => std::slice::from_ref(i),
            GroupIndices::Set(set) => set,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One group of an input, as seen while iterating a [`Grouping`].
#[derive(Debug, Clone)]
pub struct GroupView<'a, A, D>
where
    D: Dimension,
{
    /// Entries (or rows) of the input that belong to the group.
    pub values: Array<A, D>,
    /// Effective regularisation coefficient $`r_g`$ of the group.
    pub coefficient: A,
    /// Where the group's entries sit in the input.
    pub indices: GroupIndices<'a>,
}

impl<'a, A, D> GroupView<'a, A, D>
where
    A: NdFloat,
    D: RemoveAxis,
{
    /// Write `values` back to this group's positions in `out`.
    pub fn scatter(&self, out: &mut Array<A, D>, values: &Array<A, D>) {
        for (k, &i) in self.indices.as_slice().iter().enumerate() {
            out.index_axis_mut(Axis(0), i)
                .assign(&values.index_axis(Axis(0), k));
        }
    }
}

/// Iterator over the groups of one input, see [`Grouping::iter`].
pub struct GroupIter<'a, A, D>
where
    D: Dimension,
{
    x: ArrayView<'a, A, D>,
    coefficient: &'a Coefficient<A>,
    grouping: &'a Grouping,
    next: usize,
    count: usize,
}

impl<'a, A, D> Iterator for GroupIter<'a, A, D>
where
    A: NdFloat,
    D: RemoveAxis,
{
    type Item = GroupView<'a, A, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let k = self.next;
        self.next += 1;

        let indices = self.grouping.indices(k);
        let values = self.x.select(Axis(0), indices.as_slice());
        // a shared coefficient grows with the group so that groups of
        // different sizes are penalised comparably
        let coefficient = match self.coefficient {
            Coefficient::Scalar(r) => *r * cast::<A>(indices.len() as f64).sqrt(),
            Coefficient::Weights(w) => w[k],
        };
        Some(GroupView {
            values,
            coefficient,
            indices,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, A, D> ExactSizeIterator for GroupIter<'a, A, D>
where
    A: NdFloat,
    D: RemoveAxis,
{
}

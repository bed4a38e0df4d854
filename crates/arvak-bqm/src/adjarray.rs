//! Fixed-structure BQM in compressed sparse row layout.

use std::iter::Copied;
use std::ops::Range;
use std::slice;

use tracing::trace;

use crate::adjmap::AdjMapBqm;
use crate::variable::{Bias, Variable};
use crate::view::BqmView;

/// A BQM whose variables and interactions are fixed at construction.
///
/// All neighborhoods live in one contiguous array, each row sorted by
/// neighbor, which makes iteration cache friendly and lookups a binary
/// search. Biases can be changed in place but interactions can be neither
/// added nor removed; convert to an [`AdjMapBqm`] to change the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjArrayBqm<V = u32, B = f64> {
    /// Per variable: start of its row in `outvars`, and its linear bias.
    invars: Vec<(usize, B)>,
    /// Concatenated neighbor rows of `(neighbor, bias)`.
    outvars: Vec<(V, B)>,
}

impl<V: Variable, B: Bias> AdjArrayBqm<V, B> {
    /// Pack any other representation into compressed rows.
    ///
    /// The source must yield sorted, symmetric neighborhoods. Only the
    /// ordering is asserted, and only in debug builds; use
    /// [`AdjMapBqm::try_from_view`] to check symmetry.
    pub fn from_view<T>(source: &T) -> Self
    where
        T: BqmView<Variable = V, Bias = B> + ?Sized,
    {
        let num_variables = source.num_variables();
        let mut invars = Vec::with_capacity(num_variables);
        let mut outvars = Vec::new();
        for index in 0..num_variables {
            let v = V::from_index(index);
            invars.push((outvars.len(), source.get_linear(v)));
            outvars.extend(source.neighborhood(v));
        }
        let bqm = Self { invars, outvars };
        debug_assert!(
            (0..num_variables).all(|i| bqm.outvars[bqm.row(i)]
                .windows(2)
                .all(|w| w[0].0 < w[1].0)),
            "conversion source yielded an unsorted neighborhood"
        );
        trace!(
            num_variables,
            num_entries = bqm.outvars.len(),
            "packed BQM into adjacency array"
        );
        bqm
    }

    /// Number of variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.invars.len()
    }

    /// Number of interactions; each is stored in two rows.
    #[inline]
    pub fn num_interactions(&self) -> usize {
        self.outvars.len() / 2
    }

    /// Number of variables interacting with `v`.
    #[inline]
    pub fn degree(&self, v: V) -> usize {
        self.debug_check_variable(v);
        self.row(v.index()).len()
    }

    /// Linear bias of `v`.
    #[inline]
    pub fn get_linear(&self, v: V) -> B {
        self.debug_check_variable(v);
        self.invars[v.index()].1
    }

    /// Overwrite the linear bias of `v`.
    #[inline]
    pub fn set_linear(&mut self, v: V, bias: B) {
        self.debug_check_variable(v);
        self.invars[v.index()].1 = bias;
    }

    /// Quadratic bias between `u` and `v`, or `None` if they do not interact.
    pub fn get_quadratic(&self, u: V, v: V) -> Option<B> {
        self.debug_check_pair(u, v);
        self.find(u, v).map(|pos| self.outvars[pos].1)
    }

    /// Overwrite the bias of an existing interaction on both sides.
    ///
    /// Returns `false` and changes nothing if `u` and `v` do not interact,
    /// since this layout cannot grow.
    pub fn set_quadratic(&mut self, u: V, v: V, bias: B) -> bool {
        self.debug_check_pair(u, v);
        let (Some(uv), Some(vu)) = (self.find(u, v), self.find(v, u)) else {
            return false;
        };
        self.outvars[uv].1 = bias;
        self.outvars[vu].1 = bias;
        true
    }

    /// Iterate over the neighbors of `u` and their biases, sorted by neighbor.
    #[inline]
    pub fn neighborhood(&self, u: V) -> Copied<slice::Iter<'_, (V, B)>> {
        self.debug_check_variable(u);
        self.outvars[self.row(u.index())].iter().copied()
    }

    #[inline]
    fn debug_check_variable(&self, v: V) {
        debug_assert!(
            v.index() < self.invars.len(),
            "variable {v:?} out of range for a BQM with {} variables",
            self.invars.len()
        );
    }

    #[inline]
    fn debug_check_pair(&self, u: V, v: V) {
        self.debug_check_variable(u);
        self.debug_check_variable(v);
        debug_assert!(u != v, "self-loop on variable {u:?}");
    }

    /// Range of `outvars` holding the row of variable `index`.
    fn row(&self, index: usize) -> Range<usize> {
        let start = self.invars[index].0;
        let end = self
            .invars
            .get(index + 1)
            .map_or(self.outvars.len(), |&(next, _)| next);
        start..end
    }

    /// Absolute position of `v` in the row of `u`.
    fn find(&self, u: V, v: V) -> Option<usize> {
        let row = self.row(u.index());
        self.outvars[row.clone()]
            .binary_search_by(|(n, _)| n.cmp(&v))
            .ok()
            .map(|offset| row.start + offset)
    }
}

impl<V: Variable, B: Bias> BqmView for AdjArrayBqm<V, B> {
    type Variable = V;
    type Bias = B;
    type Neighbors<'a>
        = Copied<slice::Iter<'a, (V, B)>>
    where
        Self: 'a;

    fn num_variables(&self) -> usize {
        self.invars.len()
    }

    fn get_linear(&self, v: V) -> B {
        AdjArrayBqm::get_linear(self, v)
    }

    fn neighborhood(&self, v: V) -> Self::Neighbors<'_> {
        AdjArrayBqm::neighborhood(self, v)
    }
}

impl<V: Variable, B: Bias> From<&AdjMapBqm<V, B>> for AdjArrayBqm<V, B> {
    fn from(bqm: &AdjMapBqm<V, B>) -> Self {
        Self::from_view(bqm)
    }
}

//! Adjacency-map BQM representation.
//!
//! Each variable owns a sorted map from neighbor to quadratic bias together
//! with its linear bias. An interaction `{u, v}` is stored twice, once in
//! each endpoint's map, so neighborhoods can be walked from either side
//! without a canonical-direction lookup.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::iter::FusedIterator;
use std::ops::Bound;

use tracing::{debug, trace};

use crate::adjarray::AdjArrayBqm;
use crate::error::{BqmError, BqmResult};
use crate::variable::{Bias, Variable};
use crate::view::BqmView;

/// Neighbor map and linear bias of one variable.
#[derive(Debug, Clone, PartialEq)]
struct AdjEntry<V, B> {
    neighbors: BTreeMap<V, B>,
    linear: B,
}

impl<V: Variable, B: Bias> AdjEntry<V, B> {
    fn new() -> Self {
        Self {
            neighbors: BTreeMap::new(),
            linear: B::ZERO,
        }
    }
}

/// A Binary Quadratic Model stored as one sorted neighbor map per variable.
///
/// Variables are the contiguous range `0..num_variables()`. New variables
/// are appended with [`add_variable`](Self::add_variable) and only the last
/// one can be removed with [`pop_variable`](Self::pop_variable).
///
/// ## Invariants
///
/// - `u` lists `v` with bias `b` exactly when `v` lists `u` with bias `b`
/// - no variable lists itself
/// - every listed neighbor is a valid variable
///
/// All writes go through two private primitives that update both halves of
/// an interaction, so these hold after every public operation.
/// [`verify_integrity`](Self::verify_integrity) checks them explicitly.
///
/// ## Preconditions
///
/// Variable arguments must be in range and pairwise operations need two
/// distinct variables. These are checked with `debug_assert!` only; see the
/// crate-level documentation for the release-build behavior.
///
/// ## Performance
///
/// Point lookups and updates on an interaction cost `O(log degree)` per
/// endpoint. Neighborhood iteration is sorted by neighbor index.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjMapBqm<V = u32, B = f64> {
    adj: Vec<AdjEntry<V, B>>,
}

impl<V: Variable, B: Bias> AdjMapBqm<V, B> {
    /// Create a model with no variables and no interactions.
    pub fn new() -> Self {
        Self { adj: Vec::new() }
    }

    /// Create an empty model with room for `num_variables` variables.
    pub fn with_capacity(num_variables: usize) -> Self {
        Self {
            adj: Vec::with_capacity(num_variables),
        }
    }

    /// Copy any other representation into an adjacency map.
    ///
    /// Variables and their linear biases are copied in index order, then each
    /// variable's neighborhood. The source is trusted to be symmetric; debug
    /// builds assert it after the copy, release builds do not re-validate.
    /// Use [`try_from_view`](Self::try_from_view) for untrusted sources.
    pub fn from_view<T>(source: &T) -> Self
    where
        T: BqmView<Variable = V, Bias = B> + ?Sized,
    {
        let bqm = Self::copy_view(source);
        debug_assert!(
            bqm.verify_integrity().is_ok(),
            "conversion source violates BQM invariants"
        );
        bqm
    }

    /// Copy another representation and verify the result.
    pub fn try_from_view<T>(source: &T) -> BqmResult<Self>
    where
        T: BqmView<Variable = V, Bias = B> + ?Sized,
    {
        let bqm = Self::copy_view(source);
        bqm.verify_integrity()?;
        Ok(bqm)
    }

    fn copy_view<T>(source: &T) -> Self
    where
        T: BqmView<Variable = V, Bias = B> + ?Sized,
    {
        let num_variables = source.num_variables();
        let mut bqm = Self::with_capacity(num_variables);
        for index in 0..num_variables {
            let mut entry = AdjEntry::new();
            entry.linear = source.get_linear(V::from_index(index));
            bqm.adj.push(entry);
        }
        for (index, entry) in bqm.adj.iter_mut().enumerate() {
            entry.neighbors = source.neighborhood(V::from_index(index)).collect();
        }
        trace!(num_variables, "copied BQM into adjacency map");
        bqm
    }

    // =========================================================================
    // Variables
    // =========================================================================

    /// Append a disconnected variable with zero linear bias.
    ///
    /// Returns its index, which is the previous number of variables.
    pub fn add_variable(&mut self) -> V {
        let v = V::from_index(self.adj.len());
        self.adj.push(AdjEntry::new());
        v
    }

    /// Remove the highest-indexed variable and every interaction it has.
    ///
    /// Returns the number of variables left, not the removed index. Cost is
    /// proportional to the removed variable's degree.
    ///
    /// # Panics
    ///
    /// Debug builds panic on an empty model. Release builds leave an empty
    /// model untouched and return `0`.
    pub fn pop_variable(&mut self) -> usize {
        debug_assert!(!self.adj.is_empty(), "pop_variable on an empty BQM");
        let Some(entry) = self.adj.pop() else {
            return 0;
        };
        let v = V::from_index(self.adj.len());
        for u in entry.neighbors.keys() {
            self.adj[u.index()].neighbors.remove(&v);
        }
        trace!(variable = ?v, degree = entry.neighbors.len(), "popped variable");
        self.adj.len()
    }

    /// Number of variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.adj.len()
    }

    /// Check whether the model has no variables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Number of interactions (unordered variable pairs with a bias).
    ///
    /// Every interaction is stored at both endpoints, so this is half the
    /// sum of all degrees. Runs in `O(num_variables)`.
    pub fn num_interactions(&self) -> usize {
        self.adj.iter().map(|e| e.neighbors.len()).sum::<usize>() / 2
    }

    /// Number of variables interacting with `v`.
    #[inline]
    pub fn degree(&self, v: V) -> usize {
        self.debug_check_variable(v);
        self.adj[v.index()].neighbors.len()
    }

    // =========================================================================
    // Linear biases
    // =========================================================================

    /// Linear bias of `v`.
    #[inline]
    pub fn get_linear(&self, v: V) -> B {
        self.debug_check_variable(v);
        self.adj[v.index()].linear
    }

    /// Overwrite the linear bias of `v`.
    #[inline]
    pub fn set_linear(&mut self, v: V, bias: B) {
        self.debug_check_variable(v);
        self.adj[v.index()].linear = bias;
    }

    /// Add `bias` to the linear bias of `v`.
    #[inline]
    pub fn add_linear(&mut self, v: V, bias: B) {
        self.debug_check_variable(v);
        self.adj[v.index()].linear += bias;
    }

    /// Iterate over all linear biases in variable order.
    pub fn linear(&self) -> impl ExactSizeIterator<Item = B> + '_ {
        self.adj.iter().map(|e| e.linear)
    }

    // =========================================================================
    // Quadratic biases
    // =========================================================================

    /// Quadratic bias between `u` and `v`.
    ///
    /// `None` means the pair has no interaction, i.e. a bias of zero.
    #[inline]
    pub fn get_quadratic(&self, u: V, v: V) -> Option<B> {
        self.debug_check_pair(u, v);
        self.adj[u.index()].neighbors.get(&v).copied()
    }

    /// Set the quadratic bias between `u` and `v`, creating the interaction
    /// if needed.
    ///
    /// Always returns `true`: an adjacency map can store any pair. The
    /// return value matches [`AdjArrayBqm::set_quadratic`], whose structure
    /// is fixed.
    #[inline]
    pub fn set_quadratic(&mut self, u: V, v: V, bias: B) -> bool {
        self.debug_check_pair(u, v);
        self.link(u, v, bias);
        true
    }

    /// Add `bias` to the quadratic bias between `u` and `v`, creating the
    /// interaction at zero first if needed.
    pub fn add_quadratic(&mut self, u: V, v: V, bias: B) {
        self.debug_check_pair(u, v);
        let (eu, ev) = pair_mut(&mut self.adj, u.index(), v.index());
        let total = {
            let b = eu.neighbors.entry(v).or_insert(B::ZERO);
            *b += bias;
            *b
        };
        ev.neighbors.insert(u, total);
    }

    /// Remove the interaction between `u` and `v`.
    ///
    /// Returns `true` if it existed. Passing the same variable twice returns
    /// `false` since self-loops are never stored.
    #[inline]
    pub fn remove_interaction(&mut self, u: V, v: V) -> bool {
        self.debug_check_variable(u);
        self.debug_check_variable(v);
        if u == v {
            return false;
        }
        self.unlink(u, v)
    }

    /// Iterate over every interaction once, as `(u, v, bias)` with `u < v`.
    ///
    /// Ordered by `u`, then by `v`.
    pub fn interactions(&self) -> impl Iterator<Item = (V, V, B)> + '_ {
        self.adj.iter().enumerate().flat_map(|(index, entry)| {
            let u = V::from_index(index);
            entry
                .neighbors
                .range((Bound::Excluded(u), Bound::Unbounded))
                .map(move |(&v, &bias)| (u, v, bias))
        })
    }

    // =========================================================================
    // Neighborhoods
    // =========================================================================

    /// Iterate over the neighbors of `u` and their biases, sorted by neighbor.
    ///
    /// The iterator borrows the model, so it cannot outlive a structural
    /// change. Call again to restart.
    #[inline]
    pub fn neighborhood(&self, u: V) -> Neighborhood<'_, V, B> {
        self.debug_check_variable(u);
        Neighborhood {
            inner: self.adj[u.index()].neighbors.iter(),
        }
    }

    /// Mutable view of the neighborhood of `u`.
    ///
    /// Writes through the view update both halves of each interaction.
    pub fn neighborhood_mut(&mut self, u: V) -> NeighborhoodMut<'_, V, B> {
        self.debug_check_variable(u);
        NeighborhoodMut {
            bqm: self,
            variable: u,
        }
    }

    // =========================================================================
    // Integrity
    // =========================================================================

    /// Verify the structural invariants of the model.
    ///
    /// Checks that:
    /// - Every neighbor is a valid variable
    /// - No variable is its own neighbor
    /// - Every interaction is stored at both endpoints with the same bias
    pub fn verify_integrity(&self) -> BqmResult<()> {
        let num_variables = self.adj.len();
        for (i, entry) in self.adj.iter().enumerate() {
            for (&v, &bias) in &entry.neighbors {
                let j = v.checked_index().unwrap_or(usize::MAX);
                if j >= num_variables {
                    return Err(BqmError::InvalidVariable {
                        variable: j,
                        num_variables,
                    });
                }
                if j == i {
                    return Err(BqmError::SelfLoop { variable: i });
                }
                let mirror = self.adj[j].neighbors.get(&V::from_index(i)).copied();
                if !mirror.is_some_and(|m| same_bias(m, bias)) {
                    debug!(u = i, v = j, ?bias, ?mirror, "asymmetric interaction");
                    return Err(BqmError::AsymmetricInteraction { u: i, v: j });
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Symmetric primitives
    // =========================================================================

    /// Write `bias` into both halves of `{u, v}`.
    fn link(&mut self, u: V, v: V, bias: B) {
        let (eu, ev) = pair_mut(&mut self.adj, u.index(), v.index());
        eu.neighbors.insert(v, bias);
        ev.neighbors.insert(u, bias);
    }

    /// Erase both halves of `{u, v}`. Returns whether it existed.
    fn unlink(&mut self, u: V, v: V) -> bool {
        let (eu, ev) = pair_mut(&mut self.adj, u.index(), v.index());
        if eu.neighbors.remove(&v).is_some() {
            ev.neighbors.remove(&u);
            true
        } else {
            false
        }
    }

    #[inline]
    fn debug_check_variable(&self, v: V) {
        debug_assert!(
            v.index() < self.adj.len(),
            "variable {v:?} out of range for a BQM with {} variables",
            self.adj.len()
        );
    }

    #[inline]
    fn debug_check_pair(&self, u: V, v: V) {
        self.debug_check_variable(u);
        self.debug_check_variable(v);
        debug_assert!(u != v, "self-loop on variable {u:?}");
    }
}

impl<V: Variable, B: Bias> Default for AdjMapBqm<V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Variable, B: Bias> BqmView for AdjMapBqm<V, B> {
    type Variable = V;
    type Bias = B;
    type Neighbors<'a>
        = Neighborhood<'a, V, B>
    where
        Self: 'a;

    fn num_variables(&self) -> usize {
        self.adj.len()
    }

    fn get_linear(&self, v: V) -> B {
        AdjMapBqm::get_linear(self, v)
    }

    fn neighborhood(&self, v: V) -> Neighborhood<'_, V, B> {
        AdjMapBqm::neighborhood(self, v)
    }
}

impl<V: Variable, B: Bias> From<&AdjArrayBqm<V, B>> for AdjMapBqm<V, B> {
    fn from(bqm: &AdjArrayBqm<V, B>) -> Self {
        Self::from_view(bqm)
    }
}

/// Borrow two distinct entries mutably.
///
/// Panics before handing out anything if either index is out of range or
/// both are equal, so callers never write one half of an interaction and
/// then fail on the other.
fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (lo, hi) = slice.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = slice.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

/// Bias equality that treats two NaNs as the same stored value.
#[allow(clippy::eq_op)]
fn same_bias<B: PartialEq>(a: B, b: B) -> bool {
    a == b || (a != a && b != b)
}

/// Sorted iterator over the neighborhood of a variable.
///
/// Yields `(neighbor, bias)` pairs in increasing neighbor order.
#[derive(Debug, Clone)]
pub struct Neighborhood<'a, V, B> {
    inner: btree_map::Iter<'a, V, B>,
}

impl<V: Copy, B: Copy> Iterator for Neighborhood<'_, V, B> {
    type Item = (V, B);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&v, &b)| (v, b))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V: Copy, B: Copy> DoubleEndedIterator for Neighborhood<'_, V, B> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(&v, &b)| (v, b))
    }
}

impl<V: Copy, B: Copy> ExactSizeIterator for Neighborhood<'_, V, B> {}

impl<V: Copy, B: Copy> FusedIterator for Neighborhood<'_, V, B> {}

/// Mutable view of one variable's neighborhood.
///
/// Holds the model exclusively; every write is mirrored to the neighbor's
/// side before the call returns.
#[derive(Debug)]
pub struct NeighborhoodMut<'a, V: Variable, B: Bias> {
    bqm: &'a mut AdjMapBqm<V, B>,
    variable: V,
}

impl<V: Variable, B: Bias> NeighborhoodMut<'_, V, B> {
    /// The variable whose neighborhood this is.
    #[inline]
    pub fn variable(&self) -> V {
        self.variable
    }

    /// Degree of the variable.
    #[inline]
    pub fn len(&self) -> usize {
        self.bqm.degree(self.variable)
    }

    /// Check whether the variable has no neighbors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the current neighbors and biases.
    pub fn iter(&self) -> Neighborhood<'_, V, B> {
        self.bqm.neighborhood(self.variable)
    }

    /// Bias towards neighbor `v`, if they interact.
    pub fn get(&self, v: V) -> Option<B> {
        self.bqm.get_quadratic(self.variable, v)
    }

    /// Set the bias towards `v` on both sides. See
    /// [`AdjMapBqm::set_quadratic`].
    pub fn set(&mut self, v: V, bias: B) -> bool {
        self.bqm.set_quadratic(self.variable, v, bias)
    }

    /// Remove the interaction with `v` on both sides.
    pub fn remove(&mut self, v: V) -> bool {
        self.bqm.remove_interaction(self.variable, v)
    }

    /// Replace every bias in the neighborhood with `f(neighbor, bias)`.
    ///
    /// All new values are computed before anything is written, so a panic
    /// in `f` leaves the model unchanged.
    pub fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(V, B) -> B,
    {
        let u = self.variable;
        let updated: Vec<(V, B)> = self.iter().map(|(v, b)| (v, f(v, b))).collect();
        for (v, bias) in updated {
            self.bqm.link(u, v, bias);
        }
    }
}

//! Read-only capability shared by every BQM representation.

use crate::error::{BqmError, BqmResult};
use crate::variable::{Bias, Variable};

/// The minimal interface needed to read a BQM.
///
/// Anything that can report its variable count, the linear bias of each
/// variable and each variable's sorted neighborhood can be converted into
/// any other representation (see [`AdjMapBqm::from_view`] and
/// [`AdjArrayBqm::from_view`]).
///
/// Implementors must keep neighborhoods symmetric and free of self-loops,
/// and yield them in increasing neighbor order.
///
/// [`AdjMapBqm::from_view`]: crate::AdjMapBqm::from_view
/// [`AdjArrayBqm::from_view`]: crate::AdjArrayBqm::from_view
pub trait BqmView {
    /// Variable index type.
    type Variable: Variable;
    /// Bias type.
    type Bias: Bias;
    /// Iterator over `(neighbor, bias)` pairs of one variable.
    type Neighbors<'a>: Iterator<Item = (Self::Variable, Self::Bias)>
    where
        Self: 'a;

    /// Number of variables.
    fn num_variables(&self) -> usize;

    /// Linear bias of `v`.
    fn get_linear(&self, v: Self::Variable) -> Self::Bias;

    /// Neighbors of `v` with their quadratic biases, sorted by neighbor.
    fn neighborhood(&self, v: Self::Variable) -> Self::Neighbors<'_>;

    /// Evaluate the objective for one assignment of values to variables.
    ///
    /// `sample[i]` is the value of variable `i` (e.g. `0`/`1` for QUBOs or
    /// `-1`/`+1` for Ising models). Each interaction contributes once.
    fn energy(&self, sample: &[Self::Bias]) -> BqmResult<Self::Bias> {
        let num_variables = self.num_variables();
        if sample.len() != num_variables {
            return Err(BqmError::SampleLength {
                expected: num_variables,
                got: sample.len(),
            });
        }

        let mut energy = <Self::Bias as Bias>::ZERO;
        for (index, &value) in sample.iter().enumerate() {
            let v = Self::Variable::from_index(index);
            energy += self.get_linear(v) * value;
            // Neighborhoods are sorted; only count pairs from their lower end.
            for (u, bias) in self.neighborhood(v).skip_while(|(u, _)| u.index() < index) {
                energy += bias * value * sample[u.index()];
            }
        }
        Ok(energy)
    }
}

//! Interaction graph export.

use petgraph::graph::{NodeIndex, UnGraph};

use crate::variable::Variable;
use crate::view::BqmView;

/// Build the undirected interaction graph of a BQM.
///
/// Node `i` is variable `i` weighted by its linear bias; each interaction
/// becomes one edge weighted by its quadratic bias. Useful for running
/// `petgraph` algorithms (components, colorings, embeddings) on the model
/// topology.
pub fn interaction_graph<T>(bqm: &T) -> UnGraph<T::Bias, T::Bias>
where
    T: BqmView + ?Sized,
{
    let num_variables = bqm.num_variables();
    let mut graph = UnGraph::with_capacity(num_variables, 0);
    for index in 0..num_variables {
        graph.add_node(bqm.get_linear(T::Variable::from_index(index)));
    }
    for index in 0..num_variables {
        let v = T::Variable::from_index(index);
        for (u, bias) in bqm.neighborhood(v).skip_while(|(u, _)| u.index() < index) {
            graph.add_edge(NodeIndex::new(index), NodeIndex::new(u.index()), bias);
        }
    }
    graph
}

use crate::ordering::VariableOrdering;
use crate::task::{VarId, Variable};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};
use varorder_collections::RefVec;

/// Number of operators and axioms justifying a dependency.
pub type Weight = u32;

/// Weighted neighbours of a variable, iterated in increasing [`VarId`] order.
pub type WeightedEdges = BTreeMap<VarId, Weight>;

/// Weighted causal graph of a task.
///
/// There is an edge `a -> b` of weight `n` if `n` operators or axioms have a condition on `a` and an
/// effect on `b`. Every variable has an entry in both the successor and the predecessor tables, even when it
/// has no dependency. Both tables are always mirrors of each other and the graph has no self-loop.
///
/// The graph is built once by [`CausalGraph::from_task`](crate::CausalGraph::from_task) and is read-only afterwards.
#[derive(Clone, Debug)]
pub struct CausalGraph {
    successors: RefVec<VarId, WeightedEdges>,
    predecessors: RefVec<VarId, WeightedEdges>,
    num_edges: usize,
}

impl CausalGraph {
    pub(crate) fn with_variables(num_variables: usize) -> Self {
        CausalGraph {
            successors: RefVec::from_fn(num_variables, WeightedEdges::new),
            predecessors: RefVec::from_fn(num_variables, WeightedEdges::new),
            num_edges: 0,
        }
    }

    /// Increments the weight of `source -> target`, creating the edge if needed. Self-loops are ignored.
    pub(crate) fn add_dependency(&mut self, source: VarId, target: VarId) {
        if source == target {
            return;
        }
        let weight = self.successors[source].entry(target).or_insert(0);
        if *weight == 0 {
            self.num_edges += 1;
        }
        *weight += 1;
        *self.predecessors[target].entry(source).or_insert(0) += 1;
        debug_assert_eq!(self.successors[source][&target], self.predecessors[target][&source]);
    }

    pub fn num_variables(&self) -> usize {
        self.successors.len()
    }

    /// Number of distinct edges, regardless of their weight.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn variables(&self) -> impl Iterator<Item = VarId> {
        self.successors.keys()
    }

    pub fn successors(&self, var: VarId) -> &WeightedEdges {
        &self.successors[var]
    }

    pub fn predecessors(&self, var: VarId) -> &WeightedEdges {
        &self.predecessors[var]
    }

    pub fn weight(&self, source: VarId, target: VarId) -> Option<Weight> {
        self.successors[source].get(&target).copied()
    }

    /// Returns true if the graph has no cycle, i.e., if each strongly connected component is a single variable.
    pub fn is_acyclic(&self) -> bool {
        crate::scc::strongly_connected_components(self).len() == self.num_variables()
    }

    /// Restriction of the graph to the variables that survived the ordering, renamed by their level.
    ///
    /// The i-th entry lists the `(level, weight)` of the surviving successors of the variable at level `i`.
    pub fn leveled_successors(&self, ordering: &VariableOrdering) -> Vec<Vec<(usize, Weight)>> {
        ordering
            .order()
            .iter()
            .map(|&var| {
                self.successors[var]
                    .iter()
                    .filter_map(|(&succ, &weight)| ordering.level_of(succ).map(|lvl| (lvl, weight)))
                    .collect()
            })
            .collect()
    }

    /// Returns an object displaying the graph with the names of the given variables.
    pub fn display<'a>(&'a self, variables: &'a RefVec<VarId, Variable>) -> DispGraph<'a> {
        DispGraph(self, variables)
    }
}

/// Composition of a causal graph with the variables it refers to, allowing to display it with variable names.
pub struct DispGraph<'a>(&'a CausalGraph, &'a RefVec<VarId, Variable>);

impl Display for DispGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let DispGraph(graph, vars) = self;
        let name = |v: VarId| vars.get(v).map_or("?", |var| var.name.as_str());
        for var in graph.variables() {
            writeln!(
                f,
                "{}: -> [{}] <- [{}]",
                name(var),
                graph.successors(var).iter().map(|(&s, w)| format!("{} {w}", name(s))).format(", "),
                graph.predecessors(var).iter().map(|(&p, w)| format!("{} {w}", name(p))).format(", "),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const A: VarId = VarId::from_u32(0);
    const B: VarId = VarId::from_u32(1);
    const C: VarId = VarId::from_u32(2);

    #[test]
    fn test_mirrored_edges() {
        let mut g = CausalGraph::with_variables(3);
        g.add_dependency(A, B);
        g.add_dependency(A, B);
        g.add_dependency(C, B);
        g.add_dependency(B, B);

        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.weight(A, B), Some(2));
        assert_eq!(g.weight(B, A), None);
        assert_eq!(g.weight(B, B), None);
        assert_eq!(g.predecessors(B).iter().collect::<Vec<_>>(), vec![(&A, &2), (&C, &1)]);
        assert!(g.successors(B).is_empty());
        assert!(g.predecessors(A).is_empty());
        assert!(g.is_acyclic());

        g.add_dependency(B, A);
        assert!(!g.is_acyclic());
    }

    #[test]
    fn test_display() {
        let mut g = CausalGraph::with_variables(2);
        g.add_dependency(A, B);
        let vars: RefVec<VarId, Variable> = [Variable::new("a", 2), Variable::new("b", 2)].into_iter().collect();
        assert_eq!(g.display(&vars).to_string(), "a: -> [b 1] <- []\nb: -> [] <- [a 1]\n");
    }
}

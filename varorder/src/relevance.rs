use crate::graph::CausalGraph;
use crate::task::{Fact, VarId};
use varorder_collections::RefSet;

/// Marks as necessary every goal variable and every variable from which a goal variable can be reached
/// in the causal graph.
///
/// The search walks the predecessor relation backwards from the goals. A variable is expanded once, when
/// it is first marked.
pub fn necessary_variables(graph: &CausalGraph, goals: &[Fact]) -> RefSet<VarId> {
    let _span = tracing::span!(tracing::Level::TRACE, "relevance").entered();
    let mut necessary = RefSet::new();
    let mut stack = Vec::with_capacity(goals.len());

    for goal in goals {
        if necessary.insert(goal.var) {
            stack.push(goal.var);
        }
    }
    while let Some(var) = stack.pop() {
        for &pred in graph.predecessors(var).keys() {
            if necessary.insert(pred) {
                stack.push(pred);
            }
        }
    }
    necessary
}

/// Keeps the necessary variables of `order`, in their relative order. All variables are kept if
/// `retain_all` is set.
pub fn prune(order: Vec<VarId>, necessary: &RefSet<VarId>, retain_all: bool) -> Vec<VarId> {
    if retain_all {
        return order;
    }
    order.into_iter().filter(|&v| necessary.contains(v)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const A: VarId = VarId::from_u32(0);
    const B: VarId = VarId::from_u32(1);
    const C: VarId = VarId::from_u32(2);
    const D: VarId = VarId::from_u32(3);
    const E: VarId = VarId::from_u32(4);

    fn graph() -> CausalGraph {
        // A -> B -> C <- D, C -> E, E -> B
        let mut g = CausalGraph::with_variables(5);
        g.add_dependency(A, B);
        g.add_dependency(B, C);
        g.add_dependency(D, C);
        g.add_dependency(C, E);
        g.add_dependency(E, B);
        g
    }

    #[test]
    fn test_backward_reachability() {
        let g = graph();
        let necessary = necessary_variables(&g, &[Fact::new(B, 0)]);
        // B is reachable from A and, through the cycle, from C, D and E
        assert_eq!(necessary.iter().collect::<Vec<_>>(), vec![A, B, C, D, E]);

        let necessary = necessary_variables(&g, &[Fact::new(A, 1)]);
        assert_eq!(necessary.iter().collect::<Vec<_>>(), vec![A]);
    }

    #[test]
    fn test_no_goal() {
        let necessary = necessary_variables(&graph(), &[]);
        assert!(necessary.is_empty());
    }

    #[test]
    fn test_prune_keeps_relative_order() {
        let necessary: RefSet<VarId> = [A, D].into_iter().collect();
        assert_eq!(prune(vec![D, B, A, C], &necessary, false), vec![D, A]);
        assert_eq!(prune(vec![D, B, A, C], &necessary, true), vec![D, B, A, C]);
    }
}

use crate::graph::CausalGraph;
use crate::max_dag::{EdgeWeight, LocalGraph, MaxDag};
use crate::scc::Partition;
use crate::task::VarId;
use varorder_collections::{RefSet, RefVec};

/// Concatenates the components into a single order of all variables, replacing each cyclic component by an
/// order of its variables that keeps as many dependencies as possible.
///
/// Inside a component, a dependency `a -> b` with `b` a goal variable is presented to the solver twice:
/// once with its own weight and once with an additional `goal_bias`, which pushes goal variables towards
/// the end of the component's order.
pub fn pseudo_topological_order(
    graph: &CausalGraph,
    components: &Partition,
    goal_vars: &RefSet<VarId>,
    goal_bias: u32,
) -> Vec<VarId> {
    let _span = tracing::span!(tracing::Level::TRACE, "cycle breaking").entered();
    let mut order = Vec::with_capacity(graph.num_variables());
    let mut num_dropped = 0;
    // position of each variable in its component, only set while the component is processed
    let mut local_index: RefVec<VarId, Option<usize>> = RefVec::with_values(graph.num_variables(), None);

    for component in components {
        if let [var] = component.as_slice() {
            order.push(*var);
            continue;
        }
        for (i, &var) in component.iter().enumerate() {
            local_index[var] = Some(i);
        }
        let subgraph = induced_subgraph(graph, component, &local_index, goal_vars, goal_bias);
        for &var in component {
            local_index[var] = None;
        }
        let dag = MaxDag::new(&subgraph);
        num_dropped += dag.num_dropped();
        order.extend(dag.order().iter().map(|&i| component[i]));
    }

    tracing::debug!("#dependencies dropped to break cycles: {num_dropped}");
    debug_assert_eq!(order.len(), graph.num_variables());
    order
}

/// Subgraph induced by the component, with nodes identified by their position in the component.
///
/// `local_index` gives the position of the variables of the component and is `None` for all others.
fn induced_subgraph(
    graph: &CausalGraph,
    component: &[VarId],
    local_index: &RefVec<VarId, Option<usize>>,
    goal_vars: &RefSet<VarId>,
    goal_bias: u32,
) -> LocalGraph {
    component
        .iter()
        .map(|&var| {
            let mut edges = Vec::new();
            for (&target, &weight) in graph.successors(var) {
                let Some(tgt) = local_index[target] else {
                    continue;
                };
                let weight = weight as EdgeWeight;
                if goal_vars.contains(target) {
                    edges.push((tgt, weight + goal_bias as EdgeWeight));
                }
                edges.push((tgt, weight));
            }
            edges
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scc::strongly_connected_components;

    const A: VarId = VarId::from_u32(0);
    const B: VarId = VarId::from_u32(1);
    const C: VarId = VarId::from_u32(2);
    const D: VarId = VarId::from_u32(3);

    fn graph(num_vars: usize, edges: &[(VarId, VarId, u32)]) -> CausalGraph {
        let mut g = CausalGraph::with_variables(num_vars);
        for &(a, b, w) in edges {
            for _ in 0..w {
                g.add_dependency(a, b);
            }
        }
        g
    }

    fn order(g: &CausalGraph, goals: &[VarId]) -> Vec<VarId> {
        let sccs = strongly_connected_components(g);
        let goals: RefSet<VarId> = goals.iter().copied().collect();
        pseudo_topological_order(g, &sccs, &goals, 100_000)
    }

    #[test]
    fn test_goal_is_placed_last() {
        let g = graph(2, &[(A, B, 1), (B, A, 1)]);
        assert_eq!(order(&g, &[A]), vec![B, A]);
        assert_eq!(order(&g, &[B]), vec![A, B]);
    }

    #[test]
    fn test_heaviest_dependency_wins() {
        let g = graph(2, &[(A, B, 1), (B, A, 3)]);
        assert_eq!(order(&g, &[]), vec![B, A]);
        // the goal bias dominates the natural weights
        assert_eq!(order(&g, &[B]), vec![A, B]);
    }

    #[test]
    fn test_induced_subgraph_with_goal_bias() {
        let g = graph(3, &[(A, B, 2), (B, A, 1), (B, C, 1)]);
        let goals: RefSet<VarId> = [A].into_iter().collect();
        let local_index: RefVec<VarId, Option<usize>> = [Some(1), Some(0), None].into_iter().collect();
        let sub = induced_subgraph(&g, &[B, A], &local_index, &goals, 10);
        // edges leaving the component are ignored, edges towards a goal are duplicated
        assert_eq!(sub, vec![vec![(1, 11), (1, 1)], vec![(0, 2)]]);
    }

    #[test]
    fn test_many_small_cycles() {
        // disjoint 2-cycles (2i <-> 2i+1), the second variable of each being a goal
        let n = 20_000;
        let mut g = CausalGraph::with_variables(2 * n);
        let mut goals = RefSet::new();
        for i in 0..n as u32 {
            let (a, b) = (VarId::from_u32(2 * i), VarId::from_u32(2 * i + 1));
            g.add_dependency(a, b);
            g.add_dependency(b, a);
            goals.insert(b);
        }
        let sccs = strongly_connected_components(&g);
        assert_eq!(sccs.len(), n);

        let start = std::time::Instant::now();
        let order = pseudo_topological_order(&g, &sccs, &goals, 100_000);
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(order.len(), 2 * n);
        // components come with the highest ids first, each one ending with its goal
        let first: Vec<u32> = order[..4].iter().map(|v| v.to_u32()).collect();
        assert_eq!(first, vec![39_998, 39_999, 39_996, 39_997]);
        assert!(order.chunks(2).all(|pair| goals.contains(pair[1]) && !goals.contains(pair[0])));
    }

    #[test]
    fn test_components_are_concatenated() {
        // D -> (A <-> B) -> C
        let g = graph(4, &[(D, A, 1), (A, B, 2), (B, A, 1), (B, C, 1)]);
        assert_eq!(order(&g, &[C]), vec![D, A, B, C]);
    }
}

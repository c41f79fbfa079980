//! Greedy approximation of the maximum-weight acyclic subgraph of a small weighted digraph.
//!
//! Edges are considered by decreasing weight (ties broken by order of appearance) and kept unless they
//! would close a cycle with the edges kept so far. The result is an order of the nodes that is a
//! topological order of the kept edges. The heuristic is not optimal but it is deterministic and keeps
//! the heaviest edges whenever they are compatible.

use fixedbitset::FixedBitSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Weight of an edge in a [`LocalGraph`], wide enough to hold a biased causal weight.
pub type EdgeWeight = u64;

/// Adjacency lists over nodes `0..n`: `graph[i]` lists the `(target, weight)` of the edges leaving `i`.
/// The same pair of nodes may appear in several edges.
pub type LocalGraph = Vec<Vec<(usize, EdgeWeight)>>;

pub struct MaxDag {
    /// Kept edges, as adjacency lists without duplicates.
    kept: Vec<Vec<usize>>,
    num_dropped: usize,
    order: Vec<usize>,
}

impl MaxDag {
    pub fn new(graph: &LocalGraph) -> Self {
        let n = graph.len();
        let mut edges: Vec<(usize, usize, EdgeWeight)> = graph
            .iter()
            .enumerate()
            .flat_map(|(src, succs)| succs.iter().map(move |&(tgt, w)| (src, tgt, w)))
            .filter(|(src, tgt, _)| src != tgt)
            .collect();
        // stable: equal weights keep their order of appearance
        edges.sort_by_key(|&(_, _, w)| Reverse(w));

        let mut dag = MaxDag {
            kept: vec![Vec::new(); n],
            num_dropped: 0,
            order: Vec::with_capacity(n),
        };
        let mut visited = FixedBitSet::with_capacity(n);
        let mut queue = Vec::with_capacity(n);
        for (src, tgt, _) in edges {
            if dag.kept[src].contains(&tgt) {
                continue;
            }
            if dag.reaches(tgt, src, &mut visited, &mut queue) {
                dag.num_dropped += 1;
            } else {
                dag.kept[src].push(tgt);
            }
        }
        dag.order = dag.topological_order();
        dag
    }

    /// Returns true if there is a path from `from` to `to` in the kept edges.
    fn reaches(&self, from: usize, to: usize, visited: &mut FixedBitSet, queue: &mut Vec<usize>) -> bool {
        visited.clear();
        queue.clear();
        queue.push(from);
        while let Some(curr) = queue.pop() {
            if curr == to {
                return true;
            }
            if visited.put(curr) {
                continue;
            }
            queue.extend(self.kept[curr].iter().copied().filter(|&next| !visited.contains(next)));
        }
        false
    }

    /// Topological order of the kept edges. Among the nodes with no pending predecessor, the one with
    /// the smallest index is always selected first.
    fn topological_order(&self) -> Vec<usize> {
        let n = self.kept.len();
        let mut in_degree = vec![0usize; n];
        for succs in &self.kept {
            for &tgt in succs {
                in_degree[tgt] += 1;
            }
        }
        let mut ready: BinaryHeap<Reverse<usize>> = (0..n).filter(|&i| in_degree[i] == 0).map(Reverse).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for &tgt in &self.kept[node] {
                in_degree[tgt] -= 1;
                if in_degree[tgt] == 0 {
                    ready.push(Reverse(tgt));
                }
            }
        }
        debug_assert_eq!(order.len(), n, "kept edges are cyclic");
        order
    }

    /// A permutation of the nodes compatible with all kept edges.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub fn is_kept(&self, src: usize, tgt: usize) -> bool {
        self.kept[src].contains(&tgt)
    }

    /// Number of edges (counted with multiplicity) that were rejected because they would close a cycle.
    pub fn num_dropped(&self) -> usize {
        self.num_dropped
    }
}

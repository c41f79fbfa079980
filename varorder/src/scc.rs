//! Tarjan's algorithm to find the strongly connected components (SCCs) of the causal graph.
//!
//! It runs in O(n + m) and produces the components in reverse topological order of the condensed graph.
//! The depth-first search is driven by an explicit stack of frames rather than recursion, so the depth
//! of the causal graph is not limited by the size of the call stack.

use crate::graph::{CausalGraph, Weight};
use crate::task::VarId;
use std::collections::btree_map::Keys;
use varorder_collections::RefVec;

/// Partition of the variables into strongly connected components.
pub type Partition = Vec<Vec<VarId>>;

/// Computes the strongly connected components of the (unweighted) causal graph.
///
/// Components are returned sources first: if there is an edge from a variable of component `i` to a
/// variable of component `j != i` then `i < j`. Inside a component, variables appear in the order in
/// which they were discovered.
///
/// Roots of the search are taken in increasing [`VarId`] order and successors are followed in increasing
/// [`VarId`] order, which makes the result only depend on the graph.
pub fn strongly_connected_components(graph: &CausalGraph) -> Partition {
    let mut scc = StronglyConnectedComponents::new(graph.num_variables());
    for root in graph.variables() {
        if scc.discovery[root].is_none() {
            scc.search_from(root, graph);
        }
    }
    // components are completed sinks first
    scc.components.reverse();
    scc.components
}

/// A vertex being visited, with its successors that remain to be explored.
struct Frame<'g> {
    vertex: VarId,
    successors: Keys<'g, VarId, Weight>,
}

struct StronglyConnectedComponents {
    /// Discovery time of each vertex, `None` if not visited yet.
    discovery: RefVec<VarId, Option<u32>>,
    /// The smallest discovery time of a vertex of the stack reachable from this vertex.
    low_link: RefVec<VarId, u32>,
    /// Position of the vertex in `stack`, `None` if it is not on the stack.
    stack_index: RefVec<VarId, Option<usize>>,
    /// Vertices visited whose component is not yet complete.
    stack: Vec<VarId>,
    current_time: u32,
    components: Partition,
}

impl StronglyConnectedComponents {
    fn new(num_vertices: usize) -> Self {
        StronglyConnectedComponents {
            discovery: RefVec::with_values(num_vertices, None),
            low_link: RefVec::with_values(num_vertices, 0),
            stack_index: RefVec::with_values(num_vertices, None),
            stack: Vec::with_capacity(num_vertices),
            current_time: 0,
            components: Vec::new(),
        }
    }

    fn discover<'g>(&mut self, v: VarId, graph: &'g CausalGraph) -> Frame<'g> {
        self.discovery[v] = Some(self.current_time);
        self.low_link[v] = self.current_time;
        self.current_time += 1;
        self.stack_index[v] = Some(self.stack.len());
        self.stack.push(v);
        Frame {
            vertex: v,
            successors: graph.successors(v).keys(),
        }
    }

    fn search_from(&mut self, root: VarId, graph: &CausalGraph) {
        let mut frames = vec![self.discover(root, graph)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.vertex;
            match frame.successors.next().copied() {
                Some(succ) => match self.discovery[succ] {
                    None => {
                        let succ_frame = self.discover(succ, graph);
                        frames.push(succ_frame);
                    }
                    Some(succ_time) => {
                        if self.stack_index[succ].is_some() {
                            // back or cross edge to a vertex of a component still being built
                            self.low_link[v] = self.low_link[v].min(succ_time);
                        }
                    }
                },
                None => {
                    // all successors explored, propagate the low link to the parent
                    frames.pop();
                    if let Some(parent) = frames.last() {
                        self.low_link[parent.vertex] = self.low_link[parent.vertex].min(self.low_link[v]);
                    }
                    if Some(self.low_link[v]) == self.discovery[v] {
                        self.close_component(v);
                    }
                }
            }
        }
    }

    /// `head` has no path to a vertex discovered before it: it and all vertices above it on the stack
    /// form a new component.
    fn close_component(&mut self, head: VarId) {
        let Some(start) = self.stack_index[head] else {
            unreachable!("component head is not on the stack")
        };
        let component = self.stack.split_off(start);
        for &v in &component {
            self.stack_index[v] = None;
        }
        self.components.push(component);
    }
}

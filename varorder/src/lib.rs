//! Variable ordering for finite-domain planning tasks.
//!
//! The order is derived from the causal graph of the task, where a variable `a` precedes a variable `b`
//! when some operator or axiom has a condition on `a` and an effect on `b`:
//!
//!  1. the weighted causal graph is extracted from the operators and axioms ([`CausalGraph::from_task`]),
//!  2. it is decomposed into strongly connected components, in topological order ([`scc`]),
//!  3. each cyclic component is linearized by a greedy maximum acyclic subgraph heuristic ([`max_dag`]),
//!     biased towards placing goal variables last,
//!  4. variables that cannot influence any goal variable are pruned ([`relevance`]),
//!  5. the surviving variables receive their level, i.e., their position in the final order ([`VariableOrdering`]).
//!
//! ```
//! use varorder::*;
//!
//! let mut task = Task::new();
//! let a = task.add_variable(Variable::new("a", 2));
//! let b = task.add_variable(Variable::new("b", 2));
//! let unused = task.add_variable(Variable::new("unused", 2));
//! task.operators.push(Operator::new("set-b").with_prevail(a, 1).with_effect(PrePost::new(b, Some(0), 1)));
//! task.goals.push(Fact::new(b, 1));
//!
//! let ordering = order_variables(&task, &OrderingConfig::new()).unwrap();
//! assert_eq!(ordering.order(), &[a, b]);
//! assert_eq!(ordering.level_of(unused), None);
//! ```

mod config;
mod cycles;
mod dependencies;
mod errors;
mod graph;
pub mod max_dag;
mod ordering;
pub mod relevance;
pub mod scc;
mod strip;
mod task;

pub use config::{OrderingConfig, DEFAULT_GOAL_BIAS};
pub use errors::{OrderingError, Origin};
pub use graph::{CausalGraph, DispGraph, Weight, WeightedEdges};
pub use ordering::{VarStatus, VariableOrdering};
pub use strip::{strip_axioms, strip_operators};
pub use task::{Axiom, Fact, NumericKind, Operator, Pre, PrePost, Task, Value, VarId, Variable};

use itertools::Itertools;
use varorder_collections::RefSet;

/// Causal graph of a task together with the variable ordering derived from it.
#[derive(Clone, Debug)]
pub struct CausalAnalysis {
    pub graph: CausalGraph,
    pub ordering: VariableOrdering,
}

impl CausalAnalysis {
    /// Causal graph restricted to the surviving variables, identified by their level.
    /// See [`CausalGraph::leveled_successors`].
    pub fn leveled_successors(&self) -> Vec<Vec<(usize, Weight)>> {
        self.graph.leveled_successors(&self.ordering)
    }
}

/// Builds the causal graph of the task and computes the order of its relevant variables.
///
/// Fails if the task references an unknown variable or a value outside a variable's domain, in which
/// case nothing is computed.
pub fn analyse(task: &Task, config: &OrderingConfig) -> Result<CausalAnalysis, OrderingError> {
    let _span = tracing::span!(tracing::Level::TRACE, "CAUSAL GRAPH").entered();
    tracing::debug!("#operators: {}", task.operators.len());
    tracing::debug!("#axioms: {}", task.axioms.len());

    let graph = CausalGraph::from_task(task)?;
    tracing::trace!("causal graph:\n{}", graph.display(&task.variables));

    let components = {
        let _span = tracing::span!(tracing::Level::TRACE, "scc").entered();
        scc::strongly_connected_components(&graph)
    };
    let acyclic = components.len() == graph.num_variables();
    tracing::debug!("The causal graph is {}acyclic.", if acyclic { "" } else { "not " });
    tracing::debug!("#components: {}", components.len());
    for component in components.iter().filter(|c| c.len() > 1) {
        tracing::debug!(
            "component: {}",
            component.iter().map(|&v| &task.variables[v].name).join(" ")
        );
    }

    let goal_vars: RefSet<VarId> = task.goals.iter().map(|g| g.var).collect();
    let full_order = cycles::pseudo_topological_order(&graph, &components, &goal_vars, config.goal_bias);

    let necessary = relevance::necessary_variables(&graph, &task.goals);
    let num_variables = full_order.len();
    let order = relevance::prune(full_order, &necessary, config.retain_all_variables);
    tracing::debug!("{} variables of {} necessary", order.len(), num_variables);

    let ordering = VariableOrdering::assign_levels(graph.num_variables(), order, &necessary, acyclic);
    tracing::trace!(
        "new variable order: {}",
        ordering.order().iter().map(|&v| &task.variables[v].name).join(" - ")
    );
    Ok(CausalAnalysis { graph, ordering })
}

/// Computes the order of the relevant variables of the task. See [`analyse`].
pub fn order_variables(task: &Task, config: &OrderingConfig) -> Result<VariableOrdering, OrderingError> {
    analyse(task, config).map(|analysis| analysis.ordering)
}

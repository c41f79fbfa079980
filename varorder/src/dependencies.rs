use crate::errors::OrderingError;
use crate::graph::CausalGraph;
use crate::task::{Axiom, Operator, Task, VarId};
use smallvec::SmallVec;

/// Pushes into `out` the `(source, target)` dependencies justified by an operator.
///
/// The targets are the variables of the operator's effects. The sources of an effect are the variables of
/// the prevail conditions, the variables of all effects reading their own variable (value precondition or
/// numeric effect), and the variables in the guard of that effect only. Self-dependencies are skipped and a pair may be pushed several times.
fn operator_dependencies(op: &Operator, out: &mut Vec<(VarId, VarId)>) {
    let mut sources: SmallVec<[VarId; 8]> = op.prevail.iter().map(|p| p.var).collect();
    sources.extend(op.pre_post.iter().filter(|eff| eff.reads_own_var()).map(|eff| eff.var));
    let num_shared_sources = sources.len();

    for eff in &op.pre_post {
        sources.extend(eff.conditions.iter().map(|c| c.var));
        let target = eff.var;
        out.extend(sources.iter().filter(|&&src| src != target).map(|&src| (src, target)));
        // guard variables only justify the dependencies of their own effect
        sources.truncate(num_shared_sources);
    }
}

fn axiom_dependencies(axiom: &Axiom, out: &mut Vec<(VarId, VarId)>) {
    let target = axiom.effect_var;
    out.extend(
        axiom
            .conditions
            .iter()
            .filter(|c| c.var != target)
            .map(|c| (c.var, target)),
    );
}

impl CausalGraph {
    /// Builds the causal graph of a task.
    ///
    /// The task is validated first: a reference to an unknown variable, or a value outside the domain of
    /// its variable, aborts the construction.
    ///
    /// Each operator and each axiom contributes at most once to the weight of a given edge, so that the weight
    /// of `a -> b` is the number of operators and axioms with a condition on `a` and an effect on `b`.
    pub fn from_task(task: &Task) -> Result<CausalGraph, OrderingError> {
        let _span = tracing::span!(tracing::Level::TRACE, "dependencies").entered();
        task.validate()?;

        let mut graph = CausalGraph::with_variables(task.num_variables());
        let mut deps = Vec::with_capacity(32);

        for op in &task.operators {
            operator_dependencies(op, &mut deps);
            graph.record_dependencies(&mut deps);
        }
        for axiom in &task.axioms {
            axiom_dependencies(axiom, &mut deps);
            graph.record_dependencies(&mut deps);
        }

        tracing::debug!("#variables: {}", graph.num_variables());
        tracing::debug!("#causal edges: {}", graph.num_edges());
        Ok(graph)
    }

    /// Records the dependencies of a single operator or axiom, each distinct pair once, and clears `deps`.
    fn record_dependencies(&mut self, deps: &mut Vec<(VarId, VarId)>) {
        deps.sort_unstable();
        deps.dedup();
        for (source, target) in deps.drain(..) {
            self.add_dependency(source, target);
        }
    }
}

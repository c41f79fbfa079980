#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use varorder::*;

/// Installs a subscriber printing the logs of the library in the output of failing tests.
pub fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn var(i: u32) -> VarId {
    VarId::from_u32(i)
}

pub fn task_with_vars(names: &[&str]) -> Task {
    let mut task = Task::new();
    for name in names {
        task.add_variable(Variable::new(*name, 2));
    }
    task
}

fn random_fact(rng: &mut StdRng, task: &Task) -> Fact {
    let var = VarId::from(rng.random_range(0..task.num_variables()));
    let value = rng.random_range(0..task.variables[var].domain_size);
    Fact::new(var, value)
}

/// A random but valid task, where all sizes are bounded by `num_vars`.
pub fn random_task(seed: u64, num_vars: usize) -> Task {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut task = Task::new();
    for i in 0..num_vars {
        let domain_size = rng.random_range(2..5);
        task.add_variable(Variable::new(format!("v{i}"), domain_size));
    }

    let num_ops = rng.random_range(0..(2 * num_vars));
    for i in 0..num_ops {
        let mut op = Operator::new(format!("op{i}"));
        for _ in 0..rng.random_range(0..3) {
            op.prevail.push(random_fact(&mut rng, &task));
        }
        for _ in 0..rng.random_range(1..4) {
            let Fact { var, value } = random_fact(&mut rng, &task);
            let pre = if rng.random_bool(0.5) {
                Some(rng.random_range(0..task.variables[var].domain_size))
            } else {
                None
            };
            let conditions = (0..rng.random_range(0..3)).map(|_| random_fact(&mut rng, &task)).collect();
            let mut eff = if rng.random_bool(0.1) {
                PrePost::numeric(var, NumericKind::Increase, 1.0, value)
            } else {
                PrePost::new(var, pre, value)
            };
            eff.conditions = conditions;
            op.pre_post.push(eff);
        }
        task.operators.push(op);
    }

    for _ in 0..rng.random_range(0..num_vars) {
        let conditions = (0..rng.random_range(1..4)).map(|_| random_fact(&mut rng, &task)).collect();
        let effect = random_fact(&mut rng, &task);
        task.axioms.push(Axiom::new(conditions, effect.var, 0, effect.value));
    }

    let mut goal_vars = BTreeSet::new();
    for _ in 0..rng.random_range(0..=(num_vars / 3).max(1)) {
        let goal = random_fact(&mut rng, &task);
        if goal_vars.insert(goal.var) {
            task.goals.push(goal);
        }
    }
    task
}

/// `reachable[a][b]` is true if `b` can be reached from `a` with zero or more causal edges.
pub fn reachability(graph: &CausalGraph) -> Vec<Vec<bool>> {
    let n = graph.num_variables();
    let mut reachable = vec![vec![false; n]; n];
    for src in graph.variables() {
        let mut stack = vec![src];
        while let Some(v) = stack.pop() {
            if reachable[usize::from(src)][usize::from(v)] {
                continue;
            }
            reachable[usize::from(src)][usize::from(v)] = true;
            stack.extend(graph.successors(v).keys().copied());
        }
    }
    reachable
}

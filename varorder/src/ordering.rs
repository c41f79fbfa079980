use crate::errors::{OrderingError, Origin};
use crate::task::VarId;
use varorder_collections::{RefSet, RefVec};

/// Outcome of the ordering for a single variable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VarStatus {
    /// True if the variable can influence a goal variable (or is one).
    pub necessary: bool,
    /// Position of the variable in the final order, `None` if it was pruned.
    pub level: Option<usize>,
}

/// Final order of the variables of a task, and the level of each of them.
///
/// The level of a variable is its index in [`VariableOrdering::order`]: it is the new number under which
/// downstream consumers must refer to it.
#[derive(Clone, Debug)]
pub struct VariableOrdering {
    order: Vec<VarId>,
    status: RefVec<VarId, VarStatus>,
    acyclic: bool,
}

impl VariableOrdering {
    /// Assigns levels `0..k` to the `k` variables of `order`. Any other variable is left without a level.
    pub(crate) fn assign_levels(
        num_variables: usize,
        order: Vec<VarId>,
        necessary: &RefSet<VarId>,
        acyclic: bool,
    ) -> Self {
        let mut status: RefVec<VarId, VarStatus> = RefVec::with_values(num_variables, VarStatus::default());
        for var in necessary.iter() {
            status[var].necessary = true;
        }
        for (level, &var) in order.iter().enumerate() {
            debug_assert!(status[var].level.is_none(), "variable {var} appears twice in the order");
            status[var].level = Some(level);
        }
        VariableOrdering { order, status, acyclic }
    }

    /// Surviving variables, by increasing level.
    pub fn order(&self) -> &[VarId] {
        &self.order
    }

    /// Number of surviving variables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of variables of the task, pruned or not.
    pub fn num_variables(&self) -> usize {
        self.status.len()
    }

    /// Outcome of the ordering for `var`, `None` if `var` is not a variable of the task.
    pub fn status(&self, var: VarId) -> Option<VarStatus> {
        self.status.get(var).copied()
    }

    pub fn level_of(&self, var: VarId) -> Option<usize> {
        self.status(var).and_then(|s| s.level)
    }

    pub fn is_necessary(&self, var: VarId) -> bool {
        self.status(var).is_some_and(|s| s.necessary)
    }

    /// True if `var` has no level, which includes variables unknown to the task.
    pub fn is_pruned(&self, var: VarId) -> bool {
        self.level_of(var).is_none()
    }

    /// True if the causal graph had no cycle, in which case the order respects all dependencies.
    pub fn is_acyclic(&self) -> bool {
        self.acyclic
    }

    /// Returns the new number of a variable, or an error if it was pruned or does not belong to the task.
    pub fn translate(&self, var: VarId) -> Result<usize, OrderingError> {
        match self.status(var) {
            Some(VarStatus { level: Some(level), .. }) => Ok(level),
            Some(_) => Err(OrderingError::PrunedVariable(var)),
            None => Err(OrderingError::UnknownVariable {
                origin: Origin::Lookup,
                var,
                num_variables: self.num_variables(),
            }),
        }
    }
}

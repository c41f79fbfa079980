use derive_more::derive::Display;
use thiserror::Error;

use crate::task::{Value, VarId};

/// Element of a task in which a variable reference appears.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Origin {
    #[display("operator #{index} ({name})")]
    Operator { index: usize, name: String },
    #[display("axiom #{_0}")]
    Axiom(usize),
    #[display("goal #{_0}")]
    Goal(usize),
    /// Query on the result of the ordering.
    #[display("variable lookup")]
    Lookup,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum OrderingError {
    #[error("{origin} references unknown variable {var} (the task has {num_variables} variables)")]
    UnknownVariable {
        origin: Origin,
        var: VarId,
        num_variables: usize,
    },
    #[error("{origin} uses value {value} for variable {var} whose domain has size {domain_size}")]
    ValueOutOfDomain {
        origin: Origin,
        var: VarId,
        value: Value,
        domain_size: usize,
    },
    #[error("variable {0} was pruned and has no level")]
    PrunedVariable(VarId),
}

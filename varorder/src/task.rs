//! In-memory representation of a finite-domain planning task, as produced by the translator front-end.
//!
//! Variables live in a dense arena and are referred to by their [`VarId`]. Operators, axioms and goals
//! only hold such handles, so that a task can be checked once with [`Task::validate`] and then be
//! traversed without any further lookup failure.

use crate::errors::{Origin, OrderingError};
use varorder_collections::{create_ref_type, RefVec};

create_ref_type!(VarId);

/// Value of a finite-domain variable, in `0..domain_size`.
pub type Value = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub domain_size: usize,
    /// Layer of the axioms defining this variable, `None` for a variable modified by operators.
    pub axiom_layer: Option<u32>,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain_size: usize) -> Self {
        Variable {
            name: name.into(),
            domain_size,
            axiom_layer: None,
        }
    }

    /// A derived variable, whose value is defined by axioms of the given layer.
    pub fn derived(name: impl Into<String>, domain_size: usize, layer: u32) -> Self {
        Variable {
            name: name.into(),
            domain_size,
            axiom_layer: Some(layer),
        }
    }

    pub fn is_derived(&self) -> bool {
        self.axiom_layer.is_some()
    }
}

/// Association of a variable to one of its values.
///
/// It is used for prevail conditions, effect conditions, axiom bodies and goals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fact {
    pub var: VarId,
    pub value: Value,
}

impl Fact {
    pub fn new(var: VarId, value: Value) -> Self {
        Fact { var, value }
    }
}

/// Kind of a numeric effect. Encoded as `-2`, `-3` and `-4` in the precondition field of the translator output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericKind {
    Increase,
    Decrease,
    Assign,
}

/// Precondition of a [`PrePost`] effect on its own variable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pre {
    /// The effect applies whatever the current value.
    Any,
    Value(Value),
    /// Numeric effect, whose value depends on a function of the given cost.
    Numeric { kind: NumericKind, cost: f32 },
}

impl From<Option<Value>> for Pre {
    fn from(pre: Option<Value>) -> Self {
        pre.map_or(Pre::Any, Pre::Value)
    }
}

/// Change of the value of a variable, possibly guarded by a conjunction of effect conditions.
#[derive(Clone, Debug, PartialEq)]
pub struct PrePost {
    pub var: VarId,
    pub pre: Pre,
    pub post: Value,
    /// Guard of a conditional effect. Empty for an unconditional effect.
    pub conditions: Vec<Fact>,
}

impl PrePost {
    /// An effect with a value precondition, or none if `pre` is `None`.
    pub fn new(var: VarId, pre: Option<Value>, post: Value) -> Self {
        Self::conditional(var, pre, post, Vec::new())
    }

    pub fn conditional(var: VarId, pre: Option<Value>, post: Value, conditions: Vec<Fact>) -> Self {
        PrePost {
            var,
            pre: pre.into(),
            post,
            conditions,
        }
    }

    pub fn numeric(var: VarId, kind: NumericKind, cost: f32, post: Value) -> Self {
        PrePost {
            var,
            pre: Pre::Numeric { kind, cost },
            post,
            conditions: Vec::new(),
        }
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// True if the effect depends on the current value of its variable, i.e., unless its precondition is [`Pre::Any`].
    /// Numeric effects always read the current value.
    pub fn reads_own_var(&self) -> bool {
        !matches!(self.pre, Pre::Any)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Operator {
    pub name: String,
    /// Conditions that must hold before and after the application of the operator.
    pub prevail: Vec<Fact>,
    pub pre_post: Vec<PrePost>,
    pub cost: u32,
}

impl Operator {
    pub fn new(name: impl Into<String>) -> Self {
        Operator {
            name: name.into(),
            prevail: Vec::new(),
            pre_post: Vec::new(),
            cost: 1,
        }
    }

    pub fn with_prevail(mut self, var: VarId, value: Value) -> Self {
        self.prevail.push(Fact::new(var, value));
        self
    }

    pub fn with_effect(mut self, effect: PrePost) -> Self {
        self.pre_post.push(effect);
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// An operator is redundant once it has no effect left.
    pub fn is_redundant(&self) -> bool {
        self.pre_post.is_empty()
    }
}

/// Rule deriving the value of a single variable from a conjunction of conditions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Axiom {
    pub conditions: Vec<Fact>,
    pub effect_var: VarId,
    pub old_value: Value,
    pub new_value: Value,
}

impl Axiom {
    pub fn new(conditions: Vec<Fact>, effect_var: VarId, old_value: Value, new_value: Value) -> Self {
        Axiom {
            conditions,
            effect_var,
            old_value,
            new_value,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Task {
    pub variables: RefVec<VarId, Variable>,
    pub operators: Vec<Operator>,
    pub axioms: Vec<Axiom>,
    pub goals: Vec<Fact>,
}

impl Task {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, var: Variable) -> VarId {
        self.variables.push(var)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Checks that every variable reference of the task resolves to a declared variable and that every
    /// value lies in the domain of its variable.
    ///
    /// Returns the first violation encountered, operators being checked first, then axioms and goals.
    pub fn validate(&self) -> Result<(), OrderingError> {
        for (index, op) in self.operators.iter().enumerate() {
            let origin = || Origin::Operator {
                index,
                name: op.name.clone(),
            };
            for prevail in &op.prevail {
                self.check_fact(*prevail, origin)?;
            }
            for eff in &op.pre_post {
                for cond in &eff.conditions {
                    self.check_fact(*cond, origin)?;
                }
                match eff.pre {
                    Pre::Any => self.check_fact(Fact::new(eff.var, eff.post), origin)?,
                    Pre::Value(pre) => {
                        self.check_fact(Fact::new(eff.var, pre), origin)?;
                        self.check_fact(Fact::new(eff.var, eff.post), origin)?;
                    }
                    // the target of a numeric effect is not a value of the variable's domain
                    Pre::Numeric { .. } => {
                        self.check_var(eff.var, origin)?;
                    }
                }
            }
        }
        for (index, axiom) in self.axioms.iter().enumerate() {
            let origin = || Origin::Axiom(index);
            for cond in &axiom.conditions {
                self.check_fact(*cond, origin)?;
            }
            self.check_fact(Fact::new(axiom.effect_var, axiom.old_value), origin)?;
            self.check_fact(Fact::new(axiom.effect_var, axiom.new_value), origin)?;
        }
        for (index, goal) in self.goals.iter().enumerate() {
            self.check_fact(*goal, || Origin::Goal(index))?;
        }
        Ok(())
    }

    fn check_var(&self, var: VarId, origin: impl Fn() -> Origin) -> Result<&Variable, OrderingError> {
        self.variables.get(var).ok_or_else(|| OrderingError::UnknownVariable {
            origin: origin(),
            var,
            num_variables: self.variables.len(),
        })
    }

    fn check_fact(&self, fact: Fact, origin: impl Fn() -> Origin) -> Result<(), OrderingError> {
        let var = self.check_var(fact.var, &origin)?;
        if fact.value >= var.domain_size {
            return Err(OrderingError::ValueOutOfDomain {
                origin: origin(),
                var: fact.var,
                value: fact.value,
                domain_size: var.domain_size,
            });
        }
        Ok(())
    }
}

//! Removal of the parts of a task that only concern pruned variables.

use crate::ordering::VariableOrdering;
use crate::task::{Axiom, Operator};

/// Removes the effects on pruned variables, then the operators left without any effect.
///
/// Returns the number of remaining operators.
pub fn strip_operators(operators: &mut Vec<Operator>, ordering: &VariableOrdering) -> usize {
    let old_count = operators.len();
    for op in operators.iter_mut() {
        op.pre_post.retain(|eff| !ordering.is_pruned(eff.var));
    }
    operators.retain(|op| !op.is_redundant());
    tracing::debug!("{} of {} operators necessary", operators.len(), old_count);
    operators.len()
}

/// Removes the axioms deriving the value of a pruned variable.
///
/// Returns the number of remaining axioms.
pub fn strip_axioms(axioms: &mut Vec<Axiom>, ordering: &VariableOrdering) -> usize {
    let old_count = axioms.len();
    axioms.retain(|axiom| !ordering.is_pruned(axiom.effect_var));
    tracing::debug!("{} of {} axioms necessary", axioms.len(), old_count);
    axioms.len()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::task::{Fact, PrePost, VarId};
    use varorder_collections::RefSet;

    const A: VarId = VarId::from_u32(0);
    const B: VarId = VarId::from_u32(1);
    const C: VarId = VarId::from_u32(2);

    fn ordering() -> VariableOrdering {
        // C is pruned
        let necessary: RefSet<VarId> = [A, B].into_iter().collect();
        VariableOrdering::assign_levels(3, vec![A, B], &necessary, true)
    }

    #[test]
    fn test_strip_operators() {
        let mut ops = vec![
            Operator::new("both")
                .with_prevail(A, 0)
                .with_effect(PrePost::new(B, None, 1))
                .with_effect(PrePost::new(C, None, 1)),
            Operator::new("only-c").with_effect(PrePost::new(C, Some(0), 1)),
            Operator::new("only-b").with_effect(PrePost::new(B, Some(1), 0)),
        ];
        assert_eq!(strip_operators(&mut ops, &ordering()), 2);
        assert_eq!(ops[0].name, "both");
        assert_eq!(ops[0].pre_post, vec![PrePost::new(B, None, 1)]);
        assert_eq!(ops[1].name, "only-b");
    }

    #[test]
    fn test_strip_axioms() {
        let mut axioms = vec![
            Axiom::new(vec![Fact::new(A, 0)], C, 0, 1),
            Axiom::new(vec![Fact::new(A, 1)], B, 0, 1),
        ];
        assert_eq!(strip_axioms(&mut axioms, &ordering()), 1);
        assert_eq!(axioms[0].effect_var, B);
    }
}

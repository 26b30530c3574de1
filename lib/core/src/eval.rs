use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::lit::Lit;
use crate::model::Assignment;

/// Evaluation of formulas under a complete assignment.
pub trait Eval {
    type Output;

    fn eval(&self, assignment: &Assignment) -> Self::Output;
}

impl Eval for Lit {
    /// `None` when the variable is not covered by the assignment.
    type Output = Option<bool>;

    fn eval(&self, assignment: &Assignment) -> Self::Output {
        assignment.value(self.var()).map(|value| value ^ self.is_negative())
    }
}

impl Eval for Clause {
    type Output = bool;

    fn eval(&self, assignment: &Assignment) -> Self::Output {
        self.iter().any(|lit| lit.eval(assignment) == Some(true))
    }
}

impl Eval for Cnf {
    type Output = bool;

    fn eval(&self, assignment: &Assignment) -> Self::Output {
        self.iter().all(|clause| clause.eval(assignment))
    }
}

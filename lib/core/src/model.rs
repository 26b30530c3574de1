use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;
use tap::Pipe;

use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::eval::Eval;
use crate::lit::Lit;
use crate::solver::{LitValue, Solver};

/// Complete assignment: one signed literal per variable `1..=num_vars`,
/// ordered by variable index.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Assignment {
    lits: Vec<Lit>,
}

impl Assignment {
    pub fn new(lits: Vec<Lit>) -> Self {
        debug_assert!(
            lits.iter().enumerate().all(|(i, lit)| lit.var() as usize == i + 1),
            "assignment must contain exactly one literal per variable, in order"
        );
        Self { lits }
    }

    /// Read the full assignment of the last successful `solve` from the solver.
    ///
    /// Variables the solver reports as don't-care are taken as false.
    pub fn from_solver<S>(solver: &S) -> Self
    where
        S: Solver,
    {
        (1..=solver.num_vars() as u32)
            .map(Lit::from_var)
            .map(|lit| match solver.value(lit) {
                LitValue::True => lit,
                LitValue::False | LitValue::DontCare => -lit,
            })
            .collect_vec()
            .pipe(Self::new)
    }
}

impl Assignment {
    pub fn num_vars(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }

    /// Value of the (1-based) variable, or `None` if it is beyond the assignment.
    pub fn value(&self, var: u32) -> Option<bool> {
        let index = (var as usize).checked_sub(1)?;
        self.lits.get(index).map(|lit| !lit.is_negative())
    }

    /// The signed-integer form: `v` or `-v` for each variable `v`.
    pub fn to_vec(&self) -> Vec<i32> {
        self.lits.iter().map(|lit| lit.get()).collect()
    }

    /// Clause forbidding this assignment on all variables not rejected by `skip`.
    pub fn blocking_clause<F>(&self, mut skip: F) -> Clause
    where
        F: FnMut(u32) -> bool,
    {
        Clause::new(self.lits.iter().filter(|lit| !skip(lit.var())).map(|&lit| -lit).collect())
    }

    pub fn satisfies(&self, cnf: &Cnf) -> bool {
        cnf.eval(self)
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Assignment> for Vec<i32> {
    fn from(assignment: Assignment) -> Self {
        assignment.to_vec()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.lits.iter().join(", "))
    }
}

use std::borrow::Cow;

use crate::config::Initialization;
use crate::lit::Lit;

use super::types::*;

// Note: `Solver` trait is NOT object-safe.
// const _: Option<&dyn Solver> = None; // doesn't compile, see `rustc --explain E0038`

pub trait Solver: Sized {
    /// Return the signature of the solver as a `Cow<str>`.
    fn signature(&self) -> Cow<str>;

    /// Release any resources held by the solver.
    /// Calling it more than once must be harmless.
    fn release(&mut self);

    /// Return the number of variables in the solver.
    fn num_vars(&self) -> usize;

    /// Return the number of clauses in the solver.
    fn num_clauses(&self) -> usize;

    /// Largest variable index the solver accepts.
    fn max_var(&self) -> u32 {
        i32::MAX as u32
    }

    /// Create a new variable in the solver and return its literal representation.
    fn new_var(&mut self) -> Lit;

    /// Add an assumption for the next `solve` call only.
    /// Variables first seen here are created by the solver.
    fn assume<L>(&mut self, lit: L)
    where
        L: Into<Lit>;

    /// Add a clause to the solver.
    /// The clause is represented by an iterator of literals.
    /// Variables first seen here are created by the solver.
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>;

    /// Add a clause to the solver.
    /// The clause is represented by a slice of literals.
    fn add_clause_<L>(&mut self, lits: &[L])
    where
        L: Into<Lit> + Copy,
    {
        self.add_clause(lits)
    }

    /// Add a unit clause to the solver.
    fn add_unit<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        self.add_clause_(&[lit.into()])
    }

    /// Solve the problem given to the solver and return the result as a [SolveResponse].
    /// Pending assumptions are consumed by this call.
    fn solve(&mut self) -> SolveResponse;

    /// Return the value of the given literal in the last found model.
    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>;

    /// Seed the pseudorandom generator used for tie-breaking and random phases.
    fn set_seed(&mut self, seed: u32);

    /// Select how the initial phases of the variables are chosen.
    fn set_initialization(&mut self, initialization: Initialization);

    /// Bound the effort of each `solve` call; `None` removes the bound.
    fn set_propagation_limit(&mut self, limit: Option<u64>);

    /// Forget saved phases so the next search starts from the initial phases again.
    fn reset_phases(&mut self);
}

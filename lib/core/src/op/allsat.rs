use std::collections::HashSet;

use log::debug;

use crate::cnf::Cnf;
use crate::error::{Error, Result};
use crate::model::Assignment;
use crate::session::{Outcome, Session};
use crate::solver::Solver;

/// Lazy enumeration of distinct solutions of a session.
///
/// After every solution, a blocking clause forbidding it (on all variables not
/// assumed in that solve) is added to the formula, so no assignment is yielded twice.
/// Once the formula becomes unsatisfiable the iterator is exhausted for good.
/// An exhausted effort limit yields [`Error::Unknown`] without exhausting the iterator.
pub struct SolutionIter<S>
where
    S: Solver,
{
    session: Session<S>,
    exhausted: bool,
}

impl<S> SolutionIter<S>
where
    S: Solver,
{
    pub fn new(session: Session<S>) -> Self {
        Self {
            session,
            exhausted: false,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub fn into_session(self) -> Session<S> {
        self.session
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Assumptions for the next solution only.
    pub fn assume<I>(&mut self, lits: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<i32>,
    {
        self.session.assume(lits)
    }

    pub fn add_clauses<I, C>(&mut self, clauses: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: std::borrow::Borrow<i32>,
    {
        self.session.add_clauses(clauses)
    }

    pub fn set_effort_limit(&mut self, limit: Option<u64>) -> Result<()> {
        self.session.set_effort_limit(limit)
    }

    fn block(&mut self, assignment: &Assignment, assumed: &HashSet<u32>) {
        let refutation = assignment.blocking_clause(|var| assumed.contains(&var));
        if refutation.is_empty() {
            debug!("Every variable was assumed, the formula is now unsatisfiable");
        }
        // Also resets the saved phases, so the next search does not start next to this solution.
        self.session.add_cnf(&Cnf::from([refutation]));
    }
}

impl<S> Iterator for SolutionIter<S>
where
    S: Solver,
{
    type Item = Result<Assignment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let assumed: HashSet<u32> = self.session.pending_assumptions().iter().map(|lit| lit.var()).collect();

        match self.session.solve() {
            Outcome::Satisfiable(assignment) => {
                // Ban the solution
                self.block(&assignment, &assumed);
                Some(Ok(assignment))
            }
            Outcome::Unsatisfiable => {
                self.exhausted = true;
                None
            }
            Outcome::Unknown => Some(Err(Error::Unknown {
                limit: self.session.config().effort_limit,
            })),
        }
    }
}

impl<S> std::iter::FusedIterator for SolutionIter<S> where S: Solver {}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::lit::Lit;
    use crate::solver::mock::MockSolver;
    use crate::solver::SolveResponse;

    use super::*;

    fn lits(raw: &[i32]) -> Vec<Lit> {
        raw.iter().map(|&x| Lit::new(x)).collect()
    }

    #[test]
    fn test_blocking_clauses() -> color_eyre::Result<()> {
        let solver = MockSolver::with_responses([SolveResponse::Sat, SolveResponse::Sat, SolveResponse::Unsat]);
        let log = solver.handle();
        let mut iter = Session::with_solver(solver, [[1, 2, 3]], &Config::default())?.solutions();

        assert_eq!(iter.next().transpose()?.map(|a| a.to_vec()), Some(vec![-1, -2, -3]));
        assert_eq!(log.borrow().clauses.last(), Some(&lits(&[1, 2, 3])));

        // Assumed variables are not blocked:
        iter.assume([-2])?;
        assert_eq!(iter.next().transpose()?.map(|a| a.to_vec()), Some(vec![-1, -2, -3]));
        assert_eq!(log.borrow().clauses.last(), Some(&lits(&[1, 3])));
        assert_eq!(log.borrow().phase_resets, 2);

        assert!(iter.next().is_none());
        assert!(iter.is_exhausted());
        // Fused:
        assert!(iter.next().is_none());
        assert_eq!(log.borrow().solves.len(), 3);
        Ok(())
    }

    #[test]
    fn test_unknown_does_not_exhaust() -> color_eyre::Result<()> {
        let solver = MockSolver::with_responses([SolveResponse::Unknown, SolveResponse::Unsat]);
        let config = Config::new().with_effort_limit(Some(1));
        let mut iter = Session::with_solver(solver, [[1]], &config)?.solutions();

        assert!(matches!(iter.next(), Some(Err(Error::Unknown { limit: Some(1) }))));
        assert!(!iter.is_exhausted());

        iter.set_effort_limit(None)?;
        assert!(iter.next().is_none());
        assert!(iter.is_exhausted());
        Ok(())
    }

    #[test]
    fn test_everything_assumed_blocks_with_empty_clause() -> color_eyre::Result<()> {
        let solver = MockSolver::new();
        let log = solver.handle();
        let mut iter = Session::with_solver(solver, [[1, 2]], &Config::default())?.solutions();

        iter.assume([1, -2])?;
        assert_eq!(iter.next().transpose()?.map(|a| a.to_vec()), Some(vec![1, -2]));
        assert_eq!(log.borrow().clauses.last(), Some(&vec![]));
        Ok(())
    }

    #[test]
    fn test_release_once_through_iterator() -> color_eyre::Result<()> {
        let solver = MockSolver::with_responses([SolveResponse::Unsat]);
        let log = solver.handle();
        let iter = Session::with_solver(solver, [[1]], &Config::default())?.solutions();
        let session = iter.into_session();
        assert_eq!(log.borrow().releases, 0);
        drop(session);
        assert_eq!(log.borrow().releases, 1);
        Ok(())
    }
}

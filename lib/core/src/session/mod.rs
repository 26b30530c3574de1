use std::fmt::{Display, Formatter};

use log::{debug, info, warn};

use crate::cnf::Cnf;
use crate::config::{validate_effort_limit, Config};
use crate::error::{LiteralOutOfRangeSnafu, Result};
use crate::lit::{try_lits, Lit};
use crate::model::Assignment;
use crate::op::allsat::SolutionIter;
use crate::solver::{SolveResponse, Solver};

pub use self::outcome::Outcome;

mod outcome;

/// Incremental solving session.
///
/// Owns exactly one solver for its whole lifetime and releases it exactly once on drop.
/// The formula only ever grows; assumptions constrain the next `solve` call only.
pub struct Session<S: Solver> {
    solver: S,
    config: Config,
    num_clauses: usize,
    num_solves: usize,
    assumptions: Vec<Lit>,
    released: bool,
}

impl<S> Session<S>
where
    S: Solver + Default,
{
    /// Create a session over a default-constructed solver.
    pub fn create<I, C>(clauses: I, config: &Config) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: std::borrow::Borrow<i32>,
    {
        Self::with_solver(S::default(), clauses, config)
    }
}

impl<S> Session<S>
where
    S: Solver,
{
    /// Create a session over the given solver.
    ///
    /// Configuration and clauses are validated before the solver is touched.
    /// On failure the solver is released.
    pub fn with_solver<I, C>(solver: S, clauses: I, config: &Config) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: std::borrow::Borrow<i32>,
    {
        let mut session = Session {
            solver,
            config: *config,
            num_clauses: 0,
            num_solves: 0,
            assumptions: Vec::new(),
            released: false,
        };

        config.validate()?;
        let seed = config.core_seed()?;
        let cnf = Cnf::try_from_ints(clauses)?;
        session.check_vars(cnf.iter().flat_map(|clause| clause.iter()))?;

        session.solver.set_seed(seed);
        session.solver.set_initialization(config.initialization);
        session.solver.set_propagation_limit(config.effort_limit);
        session.push_cnf(&cnf);

        info!(
            "Created session over {} with {} clauses on {} variables, {}",
            session.solver.signature(),
            session.num_clauses,
            session.solver.num_vars(),
            config
        );
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn num_vars(&self) -> usize {
        self.solver.num_vars()
    }

    /// Number of clauses added through this session, counting duplicates.
    pub fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    pub fn num_solves(&self) -> usize {
        self.num_solves
    }

    pub fn pending_assumptions(&self) -> &[Lit] {
        &self.assumptions
    }

    /// Add a batch of clauses. Nothing is added if any clause is malformed.
    pub fn add_clauses<I, C>(&mut self, clauses: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: std::borrow::Borrow<i32>,
    {
        let cnf = Cnf::try_from_ints(clauses)?;
        self.check_vars(cnf.iter().flat_map(|clause| clause.iter()))?;
        self.add_cnf(&cnf);
        Ok(())
    }

    /// Add already validated clauses.
    pub fn add_cnf(&mut self, cnf: &Cnf) {
        self.solver.reset_phases();
        self.push_cnf(cnf);
    }

    fn push_cnf(&mut self, cnf: &Cnf) {
        debug!("Adding {} clauses...", cnf.len());
        for clause in cnf.iter() {
            self.solver.add_clause(&clause.lits);
        }
        self.num_clauses += cnf.len();
    }

    /// Reject variables beyond what the solver supports.
    fn check_vars<'a, I>(&self, lits: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Lit>,
    {
        let max_var = self.solver.max_var();
        match lits.into_iter().find(|lit| lit.var() > max_var) {
            Some(lit) => LiteralOutOfRangeSnafu { value: lit.get() }.fail(),
            None => Ok(()),
        }
    }

    /// Replace the assumptions for the next `solve` call.
    pub fn assume<I>(&mut self, lits: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<i32>,
    {
        let lits = try_lits(lits)?;
        self.check_vars(lits.iter())?;
        self.assumptions = lits;
        debug!("Assuming {:?}", self.assumptions.iter().map(|lit| lit.get()).collect::<Vec<_>>());
        Ok(())
    }

    /// Change the effort limit of subsequent `solve` calls; `None` removes it.
    pub fn set_effort_limit(&mut self, limit: Option<u64>) -> Result<()> {
        validate_effort_limit(limit)?;
        self.config.effort_limit = limit;
        self.solver.set_propagation_limit(limit);
        Ok(())
    }

    /// Make the next search start from the configured initial phases again.
    pub fn reset_phases(&mut self) {
        self.solver.reset_phases();
    }

    /// Solve the formula under the pending assumptions, consuming them.
    pub fn solve(&mut self) -> Outcome {
        let assumptions = std::mem::take(&mut self.assumptions);
        for &lit in assumptions.iter() {
            self.solver.assume(lit);
        }
        self.num_solves += 1;

        let outcome = match self.solver.solve() {
            SolveResponse::Sat => Outcome::Satisfiable(Assignment::from_solver(&self.solver)),
            SolveResponse::Unsat => Outcome::Unsatisfiable,
            SolveResponse::Unknown => {
                if self.config.effort_limit.is_none() {
                    warn!("{} gave up without an effort limit", self.solver.signature());
                }
                Outcome::Unknown
            }
        };

        info!(
            "Solve #{} under {} assumptions: {}",
            self.num_solves,
            assumptions.len(),
            outcome
        );
        outcome
    }

    /// Lazily enumerate all distinct solutions.
    pub fn solutions(self) -> SolutionIter<S> {
        SolutionIter::new(self)
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            debug!("Releasing {}", self.solver.signature());
            self.solver.release();
        }
    }
}

impl<S> Drop for Session<S>
where
    S: Solver,
{
    fn drop(&mut self) {
        self.release();
    }
}

impl<S> Display for Session<S>
where
    S: Solver,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session<{}>(vars={}, clauses={}, solves={})",
            tynm::type_name::<S>(),
            self.num_vars(),
            self.num_clauses,
            self.num_solves
        )
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::config::Initialization;
    use crate::error::Error;
    use crate::solver::mock::MockSolver;

    use super::*;

    fn lits(raw: &[i32]) -> Vec<Lit> {
        raw.iter().map(|&x| Lit::new(x)).collect()
    }

    #[test]
    fn test_create_applies_config() -> color_eyre::Result<()> {
        let solver = MockSolver::new();
        let log = solver.handle();
        let config = Config::new()
            .with_seed(2)
            .with_initialization(Initialization::Random)
            .with_effort_limit(Some(100));
        let session = Session::with_solver(solver, [vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]], &config)?;

        assert_eq!(session.num_clauses(), 3);
        assert_eq!(session.num_vars(), 5);
        assert_eq!(session.config(), &config);
        {
            let log = log.borrow();
            assert_eq!(log.seed, Some(2));
            assert_eq!(log.initialization, Some(Initialization::Random));
            assert_eq!(log.propagation_limit, Some(100));
            assert_eq!(log.clauses[2], lits(&[-3, -4]));
        }

        drop(session);
        assert_eq!(log.borrow().releases, 1);
        Ok(())
    }

    #[test]
    fn test_create_rejects_bad_config() {
        let solver = MockSolver::new();
        let log = solver.handle();
        let config = Config::new().with_seed(-1);
        let result = Session::with_solver(solver, [[1]], &config);
        assert!(matches!(result, Err(Error::Configuration { .. })));

        // Nothing reached the solver, but it was released once.
        let log = log.borrow();
        assert!(log.clauses.is_empty());
        assert_eq!(log.seed, None);
        assert_eq!(log.releases, 1);
    }

    #[test]
    fn test_create_rejects_zero_literal() {
        let solver = MockSolver::new();
        let log = solver.handle();
        let result = Session::with_solver(solver, [vec![1, 2], vec![0]], &Config::default());
        assert!(matches!(result, Err(Error::ZeroLiteral { .. })));
        assert!(log.borrow().clauses.is_empty());
        assert_eq!(log.borrow().releases, 1);
    }

    #[test]
    fn test_add_clauses_is_all_or_nothing() -> color_eyre::Result<()> {
        let mut session = Session::<MockSolver>::create([[1, 2]], &Config::default())?;
        let log = session.solver().handle();

        let result = session.add_clauses([vec![3], vec![4, 0]]);
        assert!(matches!(result, Err(Error::ZeroLiteral { .. })));
        assert_eq!(session.num_clauses(), 1);
        assert_eq!(log.borrow().clauses.len(), 1);

        session.add_clauses([vec![3], vec![], vec![-4, 5]])?;
        assert_eq!(session.num_clauses(), 4);
        assert_eq!(log.borrow().clauses[2], lits(&[]));
        assert_eq!(log.borrow().phase_resets, 1);
        Ok(())
    }

    #[test]
    fn test_assumptions_apply_to_one_solve() -> color_eyre::Result<()> {
        let mut session = Session::<MockSolver>::create([[20]], &Config::default())?;
        let log = session.solver().handle();

        session.assume([1, -2])?;
        session.assume([3, 4])?;
        assert_eq!(session.pending_assumptions(), lits(&[3, 4]).as_slice());

        let outcome = session.solve();
        let assignment = outcome.assignment().expect("mock answers SAT");
        assert_eq!(assignment.value(3), Some(true));
        assert_eq!(assignment.value(1), Some(false));
        assert!(session.pending_assumptions().is_empty());

        session.solve();
        assert_eq!(log.borrow().solves, vec![lits(&[3, 4]), vec![]]);
        assert_eq!(session.num_solves(), 2);
        Ok(())
    }

    #[test]
    fn test_assume_rejects_malformed() -> color_eyre::Result<()> {
        let mut session = Session::<MockSolver>::create(Vec::<Vec<i32>>::new(), &Config::default())?;
        session.assume([1])?;
        assert!(matches!(session.assume([2, 0]), Err(Error::ZeroLiteral { .. })));
        assert!(matches!(
            session.assume([i32::MIN]),
            Err(Error::LiteralOutOfRange { .. })
        ));
        // Pending assumptions are untouched by a failed call:
        assert_eq!(session.pending_assumptions(), lits(&[1]).as_slice());
        Ok(())
    }

    #[test]
    fn test_unknown_is_surfaced() -> color_eyre::Result<()> {
        let solver = MockSolver::with_responses([SolveResponse::Unknown, SolveResponse::Unsat]);
        let config = Config::new().with_effort_limit(Some(1));
        let mut session = Session::with_solver(solver, [[1]], &config)?;
        let log = session.solver().handle();

        let outcome = session.solve();
        assert_eq!(outcome, Outcome::Unknown);
        assert!(matches!(
            outcome.into_result(session.config().effort_limit),
            Err(Error::Unknown { limit: Some(1) })
        ));
        assert_eq!(session.solve(), Outcome::Unsatisfiable);

        assert!(session.set_effort_limit(Some(0)).is_err());
        session.set_effort_limit(None)?;
        assert_eq!(log.borrow().propagation_limit, None);
        assert_eq!(session.config().effort_limit, None);
        Ok(())
    }

    #[test]
    fn test_release_once_after_unknown() -> color_eyre::Result<()> {
        let solver = MockSolver::with_responses([SolveResponse::Unknown]);
        let log = solver.handle();
        let config = Config::new().with_effort_limit(Some(1));
        let mut session = Session::with_solver(solver, [[1, 2]], &config)?;

        assert_eq!(session.solve(), Outcome::Unknown);
        drop(session);
        assert_eq!(log.borrow().releases, 1);
        Ok(())
    }

    #[test]
    fn test_variables_beyond_solver_limit() -> color_eyre::Result<()> {
        let solver = MockSolver::new().with_max_var(10);
        let log = solver.handle();
        let result = Session::with_solver(solver, [vec![1], vec![-11, 2]], &Config::default());
        assert!(matches!(result, Err(Error::LiteralOutOfRange { value: -11 })));
        assert!(log.borrow().clauses.is_empty());
        assert_eq!(log.borrow().releases, 1);

        let mut session = Session::with_solver(MockSolver::new().with_max_var(10), [[10]], &Config::default())?;
        assert!(matches!(
            session.add_clauses([vec![1], vec![12]]),
            Err(Error::LiteralOutOfRange { value: 12 })
        ));
        assert_eq!(session.num_clauses(), 1);

        session.assume([3])?;
        assert!(matches!(
            session.assume([4, -20]),
            Err(Error::LiteralOutOfRange { value: -20 })
        ));
        assert_eq!(session.pending_assumptions(), lits(&[3]).as_slice());
        Ok(())
    }

    #[test]
    fn test_display() -> color_eyre::Result<()> {
        let session = Session::<MockSolver>::create([[1, 2], [-1, 3]], &Config::default())?;
        assert_eq!(format!("{}", session), "Session<MockSolver>(vars=3, clauses=2, solves=0)");
        Ok(())
    }
}

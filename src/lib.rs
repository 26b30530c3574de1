//! Incremental SAT solving sessions.
//!
//! The two entry points are [solve] for a single answer and [open_session]
//! for lazily enumerating all solutions while adding clauses and assumptions
//! between solves.

use std::borrow::Borrow;

use log::info;

pub use satyrn_core as core;
pub use satyrn_wrappers as wrappers;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::model::Assignment;
use crate::core::op::allsat::SolutionIter;
use crate::core::session::Session;
use crate::wrappers::SimpleSatSolver;

/// Solve the formula once.
///
/// Fails with `Unsatisfiable` or, when the effort limit runs out, with `Unknown`.
pub fn solve<I, C>(clauses: I, config: &Config) -> Result<Assignment>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Borrow<i32>,
{
    solve_with_assumptions(clauses, std::iter::empty::<i32>(), config)
}

/// Solve the formula once under the given assumptions.
pub fn solve_with_assumptions<I, C, A>(clauses: I, assumptions: A, config: &Config) -> Result<Assignment>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Borrow<i32>,
    A: IntoIterator,
    A::Item: Borrow<i32>,
{
    let mut session = Session::<SimpleSatSolver>::create(clauses, config)?;
    session.assume(assumptions)?;
    let outcome = session.solve();
    info!("One-shot solve: {}", outcome);
    outcome.into_result(config.effort_limit)
}

/// Open an incremental session and enumerate its solutions.
pub fn open_session<I, C>(clauses: I, config: &Config) -> Result<SolutionIter<SimpleSatSolver>>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Borrow<i32>,
{
    Session::create(clauses, config).map(Session::solutions)
}

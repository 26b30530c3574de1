use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use itertools::Itertools;

use crate::config::Initialization;
use crate::lit::Lit;

use super::types::*;
use super::Solver;

/// Everything the [MockSolver] was asked to do.
#[derive(Debug, Default)]
pub struct MockLog {
    pub clauses: Vec<Vec<Lit>>,
    /// Assumptions seen by each `solve` call.
    pub solves: Vec<Vec<Lit>>,
    pub seed: Option<u32>,
    pub initialization: Option<Initialization>,
    pub propagation_limit: Option<u64>,
    pub phase_resets: usize,
    pub releases: usize,
}

/// Shared view of a [MockLog], usable after the solver was moved or dropped.
pub type MockHandle = Rc<RefCell<MockLog>>;

/// Scripted solver: answers `solve` calls from a queue of responses (SAT once it runs dry),
/// and reports every assumed literal as true, everything else as false.
#[derive(Debug)]
pub struct MockSolver {
    nvars: usize,
    max_var: u32,
    responses: VecDeque<SolveResponse>,
    pending: Vec<Lit>,
    model: Vec<Lit>,
    log: MockHandle,
}

impl MockSolver {
    pub fn new() -> Self {
        Self::with_responses([])
    }

    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = SolveResponse>,
    {
        Self {
            nvars: 0,
            max_var: i32::MAX as u32,
            responses: responses.into_iter().collect(),
            pending: Vec::new(),
            model: Vec::new(),
            log: MockHandle::default(),
        }
    }

    /// Limit the accepted variable indices.
    pub fn with_max_var(mut self, max_var: u32) -> Self {
        self.max_var = max_var;
        self
    }

    pub fn handle(&self) -> MockHandle {
        Rc::clone(&self.log)
    }

    fn touch(&mut self, lit: Lit) {
        self.nvars = self.nvars.max(lit.var() as usize);
    }
}

impl Default for MockSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MockSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Solver for MockSolver {
    fn signature(&self) -> Cow<str> {
        "mock".into()
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.log.borrow().clauses.len()
    }

    fn max_var(&self) -> u32 {
        self.max_var
    }

    fn new_var(&mut self) -> Lit {
        self.nvars += 1;
        Lit::from_var(self.nvars as u32)
    }

    fn assume<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        self.touch(lit);
        self.pending.push(lit);
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits = lits.into_iter().map_into::<Lit>().collect_vec();
        for &lit in lits.iter() {
            self.touch(lit);
        }
        self.log.borrow_mut().clauses.push(lits);
    }

    fn solve(&mut self) -> SolveResponse {
        let assumptions = std::mem::take(&mut self.pending);
        let response = self.responses.pop_front().unwrap_or(SolveResponse::Sat);
        self.model = if response == SolveResponse::Sat {
            assumptions.clone()
        } else {
            Vec::new()
        };
        self.log.borrow_mut().solves.push(assumptions);
        response
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        if self.model.contains(&lit) {
            LitValue::True
        } else if self.model.contains(&-lit) {
            LitValue::False
        } else {
            LitValue::from(lit.is_negative())
        }
    }

    fn set_seed(&mut self, seed: u32) {
        self.log.borrow_mut().seed = Some(seed);
    }

    fn set_initialization(&mut self, initialization: Initialization) {
        self.log.borrow_mut().initialization = Some(initialization);
    }

    fn set_propagation_limit(&mut self, limit: Option<u64>) {
        self.log.borrow_mut().propagation_limit = limit;
    }

    fn reset_phases(&mut self) {
        self.log.borrow_mut().phase_resets += 1;
    }
}

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

use itertools::Itertools;
use tap::Pipe;

use satyrn_core::config::Initialization;
use satyrn_core::lit::Lit;
use satyrn_core::solver::{LitValue, SolveResponse, Solver};
use simple_sat::lit::Lit as SimpleSatLit;
use simple_sat::options::PhaseInit;
use simple_sat::solver::Solver as SimpleSat;

pub struct SimpleSatSolver {
    inner: SimpleSat,
    assumptions: Vec<SimpleSatLit>,
    nclauses: usize,
}

impl SimpleSatSolver {
    pub fn new() -> Self {
        Self::new_custom(SimpleSat::default())
    }

    pub fn new_custom(inner: SimpleSat) -> Self {
        Self {
            inner,
            assumptions: Vec::new(),
            nclauses: 0,
        }
    }

    pub fn inner(&self) -> &SimpleSat {
        &self.inner
    }
}

impl Default for SimpleSatSolver {
    fn default() -> Self {
        SimpleSatSolver::new()
    }
}

impl From<SimpleSat> for SimpleSatSolver {
    fn from(inner: SimpleSat) -> Self {
        SimpleSatSolver::new_custom(inner)
    }
}

impl Debug for SimpleSatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleSatSolver").field("inner", &self.inner).finish()
    }
}

impl Display for SimpleSatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.inner)
    }
}

impl Solver for SimpleSatSolver {
    fn signature(&self) -> Cow<str> {
        "simple-sat".into()
    }

    fn release(&mut self) {
        self.inner.release();
        self.assumptions.clear();
        self.nclauses = 0;
    }

    fn num_vars(&self) -> usize {
        self.inner.num_vars()
    }
    fn num_clauses(&self) -> usize {
        self.nclauses
    }

    fn max_var(&self) -> u32 {
        simple_sat::solver::MAX_VAR
    }

    fn new_var(&mut self) -> Lit {
        let var = self.inner.new_var();
        let lit = SimpleSatLit::new(var, false);
        from_ss(lit)
    }

    fn assume<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        self.assumptions.push(lit.into().pipe(to_ss));
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits = lits.into_iter().map_into::<Lit>().map(to_ss).collect_vec();
        self.inner.add_clause(&lits);
        self.nclauses += 1;
    }

    fn solve(&mut self) -> SolveResponse {
        use simple_sat::solver::SolveResult;
        let assumptions = std::mem::take(&mut self.assumptions);
        match self.inner.solve_under_assumptions(&assumptions) {
            SolveResult::Sat => SolveResponse::Sat,
            SolveResult::Unsat => SolveResponse::Unsat,
            SolveResult::Unknown => SolveResponse::Unknown,
        }
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        use simple_sat::lbool::LBool;
        match self.inner.value(lit.into().pipe(to_ss)) {
            LBool::True => LitValue::True,
            LBool::False => LitValue::False,
            LBool::Undef => LitValue::DontCare,
        }
    }

    fn set_seed(&mut self, seed: u32) {
        self.inner.set_seed(seed as u64);
    }

    fn set_initialization(&mut self, initialization: Initialization) {
        let phase_init = match initialization {
            Initialization::Default => PhaseInit::JeroslowWang,
            Initialization::Random => PhaseInit::Random,
        };
        self.inner.set_phase_init(phase_init);
    }

    fn set_propagation_limit(&mut self, limit: Option<u64>) {
        self.inner.set_propagation_limit(limit);
    }

    fn reset_phases(&mut self) {
        self.inner.reset_phases();
    }
}

fn to_ss(lit: Lit) -> SimpleSatLit {
    let lit = lit.get();
    debug_assert_ne!(lit, 0, "Literal must be non-zero");
    SimpleSatLit::from_external(lit)
}

fn from_ss(lit: SimpleSatLit) -> Lit {
    let lit = lit.to_external();
    debug_assert_ne!(lit, 0, "Literal must be non-zero");
    Lit::new(lit)
}
